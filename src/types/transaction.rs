//! Transaction record submitted for a fraud check

use serde::{Deserialize, Serialize};

/// Transaction types offered by the form, in display order.
pub const TRANSACTION_TYPES: [&str; 5] = ["CASH_IN", "CASH_OUT", "DEBIT", "PAYMENT", "TRANSFER"];

/// A raw transaction as entered by the user.
///
/// Field aliases accept the column names used in the training data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// Time step of the transaction (1 step = 1 hour)
    pub step: u64,

    /// Transaction type, validated by the encoder rather than here
    #[serde(rename = "type")]
    pub transaction_type: String,

    /// Amount transferred
    pub amount: f64,

    /// Origin balance before the transaction
    #[serde(alias = "oldbalanceOrg")]
    pub old_balance_orig: f64,

    /// Origin balance after the transaction
    #[serde(alias = "newbalanceOrig")]
    pub new_balance_orig: f64,

    /// Destination balance before the transaction
    #[serde(alias = "oldbalanceDest")]
    pub old_balance_dest: f64,

    /// Destination balance after the transaction
    #[serde(alias = "newbalanceDest")]
    pub new_balance_dest: f64,

    /// Destination account name ('C...' customer, 'M...' merchant)
    #[serde(alias = "nameDest")]
    pub name_dest: String,
}

impl TransactionRecord {
    /// Create a record with zero balances.
    pub fn new(step: u64, transaction_type: &str, amount: f64, name_dest: &str) -> Self {
        Self {
            step,
            transaction_type: transaction_type.to_string(),
            amount,
            old_balance_orig: 0.0,
            new_balance_orig: 0.0,
            old_balance_dest: 0.0,
            new_balance_dest: 0.0,
            name_dest: name_dest.to_string(),
        }
    }

    /// Set origin balances before and after the transaction.
    pub fn with_origin_balances(mut self, old: f64, new: f64) -> Self {
        self.old_balance_orig = old;
        self.new_balance_orig = new;
        self
    }

    /// Set destination balances before and after the transaction.
    pub fn with_dest_balances(mut self, old: f64, new: f64) -> Self {
        self.old_balance_dest = old;
        self.new_balance_dest = new;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_training_column_names() {
        let json = r#"{
            "step": 1,
            "type": "TRANSFER",
            "amount": 181.0,
            "oldbalanceOrg": 181.0,
            "newbalanceOrig": 0.0,
            "oldbalanceDest": 0.0,
            "newbalanceDest": 0.0,
            "nameDest": "C553264065"
        }"#;

        let tx: TransactionRecord = serde_json::from_str(json).unwrap();

        assert_eq!(tx.transaction_type, "TRANSFER");
        assert_eq!(tx.old_balance_orig, 181.0);
        assert_eq!(tx.name_dest, "C553264065");
    }

    #[test]
    fn test_builder() {
        let tx = TransactionRecord::new(3, "PAYMENT", 50.0, "M1")
            .with_origin_balances(100.0, 50.0)
            .with_dest_balances(0.0, 0.0);

        assert_eq!(tx.step, 3);
        assert_eq!(tx.new_balance_orig, 50.0);
        assert_eq!(tx.old_balance_dest, 0.0);
    }
}
