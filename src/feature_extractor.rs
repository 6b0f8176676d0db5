//! Feature extraction for fraud classifier inference.
//!
//! Derives the engineered features the scaler and classifier were fitted on.
//! Column order is fixed and must match the training layout exactly.

use crate::error::Result;
use crate::models::encoder::CategoryEncoder;
use crate::types::transaction::TransactionRecord;

/// Number of features produced per transaction.
pub const FEATURE_COUNT: usize = 16;

/// Column names in training order.
pub const FEATURE_COLUMNS: [&str; FEATURE_COUNT] = [
    "step",
    "amount",
    "oldbalanceOrg",
    "newbalanceOrig",
    "oldbalanceDest",
    "newbalanceDest",
    "type_encoded",
    "balanceOrig_diff",
    "balanceDest_diff",
    "amount_to_oldbalanceOrg_ratio",
    "amount_to_oldbalanceDest_ratio",
    "is_zero_oldbalanceOrg",
    "is_zero_newbalanceOrig",
    "is_zero_oldbalanceDest",
    "is_zero_newbalanceDest",
    "is_merchant",
];

/// Engineered features for one transaction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector {
    pub step: f64,
    pub amount: f64,
    pub old_balance_orig: f64,
    pub new_balance_orig: f64,
    pub old_balance_dest: f64,
    pub new_balance_dest: f64,
    pub type_encoded: f64,
    pub balance_orig_diff: f64,
    pub balance_dest_diff: f64,
    pub amount_to_old_balance_orig_ratio: f64,
    pub amount_to_old_balance_dest_ratio: f64,
    pub is_zero_old_balance_orig: f64,
    pub is_zero_new_balance_orig: f64,
    pub is_zero_old_balance_dest: f64,
    pub is_zero_new_balance_dest: f64,
    pub is_merchant: f64,
}

impl FeatureVector {
    /// Values in [`FEATURE_COLUMNS`] order.
    pub fn to_array(&self) -> [f64; FEATURE_COUNT] {
        [
            self.step,
            self.amount,
            self.old_balance_orig,
            self.new_balance_orig,
            self.old_balance_dest,
            self.new_balance_dest,
            self.type_encoded,
            self.balance_orig_diff,
            self.balance_dest_diff,
            self.amount_to_old_balance_orig_ratio,
            self.amount_to_old_balance_dest_ratio,
            self.is_zero_old_balance_orig,
            self.is_zero_new_balance_orig,
            self.is_zero_old_balance_dest,
            self.is_zero_new_balance_dest,
            self.is_merchant,
        ]
    }
}

/// `amount / balance`, or 0 when the balance is not positive.
fn guarded_ratio(amount: f64, balance: f64) -> f64 {
    if balance > 0.0 {
        amount / balance
    } else {
        0.0
    }
}

fn indicator(condition: bool) -> f64 {
    if condition {
        1.0
    } else {
        0.0
    }
}

/// Feature extractor that transforms transaction records into model input features.
pub struct FeatureExtractor;

impl FeatureExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Extract features from a transaction.
    ///
    /// Fails only if the encoder does not know the transaction type.
    pub fn extract(
        &self,
        tx: &TransactionRecord,
        encoder: &dyn CategoryEncoder,
    ) -> Result<FeatureVector> {
        let type_encoded = encoder.encode(&tx.transaction_type)?;

        Ok(FeatureVector {
            step: tx.step as f64,
            amount: tx.amount,
            old_balance_orig: tx.old_balance_orig,
            new_balance_orig: tx.new_balance_orig,
            old_balance_dest: tx.old_balance_dest,
            new_balance_dest: tx.new_balance_dest,
            type_encoded: type_encoded as f64,
            balance_orig_diff: tx.old_balance_orig - tx.new_balance_orig,
            balance_dest_diff: tx.old_balance_dest - tx.new_balance_dest,
            amount_to_old_balance_orig_ratio: guarded_ratio(tx.amount, tx.old_balance_orig),
            amount_to_old_balance_dest_ratio: guarded_ratio(tx.amount, tx.old_balance_dest),
            is_zero_old_balance_orig: indicator(tx.old_balance_orig == 0.0),
            is_zero_new_balance_orig: indicator(tx.new_balance_orig == 0.0),
            is_zero_old_balance_dest: indicator(tx.old_balance_dest == 0.0),
            is_zero_new_balance_dest: indicator(tx.new_balance_dest == 0.0),
            // Case-sensitive, no validation of the C/M convention
            is_merchant: indicator(tx.name_dest.starts_with('M')),
        })
    }

    /// Get feature names in training order.
    pub fn feature_names(&self) -> &'static [&'static str] {
        &FEATURE_COLUMNS
    }
}

impl Default for FeatureExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PipelineError;
    use crate::models::encoder::LabelEncoder;
    use crate::types::TRANSACTION_TYPES;

    fn encoder() -> LabelEncoder {
        LabelEncoder::fit(TRANSACTION_TYPES).unwrap()
    }

    fn extract(tx: &TransactionRecord) -> FeatureVector {
        FeatureExtractor::new().extract(tx, &encoder()).unwrap()
    }

    #[test]
    fn test_transfer_emptying_origin() {
        let tx = TransactionRecord::new(1, "TRANSFER", 1000.0, "C999")
            .with_origin_balances(1000.0, 0.0)
            .with_dest_balances(0.0, 1000.0);

        let f = extract(&tx);

        assert_eq!(f.step, 1.0);
        assert_eq!(f.type_encoded, 4.0);
        assert_eq!(f.balance_orig_diff, 1000.0);
        assert_eq!(f.balance_dest_diff, -1000.0);
        assert_eq!(f.amount_to_old_balance_orig_ratio, 1.0);
        assert_eq!(f.amount_to_old_balance_dest_ratio, 0.0);
        assert_eq!(f.is_zero_old_balance_orig, 0.0);
        assert_eq!(f.is_zero_new_balance_orig, 1.0);
        assert_eq!(f.is_zero_old_balance_dest, 1.0);
        assert_eq!(f.is_zero_new_balance_dest, 0.0);
        assert_eq!(f.is_merchant, 0.0);
    }

    #[test]
    fn test_zero_origin_balance_ratio() {
        let tx = TransactionRecord::new(5, "CASH_OUT", 500.0, "C1");

        let f = extract(&tx);

        assert_eq!(f.amount_to_old_balance_orig_ratio, 0.0);
        assert_eq!(f.is_zero_old_balance_orig, 1.0);
    }

    #[test]
    fn test_ratio_uses_plain_division() {
        let tx = TransactionRecord::new(1, "PAYMENT", 250.0, "M1")
            .with_origin_balances(1000.0, 750.0)
            .with_dest_balances(500.0, 750.0);

        let f = extract(&tx);

        assert_eq!(f.amount_to_old_balance_orig_ratio, 0.25);
        assert_eq!(f.amount_to_old_balance_dest_ratio, 0.5);
    }

    #[test]
    fn test_zero_flags_at_boundary() {
        let eps = 1e-9;
        let zero = TransactionRecord::new(1, "DEBIT", 1.0, "C1");
        let tiny = zero
            .clone()
            .with_origin_balances(eps, eps)
            .with_dest_balances(eps, eps);

        let f = extract(&zero);
        assert_eq!(f.is_zero_old_balance_orig, 1.0);
        assert_eq!(f.is_zero_new_balance_orig, 1.0);
        assert_eq!(f.is_zero_old_balance_dest, 1.0);
        assert_eq!(f.is_zero_new_balance_dest, 1.0);

        let f = extract(&tiny);
        assert_eq!(f.is_zero_old_balance_orig, 0.0);
        assert_eq!(f.is_zero_new_balance_orig, 0.0);
        assert_eq!(f.is_zero_old_balance_dest, 0.0);
        assert_eq!(f.is_zero_new_balance_dest, 0.0);
    }

    #[test]
    fn test_merchant_prefix() {
        let cases = [("M123", 1.0), ("C123", 0.0), ("", 0.0), ("m123", 0.0)];

        for (name, expected) in cases {
            let tx = TransactionRecord::new(1, "PAYMENT", 10.0, name);
            assert_eq!(extract(&tx).is_merchant, expected, "nameDest = {name:?}");
        }
    }

    #[test]
    fn test_unknown_type() {
        let tx = TransactionRecord::new(1, "WIRE", 10.0, "C1");
        let err = FeatureExtractor::new().extract(&tx, &encoder()).unwrap_err();
        assert!(matches!(err, PipelineError::UnknownCategory { .. }));
    }

    #[test]
    fn test_array_follows_column_order() {
        let tx = TransactionRecord::new(7, "CASH_IN", 3.0, "M5")
            .with_origin_balances(10.0, 13.0)
            .with_dest_balances(6.0, 3.0);

        let values = extract(&tx).to_array();

        let column = |name: &str| {
            let idx = FEATURE_COLUMNS.iter().position(|c| *c == name).unwrap();
            values[idx]
        };
        assert_eq!(column("step"), 7.0);
        assert_eq!(column("amount"), 3.0);
        assert_eq!(column("newbalanceOrig"), 13.0);
        assert_eq!(column("type_encoded"), 0.0);
        assert_eq!(column("balanceOrig_diff"), -3.0);
        assert_eq!(column("amount_to_oldbalanceDest_ratio"), 0.5);
        assert_eq!(column("is_merchant"), 1.0);
    }

    #[test]
    fn test_feature_names_match_vector_width() {
        let extractor = FeatureExtractor::new();
        let tx = TransactionRecord::new(1, "CASH_IN", 1.0, "C1");

        assert_eq!(extractor.feature_names().len(), extract(&tx).to_array().len());
        assert_eq!(extractor.feature_names()[6], "type_encoded");
    }
}
