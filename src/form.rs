//! Terminal form collecting transaction details

use crate::types::{TransactionRecord, TRANSACTION_TYPES};
use std::io::{self, BufRead, Write};
use std::str::FromStr;

/// Input that ends the session at any prompt.
const QUIT: &str = "q";

/// Numeric field value accepted by the form.
trait FieldValue: FromStr {
    /// Non-negative and, for reals, finite.
    fn is_acceptable(&self) -> bool;
}

impl FieldValue for u64 {
    fn is_acceptable(&self) -> bool {
        true
    }
}

impl FieldValue for f64 {
    fn is_acceptable(&self) -> bool {
        self.is_finite() && *self >= 0.0
    }
}

/// Prompts for the eight transaction fields, re-asking on invalid input.
pub struct TransactionForm<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> TransactionForm<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Collect one transaction. Returns `None` when the user quits or input ends.
    pub fn prompt(&mut self) -> io::Result<Option<TransactionRecord>> {
        writeln!(self.output, "\nEnter Transaction Details (type '{QUIT}' to quit)")?;

        let Some(step) = self.read_non_negative::<u64>("Step")? else {
            return Ok(None);
        };
        let Some(transaction_type) = self.read_transaction_type()? else {
            return Ok(None);
        };
        let Some(amount) = self.read_non_negative::<f64>("Amount")? else {
            return Ok(None);
        };
        let Some(old_balance_orig) = self.read_non_negative::<f64>("Old Balance (Origin)")? else {
            return Ok(None);
        };
        let Some(new_balance_orig) = self.read_non_negative::<f64>("New Balance (Origin)")? else {
            return Ok(None);
        };
        let Some(old_balance_dest) = self.read_non_negative::<f64>("Old Balance (Destination)")?
        else {
            return Ok(None);
        };
        let Some(new_balance_dest) = self.read_non_negative::<f64>("New Balance (Destination)")?
        else {
            return Ok(None);
        };
        let Some(name_dest) =
            self.read_line("Destination Account Name (e.g., C123456789 or M123456789)")?
        else {
            return Ok(None);
        };

        Ok(Some(TransactionRecord {
            step,
            transaction_type,
            amount,
            old_balance_orig,
            new_balance_orig,
            old_balance_dest,
            new_balance_dest,
            name_dest,
        }))
    }

    /// Read one trimmed line; `None` on end of input or quit.
    fn read_line(&mut self, label: &str) -> io::Result<Option<String>> {
        write!(self.output, "{label}: ")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }

        let value = line.trim();
        if value == QUIT {
            return Ok(None);
        }
        Ok(Some(value.to_string()))
    }

    fn read_non_negative<T: FieldValue>(&mut self, label: &str) -> io::Result<Option<T>> {
        loop {
            let Some(raw) = self.read_line(label)? else {
                return Ok(None);
            };
            match raw.parse::<T>() {
                Ok(value) if value.is_acceptable() => return Ok(Some(value)),
                _ => writeln!(self.output, "  Please enter a finite, non-negative number.")?,
            }
        }
    }

    fn read_transaction_type(&mut self) -> io::Result<Option<String>> {
        for (idx, option) in TRANSACTION_TYPES.iter().enumerate() {
            writeln!(self.output, "  {}) {}", idx + 1, option)?;
        }

        loop {
            let Some(raw) = self.read_line("Transaction Type")? else {
                return Ok(None);
            };

            let by_number = raw
                .parse::<usize>()
                .ok()
                .and_then(|n| n.checked_sub(1))
                .and_then(|idx| TRANSACTION_TYPES.get(idx));
            let by_name = TRANSACTION_TYPES
                .iter()
                .find(|option| option.eq_ignore_ascii_case(&raw));

            match by_number.or(by_name) {
                Some(option) => return Ok(Some(option.to_string())),
                None => writeln!(
                    self.output,
                    "  Please choose 1-{} or one of: {}",
                    TRANSACTION_TYPES.len(),
                    TRANSACTION_TYPES.join(", ")
                )?,
            }
        }
    }

    /// Consume the form and return the output writer.
    pub fn into_output(self) -> W {
        self.output
    }
}
