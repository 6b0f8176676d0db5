//! Type definitions for the fraud check pipeline

pub mod prediction;
pub mod transaction;

pub use prediction::{FraudLabel, PredictionResult};
pub use transaction::{TransactionRecord, TRANSACTION_TYPES};
