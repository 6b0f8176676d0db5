//! Fraud Check Library
//!
//! Scores a single transaction for fraud: engineered features, a pre-fitted
//! scaler and a pre-fitted binary classifier, plus the terminal form and
//! report used by the `fraud-check` binary.

pub mod config;
pub mod error;
pub mod feature_extractor;
pub mod form;
pub mod metrics;
pub mod models;
pub mod pipeline;
pub mod report;
pub mod types;

pub use config::AppConfig;
pub use error::PipelineError;
pub use feature_extractor::{FeatureExtractor, FeatureVector};
pub use models::{Artifacts, ModelLoader};
pub use pipeline::FraudPipeline;
pub use types::{FraudLabel, PredictionResult, TransactionRecord};
