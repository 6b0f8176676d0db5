//! End-to-end fraud check: features, scaling, classification

use crate::error::Result;
use crate::feature_extractor::FeatureExtractor;
use crate::models::classifier::normalize_probabilities;
use crate::models::loader::Artifacts;
use crate::types::{PredictionResult, TransactionRecord};
use tracing::debug;

/// Scores transactions against borrowed, immutable artifacts.
///
/// Holds no per-request state, so identical records always produce
/// identical results.
pub struct FraudPipeline<'a> {
    artifacts: &'a Artifacts,
    extractor: FeatureExtractor,
}

impl<'a> FraudPipeline<'a> {
    pub fn new(artifacts: &'a Artifacts) -> Self {
        Self {
            artifacts,
            extractor: FeatureExtractor::new(),
        }
    }

    /// Score one transaction. Any failure is returned as is, without retry.
    pub fn predict(&self, record: &TransactionRecord) -> Result<PredictionResult> {
        let features = self
            .extractor
            .extract(record, self.artifacts.encoder.as_ref())?;

        let scaled = self
            .artifacts
            .scaler
            .scale(self.extractor.feature_names(), &features.to_array())?;

        let classifier = self.artifacts.classifier.as_ref();
        let (label, probabilities) = classifier.predict(&scaled)?;
        let probabilities = normalize_probabilities(probabilities)?;

        debug!(
            model = classifier.name(),
            label = ?label,
            fraud_probability = probabilities[1],
            "Transaction scored"
        );

        Ok(PredictionResult::new(label, probabilities))
    }
}
