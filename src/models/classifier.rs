//! Classifier capability shared by every model backend

use crate::error::{PipelineError, Result};
use crate::types::FraudLabel;

/// Tolerance on the probability pair summing to one (ONNX outputs are f32).
pub const PROBABILITY_TOLERANCE: f64 = 1e-4;

/// A fitted binary classifier.
pub trait Classifier: Send + Sync {
    /// Predict the class label for one scaled feature vector.
    fn predict_label(&self, features: &[f64]) -> Result<FraudLabel>;

    /// Predict `[P(not fraudulent), P(fraudulent)]` for one scaled feature vector.
    fn predict_proba(&self, features: &[f64]) -> Result<[f64; 2]>;

    /// Predict label and probabilities together.
    ///
    /// Backends that produce both from one evaluation should override this.
    fn predict(&self, features: &[f64]) -> Result<(FraudLabel, [f64; 2])> {
        Ok((self.predict_label(features)?, self.predict_proba(features)?))
    }

    /// Number of input features the model expects.
    fn n_features(&self) -> usize;

    /// Backend name used in logs.
    fn name(&self) -> &str;
}

/// Reject widths the classifier was not trained on.
pub fn check_width(classifier: &dyn Classifier, features: &[f64]) -> Result<()> {
    let expected = classifier.n_features();
    if features.len() != expected {
        return Err(PipelineError::width_mismatch("classifier", expected, features.len()));
    }
    Ok(())
}

/// Validate a probability pair and renormalize it to sum to exactly one.
pub fn normalize_probabilities(probabilities: [f64; 2]) -> Result<[f64; 2]> {
    let [p0, p1] = probabilities;
    let in_range = |p: f64| p.is_finite() && (0.0..=1.0 + PROBABILITY_TOLERANCE).contains(&p);

    if !in_range(p0) || !in_range(p1) {
        return Err(PipelineError::Inference(format!(
            "probabilities out of range: [{p0}, {p1}]"
        )));
    }

    let total = p0 + p1;
    if (total - 1.0).abs() > PROBABILITY_TOLERANCE {
        return Err(PipelineError::Inference(format!(
            "probabilities sum to {total}, expected 1"
        )));
    }

    Ok([p0 / total, p1 / total])
}
