//! Error types for the fraud check pipeline

use std::path::PathBuf;

/// Errors raised while loading artifacts or scoring a transaction.
#[derive(thiserror::Error, Debug)]
pub enum PipelineError {
    /// Transaction type outside the encoder's fitted vocabulary.
    #[error("Unknown transaction type '{category}' (expected one of: {})", known.join(", "))]
    UnknownCategory {
        /// The rejected category.
        category: String,
        /// Classes the encoder was fitted on.
        known: Vec<String>,
    },

    /// Feature layout disagrees with what an artifact was fitted on.
    #[error("Shape mismatch in {stage}: {detail}")]
    ShapeMismatch {
        /// Pipeline stage that detected the mismatch.
        stage: &'static str,
        /// Human readable description of the disagreement.
        detail: String,
    },

    /// A pre-fitted artifact is missing or unreadable.
    #[error("Failed to load {artifact} from {}: {message}", path.display())]
    ArtifactLoad {
        /// Artifact kind (encoder, scaler, classifier).
        artifact: &'static str,
        /// Path that was read.
        path: PathBuf,
        /// Underlying failure.
        message: String,
    },

    /// Classifier runtime failure or invalid output.
    #[error("Inference error: {0}")]
    Inference(String),
}

impl PipelineError {
    /// Build a shape mismatch from expected/actual widths.
    pub fn width_mismatch(stage: &'static str, expected: usize, actual: usize) -> Self {
        Self::ShapeMismatch {
            stage,
            detail: format!("expected {expected} features, got {actual}"),
        }
    }

    /// Build an artifact load failure from any displayable error.
    pub fn artifact_load(
        artifact: &'static str,
        path: impl Into<PathBuf>,
        err: impl std::fmt::Display,
    ) -> Self {
        Self::ArtifactLoad {
            artifact,
            path: path.into(),
            message: err.to_string(),
        }
    }
}

/// Convenience alias for `std::result::Result<T, PipelineError>`.
pub type Result<T> = std::result::Result<T, PipelineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_category_message_lists_vocabulary() {
        let err = PipelineError::UnknownCategory {
            category: "WIRE".to_string(),
            known: vec!["CASH_IN".to_string(), "TRANSFER".to_string()],
        };
        let msg = err.to_string();
        assert!(msg.contains("WIRE"));
        assert!(msg.contains("CASH_IN, TRANSFER"));
    }

    #[test]
    fn test_width_mismatch() {
        let err = PipelineError::width_mismatch("scaler", 16, 15);
        assert!(matches!(err, PipelineError::ShapeMismatch { stage: "scaler", .. }));
        assert!(err.to_string().contains("expected 16 features, got 15"));
    }
}
