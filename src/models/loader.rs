//! Loads the pre-fitted encoder, scaler and classifier once at startup

use crate::config::{ClassifierFormat, ModelsConfig};
use crate::error::{PipelineError, Result};
use crate::models::classifier::Classifier;
use crate::models::encoder::{CategoryEncoder, LabelEncoder};
use crate::models::inference::OnnxClassifier;
use crate::models::linear::LinearClassifier;
use crate::models::scaler::{FeatureScaler, StandardScaler};
use tracing::info;

/// Immutable handle to the three fitted artifacts.
pub struct Artifacts {
    pub encoder: Box<dyn CategoryEncoder>,
    pub scaler: Box<dyn FeatureScaler>,
    pub classifier: Box<dyn Classifier>,
}

impl Artifacts {
    /// Assemble artifacts, rejecting a scaler and classifier of different widths.
    pub fn new(
        encoder: Box<dyn CategoryEncoder>,
        scaler: Box<dyn FeatureScaler>,
        classifier: Box<dyn Classifier>,
    ) -> Result<Self> {
        if scaler.n_features() != classifier.n_features() {
            return Err(PipelineError::ShapeMismatch {
                stage: "artifacts",
                detail: format!(
                    "scaler expects {} features but classifier '{}' expects {}",
                    scaler.n_features(),
                    classifier.name(),
                    classifier.n_features()
                ),
            });
        }

        Ok(Self {
            encoder,
            scaler,
            classifier,
        })
    }
}

/// Loader for fitted artifacts
pub struct ModelLoader {
    /// Number of threads for ONNX inference
    onnx_threads: usize,
}

impl ModelLoader {
    pub fn new() -> Self {
        Self::with_threads(1)
    }

    pub fn with_threads(onnx_threads: usize) -> Self {
        Self { onnx_threads }
    }

    /// Load encoder, scaler and classifier from the configured paths.
    pub fn load_artifacts(&self, config: &ModelsConfig) -> Result<Artifacts> {
        let encoder_path = config.encoder_path();
        let encoder = LabelEncoder::load(&encoder_path)?;
        info!(
            path = %encoder_path.display(),
            classes = ?encoder.classes(),
            "Label encoder loaded"
        );

        let scaler_path = config.scaler_path();
        let scaler = StandardScaler::load(&scaler_path)?;
        info!(
            path = %scaler_path.display(),
            features = scaler.n_features(),
            "Standard scaler loaded"
        );

        let classifier_path = config.classifier_path();
        let classifier: Box<dyn Classifier> = match config.classifier_format {
            // Models with a symbolic feature dimension take the scaler's width
            ClassifierFormat::Onnx => Box::new(OnnxClassifier::load(
                &classifier_path,
                scaler.n_features(),
                self.onnx_threads,
            )?),
            ClassifierFormat::Linear => Box::new(LinearClassifier::load(&classifier_path)?),
        };
        info!(
            path = %classifier_path.display(),
            model = classifier.name(),
            features = classifier.n_features(),
            "Classifier loaded"
        );

        Artifacts::new(Box::new(encoder), Box::new(scaler), classifier)
    }
}

impl Default for ModelLoader {
    fn default() -> Self {
        Self::new()
    }
}
