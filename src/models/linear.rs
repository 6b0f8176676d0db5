//! Logistic regression classifier loaded from JSON coefficients

use crate::error::{PipelineError, Result};
use crate::models::classifier::{check_width, Classifier};
use crate::types::FraudLabel;
use serde::Deserialize;
use std::path::Path;

#[derive(Deserialize)]
#[serde(untagged)]
enum Coefficients {
    Flat(Vec<f64>),
    /// sklearn stores binary coefficients as a single row
    Rows(Vec<Vec<f64>>),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Intercept {
    Scalar(f64),
    Array(Vec<f64>),
}

#[derive(Deserialize)]
struct LinearModelFile {
    #[serde(alias = "coef_")]
    coef: Coefficients,
    #[serde(alias = "intercept_")]
    intercept: Intercept,
}

/// Binary logistic classifier: `P(fraud) = sigmoid(w . x + b)`.
#[derive(Debug, Clone)]
pub struct LinearClassifier {
    coef: Vec<f64>,
    intercept: f64,
}

impl LinearClassifier {
    pub fn new(coef: Vec<f64>, intercept: f64) -> Self {
        Self { coef, intercept }
    }

    /// Load coefficients from JSON: `{"coef": [...], "intercept": b}`.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| PipelineError::artifact_load("classifier", path, e))?;
        let file: LinearModelFile = serde_json::from_str(&raw)
            .map_err(|e| PipelineError::artifact_load("classifier", path, e))?;

        let coef = match file.coef {
            Coefficients::Flat(coef) => coef,
            Coefficients::Rows(mut rows) if rows.len() == 1 => rows.remove(0),
            Coefficients::Rows(rows) => {
                return Err(PipelineError::artifact_load(
                    "classifier",
                    path,
                    format!("expected one coefficient row for a binary model, found {}", rows.len()),
                ))
            }
        };
        let intercept = match file.intercept {
            Intercept::Scalar(b) => b,
            Intercept::Array(values) if values.len() == 1 => values[0],
            Intercept::Array(values) => {
                return Err(PipelineError::artifact_load(
                    "classifier",
                    path,
                    format!("expected one intercept, found {}", values.len()),
                ))
            }
        };

        if coef.is_empty() {
            return Err(PipelineError::artifact_load("classifier", path, "no coefficients"));
        }

        Ok(Self::new(coef, intercept))
    }

    fn decision(&self, features: &[f64]) -> f64 {
        self.coef
            .iter()
            .zip(features)
            .map(|(w, x)| w * x)
            .sum::<f64>()
            + self.intercept
    }
}

impl Classifier for LinearClassifier {
    fn predict_label(&self, features: &[f64]) -> Result<FraudLabel> {
        check_width(self, features)?;
        Ok(if self.decision(features) > 0.0 {
            FraudLabel::Fraudulent
        } else {
            FraudLabel::NotFraudulent
        })
    }

    fn predict_proba(&self, features: &[f64]) -> Result<[f64; 2]> {
        check_width(self, features)?;
        let p1 = 1.0 / (1.0 + (-self.decision(features)).exp());
        Ok([1.0 - p1, p1])
    }

    fn n_features(&self) -> usize {
        self.coef.len()
    }

    fn name(&self) -> &str {
        "logistic_regression"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_probabilities_and_label_agree() {
        let model = LinearClassifier::new(vec![2.0, -1.0], 0.0);

        let proba = model.predict_proba(&[1.0, 0.0]).unwrap();
        assert!(proba[1] > 0.5);
        assert!((proba[0] + proba[1] - 1.0).abs() < 1e-12);
        assert_eq!(model.predict_label(&[1.0, 0.0]).unwrap(), FraudLabel::Fraudulent);

        let proba = model.predict_proba(&[0.0, 1.0]).unwrap();
        assert!(proba[1] < 0.5);
        assert_eq!(model.predict_label(&[0.0, 1.0]).unwrap(), FraudLabel::NotFraudulent);
    }

    #[test]
    fn test_zero_decision_is_not_fraudulent() {
        let model = LinearClassifier::new(vec![1.0], 0.0);
        assert_eq!(model.predict_proba(&[0.0]).unwrap(), [0.5, 0.5]);
        assert_eq!(model.predict_label(&[0.0]).unwrap(), FraudLabel::NotFraudulent);
    }

    #[test]
    fn test_width_mismatch() {
        let model = LinearClassifier::new(vec![1.0, 1.0], 0.0);
        let err = model.predict_proba(&[1.0]).unwrap_err();
        assert!(matches!(err, PipelineError::ShapeMismatch { stage: "classifier", .. }));
    }

    #[test]
    fn test_load_sklearn_layout() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"coef_": [[0.5, -0.25]], "intercept_": [0.1]}}"#).unwrap();

        let model = LinearClassifier::load(file.path()).unwrap();
        assert_eq!(model.n_features(), 2);
        assert!((model.decision(&[2.0, 4.0]) - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_load_rejects_multiclass() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"coef": [[1.0], [2.0]], "intercept": [0.0, 0.0]}}"#).unwrap();

        let err = LinearClassifier::load(file.path()).unwrap_err();
        assert!(matches!(err, PipelineError::ArtifactLoad { artifact: "classifier", .. }));
    }
}
