//! Prediction result data structures

use serde::{Deserialize, Serialize};

/// Binary fraud verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FraudLabel {
    NotFraudulent,
    Fraudulent,
}

impl FraudLabel {
    /// Map a classifier class index (0 or 1) to a label.
    pub fn from_class(class: i64) -> Option<Self> {
        match class {
            0 => Some(FraudLabel::NotFraudulent),
            1 => Some(FraudLabel::Fraudulent),
            _ => None,
        }
    }

    /// Class index used by the classifier.
    pub fn class_index(self) -> usize {
        match self {
            FraudLabel::NotFraudulent => 0,
            FraudLabel::Fraudulent => 1,
        }
    }

    /// Display name used in reports.
    pub fn display_name(self) -> &'static str {
        match self {
            FraudLabel::NotFraudulent => "Not Fraudulent",
            FraudLabel::Fraudulent => "Fraudulent",
        }
    }
}

/// Outcome of a single fraud check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    /// Predicted label
    pub label: FraudLabel,
    /// Class probabilities: `[not fraudulent, fraudulent]`
    pub probabilities: [f64; 2],
}

impl PredictionResult {
    pub fn new(label: FraudLabel, probabilities: [f64; 2]) -> Self {
        Self {
            label,
            probabilities,
        }
    }

    /// Probability of the fraudulent class.
    pub fn fraud_probability(&self) -> f64 {
        self.probabilities[1]
    }

    /// Maximum class probability.
    pub fn confidence(&self) -> f64 {
        self.probabilities[0].max(self.probabilities[1])
    }

    /// Chart slices as `(label, percentage)` pairs.
    pub fn proportions(&self) -> [(FraudLabel, f64); 2] {
        [
            (FraudLabel::NotFraudulent, self.probabilities[0] * 100.0),
            (FraudLabel::Fraudulent, self.probabilities[1] * 100.0),
        ]
    }
}
