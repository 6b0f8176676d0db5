//! Pre-fitted label encoder for the transaction type column

use crate::error::{PipelineError, Result};
use serde::Deserialize;
use std::path::Path;

/// Maps a categorical value to the integer code it was trained with.
pub trait CategoryEncoder: Send + Sync {
    /// Encode a category, failing on values outside the fitted vocabulary.
    fn encode(&self, category: &str) -> Result<i64>;

    /// Fitted vocabulary in code order.
    fn classes(&self) -> &[String];
}

/// Label encoder: the code of a class is its position in the sorted class list.
#[derive(Debug, Clone, Deserialize)]
pub struct LabelEncoder {
    #[serde(alias = "classes_")]
    classes: Vec<String>,
}

impl LabelEncoder {
    /// Build an encoder from an already fitted class list.
    ///
    /// The list must be non-empty, sorted and free of duplicates.
    pub fn from_classes(classes: Vec<String>) -> std::result::Result<Self, String> {
        if classes.is_empty() {
            return Err("encoder has no classes".to_string());
        }
        if let Some(pair) = classes.windows(2).find(|w| w[0] >= w[1]) {
            return Err(format!(
                "classes must be sorted and unique, found '{}' before '{}'",
                pair[0], pair[1]
            ));
        }
        Ok(Self { classes })
    }

    /// Fit an encoder on the distinct values of `values`.
    pub fn fit<I, S>(values: I) -> std::result::Result<Self, String>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut classes: Vec<String> = values.into_iter().map(Into::into).collect();
        classes.sort();
        classes.dedup();
        Self::from_classes(classes)
    }

    /// Load a fitted encoder from a JSON file: `{"classes": [...]}`.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| PipelineError::artifact_load("encoder", path, e))?;
        let parsed: LabelEncoder = serde_json::from_str(&raw)
            .map_err(|e| PipelineError::artifact_load("encoder", path, e))?;
        Self::from_classes(parsed.classes).map_err(|e| PipelineError::artifact_load("encoder", path, e))
    }
}

impl CategoryEncoder for LabelEncoder {
    fn encode(&self, category: &str) -> Result<i64> {
        self.classes
            .binary_search_by(|c| c.as_str().cmp(category))
            .map(|idx| idx as i64)
            .map_err(|_| PipelineError::UnknownCategory {
                category: category.to_string(),
                known: self.classes.clone(),
            })
    }

    fn classes(&self) -> &[String] {
        &self.classes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TRANSACTION_TYPES;
    use std::io::Write;

    #[test]
    fn test_codes_follow_sorted_order() {
        let encoder = LabelEncoder::fit(TRANSACTION_TYPES).unwrap();

        assert_eq!(encoder.encode("CASH_IN").unwrap(), 0);
        assert_eq!(encoder.encode("CASH_OUT").unwrap(), 1);
        assert_eq!(encoder.encode("DEBIT").unwrap(), 2);
        assert_eq!(encoder.encode("PAYMENT").unwrap(), 3);
        assert_eq!(encoder.encode("TRANSFER").unwrap(), 4);
    }

    #[test]
    fn test_unknown_category() {
        let encoder = LabelEncoder::fit(TRANSACTION_TYPES).unwrap();

        let err = encoder.encode("WIRE").unwrap_err();
        assert!(matches!(err, PipelineError::UnknownCategory { ref category, .. } if category == "WIRE"));

        // Vocabulary is case-sensitive
        assert!(encoder.encode("transfer").is_err());
    }

    #[test]
    fn test_rejects_unsorted_classes() {
        let classes = vec!["TRANSFER".to_string(), "CASH_IN".to_string()];
        assert!(LabelEncoder::from_classes(classes).is_err());
        assert!(LabelEncoder::from_classes(Vec::new()).is_err());
    }

    #[test]
    fn test_load_from_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"classes_": ["CASH_IN", "CASH_OUT", "DEBIT", "PAYMENT", "TRANSFER"]}}"#
        )
        .unwrap();

        let encoder = LabelEncoder::load(file.path()).unwrap();
        assert_eq!(encoder.classes().len(), 5);
        assert_eq!(encoder.encode("PAYMENT").unwrap(), 3);
    }

    #[test]
    fn test_load_missing_file() {
        let err = LabelEncoder::load("does/not/exist.json").unwrap_err();
        assert!(matches!(err, PipelineError::ArtifactLoad { artifact: "encoder", .. }));
    }
}
