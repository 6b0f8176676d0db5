//! Pre-fitted standard scaler for the engineered feature vector

use crate::error::{PipelineError, Result};
use serde::Deserialize;
use std::path::Path;

/// Scales a feature vector the way it was scaled at training time.
pub trait FeatureScaler: Send + Sync {
    /// Scale `values`, whose column names are `columns`.
    ///
    /// Fails with `ShapeMismatch` if the layout differs from the fitted one.
    fn scale(&self, columns: &[&str], values: &[f64]) -> Result<Vec<f64>>;

    /// Number of features the scaler was fitted on.
    fn n_features(&self) -> usize;
}

/// Standardizes features as `(x - mean) / scale`.
#[derive(Debug, Clone, Deserialize)]
pub struct StandardScaler {
    /// Per-feature mean, absent when fitted with `with_mean = false`
    #[serde(default, alias = "mean_")]
    mean: Option<Vec<f64>>,
    /// Per-feature scale, absent when fitted with `with_std = false`
    #[serde(default, alias = "scale_")]
    scale: Option<Vec<f64>>,
    /// Column names seen at fit time
    #[serde(default, alias = "feature_names_in_")]
    feature_names_in: Option<Vec<String>>,
    #[serde(default, alias = "n_features_in_")]
    n_features_in: Option<usize>,
}

impl StandardScaler {
    /// Build a scaler from fitted statistics.
    pub fn new(mean: Vec<f64>, scale: Vec<f64>) -> std::result::Result<Self, String> {
        Self {
            mean: Some(mean),
            scale: Some(scale),
            feature_names_in: None,
            n_features_in: None,
        }
        .validated()
    }

    /// Attach the column names the scaler was fitted on.
    pub fn with_feature_names(mut self, names: Vec<String>) -> std::result::Result<Self, String> {
        self.feature_names_in = Some(names);
        self.validated()
    }

    /// Load a fitted scaler from JSON.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| PipelineError::artifact_load("scaler", path, e))?;
        let parsed: StandardScaler = serde_json::from_str(&raw)
            .map_err(|e| PipelineError::artifact_load("scaler", path, e))?;
        parsed
            .validated()
            .map_err(|e| PipelineError::artifact_load("scaler", path, e))
    }

    /// Check that every fitted array agrees on the feature count.
    fn validated(mut self) -> std::result::Result<Self, String> {
        let widths = [
            ("mean", self.mean.as_ref().map(Vec::len)),
            ("scale", self.scale.as_ref().map(Vec::len)),
            ("feature_names_in", self.feature_names_in.as_ref().map(Vec::len)),
            ("n_features_in", self.n_features_in),
        ];

        let mut n_features = None;
        for (field, width) in widths {
            let Some(width) = width else { continue };
            match n_features {
                None => n_features = Some((field, width)),
                Some((first, expected)) if expected != width => {
                    return Err(format!(
                        "{field} has {width} entries but {first} has {expected}"
                    ));
                }
                Some(_) => {}
            }
        }

        match n_features {
            Some((_, 0)) | None => Err("scaler has no fitted features".to_string()),
            Some((_, width)) => {
                self.n_features_in = Some(width);
                Ok(self)
            }
        }
    }
}

impl FeatureScaler for StandardScaler {
    fn scale(&self, columns: &[&str], values: &[f64]) -> Result<Vec<f64>> {
        let expected = self.n_features();
        if values.len() != expected {
            return Err(PipelineError::width_mismatch("scaler", expected, values.len()));
        }
        if columns.len() != values.len() {
            return Err(PipelineError::width_mismatch("scaler", values.len(), columns.len()));
        }

        if let Some(names) = &self.feature_names_in {
            if let Some((idx, (fitted, given))) = names
                .iter()
                .zip(columns)
                .enumerate()
                .find(|(_, (fitted, given))| fitted.as_str() != **given)
            {
                return Err(PipelineError::ShapeMismatch {
                    stage: "scaler",
                    detail: format!("column {idx} is '{given}' but scaler was fitted on '{fitted}'"),
                });
            }
        }

        let scaled = values
            .iter()
            .enumerate()
            .map(|(i, &x)| {
                let centered = match &self.mean {
                    Some(mean) => x - mean[i],
                    None => x,
                };
                match &self.scale {
                    Some(scale) if scale[i] != 0.0 => centered / scale[i],
                    _ => centered,
                }
            })
            .collect();

        Ok(scaled)
    }

    fn n_features(&self) -> usize {
        self.n_features_in.unwrap_or(0)
    }
}
