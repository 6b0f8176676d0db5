//! Configuration management for the fraud check app

use anyhow::{Context, Result};
use config::{Config, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Serialization format of the classifier artifact
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ClassifierFormat {
    /// ONNX model run through ONNX Runtime (e.g. an exported random forest)
    #[default]
    Onnx,
    /// JSON logistic regression coefficients
    Linear,
}

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub models: ModelsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub report: ReportConfig,
}

/// Pre-fitted artifact locations
#[derive(Debug, Clone, Deserialize)]
pub struct ModelsConfig {
    /// Directory containing the three artifacts
    pub artifacts_dir: String,
    /// Label encoder for the transaction type
    #[serde(default = "default_encoder_file")]
    pub encoder_file: String,
    /// Standard scaler for the engineered features
    #[serde(default = "default_scaler_file")]
    pub scaler_file: String,
    /// Fitted classifier
    #[serde(default = "default_classifier_file")]
    pub classifier_file: String,
    #[serde(default)]
    pub classifier_format: ClassifierFormat,
    /// Number of threads for ONNX inference (default: 1)
    #[serde(default = "default_onnx_threads")]
    pub onnx_threads: usize,
}

fn default_encoder_file() -> String {
    "label_encoder.json".to_string()
}

fn default_scaler_file() -> String {
    "standard_scaler.json".to_string()
}

fn default_classifier_file() -> String {
    "random_forest.onnx".to_string()
}

fn default_onnx_threads() -> usize {
    1
}

impl ModelsConfig {
    pub fn encoder_path(&self) -> PathBuf {
        Path::new(&self.artifacts_dir).join(&self.encoder_file)
    }

    pub fn scaler_path(&self) -> PathBuf {
        Path::new(&self.artifacts_dir).join(&self.scaler_file)
    }

    pub fn classifier_path(&self) -> PathBuf {
        Path::new(&self.artifacts_dir).join(&self.classifier_file)
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Log format (json, pretty)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

/// Report rendering configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ReportConfig {
    /// Total width of the probability chart, in cells
    pub chart_width: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self { chart_width: 40 }
    }
}

impl AppConfig {
    /// Load configuration from file
    pub fn load() -> Result<Self> {
        Self::load_from_path("config/config.toml")
    }

    /// Load configuration from a specific path
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config = Config::builder()
            .add_source(File::from(path.as_ref()))
            .build()
            .context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            models: ModelsConfig {
                artifacts_dir: "models".to_string(),
                encoder_file: default_encoder_file(),
                scaler_file: default_scaler_file(),
                classifier_file: default_classifier_file(),
                classifier_format: ClassifierFormat::Onnx,
                onnx_threads: default_onnx_threads(),
            },
            logging: LoggingConfig::default(),
            report: ReportConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.models.classifier_format, ClassifierFormat::Onnx);
        assert_eq!(config.models.onnx_threads, 1);
        assert_eq!(config.report.chart_width, 40);
        assert_eq!(
            config.models.scaler_path(),
            Path::new("models").join("standard_scaler.json")
        );
    }

    #[test]
    fn test_load_minimal_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[models]
artifacts_dir = "artifacts"
classifier_file = "logistic.json"
classifier_format = "linear"
"#
        )
        .unwrap();

        let config = AppConfig::load_from_path(file.path()).unwrap();
        assert_eq!(config.models.classifier_format, ClassifierFormat::Linear);
        assert_eq!(config.models.encoder_file, "label_encoder.json");
        assert_eq!(
            config.models.classifier_path(),
            Path::new("artifacts").join("logistic.json")
        );
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_shipped_config_parses() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("config/config.toml");
        let config = AppConfig::load_from_path(path).unwrap();
        assert_eq!(config.models.artifacts_dir, "models");
        assert_eq!(config.report.chart_width, 40);
    }
}
