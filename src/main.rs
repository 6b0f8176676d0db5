//! Fraud Check - Main Entry Point
//!
//! Loads the pre-fitted artifacts once, then scores transactions entered
//! through a terminal form until the user quits.

use anyhow::{Context, Result};
use fraud_check::{
    config::{AppConfig, LoggingConfig},
    form::TransactionForm,
    metrics::SessionMetrics,
    models::ModelLoader,
    pipeline::FraudPipeline,
    report::ReportRenderer,
    PipelineError,
};
use std::io;
use std::time::Instant;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

fn init_logging(config: &LoggingConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().or_else(|_| {
        EnvFilter::try_new(format!("fraud_check={}", config.level))
            .context("Invalid logging level")
    })?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr);

    if config.format == "json" {
        builder.json().init();
    } else {
        builder.init();
    }
    Ok(())
}

fn main() -> Result<()> {
    let config = AppConfig::load()?;
    init_logging(&config.logging)?;

    info!("Starting Fraud Check");
    info!(
        artifacts_dir = %config.models.artifacts_dir,
        classifier_format = ?config.models.classifier_format,
        "Configuration loaded successfully"
    );

    // Artifacts are loaded once and only borrowed afterwards
    let artifacts = ModelLoader::with_threads(config.models.onnx_threads)
        .load_artifacts(&config.models)
        .context("Cannot serve predictions without fitted artifacts")?;
    info!(
        model = artifacts.classifier.name(),
        features = artifacts.classifier.n_features(),
        "Artifacts loaded"
    );

    let pipeline = FraudPipeline::new(&artifacts);
    let renderer = ReportRenderer::new(config.report.chart_width);
    let metrics = SessionMetrics::new();

    let stdin = io::stdin();
    let mut form = TransactionForm::new(stdin.lock(), io::stdout());

    println!("Fraud Detection App");
    println!("Enter the transaction details and the app will predict whether it is fraudulent.");

    while let Some(record) = form.prompt()? {
        let start_time = Instant::now();

        match pipeline.predict(&record) {
            Ok(result) => {
                let latency = start_time.elapsed();
                metrics.record_prediction(latency, &result);
                info!(
                    label = ?result.label,
                    fraud_probability = result.fraud_probability(),
                    latency_us = latency.as_micros(),
                    "Prediction complete"
                );
                renderer.render(&result, &mut io::stdout())?;
            }
            Err(e) => {
                metrics.record_failure();
                match &e {
                    PipelineError::UnknownCategory { .. } => {
                        warn!(error = %e, "Rejected transaction")
                    }
                    _ => error!(error = %e, "Prediction failed"),
                }
                println!("\nPrediction failed: {e}");
            }
        }
    }

    info!("Fraud Check shutting down...");
    metrics.print_summary();

    Ok(())
}
