//! Session statistics for the fraud check app.

use crate::types::{FraudLabel, PredictionResult};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;
use std::time::{Duration, Instant};
use tracing::info;

/// Latency samples kept before the oldest half is dropped
const MAX_LATENCY_SAMPLES: usize = 10_000;

/// Metrics collector for a session of fraud checks
pub struct SessionMetrics {
    /// Successful predictions
    pub predictions: AtomicU64,
    /// Predictions labelled fraudulent
    pub fraudulent: AtomicU64,
    /// Requests that failed with an error
    pub failures: AtomicU64,
    /// Prediction latencies (in microseconds)
    latencies: RwLock<Vec<u64>>,
    /// Fraud probability distribution buckets
    score_buckets: RwLock<[u64; 10]>,
    start_time: Instant,
}

impl SessionMetrics {
    pub fn new() -> Self {
        Self {
            predictions: AtomicU64::new(0),
            fraudulent: AtomicU64::new(0),
            failures: AtomicU64::new(0),
            latencies: RwLock::new(Vec::with_capacity(1000)),
            score_buckets: RwLock::new([0; 10]),
            start_time: Instant::now(),
        }
    }

    /// Record a successful prediction
    pub fn record_prediction(&self, latency: Duration, result: &PredictionResult) {
        self.predictions.fetch_add(1, Ordering::Relaxed);
        if result.label == FraudLabel::Fraudulent {
            self.fraudulent.fetch_add(1, Ordering::Relaxed);
        }

        if let Ok(mut times) = self.latencies.write() {
            times.push(latency.as_micros() as u64);
            if times.len() > MAX_LATENCY_SAMPLES {
                times.drain(0..MAX_LATENCY_SAMPLES / 2);
            }
        }

        let bucket = (result.fraud_probability() * 10.0).clamp(0.0, 9.0) as usize;
        if let Ok(mut buckets) = self.score_buckets.write() {
            buckets[bucket] += 1;
        }
    }

    /// Record a request that produced no prediction
    pub fn record_failure(&self) {
        self.failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Get latency statistics
    pub fn get_latency_stats(&self) -> LatencyStats {
        let Ok(times) = self.latencies.read() else {
            return LatencyStats::default();
        };
        if times.is_empty() {
            return LatencyStats::default();
        }

        let mut sorted: Vec<u64> = times.clone();
        sorted.sort_unstable();

        let sum: u64 = sorted.iter().sum();
        let count = sorted.len();

        LatencyStats {
            count: count as u64,
            mean_us: sum / count as u64,
            p50_us: sorted[count / 2],
            p95_us: sorted[((count as f64 * 0.95) as usize).min(count - 1)],
            max_us: sorted[count - 1],
        }
    }

    /// Get fraud probability distribution
    pub fn get_score_distribution(&self) -> [u64; 10] {
        self.score_buckets
            .read()
            .map(|buckets| *buckets)
            .unwrap_or_default()
    }

    /// Print summary statistics
    pub fn print_summary(&self) {
        let predictions = self.predictions.load(Ordering::Relaxed);
        let fraudulent = self.fraudulent.load(Ordering::Relaxed);
        let failures = self.failures.load(Ordering::Relaxed);
        let fraud_rate = if predictions > 0 {
            (fraudulent as f64 / predictions as f64) * 100.0
        } else {
            0.0
        };
        let latency = self.get_latency_stats();
        let score_dist = self.get_score_distribution();

        info!("╔══════════════════════════════════════════════════════════════╗");
        info!("║                FRAUD CHECK - SESSION SUMMARY                 ║");
        info!("╠══════════════════════════════════════════════════════════════╣");
        info!(
            "║ Predictions: {:>8}  │  Fraudulent: {:>6} ({:>5.1}%)         ║",
            predictions, fraudulent, fraud_rate
        );
        info!(
            "║ Failed requests: {:>4}  │  Session length: {:>8.1}s          ║",
            failures,
            self.start_time.elapsed().as_secs_f64()
        );
        info!("╠══════════════════════════════════════════════════════════════╣");
        info!(
            "║ Latency (μs): mean={:>6} p50={:>6} p95={:>6} max={:>6}     ║",
            latency.mean_us, latency.p50_us, latency.p95_us, latency.max_us
        );
        info!("╠══════════════════════════════════════════════════════════════╣");
        info!("║ Fraud Probability Distribution:                              ║");
        let total: u64 = score_dist.iter().sum();
        for (i, &count) in score_dist.iter().enumerate() {
            let pct = if total > 0 { (count as f64 / total as f64) * 100.0 } else { 0.0 };
            let bar: String = "█".repeat(((pct / 5.0) as usize).min(20));
            info!(
                "║   {:.1}-{:.1}: {:>6} ({:>5.1}%) {}",
                i as f64 / 10.0,
                (i + 1) as f64 / 10.0,
                count,
                pct,
                bar
            );
        }
        info!("╚══════════════════════════════════════════════════════════════╝");
    }
}

impl Default for SessionMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Latency statistics
#[derive(Debug, Default, PartialEq)]
pub struct LatencyStats {
    pub count: u64,
    pub mean_us: u64,
    pub p50_us: u64,
    pub p95_us: u64,
    pub max_us: u64,
}
