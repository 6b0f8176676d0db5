//! Prediction report: verdict, confidence score and probability chart

use crate::types::{FraudLabel, PredictionResult};
use std::io::{self, Write};

/// Renders prediction results as text.
pub struct ReportRenderer {
    chart_width: usize,
}

impl ReportRenderer {
    pub fn new(chart_width: usize) -> Self {
        Self {
            chart_width: chart_width.max(1),
        }
    }

    /// Verdict line for a label.
    pub fn verdict(label: FraudLabel) -> &'static str {
        match label {
            FraudLabel::Fraudulent => "🚨 Fraudulent Transaction",
            FraudLabel::NotFraudulent => "✅ Not Fraudulent",
        }
    }

    /// Confidence as a percentage with two decimals, e.g. `97.00%`.
    pub fn confidence(result: &PredictionResult) -> String {
        format!("{:.2}%", result.confidence() * 100.0)
    }

    /// Split the chart width between the two slices, largest remainder first.
    fn bar_lengths(&self, result: &PredictionResult) -> [usize; 2] {
        let width = self.chart_width as f64;
        let exact = result.probabilities.map(|p| p * width);
        let mut cells = exact.map(|cells| (cells.floor() as usize).min(self.chart_width));

        let assigned: usize = cells.iter().sum();
        if assigned < self.chart_width {
            let idx = if exact[0].fract() >= exact[1].fract() { 0 } else { 1 };
            cells[idx] += self.chart_width - assigned;
        }
        cells
    }

    /// Two-slice proportion chart, one line per class.
    pub fn chart(&self, result: &PredictionResult) -> Vec<String> {
        let bars = self.bar_lengths(result);
        result
            .proportions()
            .iter()
            .zip(bars)
            .map(|((label, pct), len)| {
                let fill = if *label == FraudLabel::Fraudulent { '▓' } else { '█' };
                format!(
                    "  {:<15} {}{} {:>5.1}%",
                    label.display_name(),
                    fill.to_string().repeat(len),
                    " ".repeat(self.chart_width.saturating_sub(len)),
                    pct
                )
            })
            .collect()
    }

    /// Write the full report.
    pub fn render<W: Write>(&self, result: &PredictionResult, out: &mut W) -> io::Result<()> {
        writeln!(out)?;
        writeln!(out, "Prediction Result")?;
        writeln!(out, "  {}", Self::verdict(result.label))?;
        writeln!(out, "Confidence Score")?;
        writeln!(out, "  {}", Self::confidence(result))?;
        writeln!(out, "Prediction Probabilities")?;
        for line in self.chart(result) {
            writeln!(out, "{line}")?;
        }
        Ok(())
    }
}

impl Default for ReportRenderer {
    fn default() -> Self {
        Self::new(40)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confidence_format() {
        let result = PredictionResult::new(FraudLabel::NotFraudulent, [0.97, 0.03]);
        assert_eq!(ReportRenderer::confidence(&result), "97.00%");

        let result = PredictionResult::new(FraudLabel::Fraudulent, [0.1234, 0.8766]);
        assert_eq!(ReportRenderer::confidence(&result), "87.66%");
    }

    #[test]
    fn test_bars_fill_chart_width() {
        let renderer = ReportRenderer::new(10);

        let result = PredictionResult::new(FraudLabel::Fraudulent, [0.2, 0.8]);
        assert_eq!(renderer.bar_lengths(&result), [2, 8]);

        // 2.5 / 7.5 cells: the tie goes to the first slice
        let result = PredictionResult::new(FraudLabel::Fraudulent, [0.25, 0.75]);
        assert_eq!(renderer.bar_lengths(&result), [3, 7]);

        let result = PredictionResult::new(FraudLabel::NotFraudulent, [1.0, 0.0]);
        assert_eq!(renderer.bar_lengths(&result), [10, 0]);

        let result = PredictionResult::new(FraudLabel::NotFraudulent, [0.5, 0.5]);
        assert_eq!(renderer.bar_lengths(&result).iter().sum::<usize>(), 10);
    }

    #[test]
    fn test_chart_lines() {
        let renderer = ReportRenderer::new(4);
        let result = PredictionResult::new(FraudLabel::Fraudulent, [0.25, 0.75]);

        let lines = renderer.chart(&result);

        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("Not Fraudulent"));
        assert!(lines[0].contains("█   "));
        assert!(lines[0].ends_with("25.0%"));
        assert!(lines[1].contains("▓▓▓"));
        assert!(lines[1].ends_with("75.0%"));
    }

    #[test]
    fn test_chart_tolerates_out_of_range_probabilities() {
        let renderer = ReportRenderer::new(10);
        let result = PredictionResult::new(FraudLabel::Fraudulent, [0.0, 1.5]);

        assert_eq!(renderer.bar_lengths(&result), [0, 10]);

        let lines = renderer.chart(&result);
        assert!(lines[1].contains(&"▓".repeat(10)));
        assert!(lines[1].ends_with("150.0%"));
    }

    #[test]
    fn test_render() {
        let renderer = ReportRenderer::default();
        let result = PredictionResult::new(FraudLabel::Fraudulent, [0.1, 0.9]);

        let mut out = Vec::new();
        renderer.render(&result, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("🚨 Fraudulent Transaction"));
        assert!(text.contains("90.00%"));
        assert!(text.contains("Prediction Probabilities"));
    }
}
