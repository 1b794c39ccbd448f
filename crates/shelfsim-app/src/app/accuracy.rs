//! Detection accuracy statistics over repeated scans

use serde::Serialize;
use shelfsim_domain::service::{DetectionOutcome, QuantityBand};
use std::collections::BTreeMap;

/// One recorded detection of one product
#[derive(Debug, Clone, Serialize)]
pub struct AccuracySample {
    pub product_id: String,
    pub actual: u32,
    pub detected: u32,
    pub confidence: f64,
    pub accuracy: f64,
    pub outcome: DetectionOutcome,
}

impl AccuracySample {
    /// Signed count error, positive for an overcount
    pub fn error(&self) -> i64 {
        i64::from(self.detected) - i64::from(self.actual)
    }

    pub fn abs_error(&self) -> u64 {
        self.error().unsigned_abs()
    }
}

/// Accuracy statistics
#[derive(Debug, Clone, Default, Serialize)]
pub struct AccuracyStats {
    pub sample_count: usize,
    pub mean_accuracy: f64,
    pub min_accuracy: f64,
    pub max_accuracy: f64,
    pub mean_abs_error: f64,
    pub mean_confidence: f64,
    pub out_of_stock: usize,
    pub obscured: usize,
    pub misidentified: usize,
    pub significant_miscounts: usize,
    pub minor_miscounts: usize,
    pub accurate: usize,
    #[serde(skip)]
    pub samples: Vec<AccuracySample>,
}

impl AccuracyStats {
    pub fn from_samples(samples: Vec<AccuracySample>) -> Self {
        if samples.is_empty() {
            return Self::default();
        }

        let n = samples.len() as f64;

        let sum_accuracy: f64 = samples.iter().map(|s| s.accuracy).sum();
        let sum_abs_error: f64 = samples.iter().map(|s| s.abs_error() as f64).sum();
        let sum_confidence: f64 = samples.iter().map(|s| s.confidence).sum();
        let max_accuracy = samples
            .iter()
            .map(|s| s.accuracy)
            .fold(f64::NEG_INFINITY, f64::max);
        let min_accuracy = samples
            .iter()
            .map(|s| s.accuracy)
            .fold(f64::INFINITY, f64::min);

        let count = |wanted: DetectionOutcome| samples.iter().filter(|s| s.outcome == wanted).count();

        Self {
            sample_count: samples.len(),
            mean_accuracy: sum_accuracy / n,
            min_accuracy,
            max_accuracy,
            mean_abs_error: sum_abs_error / n,
            mean_confidence: sum_confidence / n,
            out_of_stock: count(DetectionOutcome::OutOfStock),
            obscured: count(DetectionOutcome::Obscured),
            misidentified: count(DetectionOutcome::Misidentified),
            significant_miscounts: count(DetectionOutcome::Detected(
                QuantityBand::SignificantMiscount,
            )),
            minor_miscounts: count(DetectionOutcome::Detected(QuantityBand::MinorMiscount)),
            accurate: count(DetectionOutcome::Detected(QuantityBand::Accurate)),
            samples,
        }
    }

    /// Group by product ID
    pub fn by_product(&self) -> BTreeMap<String, AccuracyStats> {
        let mut groups: BTreeMap<String, Vec<AccuracySample>> = BTreeMap::new();
        for sample in &self.samples {
            groups
                .entry(sample.product_id.clone())
                .or_default()
                .push(sample.clone());
        }
        groups
            .into_iter()
            .map(|(k, v)| (k, Self::from_samples(v)))
            .collect()
    }
}
