//! Quantity estimation with miscount error modes
//!
//! A single roll in [0, 1) picks one of three cumulative bands:
//!
//! | band                | roll                         | factor                      | confidence   |
//! |---------------------|------------------------------|-----------------------------|--------------|
//! | significant miscount| r < s                        | 0.50–0.80 or 1.20–1.50      | 0.60–0.80    |
//! | minor miscount      | s <= r < s + m               | 0.85–0.95 or 1.05–1.15      | 0.80–0.93    |
//! | accurate            | otherwise                    | 1.0                         | 0.93–0.99    |

use std::ops::RangeInclusive;

use log::debug;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::SimulationConfig;

const SIGNIFICANT_UNDER: RangeInclusive<f64> = 0.5..=0.8;
const SIGNIFICANT_OVER: RangeInclusive<f64> = 1.2..=1.5;
const SIGNIFICANT_CONFIDENCE: RangeInclusive<f64> = 0.6..=0.80;

const MINOR_UNDER: RangeInclusive<f64> = 0.85..=0.95;
const MINOR_OVER: RangeInclusive<f64> = 1.05..=1.15;
const MINOR_CONFIDENCE: RangeInclusive<f64> = 0.80..=0.93;

const ACCURATE_CONFIDENCE: RangeInclusive<f64> = 0.93..=0.99;

/// Which accuracy band a quantity estimate fell into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuantityBand {
    SignificantMiscount,
    MinorMiscount,
    Accurate,
}

impl QuantityBand {
    /// Classify a uniform roll against the cumulative miscount thresholds
    pub fn from_roll(roll: f64, config: &SimulationConfig) -> Self {
        let significant = config.significant_miscount_probability;
        let minor = significant + config.minor_miscount_probability;
        if roll < significant {
            QuantityBand::SignificantMiscount
        } else if roll < minor {
            QuantityBand::MinorMiscount
        } else {
            QuantityBand::Accurate
        }
    }

    /// Under- and over-count factor ranges; `None` for accurate detections
    pub fn factor_ranges(&self) -> Option<(RangeInclusive<f64>, RangeInclusive<f64>)> {
        match self {
            QuantityBand::SignificantMiscount => Some((SIGNIFICANT_UNDER, SIGNIFICANT_OVER)),
            QuantityBand::MinorMiscount => Some((MINOR_UNDER, MINOR_OVER)),
            QuantityBand::Accurate => None,
        }
    }

    pub fn confidence_range(&self) -> RangeInclusive<f64> {
        match self {
            QuantityBand::SignificantMiscount => SIGNIFICANT_CONFIDENCE,
            QuantityBand::MinorMiscount => MINOR_CONFIDENCE,
            QuantityBand::Accurate => ACCURATE_CONFIDENCE,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            QuantityBand::SignificantMiscount => "significant miscount",
            QuantityBand::MinorMiscount => "minor miscount",
            QuantityBand::Accurate => "accurate",
        }
    }
}

/// Simulated count and the confidence the detector reports for it
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct QuantityEstimate {
    pub detected_quantity: u32,
    pub confidence: f64,
    pub band: QuantityBand,
}

/// Simulate counting `actual_quantity` units
///
/// Callers handle the out-of-stock case before getting here, so
/// `actual_quantity` is expected to be at least 1.
pub fn simulate_quantity_detection<R: Rng + ?Sized>(
    actual_quantity: u32,
    config: &SimulationConfig,
    rng: &mut R,
) -> QuantityEstimate {
    let band = QuantityBand::from_roll(rng.gen::<f64>(), config);

    let detected_quantity = match band.factor_ranges() {
        Some((under, over)) => {
            let factor = if rng.gen::<f64>() < 0.5 {
                rng.gen_range(under)
            } else {
                rng.gen_range(over)
            };
            // f64 -> u32 casts saturate, so the result is never negative
            let detected = (f64::from(actual_quantity) * factor).round() as u32;
            debug!(
                "{}: actual={}, detected={}",
                band.label(),
                actual_quantity,
                detected
            );
            detected
        }
        None => actual_quantity,
    };

    QuantityEstimate {
        detected_quantity,
        confidence: rng.gen_range(band.confidence_range()),
        band,
    }
}
