//! What happened during one camera scan

use chrono::{DateTime, Utc};
use serde::Serialize;
use shelfsim_types::DefectType;

use super::quantity_detection::QuantityBand;

/// Branch taken by the per-product detection procedure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "band", rename_all = "snake_case")]
pub enum DetectionOutcome {
    OutOfStock,
    Obscured,
    Misidentified,
    Detected(QuantityBand),
}

impl DetectionOutcome {
    pub fn label(&self) -> &'static str {
        match self {
            DetectionOutcome::OutOfStock => "out of stock",
            DetectionOutcome::Obscured => "obscured",
            DetectionOutcome::Misidentified => "misidentified",
            DetectionOutcome::Detected(band) => band.label(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductOutcome {
    pub product_id: String,
    pub outcome: DetectionOutcome,
}

/// Non-fatal problem noticed while scanning
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScanAnomaly {
    MissingBoundingBox { product_id: String },
    PoorQuality { product_id: String, defects: Vec<DefectType> },
}

impl std::fmt::Display for ScanAnomaly {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScanAnomaly::MissingBoundingBox { product_id } => {
                write!(f, "Failed to get bounding box for {}", product_id)
            }
            ScanAnomaly::PoorQuality { product_id, .. } => {
                write!(f, "Poor quality detected for {}", product_id)
            }
        }
    }
}

/// Summary returned by a shelf scan
#[derive(Debug, Clone, Serialize)]
pub struct ScanReport {
    pub shelf_id: String,
    pub scanned_at: DateTime<Utc>,
    /// One entry per configured product found on the shelf, in scan order
    pub outcomes: Vec<ProductOutcome>,
    pub anomalies: Vec<ScanAnomaly>,
    pub foreign_objects_found: usize,
}

impl ScanReport {
    pub fn outcome_for(&self, product_id: &str) -> Option<DetectionOutcome> {
        self.outcomes
            .iter()
            .find(|o| o.product_id == product_id)
            .map(|o| o.outcome)
    }

    pub fn has_anomalies(&self) -> bool {
        !self.anomalies.is_empty()
    }
}
