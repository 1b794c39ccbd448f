//! Per-product shelf state and last detection snapshot

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{BoundingBox, Product, QualityAssessment};

/// Snapshot of the most recent camera detection for one item
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Detection {
    pub detected_quantity: u32,
    /// Always within 0.0..=1.0
    pub confidence: f64,
    pub bounding_box: Option<BoundingBox>,
    pub quality_assessment: Option<QualityAssessment>,
    pub is_obscured: bool,
    pub is_misidentified: bool,
    pub last_seen: DateTime<Utc>,
}

/// Raw detection values before clamping
#[derive(Debug, Clone, Default)]
pub struct DetectionUpdate {
    pub detected_quantity: i64,
    pub confidence: f64,
    pub bounding_box: Option<BoundingBox>,
    pub quality_assessment: Option<QualityAssessment>,
    pub is_obscured: bool,
    pub is_misidentified: bool,
}

impl DetectionUpdate {
    pub fn new(detected_quantity: i64, confidence: f64) -> Self {
        Self {
            detected_quantity,
            confidence,
            ..Default::default()
        }
    }

    pub fn with_bounding_box(mut self, bounding_box: Option<BoundingBox>) -> Self {
        self.bounding_box = bounding_box;
        self
    }

    pub fn with_quality(mut self, quality_assessment: QualityAssessment) -> Self {
        self.quality_assessment = Some(quality_assessment);
        self
    }

    pub fn obscured(mut self) -> Self {
        self.is_obscured = true;
        self
    }

    pub fn misidentified(mut self) -> Self {
        self.is_misidentified = true;
        self
    }
}

/// An item on a shelf with its true quantity and what the camera last saw
#[derive(Debug, Clone, Serialize)]
pub struct ShelfItem {
    product: Product,
    actual_quantity: u32,
    detection: Option<Detection>,
}

fn clamp_quantity(quantity: i64) -> u32 {
    u32::try_from(quantity.max(0)).unwrap_or(u32::MAX)
}

fn clamp_confidence(confidence: f64) -> f64 {
    if confidence.is_nan() {
        0.0
    } else {
        confidence.clamp(0.0, 1.0)
    }
}

impl ShelfItem {
    /// Negative quantities are clamped to zero
    pub fn new(product: Product, actual_quantity: i64) -> Self {
        Self {
            product,
            actual_quantity: clamp_quantity(actual_quantity),
            detection: None,
        }
    }

    pub fn product(&self) -> &Product {
        &self.product
    }

    pub fn actual_quantity(&self) -> u32 {
        self.actual_quantity
    }

    pub fn set_actual_quantity(&mut self, quantity: i64) {
        self.actual_quantity = clamp_quantity(quantity);
    }

    pub fn detection(&self) -> Option<&Detection> {
        self.detection.as_ref()
    }

    pub fn last_detected_quantity(&self) -> Option<u32> {
        self.detection.as_ref().map(|d| d.detected_quantity)
    }

    /// Replace the whole detection snapshot, clamping quantity and confidence
    pub fn update_detection(&mut self, update: DetectionUpdate) {
        self.detection = Some(Detection {
            detected_quantity: clamp_quantity(update.detected_quantity),
            confidence: clamp_confidence(update.confidence),
            bounding_box: update.bounding_box,
            quality_assessment: update.quality_assessment,
            is_obscured: update.is_obscured,
            is_misidentified: update.is_misidentified,
            last_seen: Utc::now(),
        });
    }

    /// Accuracy of the last detection against the actual quantity
    ///
    /// Not clamped: a large overcount yields a negative value.
    pub fn get_detection_accuracy(&self) -> Option<f64> {
        let detected = self.last_detected_quantity()?;
        let actual = self.actual_quantity;

        if actual == 0 {
            return Some(if detected == 0 { 1.0 } else { 0.0 });
        }

        let diff = (f64::from(actual) - f64::from(detected)).abs();
        Some(1.0 - diff / f64::from(actual))
    }
}

impl std::fmt::Display for ShelfItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let na = || "N/A".to_string();
        let detection = self.detection.as_ref();

        let detected = detection
            .map(|d| d.detected_quantity.to_string())
            .unwrap_or_else(na);
        let confidence = detection
            .filter(|d| d.confidence > 0.0)
            .map(|d| format!("{:.2}", d.confidence))
            .unwrap_or_else(na);
        let accuracy = self
            .get_detection_accuracy()
            .map(|a| format!("{:.2}%", a * 100.0))
            .unwrap_or_else(na);
        let bbox = detection
            .and_then(|d| d.bounding_box)
            .map(|b| b.to_string())
            .unwrap_or_else(na);
        let (quality, defects) = match detection.and_then(|d| d.quality_assessment.as_ref()) {
            Some(qa) => (qa.quality_level.to_string(), qa.defects_label()),
            None => (na(), "None".to_string()),
        };
        let yes_no = |flag: bool| if flag { "Yes" } else { "No" };
        let last_seen = detection
            .map(|d| d.last_seen.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(na);

        writeln!(
            f,
            "Product: {} (ID: {})",
            self.product.name(),
            self.product.product_id()
        )?;
        writeln!(f, "  Actual Quantity: {}", self.actual_quantity)?;
        writeln!(f, "  Last Detected: {} (Confidence: {})", detected, confidence)?;
        writeln!(f, "  Detection Accuracy: {}", accuracy)?;
        writeln!(f, "  Bounding Box: {}", bbox)?;
        writeln!(f, "  Quality: {}, Defects: {}", quality, defects)?;
        writeln!(
            f,
            "  Obscured: {}",
            yes_no(detection.is_some_and(|d| d.is_obscured))
        )?;
        writeln!(
            f,
            "  Misidentified: {}",
            yes_no(detection.is_some_and(|d| d.is_misidentified))
        )?;
        write!(f, "  Last Seen: {}", last_seen)
    }
}
