//! Foreign object detection

use serde::Serialize;
use shelfsim_types::{ForeignObjectType, ValidationError};

/// Extraneous object detected on the shelf
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForeignObject {
    object_type: ForeignObjectType,
    location: (i32, i32),
    confidence: f64,
}

impl ForeignObject {
    pub fn new(
        object_type: ForeignObjectType,
        location: (i32, i32),
        confidence: f64,
    ) -> Result<Self, ValidationError> {
        // NaN fails the range check
        if !(0.0..=1.0).contains(&confidence) {
            return Err(ValidationError::ConfidenceOutOfRange(confidence));
        }
        Ok(Self {
            object_type,
            location,
            confidence,
        })
    }

    pub fn object_type(&self) -> ForeignObjectType {
        self.object_type
    }

    pub fn location(&self) -> (i32, i32) {
        self.location
    }

    pub fn confidence(&self) -> f64 {
        self.confidence
    }
}

impl std::fmt::Display for ForeignObject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} at ({}, {}) (Confidence: {:.2})",
            self.object_type, self.location.0, self.location.1, self.confidence
        )
    }
}
