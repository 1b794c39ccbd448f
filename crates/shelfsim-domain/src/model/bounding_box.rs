//! Bounding box in image pixel coordinates

use serde::{Deserialize, Serialize};
use shelfsim_types::ValidationError;

/// Axis-aligned box, top-left origin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl BoundingBox {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Result<Self, ValidationError> {
        let bbox = Self {
            x,
            y,
            width,
            height,
        };
        if !bbox.is_valid() {
            return Err(ValidationError::InvalidBoundingBox { width, height });
        }
        Ok(bbox)
    }

    /// Check if bounding box has valid dimensions
    pub fn is_valid(&self) -> bool {
        self.width > 0 && self.height > 0
    }

    pub fn area(&self) -> i64 {
        i64::from(self.width) * i64::from(self.height)
    }

    /// True if the box lies entirely inside an image of the given size
    pub fn fits_within(&self, image_width: u32, image_height: u32) -> bool {
        let right = i64::from(self.x) + i64::from(self.width);
        let bottom = i64::from(self.y) + i64::from(self.height);
        self.x >= 0
            && self.y >= 0
            && right <= i64::from(image_width)
            && bottom <= i64::from(image_height)
    }
}

impl std::fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}, {}, {})", self.x, self.y, self.width, self.height)
    }
}
