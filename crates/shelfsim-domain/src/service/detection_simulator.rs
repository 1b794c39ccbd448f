//! Randomized generators for the parts of a camera detection

use std::ops::RangeInclusive;

use rand::seq::SliceRandom;
use rand::Rng;
use shelfsim_types::{DefectType, ForeignObjectType, QualityLevel, ValidationError};

use crate::config::SimulationConfig;
use crate::model::{BoundingBox, ForeignObject, QualityAssessment};

/// Smallest box side the detector reports, in pixels
pub const MIN_BOX_SIDE: u32 = 30;

/// Chance that a FAIR item shows one defect
const FAIR_DEFECT_PROBABILITY: f64 = 0.7;

const FOREIGN_OBJECT_CONFIDENCE: RangeInclusive<f64> = 0.6..=0.95;

/// Generates bounding boxes, quality grades and foreign objects
#[derive(Debug, Clone, Default)]
pub struct DetectionSimulator {
    config: SimulationConfig,
}

impl DetectionSimulator {
    pub fn new(config: SimulationConfig) -> Result<Self, ValidationError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// `None` means the detector failed to localize the item
    pub fn simulate_bounding_box<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<BoundingBox> {
        if rng.gen::<f64>() < self.config.bounding_box_failure_probability {
            return None;
        }

        let (image_width, image_height) = (self.config.image_width, self.config.image_height);
        let width = rng.gen_range(MIN_BOX_SIDE..=image_width / 4);
        let height = rng.gen_range(MIN_BOX_SIDE..=image_height / 4);
        let x = rng.gen_range(0..=image_width - width);
        let y = rng.gen_range(0..=image_height - height);

        // Image sides are capped at 65535 by config validation
        Some(BoundingBox {
            x: x as i32,
            y: y as i32,
            width: width as i32,
            height: height as i32,
        })
    }

    pub fn simulate_quality_assessment<R: Rng + ?Sized>(&self, rng: &mut R) -> QualityAssessment {
        let quality = QualityLevel::ALL
            .choose(rng)
            .copied()
            .unwrap_or(QualityLevel::Fresh);

        let defect_count = match quality {
            QualityLevel::Fair if rng.gen::<f64>() < FAIR_DEFECT_PROBABILITY => 1,
            QualityLevel::PoorConsiderRemoval => rng.gen_range(1..=2),
            _ => 0,
        };
        let defects = DefectType::ALL
            .choose_multiple(rng, defect_count)
            .copied()
            .collect();

        QualityAssessment::new(quality, defects)
    }

    /// One spot check for debris; `None` when nothing is found
    pub fn simulate_foreign_object_detection<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
    ) -> Option<ForeignObject> {
        if rng.gen::<f64>() >= self.config.foreign_object_probability {
            return None;
        }

        let object_type = *ForeignObjectType::ALL.choose(rng)?;
        let location = (
            rng.gen_range(0..self.config.image_width) as i32,
            rng.gen_range(0..self.config.image_height) as i32,
        );
        let confidence = rng.gen_range(FOREIGN_OBJECT_CONFIDENCE);

        // Confidence is drawn inside [0, 1], so construction cannot fail
        ForeignObject::new(object_type, location, confidence).ok()
    }
}
