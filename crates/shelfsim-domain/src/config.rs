//! Simulation parameters

use serde::{Deserialize, Serialize};
use shelfsim_types::ValidationError;

/// Smallest image side for which a 30 px box fits in a quarter of it
pub const MIN_IMAGE_DIMENSION: u32 = 120;

/// Largest image side; keeps pixel coordinates inside `i32`
pub const MAX_IMAGE_DIMENSION: u32 = 65_535;

/// Image size and error-mode probabilities for the detection simulator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    #[serde(default = "default_image_width")]
    pub image_width: u32,

    #[serde(default = "default_image_height")]
    pub image_height: u32,

    /// Item hidden from the camera
    #[serde(default = "default_obscured_probability")]
    pub obscured_probability: f64,

    /// Wrong product recognized, count still correct
    #[serde(default = "default_misidentification_probability")]
    pub misidentification_probability: f64,

    #[serde(default = "default_significant_miscount_probability")]
    pub significant_miscount_probability: f64,

    #[serde(default = "default_minor_miscount_probability")]
    pub minor_miscount_probability: f64,

    /// Per spot check; three spots are checked each scan
    #[serde(default = "default_foreign_object_probability")]
    pub foreign_object_probability: f64,

    #[serde(default = "default_bounding_box_failure_probability")]
    pub bounding_box_failure_probability: f64,
}

fn default_image_width() -> u32 {
    1280
}

fn default_image_height() -> u32 {
    720
}

fn default_obscured_probability() -> f64 {
    0.10
}

fn default_misidentification_probability() -> f64 {
    0.03
}

fn default_significant_miscount_probability() -> f64 {
    0.05
}

fn default_minor_miscount_probability() -> f64 {
    0.15
}

fn default_foreign_object_probability() -> f64 {
    0.02
}

fn default_bounding_box_failure_probability() -> f64 {
    0.01
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            image_width: default_image_width(),
            image_height: default_image_height(),
            obscured_probability: default_obscured_probability(),
            misidentification_probability: default_misidentification_probability(),
            significant_miscount_probability: default_significant_miscount_probability(),
            minor_miscount_probability: default_minor_miscount_probability(),
            foreign_object_probability: default_foreign_object_probability(),
            bounding_box_failure_probability: default_bounding_box_failure_probability(),
        }
    }
}

impl SimulationConfig {
    /// A config where every error mode is disabled
    pub fn error_free() -> Self {
        Self {
            obscured_probability: 0.0,
            misidentification_probability: 0.0,
            significant_miscount_probability: 0.0,
            minor_miscount_probability: 0.0,
            foreign_object_probability: 0.0,
            bounding_box_failure_probability: 0.0,
            ..Self::default()
        }
    }

    pub fn with_image_size(mut self, width: u32, height: u32) -> Self {
        self.image_width = width;
        self.image_height = height;
        self
    }

    pub fn with_obscured_probability(mut self, p: f64) -> Self {
        self.obscured_probability = p;
        self
    }

    pub fn with_misidentification_probability(mut self, p: f64) -> Self {
        self.misidentification_probability = p;
        self
    }

    pub fn with_significant_miscount_probability(mut self, p: f64) -> Self {
        self.significant_miscount_probability = p;
        self
    }

    pub fn with_minor_miscount_probability(mut self, p: f64) -> Self {
        self.minor_miscount_probability = p;
        self
    }

    pub fn with_foreign_object_probability(mut self, p: f64) -> Self {
        self.foreign_object_probability = p;
        self
    }

    pub fn with_bounding_box_failure_probability(mut self, p: f64) -> Self {
        self.bounding_box_failure_probability = p;
        self
    }

    fn probabilities(&self) -> [(&'static str, f64); 6] {
        [
            ("obscured_probability", self.obscured_probability),
            (
                "misidentification_probability",
                self.misidentification_probability,
            ),
            (
                "significant_miscount_probability",
                self.significant_miscount_probability,
            ),
            ("minor_miscount_probability", self.minor_miscount_probability),
            ("foreign_object_probability", self.foreign_object_probability),
            (
                "bounding_box_failure_probability",
                self.bounding_box_failure_probability,
            ),
        ]
    }

    /// Reject probabilities outside [0, 1] and unusable image sizes
    pub fn validate(&self) -> Result<(), ValidationError> {
        for (name, value) in self.probabilities() {
            if !(0.0..=1.0).contains(&value) {
                return Err(ValidationError::ProbabilityOutOfRange { name, value });
            }
        }
        let sides = MIN_IMAGE_DIMENSION..=MAX_IMAGE_DIMENSION;
        if !sides.contains(&self.image_width) || !sides.contains(&self.image_height) {
            return Err(ValidationError::ImageSizeOutOfRange {
                width: self.image_width,
                height: self.image_height,
                min: MIN_IMAGE_DIMENSION,
                max: MAX_IMAGE_DIMENSION,
            });
        }
        Ok(())
    }
}

impl std::fmt::Display for SimulationConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Image size:          {}x{}", self.image_width, self.image_height)?;
        for (name, value) in self.probabilities() {
            let label = name.trim_end_matches("_probability").replace('_', " ");
            writeln!(f, "{:<20} {:.3}", format!("{}:", label), value)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = SimulationConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.image_width, 1280);
        assert_eq!(config.image_height, 720);
        assert!((config.minor_miscount_probability - 0.15).abs() < f64::EPSILON);
    }

    #[test]
    fn test_probability_out_of_range() {
        let config = SimulationConfig::default().with_obscured_probability(1.5);
        assert_eq!(
            config.validate(),
            Err(ValidationError::ProbabilityOutOfRange {
                name: "obscured_probability",
                value: 1.5
            })
        );
        let config = SimulationConfig::default().with_foreign_object_probability(f64::NAN);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_image_size_range() {
        let config = SimulationConfig::default().with_image_size(119, 720);
        assert!(matches!(
            config.validate(),
            Err(ValidationError::ImageSizeOutOfRange { width: 119, .. })
        ));
        let config = SimulationConfig::default().with_image_size(1280, 70_000);
        assert!(config.validate().is_err());
        assert!(SimulationConfig::default()
            .with_image_size(120, 120)
            .validate()
            .is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: SimulationConfig =
            serde_json::from_str(r#"{"obscured_probability": 0.5}"#).unwrap();
        assert!((config.obscured_probability - 0.5).abs() < f64::EPSILON);
        assert_eq!(config.image_width, 1280);
        assert!((config.bounding_box_failure_probability - 0.01).abs() < f64::EPSILON);
    }

    #[test]
    fn test_error_free() {
        let config = SimulationConfig::error_free();
        assert!(config.validate().is_ok());
        assert_eq!(config.obscured_probability, 0.0);
        assert_eq!(config.image_width, 1280);
    }
}
