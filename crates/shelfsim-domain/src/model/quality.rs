//! Quality assessment result

use serde::{Deserialize, Serialize};
use shelfsim_types::{DefectType, QualityLevel};

/// Quality grade plus any visual defects found
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualityAssessment {
    pub quality_level: QualityLevel,
    #[serde(default)]
    pub defects: Vec<DefectType>,
}

impl QualityAssessment {
    pub fn new(quality_level: QualityLevel, defects: Vec<DefectType>) -> Self {
        Self {
            quality_level,
            defects,
        }
    }

    pub fn out_of_stock() -> Self {
        Self::new(QualityLevel::OutOfStock, Vec::new())
    }

    pub fn has_defects(&self) -> bool {
        !self.defects.is_empty()
    }

    /// Whether the item should be pulled from the shelf
    pub fn needs_removal(&self) -> bool {
        self.quality_level == QualityLevel::PoorConsiderRemoval
    }

    /// Comma-joined defect names, or "None"
    pub fn defects_label(&self) -> String {
        if self.defects.is_empty() {
            return "None".to_string();
        }
        self.defects
            .iter()
            .map(|d| d.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}
