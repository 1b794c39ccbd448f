//! Closed sets reported by the shelf camera

use serde::{Deserialize, Serialize};

/// Quality grade assigned to a product facing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QualityLevel {
    Fresh,
    Good,
    Fair,
    PoorConsiderRemoval,
    OutOfStock,
}

impl QualityLevel {
    pub const ALL: [QualityLevel; 5] = [
        QualityLevel::Fresh,
        QualityLevel::Good,
        QualityLevel::Fair,
        QualityLevel::PoorConsiderRemoval,
        QualityLevel::OutOfStock,
    ];

    /// Wire name, e.g. "poor_consider_removal"
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityLevel::Fresh => "fresh",
            QualityLevel::Good => "good",
            QualityLevel::Fair => "fair",
            QualityLevel::PoorConsiderRemoval => "poor_consider_removal",
            QualityLevel::OutOfStock => "out_of_stock",
        }
    }
}

impl std::fmt::Display for QualityLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Visual defect spotted during quality assessment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DefectType {
    SlightWilting,
    MinorBruiseDeveloped,
    PackagingCompromisedShelf,
    LabelFaded,
    NearingExpiryVisualSigns,
    ItemDisplaced,
}

impl DefectType {
    pub const ALL: [DefectType; 6] = [
        DefectType::SlightWilting,
        DefectType::MinorBruiseDeveloped,
        DefectType::PackagingCompromisedShelf,
        DefectType::LabelFaded,
        DefectType::NearingExpiryVisualSigns,
        DefectType::ItemDisplaced,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DefectType::SlightWilting => "slight_wilting",
            DefectType::MinorBruiseDeveloped => "minor_bruise_developed",
            DefectType::PackagingCompromisedShelf => "packaging_compromised_shelf",
            DefectType::LabelFaded => "label_faded",
            DefectType::NearingExpiryVisualSigns => "nearing_expiry_visual_signs",
            DefectType::ItemDisplaced => "item_displaced",
        }
    }
}

impl std::fmt::Display for DefectType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of extraneous object found on the shelf
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ForeignObjectType {
    PlasticFragment,
    MetalShavingSim,
    UnknownDebris,
    InsectSim,
}

impl ForeignObjectType {
    pub const ALL: [ForeignObjectType; 4] = [
        ForeignObjectType::PlasticFragment,
        ForeignObjectType::MetalShavingSim,
        ForeignObjectType::UnknownDebris,
        ForeignObjectType::InsectSim,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ForeignObjectType::PlasticFragment => "plastic_fragment",
            ForeignObjectType::MetalShavingSim => "metal_shaving_sim",
            ForeignObjectType::UnknownDebris => "unknown_debris",
            ForeignObjectType::InsectSim => "insect_sim",
        }
    }
}

impl std::fmt::Display for ForeignObjectType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
