//! Error types for shelf-sim

use thiserror::Error;

/// Construction-time validation failures
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Product ID cannot be empty")]
    EmptyProductId,

    #[error("Product name cannot be empty")]
    EmptyProductName,

    #[error("Shelf ID cannot be empty")]
    EmptyShelfId,

    #[error("Confidence must be between 0 and 1, got {0}")]
    ConfidenceOutOfRange(f64),

    #[error("Bounding box must have positive dimensions, got {width}x{height}")]
    InvalidBoundingBox { width: i32, height: i32 },

    #[error("{name} must be between 0 and 1, got {value}")]
    ProbabilityOutOfRange { name: &'static str, value: f64 },

    #[error("Image sides must be within {min}..={max} px, got {width}x{height}")]
    ImageSizeOutOfRange {
        width: u32,
        height: u32,
        min: u32,
        max: u32,
    },
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration not found")]
    NotFound,

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Failed to save configuration: {0}")]
    SaveError(String),
}

/// Scenario file errors
#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("Scenario has no products")]
    NoProducts,

    #[error("Duplicate product ID in scenario: {0}")]
    DuplicateProduct(String),

    #[error("Unknown product ID: {0}")]
    UnknownProduct(String),

    #[error("Invalid quantity override: {0} (expected PRODUCT_ID=QTY)")]
    InvalidOverride(String),
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Scenario error: {0}")]
    Scenario(#[from] ScenarioError),

    #[error("File not found: {0}")]
    FileNotFound(String),
}

pub type Result<T> = std::result::Result<T, Error>;
