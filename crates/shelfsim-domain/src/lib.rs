//! Shelf model, detection simulator and scan orchestration

pub mod config;
pub mod model;
pub mod service;

pub use config::SimulationConfig;
