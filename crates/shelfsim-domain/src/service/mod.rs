//! Domain services

pub mod detection_simulator;
pub mod monitoring_system;
pub mod quantity_detection;
pub mod scan_report;

pub use detection_simulator::DetectionSimulator;
pub use monitoring_system::ShelfMonitoringSystem;
pub use quantity_detection::{simulate_quantity_detection, QuantityBand, QuantityEstimate};
pub use scan_report::{DetectionOutcome, ProductOutcome, ScanAnomaly, ScanReport};
