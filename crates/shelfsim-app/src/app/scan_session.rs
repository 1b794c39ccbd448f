//! Scan Session - repeated camera scans over one scenario
//!
//! 1. Build the shelf from the scenario
//! 2. Apply quantity overrides
//! 3. Scan N times with one generator (seeded or from entropy)
//! 4. Collect accuracy samples and anomaly counts

use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use shelfsim_domain::model::{Product, Shelf};
use shelfsim_domain::service::{ScanReport, ShelfMonitoringSystem};
use shelfsim_domain::SimulationConfig;
use shelfsim_types::{Result, ScenarioError};

use super::accuracy::{AccuracySample, AccuracyStats};
use crate::scenario::{parse_quantity_override, Scenario};

/// Totals over every scan of a session
#[derive(Debug, Clone, Default, Serialize)]
pub struct SessionSummary {
    pub shelf_id: String,
    pub scans: u32,
    pub anomalies: usize,
    pub foreign_objects: usize,
    pub overall: AccuracyStats,
}

impl SessionSummary {
    pub fn by_product(&self) -> std::collections::BTreeMap<String, AccuracyStats> {
        self.overall.by_product()
    }
}

/// A shelf under repeated simulated scans
pub struct ScanSession {
    system: ShelfMonitoringSystem,
    shelf: Shelf,
    products: Vec<Product>,
    rng: StdRng,
    samples: Vec<AccuracySample>,
    scans: u32,
    anomalies: usize,
    foreign_objects: usize,
}

impl ScanSession {
    pub fn new(config: &SimulationConfig, scenario: &Scenario, seed: Option<u64>) -> Result<Self> {
        let system = ShelfMonitoringSystem::new(config.clone())?;
        let (shelf, products) = scenario.build()?;
        let rng = match seed {
            Some(seed) => {
                info!("Using seed {}", seed);
                StdRng::seed_from_u64(seed)
            }
            None => StdRng::from_entropy(),
        };

        Ok(Self {
            system,
            shelf,
            products,
            rng,
            samples: Vec::new(),
            scans: 0,
            anomalies: 0,
            foreign_objects: 0,
        })
    }

    pub fn shelf(&self) -> &Shelf {
        &self.shelf
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Apply `PRODUCT_ID=QTY` overrides to the shelf's true quantities
    pub fn apply_overrides(&mut self, overrides: &[String]) -> Result<()> {
        for spec in overrides {
            let (product_id, quantity) = parse_quantity_override(spec)?;
            if !self.shelf.update_item_quantity(&product_id, quantity) {
                return Err(ScenarioError::UnknownProduct(product_id).into());
            }
        }
        Ok(())
    }

    /// Run one scan and record its accuracy samples
    pub fn scan(&mut self) -> ScanReport {
        let report = self
            .system
            .simulate_camera_scan(&mut self.shelf, &self.products, &mut self.rng);

        for product_outcome in &report.outcomes {
            let Some(item) = self.shelf.get_item(&product_outcome.product_id) else {
                continue;
            };
            let (Some(detection), Some(accuracy)) = (item.detection(), item.get_detection_accuracy())
            else {
                continue;
            };
            self.samples.push(AccuracySample {
                product_id: product_outcome.product_id.clone(),
                actual: item.actual_quantity(),
                detected: detection.detected_quantity,
                confidence: detection.confidence,
                accuracy,
                outcome: product_outcome.outcome,
            });
        }

        self.scans += 1;
        self.anomalies += report.anomalies.len();
        self.foreign_objects += report.foreign_objects_found;
        report
    }

    /// Run `count` scans, calling `on_scan` after each
    pub fn run<F>(&mut self, count: u32, mut on_scan: F) -> SessionSummary
    where
        F: FnMut(u32, &ScanReport, &Shelf),
    {
        for index in 0..count {
            let report = self.scan();
            on_scan(index + 1, &report, &self.shelf);
        }
        self.summary()
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            shelf_id: self.shelf.shelf_id().to_string(),
            scans: self.scans,
            anomalies: self.anomalies,
            foreign_objects: self.foreign_objects,
            overall: AccuracyStats::from_samples(self.samples.clone()),
        }
    }
}
