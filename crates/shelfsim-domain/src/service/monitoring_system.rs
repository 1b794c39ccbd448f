//! Shelf scan orchestration
//!
//! Each configured product goes through the first matching branch:
//! 1. Out of stock: zero count, high confidence, OUT_OF_STOCK grade
//! 2. Obscured: previous count kept, confidence 0.1
//! 3. Misidentified: true count, low confidence
//! 4. Normal: miscount bands, bounding box and quality assessment
//!
//! After the products, three spots are checked for foreign objects.

use std::ops::RangeInclusive;

use chrono::Utc;
use log::{debug, info, warn};
use rand::Rng;
use shelfsim_types::ValidationError;

use super::detection_simulator::DetectionSimulator;
use super::quantity_detection::simulate_quantity_detection;
use super::scan_report::{DetectionOutcome, ProductOutcome, ScanAnomaly, ScanReport};
use crate::config::SimulationConfig;
use crate::model::{DetectionUpdate, Product, QualityAssessment, Shelf, ShelfItem};

/// Foreign-object spot checks per scan
pub const FOREIGN_OBJECT_SPOT_CHECKS: usize = 3;

pub const OBSCURED_CONFIDENCE: f64 = 0.1;
const OUT_OF_STOCK_CONFIDENCE: RangeInclusive<f64> = 0.95..=1.0;
const MISIDENTIFIED_CONFIDENCE: RangeInclusive<f64> = 0.4..=0.7;

/// Runs simulated camera scans over a shelf
#[derive(Debug, Clone, Default)]
pub struct ShelfMonitoringSystem {
    detector: DetectionSimulator,
}

impl ShelfMonitoringSystem {
    pub fn new(config: SimulationConfig) -> Result<Self, ValidationError> {
        Ok(Self {
            detector: DetectionSimulator::new(config)?,
        })
    }

    pub fn config(&self) -> &SimulationConfig {
        self.detector.config()
    }

    pub fn detector(&self) -> &DetectionSimulator {
        &self.detector
    }

    /// Simulate one camera pass over `shelf`
    ///
    /// Products without a matching item on the shelf are skipped.
    pub fn simulate_camera_scan<R: Rng + ?Sized>(
        &self,
        shelf: &mut Shelf,
        configured_products: &[Product],
        rng: &mut R,
    ) -> ScanReport {
        info!("Starting camera scan for shelf {}", shelf.shelf_id());
        shelf.clear_foreign_objects();

        let mut outcomes = Vec::with_capacity(configured_products.len());
        let mut anomalies = Vec::new();

        for product in configured_products {
            let Some(item) = shelf.get_item_mut(product.product_id()) else {
                debug!("Product {} is not on shelf, skipping", product.product_id());
                continue;
            };
            let outcome = self.process_product_detection(item, rng, &mut anomalies);
            outcomes.push(ProductOutcome {
                product_id: product.product_id().to_string(),
                outcome,
            });
        }

        let mut foreign_objects_found = 0;
        for _ in 0..FOREIGN_OBJECT_SPOT_CHECKS {
            if let Some(foreign_object) = self.detector.simulate_foreign_object_detection(rng) {
                warn!("Foreign object detected: {}", foreign_object.object_type());
                shelf.add_foreign_object(foreign_object);
                foreign_objects_found += 1;
            }
        }

        ScanReport {
            shelf_id: shelf.shelf_id().to_string(),
            scanned_at: Utc::now(),
            outcomes,
            anomalies,
            foreign_objects_found,
        }
    }

    fn process_product_detection<R: Rng + ?Sized>(
        &self,
        item: &mut ShelfItem,
        rng: &mut R,
        anomalies: &mut Vec<ScanAnomaly>,
    ) -> DetectionOutcome {
        let config = self.detector.config();
        let actual_quantity = item.actual_quantity();

        if actual_quantity == 0 {
            item.update_detection(
                DetectionUpdate::new(0, rng.gen_range(OUT_OF_STOCK_CONFIDENCE))
                    .with_quality(QualityAssessment::out_of_stock()),
            );
            return DetectionOutcome::OutOfStock;
        }

        if rng.gen::<f64>() < config.obscured_probability {
            // Occlusion never invents a new count
            let previous = item.last_detected_quantity().unwrap_or(0);
            item.update_detection(
                DetectionUpdate::new(i64::from(previous), OBSCURED_CONFIDENCE).obscured(),
            );
            info!("Item {} is obscured", item.product().name());
            return DetectionOutcome::Obscured;
        }

        if rng.gen::<f64>() < config.misidentification_probability {
            item.update_detection(
                DetectionUpdate::new(
                    i64::from(actual_quantity),
                    rng.gen_range(MISIDENTIFIED_CONFIDENCE),
                )
                .misidentified(),
            );
            info!("Item {} was misidentified", item.product().name());
            return DetectionOutcome::Misidentified;
        }

        let estimate = simulate_quantity_detection(actual_quantity, config, rng);
        let bounding_box = self.detector.simulate_bounding_box(rng);
        let quality = self.detector.simulate_quality_assessment(rng);

        let product_id = item.product().product_id().to_string();
        if bounding_box.is_none() {
            warn!("Failed to get bounding box for {}", item.product().name());
            anomalies.push(ScanAnomaly::MissingBoundingBox {
                product_id: product_id.clone(),
            });
        }
        if quality.needs_removal() {
            warn!("Poor quality detected for {}", item.product().name());
            anomalies.push(ScanAnomaly::PoorQuality {
                product_id,
                defects: quality.defects.clone(),
            });
        }

        item.update_detection(
            DetectionUpdate::new(i64::from(estimate.detected_quantity), estimate.confidence)
                .with_bounding_box(bounding_box)
                .with_quality(quality),
        );
        DetectionOutcome::Detected(estimate.band)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::quantity_detection::QuantityBand;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use shelfsim_types::QualityLevel;

    fn product(id: &str) -> Product {
        Product::new(id, format!("Product {}", id)).unwrap()
    }

    fn shelf_with(items: &[(&str, i64)]) -> (Shelf, Vec<Product>) {
        let mut shelf = Shelf::new("test-shelf").unwrap();
        let mut products = Vec::new();
        for (id, quantity) in items {
            let p = product(id);
            shelf.add_item(ShelfItem::new(p.clone(), *quantity));
            products.push(p);
        }
        (shelf, products)
    }

    fn system(config: SimulationConfig) -> ShelfMonitoringSystem {
        ShelfMonitoringSystem::new(config).unwrap()
    }

    #[test]
    fn test_out_of_stock_branch() {
        let system = system(SimulationConfig::default().with_obscured_probability(1.0));
        let (mut shelf, products) = shelf_with(&[("empty", 0)]);
        let mut rng = StdRng::seed_from_u64(1);

        for _ in 0..200 {
            let report = system.simulate_camera_scan(&mut shelf, &products, &mut rng);
            assert_eq!(report.outcome_for("empty"), Some(DetectionOutcome::OutOfStock));

            let d = shelf.get_item("empty").unwrap().detection().unwrap();
            assert_eq!(d.detected_quantity, 0);
            assert!(OUT_OF_STOCK_CONFIDENCE.contains(&d.confidence));
            assert_eq!(
                d.quality_assessment.as_ref().map(|q| q.quality_level),
                Some(QualityLevel::OutOfStock)
            );
            assert!(d.bounding_box.is_none());
            assert!(!d.is_obscured && !d.is_misidentified);
        }
        assert_eq!(shelf.get_item("empty").unwrap().get_detection_accuracy(), Some(1.0));
    }

    #[test]
    fn test_obscured_keeps_previous_count() {
        let (mut shelf, products) = shelf_with(&[("cereal", 12)]);
        let mut rng = StdRng::seed_from_u64(2);

        let obscured = system(SimulationConfig::error_free().with_obscured_probability(1.0));
        obscured.simulate_camera_scan(&mut shelf, &products, &mut rng);
        let d = shelf.get_item("cereal").unwrap().detection().unwrap();
        assert_eq!(d.detected_quantity, 0);
        assert_eq!(d.confidence, OBSCURED_CONFIDENCE);
        assert!(d.is_obscured);

        system(SimulationConfig::error_free()).simulate_camera_scan(&mut shelf, &products, &mut rng);
        let report = obscured.simulate_camera_scan(&mut shelf, &products, &mut rng);
        assert_eq!(report.outcome_for("cereal"), Some(DetectionOutcome::Obscured));
        let d = shelf.get_item("cereal").unwrap().detection().unwrap();
        assert_eq!(d.detected_quantity, 12);
        assert!(d.bounding_box.is_none());
        assert!(d.quality_assessment.is_none());
    }

    #[test]
    fn test_misidentified_counts_correctly() {
        let system = system(SimulationConfig::error_free().with_misidentification_probability(1.0));
        let (mut shelf, products) = shelf_with(&[("soda", 8)]);
        let mut rng = StdRng::seed_from_u64(3);

        for _ in 0..100 {
            let report = system.simulate_camera_scan(&mut shelf, &products, &mut rng);
            assert_eq!(report.outcome_for("soda"), Some(DetectionOutcome::Misidentified));
            let d = shelf.get_item("soda").unwrap().detection().unwrap();
            assert_eq!(d.detected_quantity, 8);
            assert!(MISIDENTIFIED_CONFIDENCE.contains(&d.confidence));
            assert!(d.is_misidentified);
            assert!(!d.is_obscured);
        }
    }

    #[test]
    fn test_error_free_scans_are_accurate() {
        let system = system(SimulationConfig::error_free());
        let (mut shelf, products) = shelf_with(&[("apples", 10)]);
        let mut rng = StdRng::seed_from_u64(4);

        for _ in 0..1000 {
            let report = system.simulate_camera_scan(&mut shelf, &products, &mut rng);
            assert_eq!(
                report.outcome_for("apples"),
                Some(DetectionOutcome::Detected(QuantityBand::Accurate))
            );
            assert!(report
                .anomalies
                .iter()
                .all(|a| matches!(a, ScanAnomaly::PoorQuality { .. })));
            let d = shelf.get_item("apples").unwrap().detection().unwrap();
            assert_eq!(d.detected_quantity, 10);
            assert!((0.93..=0.99).contains(&d.confidence));
            assert!(d.bounding_box.is_some());
            assert!(d.quality_assessment.is_some());
        }
    }

    #[test]
    fn test_foreign_objects_replaced_each_scan() {
        let (mut shelf, products) = shelf_with(&[("apples", 10)]);
        let mut rng = StdRng::seed_from_u64(5);

        let always = system(SimulationConfig::default().with_foreign_object_probability(1.0));
        let report = always.simulate_camera_scan(&mut shelf, &products, &mut rng);
        assert_eq!(report.foreign_objects_found, FOREIGN_OBJECT_SPOT_CHECKS);
        let first: Vec<_> = shelf.foreign_objects().to_vec();

        always.simulate_camera_scan(&mut shelf, &products, &mut rng);
        assert_eq!(shelf.foreign_objects().len(), FOREIGN_OBJECT_SPOT_CHECKS);
        assert_ne!(shelf.foreign_objects(), first.as_slice());

        let never = system(SimulationConfig::default().with_foreign_object_probability(0.0));
        let report = never.simulate_camera_scan(&mut shelf, &products, &mut rng);
        assert_eq!(report.foreign_objects_found, 0);
        assert!(shelf.foreign_objects().is_empty());
    }

    #[test]
    fn test_products_missing_from_shelf_are_skipped() {
        let system = system(SimulationConfig::error_free());
        let (mut shelf, mut products) = shelf_with(&[("apples", 10)]);
        products.insert(0, product("ghost"));
        let mut rng = StdRng::seed_from_u64(6);

        let report = system.simulate_camera_scan(&mut shelf, &products, &mut rng);
        assert_eq!(report.outcomes.len(), 1);
        assert_eq!(report.outcome_for("ghost"), None);
        assert!(shelf.get_item("ghost").is_none());
    }

    #[test]
    fn test_unconfigured_items_are_not_scanned() {
        let system = system(SimulationConfig::error_free());
        let (mut shelf, products) = shelf_with(&[("apples", 10), ("pears", 4)]);
        let mut rng = StdRng::seed_from_u64(7);

        system.simulate_camera_scan(&mut shelf, &products[..1], &mut rng);
        assert!(shelf.get_item("apples").unwrap().detection().is_some());
        assert!(shelf.get_item("pears").unwrap().detection().is_none());
    }

    #[test]
    fn test_missing_bounding_box_is_anomaly_not_failure() {
        let system = system(SimulationConfig::error_free().with_bounding_box_failure_probability(1.0));
        let (mut shelf, products) = shelf_with(&[("apples", 10)]);
        let mut rng = StdRng::seed_from_u64(8);

        let report = system.simulate_camera_scan(&mut shelf, &products, &mut rng);
        assert!(report.anomalies.contains(&ScanAnomaly::MissingBoundingBox {
            product_id: "apples".to_string()
        }));
        let d = shelf.get_item("apples").unwrap().detection().unwrap();
        assert!(d.bounding_box.is_none());
        assert_eq!(d.detected_quantity, 10);
        assert!(d.quality_assessment.is_some());
    }

    #[test]
    fn test_poor_quality_reported() {
        let system = system(SimulationConfig::error_free());
        let (mut shelf, products) = shelf_with(&[("lettuce", 5)]);
        let mut rng = StdRng::seed_from_u64(9);

        let mut poor_scans = 0;
        for _ in 0..200 {
            let report = system.simulate_camera_scan(&mut shelf, &products, &mut rng);
            let d = shelf.get_item("lettuce").unwrap().detection().unwrap();
            let is_poor = d.quality_assessment.as_ref().is_some_and(|q| q.needs_removal());
            let reported = report
                .anomalies
                .iter()
                .any(|a| matches!(a, ScanAnomaly::PoorQuality { .. }));
            assert_eq!(is_poor, reported);
            if is_poor {
                poor_scans += 1;
            }
        }
        assert!(poor_scans > 0);
    }

    #[test]
    fn test_same_seed_same_detections() {
        let system = ShelfMonitoringSystem::default();
        let run = |seed: u64| {
            let (mut shelf, products) = shelf_with(&[("a", 10), ("b", 3), ("c", 0)]);
            let mut rng = StdRng::seed_from_u64(seed);
            let mut seen = Vec::new();
            for _ in 0..20 {
                system.simulate_camera_scan(&mut shelf, &products, &mut rng);
                for item in shelf.items() {
                    let d = item.detection().unwrap();
                    seen.push((d.detected_quantity, d.confidence, d.bounding_box));
                }
            }
            seen
        };
        assert_eq!(run(42), run(42));
    }
}
