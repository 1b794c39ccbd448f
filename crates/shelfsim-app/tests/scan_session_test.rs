//! Integration tests for scenario files, stored config and scan sessions

use shelfsim_app::app::ScanSession;
use shelfsim_app::config::Config;
use shelfsim_app::scenario::Scenario;
use shelfsim_domain::service::DetectionOutcome;
use shelfsim_domain::SimulationConfig;
use shelfsim_types::{Error, OutputFormat};
use std::fs;
use tempfile::tempdir;

const SCENARIO_TOML: &str = r#"
shelf_id = "bakery-07"

[[products]]
product_id = "baguette"
name = "Baguette"
quantity = 20

[[products]]
product_id = "croissant"
name = "Butter Croissant"
quantity = 0

[[products]]
product_id = "rye-loaf"
name = "Rye Loaf"
quantity = 5
"#;

#[test]
fn test_scenario_file_to_error_free_session() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bakery.toml");
    fs::write(&path, SCENARIO_TOML).unwrap();

    let scenario = Scenario::load_from_file(&path).unwrap();
    let mut session = ScanSession::new(&SimulationConfig::error_free(), &scenario, Some(11)).unwrap();

    let summary = session.run(20, |_, report, shelf| {
        assert_eq!(report.outcome_for("croissant"), Some(DetectionOutcome::OutOfStock));
        assert_eq!(shelf.get_item("baguette").unwrap().last_detected_quantity(), Some(20));
        assert!(shelf.foreign_objects().is_empty());
    });

    assert_eq!(summary.shelf_id, "bakery-07");
    assert_eq!(summary.overall.sample_count, 60);
    assert_eq!(summary.overall.out_of_stock, 20);
    assert_eq!(summary.overall.accurate, 40);
    assert!((summary.overall.mean_accuracy - 1.0).abs() < 1e-9);
    assert_eq!(summary.overall.mean_abs_error, 0.0);
}

#[test]
fn test_missing_scenario_file() {
    let dir = tempdir().unwrap();
    let result = Scenario::load_from_file(&dir.path().join("absent.toml"));
    assert!(matches!(result, Err(Error::FileNotFound(_))));
}

#[test]
fn test_override_empties_shelf() {
    let scenario = Scenario::load_from_str(SCENARIO_TOML).unwrap();
    let mut session = ScanSession::new(&SimulationConfig::default(), &scenario, Some(5)).unwrap();
    session
        .apply_overrides(&["baguette=0".to_string(), "rye-loaf=0".to_string()])
        .unwrap();

    let report = session.scan();
    for product in session.products() {
        assert_eq!(
            report.outcome_for(product.product_id()),
            Some(DetectionOutcome::OutOfStock)
        );
    }
    assert_eq!(session.shelf().get_total_items(), 0);
}

#[test]
fn test_invalid_override_is_rejected() {
    let scenario = Scenario::demo();
    let mut session = ScanSession::new(&SimulationConfig::default(), &scenario, Some(5)).unwrap();
    assert!(session.apply_overrides(&["apple-gala".to_string()]).is_err());
    assert!(session.apply_overrides(&["durian=4".to_string()]).is_err());
}

#[test]
fn test_invalid_simulation_config_rejected() {
    let config = SimulationConfig::default().with_obscured_probability(1.5);
    let result = ScanSession::new(&config, &Scenario::demo(), None);
    assert!(matches!(result, Err(Error::Validation(_))));
}

#[test]
fn test_stored_config_drives_session() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("shelf-sim").join("config.json");

    let config = Config {
        simulation: SimulationConfig::error_free().with_image_size(640, 480),
        output_format: OutputFormat::Json,
        seed: Some(42),
        scan_count: 3,
    };
    config.save_to(&path).unwrap();

    let loaded = Config::load_from(&path).unwrap();
    assert_eq!(loaded, config);

    let run = |config: &Config| {
        let mut session =
            ScanSession::new(&config.simulation, &Scenario::demo(), config.seed).unwrap();
        let mut boxes = Vec::new();
        session.run(config.scan_count, |_, _, shelf| {
            for item in shelf.items() {
                if let Some(bbox) = item.detection().and_then(|d| d.bounding_box) {
                    assert!(bbox.fits_within(640, 480));
                    boxes.push(bbox);
                }
            }
        });
        boxes
    };
    assert_eq!(run(&loaded), run(&config));
}
