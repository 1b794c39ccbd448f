//! Command handlers

use crate::cli::{Cli, Commands, RunArgs};
use crate::output::{output_summary, print_json, print_scan_table, ScanSnapshot};
use log::info;
use shelfsim_app::app::ScanSession;
use shelfsim_app::config::Config;
use shelfsim_app::scenario::Scenario;
use shelfsim_types::{ConfigError, OutputFormat, Result};

/// Execute CLI command
pub fn execute(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Scan { run } => {
            let config = Config::load()?;
            let output_format = cli.format.unwrap_or(config.output_format);
            cmd_scan(&config, &run, output_format)
        }
        Commands::Accuracy { run } => {
            let config = Config::load()?;
            let output_format = cli.format.unwrap_or(config.output_format);
            cmd_accuracy(&config, &run, output_format)
        }
        Commands::Scenario => cmd_scenario(),
        Commands::Config {
            show,
            set_image_size,
            set_obscured,
            set_misidentification,
            set_significant_miscount,
            set_minor_miscount,
            set_foreign_object,
            set_bbox_failure,
            set_output,
            set_seed,
            clear_seed,
            set_scans,
            reset,
        } => cmd_config(ConfigChanges {
            show,
            image_size: set_image_size,
            obscured: set_obscured,
            misidentification: set_misidentification,
            significant_miscount: set_significant_miscount,
            minor_miscount: set_minor_miscount,
            foreign_object: set_foreign_object,
            bbox_failure: set_bbox_failure,
            output_format: set_output,
            seed: set_seed,
            clear_seed,
            scans: set_scans,
            reset,
        }),
    }
}

/// Build a session from the run options, falling back to config values
fn open_session(config: &Config, run: &RunArgs) -> Result<(ScanSession, u32)> {
    let scenario = match &run.scenario {
        Some(path) => Scenario::load_from_file(path)?,
        None => Scenario::demo(),
    };
    let scans = run.scans.unwrap_or(config.scan_count);
    let seed = run.seed.or(config.seed);

    let mut session = ScanSession::new(&config.simulation, &scenario, seed)?;
    session.apply_overrides(&run.overrides)?;
    info!(
        "Scanning shelf {} ({} products) {} time(s)",
        scenario.shelf_id,
        session.products().len(),
        scans
    );
    Ok((session, scans))
}

fn cmd_scan(config: &Config, run: &RunArgs, output_format: OutputFormat) -> Result<()> {
    let (mut session, scans) = open_session(config, run)?;

    match output_format {
        OutputFormat::Table => {
            let summary = session.run(scans, |index, report, shelf| {
                print_scan_table(index, report, shelf);
            });
            println!(
                "\n{} scan(s), {} anomalies, {} foreign objects",
                summary.scans, summary.anomalies, summary.foreign_objects
            );
            Ok(())
        }
        OutputFormat::Json => {
            // Snapshots borrow the shelf, so render each scan before the next one mutates it
            let mut snapshots = Vec::with_capacity(scans as usize);
            let mut failure = None;
            session.run(scans, |index, report, shelf| {
                match serde_json::to_value(ScanSnapshot::new(index, report, shelf)) {
                    Ok(value) => snapshots.push(value),
                    Err(e) => {
                        failure.get_or_insert(e);
                    }
                }
            });
            if let Some(e) = failure {
                return Err(e.into());
            }
            print_json(&snapshots)
        }
    }
}

fn cmd_accuracy(config: &Config, run: &RunArgs, output_format: OutputFormat) -> Result<()> {
    let (mut session, scans) = open_session(config, run)?;
    let summary = session.run(scans, |_, _, _| {});
    output_summary(output_format, &summary)
}

fn cmd_scenario() -> Result<()> {
    print!("{}", Scenario::demo().to_toml_string()?);
    Ok(())
}

/// Requested edits to the stored configuration
struct ConfigChanges {
    show: bool,
    image_size: Option<String>,
    obscured: Option<f64>,
    misidentification: Option<f64>,
    significant_miscount: Option<f64>,
    minor_miscount: Option<f64>,
    foreign_object: Option<f64>,
    bbox_failure: Option<f64>,
    output_format: Option<OutputFormat>,
    seed: Option<u64>,
    clear_seed: bool,
    scans: Option<u32>,
    reset: bool,
}

fn cmd_config(changes: ConfigChanges) -> Result<()> {
    if changes.reset {
        let config = Config::default();
        config.save()?;
        println!("Configuration reset to defaults");
        println!("\n{}", config);
        return Ok(());
    }

    let mut config = Config::load()?;
    let mut modified = false;

    if let Some(size) = changes.image_size {
        let (width, height) = parse_image_size(&size)?;
        config.simulation.image_width = width;
        config.simulation.image_height = height;
        modified = true;
    }

    let probabilities = [
        (changes.obscured, &mut config.simulation.obscured_probability),
        (
            changes.misidentification,
            &mut config.simulation.misidentification_probability,
        ),
        (
            changes.significant_miscount,
            &mut config.simulation.significant_miscount_probability,
        ),
        (
            changes.minor_miscount,
            &mut config.simulation.minor_miscount_probability,
        ),
        (
            changes.foreign_object,
            &mut config.simulation.foreign_object_probability,
        ),
        (
            changes.bbox_failure,
            &mut config.simulation.bounding_box_failure_probability,
        ),
    ];
    for (requested, field) in probabilities {
        if let Some(value) = requested {
            *field = value;
            modified = true;
        }
    }

    if let Some(output_format) = changes.output_format {
        config.output_format = output_format;
        modified = true;
    }

    if changes.clear_seed {
        config.seed = None;
        modified = true;
    }

    if let Some(seed) = changes.seed {
        config.seed = Some(seed);
        modified = true;
    }

    if let Some(scans) = changes.scans {
        config.scan_count = scans;
        modified = true;
    }

    if modified {
        config.save()?;
        println!("Configuration updated");
    }

    if changes.show || !modified {
        println!("{}", config);
    }

    Ok(())
}

/// Parse "WIDTHxHEIGHT" (e.g., "1280x720")
fn parse_image_size(value: &str) -> Result<(u32, u32)> {
    let invalid = || ConfigError::ParseError(format!("Invalid image size: {} (expected WxH)", value));
    let (width, height) = value
        .trim()
        .split_once(['x', 'X'])
        .ok_or_else(invalid)?;
    let width = width.trim().parse::<u32>().map_err(|_| invalid())?;
    let height = height.trim().parse::<u32>().map_err(|_| invalid())?;
    Ok((width, height))
}
