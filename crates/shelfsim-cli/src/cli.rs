//! CLI definition using clap

use clap::{Args, Parser, Subcommand};
use shelfsim_types::OutputFormat;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "shelf-sim")]
#[command(author = "yuuji")]
#[command(version)]
#[command(about = "Synthetic shelf-monitoring detections with configurable error modes")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (json, table). Uses config value if not specified.
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Verbose output (debug logging)
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

/// Options shared by commands that run scans
#[derive(Args)]
pub struct RunArgs {
    /// Scenario TOML file. Uses the built-in demo shelf if not specified.
    #[arg(long, short = 's')]
    pub scenario: Option<PathBuf>,

    /// Number of scans. Uses config value if not specified.
    #[arg(long, short = 'n')]
    pub scans: Option<u32>,

    /// Random seed for reproducible output. Uses config value if not specified.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Override a true quantity before scanning (e.g., "apple-gala=0")
    #[arg(long = "set", value_name = "PRODUCT_ID=QTY")]
    pub overrides: Vec<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Scan a shelf and print every item after each scan
    Scan {
        #[command(flatten)]
        run: RunArgs,
    },

    /// Scan a shelf repeatedly and print detection accuracy statistics
    Accuracy {
        #[command(flatten)]
        run: RunArgs,
    },

    /// Print the built-in demo scenario as TOML
    Scenario,

    /// Manage configuration
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,

        /// Set image size (e.g., "1280x720")
        #[arg(long, value_name = "WxH")]
        set_image_size: Option<String>,

        /// Set obscured probability (0.0-1.0)
        #[arg(long)]
        set_obscured: Option<f64>,

        /// Set misidentification probability (0.0-1.0)
        #[arg(long)]
        set_misidentification: Option<f64>,

        /// Set significant miscount probability (0.0-1.0)
        #[arg(long)]
        set_significant_miscount: Option<f64>,

        /// Set minor miscount probability (0.0-1.0)
        #[arg(long)]
        set_minor_miscount: Option<f64>,

        /// Set foreign object probability per spot check (0.0-1.0)
        #[arg(long)]
        set_foreign_object: Option<f64>,

        /// Set bounding box failure probability (0.0-1.0)
        #[arg(long)]
        set_bbox_failure: Option<f64>,

        /// Set default output format
        #[arg(long)]
        set_output: Option<OutputFormat>,

        /// Set default seed
        #[arg(long)]
        set_seed: Option<u64>,

        /// Remove the default seed
        #[arg(long)]
        clear_seed: bool,

        /// Set default number of scans
        #[arg(long)]
        set_scans: Option<u32>,

        /// Reset to defaults
        #[arg(long)]
        reset: bool,
    },
}
