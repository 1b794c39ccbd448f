//! Configuration management for shelf-sim
//!
//! Config stored at: ~/.config/shelf-sim/config.json

use serde::{Deserialize, Serialize};
use shelfsim_domain::SimulationConfig;
use shelfsim_types::{ConfigError, OutputFormat, Result};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Detector error-mode probabilities and image size
    #[serde(default)]
    pub simulation: SimulationConfig,

    /// Default output format (json, table)
    #[serde(default = "default_output_format")]
    pub output_format: OutputFormat,

    /// Fixed seed for reproducible runs; random when unset
    #[serde(default)]
    pub seed: Option<u64>,

    /// Number of scans per run
    #[serde(default = "default_scan_count")]
    pub scan_count: u32,
}

fn default_output_format() -> OutputFormat {
    OutputFormat::Table
}

fn default_scan_count() -> u32 {
    1
}

impl Default for Config {
    fn default() -> Self {
        Self {
            simulation: SimulationConfig::default(),
            output_format: default_output_format(),
            seed: None,
            scan_count: default_scan_count(),
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or(ConfigError::NotFound)?
            .join("shelf-sim");
        Ok(config_dir)
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    /// Load config from file, or return defaults
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load config from an explicit path; a missing file yields defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)
            .map_err(|e| ConfigError::ParseError(format!("{}: {}", path.display(), e)))?;
        config.simulation.validate()?;
        Ok(config)
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        self.simulation.validate()?;

        // Ensure directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| ConfigError::SaveError(e.to_string()))?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(|e| ConfigError::SaveError(e.to_string()))?;
        Ok(())
    }
}

impl std::fmt::Display for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Shelf Sim Configuration")?;
        writeln!(f, "=======================")?;
        writeln!(f)?;
        write!(f, "{}", self.simulation)?;
        writeln!(f, "Output format:       {}", self.output_format)?;
        writeln!(
            f,
            "Seed:                {}",
            self.seed
                .map(|s| s.to_string())
                .unwrap_or_else(|| "(random)".to_string())
        )?;
        writeln!(f, "Scans per run:       {}", self.scan_count)?;

        if let Ok(path) = Self::config_path() {
            writeln!(f)?;
            writeln!(f, "Config file:         {}", path.display())?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shelfsim_types::Error;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.json")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let config = Config {
            simulation: SimulationConfig::default().with_obscured_probability(0.25),
            output_format: OutputFormat::Json,
            seed: Some(42),
            scan_count: 5,
        };
        config.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"seed": 7, "simulation": {"image_width": 640}}"#).unwrap();
        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.scan_count, 1);
        assert_eq!(config.simulation.image_width, 640);
        assert_eq!(config.simulation.image_height, 720);
    }

    #[test]
    fn test_invalid_probability_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"simulation": {"obscured_probability": 2.0}}"#).unwrap();
        assert!(matches!(Config::load_from(&path), Err(Error::Validation(_))));
    }

    #[test]
    fn test_malformed_json_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{not json").unwrap();
        assert!(matches!(
            Config::load_from(&path),
            Err(Error::Config(ConfigError::ParseError(_)))
        ));
    }
}
