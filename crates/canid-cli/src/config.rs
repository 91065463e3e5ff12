//! Configuration management for the canid CLI.

use anyhow::{Context, Result};
use canid::prelude::SimulationConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "canid.toml";

/// Project configuration: the simulation itself plus where its output goes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(flatten)]
    pub simulation: SimulationConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory that receives one JSON snapshot per generation.
    #[serde(default = "default_dir")]
    pub dir: PathBuf,
    /// Write `summary.csv` next to the snapshots.
    #[serde(default = "default_summary_csv")]
    pub summary_csv: bool,
}

fn default_dir() -> PathBuf { PathBuf::from("generations") }
fn default_summary_csv() -> bool { true }

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_dir(),
            summary_csv: default_summary_csv(),
        }
    }
}

impl Config {
    /// Load canid.toml from the current or a parent directory, or defaults.
    pub fn load() -> Result<Self> {
        match find_config_file() {
            Some(path) => Self::load_from(&path),
            None => Ok(Config::default()),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config: {}", path.display()))
    }

    /// Save config to the specified path.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config: {}", path.display()))?;
        Ok(())
    }
}

/// Find canid.toml in current or parent directories.
fn find_config_file() -> Option<PathBuf> {
    let mut dir = std::env::current_dir().ok()?;
    loop {
        let config_path = dir.join(CONFIG_FILE);
        if config_path.exists() {
            return Some(config_path);
        }
        if !dir.pop() {
            break;
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use canid::prelude::{PackCensus, SelectionStrategy};
    use tempfile::TempDir;

    #[test]
    fn saved_default_loads_back() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        Config::default().save(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap(), Config::default());
    }

    #[test]
    fn saved_uncapped_config_stays_uncapped() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        let mut config = Config::default();
        config.simulation.run.generation_cap = None;
        config.save(&path).unwrap();

        assert_eq!(Config::load_from(&path).unwrap().simulation.run.generation_cap, None);
    }

    #[test]
    fn sections_sit_at_top_level() {
        let config: Config = toml::from_str(
            r#"
            [output]
            dir = "runs/a"

            [population]
            size = 40

            [food]
            pack_census = "disabled"

            [selection]
            strategy = "first_come"

            [run]
            generation_cap = 100
            seed = 7
            "#,
        )
        .unwrap();

        assert_eq!(config.output.dir, PathBuf::from("runs/a"));
        assert!(config.output.summary_csv);
        assert_eq!(config.simulation.population.size, 40);
        assert_eq!(config.simulation.food.pack_census, PackCensus::Disabled);
        assert_eq!(config.simulation.selection.strategy, SelectionStrategy::FirstCome);
        assert_eq!(config.simulation.run.generation_cap, Some(100));
        assert_eq!(config.simulation.run.seed, Some(7));
    }

    #[test]
    fn empty_file_is_default() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn malformed_file_reports_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "[population\nsize = ").unwrap();
        let err = Config::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config"));
    }
}
