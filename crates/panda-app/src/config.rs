//! Driver configuration file.
//!
//! Every key is optional; a missing file section keeps the built-in defaults.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use panda_core::config::{FieldDimensions, Tuning};
use panda_sim::SimConfig;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub seed: u64,
    pub field: FieldDimensions,
    pub tuning: Tuning,
}

impl Default for AppConfig {
    fn default() -> Self {
        let sim = SimConfig::default();
        Self {
            seed: sim.seed,
            field: sim.field,
            tuning: sim.tuning,
        }
    }
}

impl AppConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: AppConfig = serde_json::from_str(json).context("parsing config JSON")?;
        Ok(config)
    }

    /// Read and parse a JSON config file.
    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::from_json_str(&json).with_context(|| format!("loading config {}", path.display()))
    }

    /// Validated engine configuration.
    pub fn into_sim_config(self) -> Result<SimConfig> {
        let sim = SimConfig {
            seed: self.seed,
            field: self.field,
            tuning: self.tuning,
        };
        sim.validate().context("invalid configuration")?;
        Ok(sim)
    }
}
