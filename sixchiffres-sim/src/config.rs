use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const MIN_SIMULATIONS: u32 = 1_000;
pub const MAX_SIMULATIONS: u32 = 100_000;
pub const SIMULATIONS_STEP: u32 = 1_000;
pub const DEFAULT_SIMULATIONS: u32 = 10_000;
pub const DEFAULT_SHARD_SIZE: u32 = 1_000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub simulations: u32,
    /// Absent : graine tirée de l'entropie du processus.
    pub seed: Option<u64>,
    pub shard_size: u32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            simulations: DEFAULT_SIMULATIONS,
            seed: None,
            shard_size: DEFAULT_SHARD_SIZE,
        }
    }
}

impl SimulationConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_SIMULATIONS..=MAX_SIMULATIONS).contains(&self.simulations) {
            return Err(ConfigError::SimulationsOutOfRange(self.simulations));
        }
        if self.simulations % SIMULATIONS_STEP != 0 {
            return Err(ConfigError::SimulationsNotOnStep(self.simulations));
        }
        if self.shard_size == 0 {
            return Err(ConfigError::ZeroShardSize);
        }
        Ok(())
    }
}

pub fn save_config(config: &SimulationConfig, path: &Path) -> Result<(), ConfigError> {
    let json = serde_json::to_string_pretty(config)?;
    std::fs::write(path, json)?;
    Ok(())
}

pub fn load_config(path: &Path) -> Result<SimulationConfig, ConfigError> {
    let json = std::fs::read_to_string(path)?;
    let config: SimulationConfig = serde_json::from_str(&json)?;
    config.validate()?;
    Ok(config)
}
