//! Run configuration.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use nierodka_core::EconomyConfig;

use crate::error::{SimError, SimResult};
use crate::strategy::StrategyKind;

/// One simulated session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Seed of the random stream.
    pub seed: u64,
    /// Seconds to simulate.
    pub ticks: u64,
    /// Manual clicks per second for strategies that click.
    pub clicks_per_tick: u32,
    /// Player behaviour.
    pub strategy: StrategyKind,
    /// Timeline sampling period in ticks.
    pub sample_every: u64,
    /// Wall-clock start, epoch milliseconds.
    pub start_ms: u64,
    /// Economy tuning.
    pub economy: EconomyConfig,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            ticks: 3_600,
            clicks_per_tick: 5,
            strategy: StrategyKind::GreedyRoi,
            sample_every: 60,
            start_ms: 1_700_000_000_000,
            economy: EconomyConfig::default(),
        }
    }
}

impl RunConfig {
    /// Parse JSON; missing fields take defaults.
    ///
    /// # Errors
    ///
    /// [`SimError::Json`] on malformed input, [`SimError::Config`] if the
    /// result does not validate.
    pub fn from_json(json: &str) -> SimResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a JSON file.
    ///
    /// # Errors
    ///
    /// See [`RunConfig::from_json`]; also [`SimError::Io`].
    pub fn load(path: impl AsRef<Path>) -> SimResult<Self> {
        Self::from_json(&fs::read_to_string(path)?)
    }

    /// Same run with another seed.
    #[must_use]
    pub fn with_seed(&self, seed: u64) -> Self {
        Self {
            seed,
            ..self.clone()
        }
    }

    /// Check the run parameters and the economy tuning.
    ///
    /// # Errors
    ///
    /// [`SimError::Config`] or [`SimError::Economy`].
    pub fn validate(&self) -> SimResult<()> {
        if self.sample_every == 0 {
            return Err(SimError::Config("sample_every must be at least 1".into()));
        }
        self.economy.validate()?;
        Ok(())
    }
}
