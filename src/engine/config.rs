//! Simulation configuration: board catalog, roster, round cap, trial count.
//! Loaded from TOML at runtime, with a built-in default setup.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::engine::board::PropertySpec;
use crate::engine::catalog;
use crate::engine::error::ConfigError;
use crate::engine::strategy::StrategyKind;

/// One roster entry: display name plus purchasing temperament.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSpec {
    pub name: String,
    pub strategy: StrategyKind,
}

/// Top-level TOML file structure. Every field falls back to the built-in
/// default setup, so a partial file is fine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimConfig {
    /// Round cap per match; hitting it ends the match by timeout.
    #[serde(default = "default_round_limit")]
    pub round_limit: u32,
    /// Number of independent matches to play.
    #[serde(default = "default_trials")]
    pub trials: usize,
    /// Run trials across all cores.
    #[serde(default)]
    pub parallel: bool,
    #[serde(default = "crate::engine::catalog::default_board")]
    pub board: Vec<PropertySpec>,
    #[serde(default = "crate::engine::catalog::default_roster")]
    pub players: Vec<PlayerSpec>,
}

fn default_round_limit() -> u32 {
    1000
}

fn default_trials() -> usize {
    300
}

impl Default for SimConfig {
    fn default() -> Self {
        SimConfig {
            round_limit: default_round_limit(),
            trials: default_trials(),
            parallel: false,
            board: catalog::default_board(),
            players: catalog::default_roster(),
        }
    }
}

impl SimConfig {
    /// Fail fast on configurations no simulation should start from.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.board.is_empty() {
            return Err(ConfigError::EmptyBoard);
        }
        if self.players.is_empty() {
            return Err(ConfigError::EmptyRoster);
        }
        if self.round_limit == 0 {
            return Err(ConfigError::ZeroRoundLimit);
        }
        Ok(())
    }

    /// Load and validate a config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: SimConfig = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        tracing::info!(
            path = %path.display(),
            properties = config.board.len(),
            players = config.players.len(),
            "loaded simulation config"
        );
        Ok(config)
    }
}
