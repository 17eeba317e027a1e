//! Error types for configuration validation and rules invariants.

use std::path::PathBuf;

use thiserror::Error;

/// Malformed configuration, rejected before any simulation begins.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("board catalog is empty")]
    EmptyBoard,

    #[error("player roster is empty")]
    EmptyRoster,

    #[error("round limit must be positive")]
    ZeroRoundLimit,
}

/// A logic-level invariant violation inside the match engine. These indicate a
/// caller bug, never a reachable game state.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RulesError {
    #[error("purchase attempted on already-owned property '{property}'")]
    PurchaseOwned { property: String },

    #[error("rent charged to the owner of '{property}'")]
    RentToSelf { property: String },
}

/// Any failure surfaced by the simulation entry points.
#[derive(Debug, Error)]
pub enum SimError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Rules(#[from] RulesError),
}
