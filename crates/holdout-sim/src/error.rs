//! Errors raised while building a simulation engine.
//!
//! Once an engine exists nothing inside a tick can fail; every per-tick
//! rejection is silent.

use rand::distributions::WeightedError;
use thiserror::Error;

use holdout_core::config::ConfigError;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("invalid arena configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("invalid spawn table: {0}")]
    SpawnTable(#[from] WeightedError),
}
