//! Run configuration.
//!
//! One `MatchConfig` describes one invocation: the seed for the die roller,
//! where the append-only game log lives, and whether turns are echoed to
//! the console.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::error::{MatchError, Result};

/// Default game log, relative to the working directory.
pub const DEFAULT_LOG_PATH: &str = "log.txt";

/// Configuration for a single match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchConfig {
    /// Seed for the die roller. Same seed produces the same match.
    pub seed: u64,

    /// Game log file, opened in append mode.
    pub log_path: PathBuf,

    /// Echo each player's dice to the console as they are rolled.
    pub echo_turns: bool,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            log_path: PathBuf::from(DEFAULT_LOG_PATH),
            echo_turns: true,
        }
    }
}

impl MatchConfig {
    /// Create a config with the given seed and defaults elsewhere.
    pub fn new(seed: u64) -> Self {
        Self::default().with_seed(seed)
    }

    /// Set the seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the game log path.
    pub fn with_log_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.log_path = path.into();
        self
    }

    /// Enable or disable the per-turn console echo.
    pub fn with_echo(mut self, echo: bool) -> Self {
        self.echo_turns = echo;
        self
    }

    /// Check the config before any unit starts.
    pub fn validate(&self) -> Result<()> {
        if self.log_path.as_os_str().is_empty() {
            return Err(MatchError::startup("log path is empty"));
        }
        if self.log_path.is_dir() {
            return Err(MatchError::startup(format!(
                "log path {} is a directory",
                self.log_path.display()
            )));
        }
        Ok(())
    }
}
