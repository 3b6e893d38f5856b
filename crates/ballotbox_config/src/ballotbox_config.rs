use std::path::PathBuf;

use derive_builder::Builder;
use primitives::{
    get_ballotbox_environment,
    DurationMs,
    Environment,
    DEFAULT_BALLOTBOX_DATA_DIR_PATH,
    DEFAULT_BALLOTBOX_DB_PATH,
    DEFAULT_EVENT_BUFFER,
    DEFAULT_VOTING_DURATION_MS,
};
use serde::{Deserialize, Serialize};

use crate::{ConfigError, Result};

#[derive(Builder, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BallotBoxConfig {
    /// Directory used to persist all ballotbox information to disk
    pub data_dir: PathBuf,

    /// Path where the ballot snapshot resides on disk
    pub db_path: PathBuf,

    /// How many events a slow subscriber may fall behind before it starts
    /// losing the oldest ones
    #[builder(default = "primitives::DEFAULT_EVENT_BUFFER")]
    pub event_buffer_size: usize,

    /// Voting window used when a ballot is created without an explicit one
    #[builder(default = "primitives::DEFAULT_VOTING_DURATION_MS")]
    pub default_duration_ms: DurationMs,

    #[builder(default)]
    pub environment: Environment,
}

impl BallotBoxConfig {
    pub fn validate(&self) -> Result<()> {
        if self.event_buffer_size == 0 {
            return Err(ConfigError::Other(
                "event buffer size must be greater than 0".to_string(),
            ));
        }

        if self.default_duration_ms == 0 {
            return Err(ConfigError::Other(
                "default voting duration must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    /// Overrides fields of `self` with the ones set in `other`.
    pub fn merge(&self, other: PartialBallotBoxConfig) -> Self {
        Self {
            data_dir: other.data_dir.unwrap_or_else(|| self.data_dir.clone()),
            db_path: other.db_path.unwrap_or_else(|| self.db_path.clone()),
            event_buffer_size: other.event_buffer_size.unwrap_or(self.event_buffer_size),
            default_duration_ms: other
                .default_duration_ms
                .unwrap_or(self.default_duration_ms),
            environment: other.environment.unwrap_or(self.environment),
        }
    }
}

/// Values supplied on the command line. Unset fields keep whatever the file
/// and environment resolved to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartialBallotBoxConfig {
    pub data_dir: Option<PathBuf>,
    pub db_path: Option<PathBuf>,
    pub event_buffer_size: Option<usize>,
    pub default_duration_ms: Option<DurationMs>,
    pub environment: Option<Environment>,
}

impl Default for BallotBoxConfig {
    fn default() -> Self {
        BallotBoxConfig {
            data_dir: PathBuf::from(DEFAULT_BALLOTBOX_DATA_DIR_PATH),
            db_path: PathBuf::from(DEFAULT_BALLOTBOX_DB_PATH),
            event_buffer_size: DEFAULT_EVENT_BUFFER,
            default_duration_ms: DEFAULT_VOTING_DURATION_MS,
            environment: get_ballotbox_environment(),
        }
    }
}
