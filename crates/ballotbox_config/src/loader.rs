use std::path::Path;

use config::{Config, File};
use primitives::{
    get_ballotbox_environment,
    DEFAULT_BALLOTBOX_DATA_DIR_PATH,
    DEFAULT_BALLOTBOX_DB_PATH,
    DEFAULT_EVENT_BUFFER,
    DEFAULT_VOTING_DURATION_MS,
};

use crate::{BallotBoxConfig, Result};

/// Prefix shared by every environment variable the loader reads, e.g.
/// `BALLOTBOX_DB_PATH` or `BALLOTBOX_DEFAULT_DURATION_MS`.
pub const BALLOTBOX_CONFIG_ENV_PREFIX: &str = "BALLOTBOX";

impl BallotBoxConfig {
    /// Resolves the config from the built-in defaults, then the optional
    /// file at `path`, then `BALLOTBOX_*` environment variables. Later sources
    /// win. The result is validated before it is returned.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder()
            .set_default("data_dir", DEFAULT_BALLOTBOX_DATA_DIR_PATH)?
            .set_default("db_path", DEFAULT_BALLOTBOX_DB_PATH)?
            .set_default("event_buffer_size", DEFAULT_EVENT_BUFFER as u64)?
            .set_default("default_duration_ms", DEFAULT_VOTING_DURATION_MS)?
            .set_default("environment", get_ballotbox_environment().to_string())?;

        if let Some(path) = path {
            builder = builder.add_source(File::from(path).required(true));
        }

        let config: BallotBoxConfig = builder
            .add_source(
                config::Environment::with_prefix(BALLOTBOX_CONFIG_ENV_PREFIX).try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        config.validate()?;

        Ok(config)
    }
}
