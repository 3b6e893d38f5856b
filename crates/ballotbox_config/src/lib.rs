mod ballotbox_config;
mod loader;

pub use ballotbox_config::*;
pub use loader::*;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load config: {0}")]
    Load(#[from] config::ConfigError),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
