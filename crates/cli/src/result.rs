use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("no subcommand provided")]
    NoSubcommand,

    #[error("config error: {0}")]
    Config(#[from] ballotbox_config::ConfigError),

    #[error("{0}")]
    Service(#[from] ballot_service::ServiceError),

    #[error("storage error: {0}")]
    Storage(#[from] storage_utils::StorageError),

    #[error("primitive error: {0}")]
    Primitive(#[from] primitives::Error),

    #[error("invalid capability: {0}")]
    Capability(#[from] ballot::CapabilityParseError),

    #[error("unable to serialize output: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, CliError>;
