use primitives::BallotId;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),

    #[error("ballot {0} already exists")]
    RecordExists(BallotId),

    #[error("ballot {0} not found")]
    NotFound(BallotId),
}

pub type Result<T> = std::result::Result<T, StorageError>;
