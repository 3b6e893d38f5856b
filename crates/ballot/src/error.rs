use primitives::{BallotId, DurationMs, Identity, OptionIndex, Timestamp};

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum BallotError {
    #[error("voting duration must be a positive number of milliseconds, got {0}")]
    InvalidDuration(DurationMs),

    #[error("a ballot needs at least one option")]
    NoOptions,

    #[error("voting ended at {end_time}")]
    VotingEnded { end_time: Timestamp },

    #[error("{0} has already voted")]
    AlreadyVoted(Identity),

    #[error("option {index} does not exist, ballot has {options} options")]
    InvalidOption { index: OptionIndex, options: usize },

    #[error("voting is open until {end_time}")]
    VotingNotEnded { end_time: Timestamp },

    #[error("capability does not authorize finalizing ballot {0}")]
    NotAuthorized(BallotId),
}

pub type Result<T> = std::result::Result<T, BallotError>;

/// Raised when a persisted ballot record breaks one of the ballot invariants.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("corrupted ballot record {ballot_id}: {reason}")]
pub struct CorruptedBallot {
    pub ballot_id: BallotId,
    pub reason: String,
}
