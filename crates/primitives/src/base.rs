use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};
use uuid::Uuid;

/// Milliseconds since the Unix epoch.
pub type Timestamp = u64;

/// Length of a voting window, in milliseconds.
pub type DurationMs = u64;

/// Position of an option within a ballot's option list.
pub type OptionIndex = usize;

pub type VoteCount = u64;

// Time-related helper constants, all in milliseconds
pub const SECOND: DurationMs = 1000;
pub const MINUTE: DurationMs = SECOND * 60;
pub const HOUR: DurationMs = MINUTE * 60;
pub const DAY: DurationMs = HOUR * 24;

pub const DEFAULT_BALLOTBOX_DATA_DIR_PATH: &str = ".ballotbox";
pub const DEFAULT_BALLOTBOX_DB_PATH: &str = ".ballotbox/ballots.json";
pub const DEFAULT_VOTING_DURATION_MS: DurationMs = DAY;
pub const DEFAULT_EVENT_BUFFER: usize = 1000;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("invalid environment: {0}")]
    InvalidEnvironment(String),

    #[error("invalid identity: {0}")]
    InvalidIdentity(String),

    #[error("invalid ballot id: {0}")]
    InvalidBallotId(String),

    #[error("{0}")]
    Other(String),
}

/// Unique identifier of a ballot, allocated once at creation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BallotId(Uuid);

impl BallotId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for BallotId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for BallotId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl Display for BallotId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for BallotId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|_| Error::InvalidBallotId(s.to_string()))
    }
}
