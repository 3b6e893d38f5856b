use ballot::Ballot;
use serde::{Deserialize, Serialize};

pub const SNAPSHOT_VERSION: u32 = 1;

/// On-disk form of a whole [`crate::BallotDb`]. Ballots are validated while
/// being deserialized, a snapshot breaking any ballot invariant fails to load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BallotDbSnapshot {
    pub version: u32,
    pub ballots: Vec<Ballot>,
}

impl BallotDbSnapshot {
    pub fn new(mut ballots: Vec<Ballot>) -> Self {
        ballots.sort_by_key(|ballot| ballot.id());

        Self {
            version: SNAPSHOT_VERSION,
            ballots,
        }
    }
}

impl Default for BallotDbSnapshot {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}
