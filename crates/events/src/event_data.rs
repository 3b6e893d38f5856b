use primitives::{BallotId, Identity, OptionIndex, Timestamp, VoteCount};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub struct BallotCreatedData {
    pub ballot_id: BallotId,
    pub title: String,
    pub creator: Identity,
    pub end_time: Timestamp,
}

#[derive(Debug, Clone, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub struct VoteCastData {
    pub ballot_id: BallotId,
    pub voter: Identity,
    pub option_index: OptionIndex,
    pub option: String,
}

#[derive(Debug, Clone, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub struct VotingEndedData {
    pub ballot_id: BallotId,
    pub total_votes: VoteCount,
    pub winning_option: String,
    pub winning_votes: VoteCount,
}
