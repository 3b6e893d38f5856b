use serde::{Deserialize, Serialize};

use crate::event_data::*;

// NOTE: naming convention for events goes as follows:
// <Subject><Verb, in past tense>, e.g. BallotCreated

#[derive(Debug, Clone, Hash, Eq, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum Event {
    /// `BallotCreated` is emitted once a new ballot has been stored. It
    /// announces the ballot's title, its creator and when voting closes.
    BallotCreated(BallotCreatedData),

    /// `VoteCast` is emitted after a vote has been committed to a ballot.
    /// Voter identity and choice are both public in this system.
    VoteCast(VoteCastData),

    /// `VotingEnded` is emitted every time the creator finalizes a closed
    /// ballot. Finalizing twice announces the same winner twice, subscribers
    /// wanting a single announcement must deduplicate on `ballot_id`.
    VotingEnded(VotingEndedData),
}

impl Event {
    /// Short, stable name of the event kind, used as a log field.
    pub fn kind(&self) -> &'static str {
        match self {
            Event::BallotCreated(_) => "ballot_created",
            Event::VoteCast(_) => "vote_cast",
            Event::VotingEnded(_) => "voting_ended",
        }
    }
}

impl From<BallotCreatedData> for Event {
    fn from(data: BallotCreatedData) -> Self {
        Event::BallotCreated(data)
    }
}

impl From<VoteCastData> for Event {
    fn from(data: VoteCastData) -> Self {
        Event::VoteCast(data)
    }
}

impl From<VotingEndedData> for Event {
    fn from(data: VotingEndedData) -> Self {
        Event::VotingEnded(data)
    }
}
