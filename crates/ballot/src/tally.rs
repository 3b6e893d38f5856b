use primitives::{BallotId, OptionIndex, Timestamp, VoteCount};
use serde::{Deserialize, Serialize};

/// Descriptive fields of a ballot plus its running total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BallotInfo {
    pub title: String,
    pub description: String,
    pub start_time: Timestamp,
    pub end_time: Timestamp,
    pub total_votes: VoteCount,
}

/// Options and their counts, both in option index order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BallotResults {
    pub options: Vec<String>,
    pub vote_counts: Vec<VoteCount>,
}

impl BallotResults {
    pub fn iter(&self) -> impl Iterator<Item = (&str, VoteCount)> {
        self.options
            .iter()
            .map(String::as_str)
            .zip(self.vote_counts.iter().copied())
    }
}

/// The option a ballot's tallies currently favour.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VotingOutcome {
    pub ballot_id: BallotId,
    pub winning_option_index: OptionIndex,
    pub winning_option: String,
    pub winning_votes: VoteCount,
    pub total_votes: VoteCount,
}

/// Returns the index and count of the option with the most votes.
///
/// The scan only moves to a later option on a strictly greater count, so a
/// tie goes to the lowest index. `None` for an empty tally.
pub fn leading_option(vote_counts: &[VoteCount]) -> Option<(OptionIndex, VoteCount)> {
    let (first, rest) = vote_counts.split_first()?;

    let mut leader = (0, *first);
    for (index, count) in rest.iter().enumerate() {
        if *count > leader.1 {
            leader = (index + 1, *count);
        }
    }

    Some(leader)
}
