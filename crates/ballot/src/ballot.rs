use std::collections::BTreeSet;

use primitives::{BallotId, DurationMs, Identity, OptionIndex, Timestamp, VoteCount};
use serde::{Deserialize, Serialize};

use crate::{
    leading_option, BallotError, BallotInfo, BallotResults, CapabilityDigest, CorruptedBallot,
    CreatorCapability, Result, VotingOutcome,
};

/// A single proposal with a fixed set of options and a voting window.
///
/// Invariants, upheld by every operation and checked again when a ballot is
/// loaded from a [`BallotRecord`]:
///
/// * `vote_counts` has exactly one entry per option
/// * `total_votes` is the sum of `vote_counts` and the number of voters
/// * `start_time < end_time`
/// * options never change after creation
///
/// Failed operations leave the ballot untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BallotRecord", into = "BallotRecord")]
pub struct Ballot {
    id: BallotId,
    title: String,
    description: String,
    options: Vec<String>,
    vote_counts: Vec<VoteCount>,
    voted_identities: BTreeSet<Identity>,
    creator: Identity,
    start_time: Timestamp,
    end_time: Timestamp,
    total_votes: VoteCount,
    capability_digest: CapabilityDigest,
}

impl Ballot {
    /// Opens a new ballot at `now` for `duration` milliseconds and mints the
    /// capability its creator needs to finalize it.
    pub fn create(
        title: impl Into<String>,
        description: impl Into<String>,
        options: Vec<String>,
        duration: DurationMs,
        now: Timestamp,
        creator: Identity,
    ) -> Result<(Ballot, CreatorCapability)> {
        if duration == 0 {
            return Err(BallotError::InvalidDuration(duration));
        }

        if options.is_empty() {
            return Err(BallotError::NoOptions);
        }

        let end_time = now
            .checked_add(duration)
            .ok_or(BallotError::InvalidDuration(duration))?;

        let id = BallotId::new();
        let capability = CreatorCapability::mint(id);

        let ballot = Ballot {
            id,
            title: title.into(),
            description: description.into(),
            vote_counts: vec![0; options.len()],
            options,
            voted_identities: BTreeSet::new(),
            creator,
            start_time: now,
            end_time,
            total_votes: 0,
            capability_digest: capability.digest(),
        };

        Ok((ballot, capability))
    }

    /// Records `voter`'s vote for `option`.
    ///
    /// Checks run in a fixed order, so a late duplicate vote for a bogus
    /// option reports `VotingEnded`, an in-time one `AlreadyVoted`.
    pub fn cast_vote(
        &mut self,
        option: OptionIndex,
        now: Timestamp,
        voter: &Identity,
    ) -> Result<()> {
        if now >= self.end_time {
            return Err(BallotError::VotingEnded {
                end_time: self.end_time,
            });
        }

        if self.voted_identities.contains(voter) {
            return Err(BallotError::AlreadyVoted(voter.clone()));
        }

        if option >= self.options.len() {
            return Err(BallotError::InvalidOption {
                index: option,
                options: self.options.len(),
            });
        }

        self.voted_identities.insert(voter.clone());
        self.vote_counts[option] += 1;
        self.total_votes += 1;

        Ok(())
    }

    /// Computes the winner once the window has closed.
    ///
    /// Nothing is mutated, so repeated calls agree. Only the holder of this
    /// ballot's capability may do it.
    pub fn end_voting(
        &self,
        capability: &CreatorCapability,
        now: Timestamp,
    ) -> Result<VotingOutcome> {
        if now < self.end_time {
            return Err(BallotError::VotingNotEnded {
                end_time: self.end_time,
            });
        }

        if !self.authorizes(capability) {
            return Err(BallotError::NotAuthorized(self.id));
        }

        Ok(self.outcome())
    }

    /// Whether `capability` was minted for this ballot.
    pub fn authorizes(&self, capability: &CreatorCapability) -> bool {
        capability.ballot_id() == self.id && capability.digest() == self.capability_digest
    }

    /// The current leader under the same tie-break as [`Ballot::end_voting`],
    /// without its time or capability checks.
    pub fn outcome(&self) -> VotingOutcome {
        // options are never empty, see `create`
        let (winning_option_index, winning_votes) =
            leading_option(&self.vote_counts).unwrap_or_default();

        VotingOutcome {
            ballot_id: self.id,
            winning_option_index,
            winning_option: self.options[winning_option_index].clone(),
            winning_votes,
            total_votes: self.total_votes,
        }
    }

    pub fn id(&self) -> BallotId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn creator(&self) -> &Identity {
        &self.creator
    }

    pub fn start_time(&self) -> Timestamp {
        self.start_time
    }

    pub fn end_time(&self) -> Timestamp {
        self.end_time
    }

    pub fn total_votes(&self) -> VoteCount {
        self.total_votes
    }

    pub fn info(&self) -> BallotInfo {
        BallotInfo {
            title: self.title.clone(),
            description: self.description.clone(),
            start_time: self.start_time,
            end_time: self.end_time,
            total_votes: self.total_votes,
        }
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn option(&self, index: OptionIndex) -> Option<&str> {
        self.options.get(index).map(String::as_str)
    }

    /// Votes recorded for `option`, zero for an index the ballot doesn't have.
    pub fn vote_count(&self, option: OptionIndex) -> VoteCount {
        self.vote_counts.get(option).copied().unwrap_or(0)
    }

    pub fn has_voted(&self, identity: &Identity) -> bool {
        self.voted_identities.contains(identity)
    }

    pub fn is_active(&self, now: Timestamp) -> bool {
        self.start_time <= now && now < self.end_time
    }

    /// Live tallies, readable before and after the window closes.
    pub fn results(&self) -> BallotResults {
        BallotResults {
            options: self.options.clone(),
            vote_counts: self.vote_counts.clone(),
        }
    }
}

/// Flat, serializable form of a [`Ballot`], used by storage backends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BallotRecord {
    pub id: BallotId,
    pub title: String,
    pub description: String,
    pub options: Vec<String>,
    pub vote_counts: Vec<VoteCount>,
    pub voted_identities: BTreeSet<Identity>,
    pub creator: Identity,
    pub start_time: Timestamp,
    pub end_time: Timestamp,
    pub total_votes: VoteCount,
    pub capability_digest: String,
}

impl From<Ballot> for BallotRecord {
    fn from(ballot: Ballot) -> Self {
        Self {
            id: ballot.id,
            title: ballot.title,
            description: ballot.description,
            options: ballot.options,
            vote_counts: ballot.vote_counts,
            voted_identities: ballot.voted_identities,
            creator: ballot.creator,
            start_time: ballot.start_time,
            end_time: ballot.end_time,
            total_votes: ballot.total_votes,
            capability_digest: ballot.capability_digest.to_hex(),
        }
    }
}

impl TryFrom<BallotRecord> for Ballot {
    type Error = CorruptedBallot;

    fn try_from(record: BallotRecord) -> std::result::Result<Self, Self::Error> {
        let ballot_id = record.id;
        let corrupted = |reason: String| CorruptedBallot { ballot_id, reason };

        if record.options.is_empty() {
            return Err(corrupted("ballot has no options".to_string()));
        }

        if record.vote_counts.len() != record.options.len() {
            return Err(corrupted(format!(
                "{} vote counts for {} options",
                record.vote_counts.len(),
                record.options.len()
            )));
        }

        let sum = record
            .vote_counts
            .iter()
            .try_fold(0u64, |acc, count| acc.checked_add(*count))
            .ok_or_else(|| corrupted("vote counts overflow".to_string()))?;

        if sum != record.total_votes || record.voted_identities.len() as VoteCount != sum {
            return Err(corrupted(format!(
                "total {} with {} voters does not match counted {}",
                record.total_votes,
                record.voted_identities.len(),
                sum
            )));
        }

        if record.start_time >= record.end_time {
            return Err(corrupted(format!(
                "window starts at {} but ends at {}",
                record.start_time, record.end_time
            )));
        }

        let capability_digest = CapabilityDigest::from_hex(&record.capability_digest)
            .map_err(|err| corrupted(format!("capability digest: {err}")))?;

        Ok(Ballot {
            id: record.id,
            title: record.title,
            description: record.description,
            options: record.options,
            vote_counts: record.vote_counts,
            voted_identities: record.voted_identities,
            creator: record.creator,
            start_time: record.start_time,
            end_time: record.end_time,
            total_votes: record.total_votes,
            capability_digest,
        })
    }
}
