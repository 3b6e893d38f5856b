use std::sync::Arc;

use ballot::{
    Ballot,
    BallotInfo,
    BallotResults,
    CreatorCapability,
    VotingOutcome,
};
use ballotdb::BallotDb;
use events::{BallotCreatedData, EventBus, EventSubscriber, VoteCastData, VotingEndedData};
use primitives::{BallotId, Clock, DurationMs, Identity, OptionIndex, Timestamp, VoteCount};
use serde::{Deserialize, Serialize};
use telemetry::{info, warn};

use crate::Result;

/// One line of [`BallotService::list_ballots`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BallotSummary {
    pub id: BallotId,
    pub title: String,
    pub end_time: Timestamp,
    pub total_votes: VoteCount,
}

#[derive(Clone)]
pub struct BallotService {
    db: Arc<BallotDb>,
    events: EventBus,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for BallotService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BallotService")
            .field("db", &self.db)
            .field("events", &self.events)
            .field("now", &self.clock.now())
            .finish()
    }
}

impl BallotService {
    pub fn new(db: Arc<BallotDb>, events: EventBus, clock: Arc<dyn Clock>) -> Self {
        Self { db, events, clock }
    }

    pub fn db(&self) -> &Arc<BallotDb> {
        &self.db
    }

    pub fn subscribe(&self) -> EventSubscriber {
        self.events.subscribe()
    }

    /// Writes every ballot back to the db's snapshot file, if it has one.
    pub fn persist(&self) -> Result<()> {
        self.db.save()?;

        Ok(())
    }

    pub fn create_ballot(
        &self,
        title: impl Into<String>,
        description: impl Into<String>,
        options: Vec<String>,
        duration: DurationMs,
        creator: Identity,
    ) -> Result<(BallotId, CreatorCapability)> {
        let now = self.clock.now();

        let (ballot, capability) =
            match Ballot::create(title, description, options, duration, now, creator.clone()) {
                Ok(created) => created,
                Err(err) => {
                    warn!(creator = %creator, error = %err, "ballot creation rejected");
                    return Err(err.into());
                },
            };

        let id = ballot.id();
        let created = BallotCreatedData {
            ballot_id: id,
            title: ballot.title().to_string(),
            creator: creator.clone(),
            end_time: ballot.end_time(),
        };

        self.db.insert(ballot)?;

        info!(
            ballot_id = %id,
            creator = %creator,
            end_time = created.end_time,
            "ballot created"
        );
        self.events.publish(created);

        Ok((id, capability))
    }

    /// Records `voter`'s choice. The ballot stays locked from the time check
    /// until all three counters have moved.
    pub fn cast_vote(&self, id: BallotId, option: OptionIndex, voter: &Identity) -> Result<()> {
        let now = self.clock.now();

        let applied = self.db.write(&id, |ballot| -> ballot::Result<String> {
            ballot.cast_vote(option, now, voter)?;

            Ok(ballot.option(option).unwrap_or_default().to_string())
        })?;

        let label = match applied {
            Ok(label) => label,
            Err(err) => {
                warn!(
                    ballot_id = %id,
                    voter = %voter,
                    option_index = option,
                    error = %err,
                    "vote rejected"
                );
                return Err(err.into());
            },
        };

        info!(ballot_id = %id, voter = %voter, option_index = option, "vote cast");
        self.events.publish(VoteCastData {
            ballot_id: id,
            voter: voter.clone(),
            option_index: option,
            option: label,
        });

        Ok(())
    }

    /// Finalizes the ballot and announces the winner. Every successful call
    /// announces again.
    pub fn end_voting(&self, id: BallotId, capability: &CreatorCapability) -> Result<VotingOutcome> {
        let now = self.clock.now();

        let outcome = match self.db.read(&id, |ballot| ballot.end_voting(capability, now))? {
            Ok(outcome) => outcome,
            Err(err) => {
                warn!(ballot_id = %id, error = %err, "end voting rejected");
                return Err(err.into());
            },
        };

        info!(
            ballot_id = %id,
            winning_option = %outcome.winning_option,
            winning_votes = outcome.winning_votes,
            total_votes = outcome.total_votes,
            "voting ended"
        );
        self.events.publish(VotingEndedData {
            ballot_id: id,
            total_votes: outcome.total_votes,
            winning_option: outcome.winning_option.clone(),
            winning_votes: outcome.winning_votes,
        });

        Ok(outcome)
    }

    pub fn get_info(&self, id: BallotId) -> Result<BallotInfo> {
        Ok(self.db.read(&id, Ballot::info)?)
    }

    pub fn get_options(&self, id: BallotId) -> Result<Vec<String>> {
        Ok(self.db.read(&id, |ballot| ballot.options().to_vec())?)
    }

    /// Zero for an option the ballot doesn't have.
    pub fn get_vote_count(&self, id: BallotId, option: OptionIndex) -> Result<VoteCount> {
        Ok(self.db.read(&id, |ballot| ballot.vote_count(option))?)
    }

    pub fn has_voted(&self, id: BallotId, identity: &Identity) -> Result<bool> {
        Ok(self.db.read(&id, |ballot| ballot.has_voted(identity))?)
    }

    pub fn is_active(&self, id: BallotId) -> Result<bool> {
        let now = self.clock.now();

        Ok(self.db.read(&id, |ballot| ballot.is_active(now))?)
    }

    pub fn get_results(&self, id: BallotId) -> Result<BallotResults> {
        Ok(self.db.read(&id, Ballot::results)?)
    }

    /// The current leader, computed without finalizing: no capability is
    /// needed and nothing is announced.
    pub fn get_outcome(&self, id: BallotId) -> Result<VotingOutcome> {
        Ok(self.db.read(&id, Ballot::outcome)?)
    }

    /// Live tallies together with the leader they produce, both taken from
    /// the same state of the ballot.
    pub fn get_standings(&self, id: BallotId) -> Result<(BallotResults, VotingOutcome)> {
        Ok(self
            .db
            .read(&id, |ballot| (ballot.results(), ballot.outcome()))?)
    }

    /// Every ballot, soonest to close first.
    pub fn list_ballots(&self) -> Vec<BallotSummary> {
        let mut summaries = self.db.read_all(|ballot| BallotSummary {
            id: ballot.id(),
            title: ballot.title().to_string(),
            end_time: ballot.end_time(),
            total_votes: ballot.total_votes(),
        });

        summaries.sort_by(|a, b| a.end_time.cmp(&b.end_time).then(a.id.cmp(&b.id)));
        summaries
    }
}
