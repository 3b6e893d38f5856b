use std::sync::Arc;

use ballot_service::BallotService;
use ballotdb::BallotDb;
use events::EventBus;
use primitives::{Identity, ManualClock, Timestamp};

pub const START: Timestamp = 1_000;

pub fn _service() -> (BallotService, ManualClock) {
    let clock = ManualClock::new(START);
    let service = BallotService::new(
        Arc::new(BallotDb::in_memory()),
        EventBus::new(64),
        Arc::new(clock.clone()),
    );

    (service, clock)
}

pub fn _identity(name: &str) -> Identity {
    Identity::new(name).unwrap()
}

pub fn _options(labels: &[&str]) -> Vec<String> {
    labels.iter().map(|label| label.to_string()).collect()
}
