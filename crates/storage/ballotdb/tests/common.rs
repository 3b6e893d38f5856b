use std::{env, path::PathBuf};

use ballot::{Ballot, CreatorCapability};
use primitives::{Identity, Timestamp, DAY};

pub const START: Timestamp = 1_000;

pub fn _generate_random_string() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

pub fn _temp_snapshot_path() -> PathBuf {
    env::temp_dir()
        .join(format!("ballotdb-{}", _generate_random_string()))
        .join("ballots.json")
}

pub fn _identity(name: &str) -> Identity {
    Identity::new(name).unwrap()
}

pub fn _generate_ballot(options: &[&str]) -> (Ballot, CreatorCapability) {
    Ballot::create(
        format!("ballot {}", _generate_random_string()),
        "generated for tests",
        options.iter().map(|o| o.to_string()).collect(),
        DAY,
        START,
        _identity("creator"),
    )
    .unwrap()
}
