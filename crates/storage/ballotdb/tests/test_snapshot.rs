use std::{
    fs,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    thread,
    time::Duration,
};

use ballotdb::{BallotDb, BallotDbSnapshot, StorageError};
use serial_test::serial;

mod common;

use common::{_generate_ballot, _identity, _temp_snapshot_path, START};

#[test]
#[serial]
fn opening_a_missing_snapshot_starts_empty() {
    let path = _temp_snapshot_path();

    let db = BallotDb::open(&path).unwrap();

    assert!(db.is_empty());
    assert_eq!(db.path(), Some(path.as_path()));
    assert!(!path.exists());
}

#[test]
#[serial]
fn ballots_survive_a_save_and_reopen() {
    let path = _temp_snapshot_path();
    let db = BallotDb::open(&path).unwrap();

    let (first, first_cap) = _generate_ballot(&["Yes", "No", "Abstain"]);
    let (second, _) = _generate_ballot(&["Red", "Blue"]);
    let first_id = first.id();
    let second_id = second.id();
    db.insert(first).unwrap();
    db.insert(second).unwrap();

    for (voter, option) in [("a", 0), ("b", 1), ("c", 0)] {
        db.write(&first_id, |ballot| ballot.cast_vote(option, START, &_identity(voter)))
            .unwrap()
            .unwrap();
    }

    db.save().unwrap();
    let ids = db.ids();
    let saved = db.snapshot();
    drop(db);

    let reopened = BallotDb::open(&path).unwrap();

    assert_eq!(reopened.ids(), ids);
    assert_eq!(reopened.snapshot(), saved);

    let (counts, voted, authorized) = reopened
        .read(&first_id, |ballot| {
            (
                ballot.results().vote_counts,
                ballot.has_voted(&_identity("b")),
                ballot.authorizes(&first_cap),
            )
        })
        .unwrap();

    assert_eq!(counts, vec![2, 1, 0]);
    assert!(voted);
    assert!(authorized);
    assert_eq!(
        reopened.read(&second_id, |ballot| ballot.total_votes()).unwrap(),
        0
    );

    fs::remove_dir_all(path.parent().unwrap()).unwrap();
}

#[test]
#[serial]
fn tampered_snapshots_fail_to_load() {
    let path = _temp_snapshot_path();
    let db = BallotDb::open(&path).unwrap();
    let (ballot, _) = _generate_ballot(&["Yes", "No"]);
    let id = ballot.id();
    db.insert(ballot).unwrap();
    db.write(&id, |ballot| ballot.cast_vote(0, START, &_identity("a")))
        .unwrap()
        .unwrap();
    db.save().unwrap();
    drop(db);

    let mut json: serde_json::Value = serde_json::from_slice(&fs::read(&path).unwrap()).unwrap();
    json["ballots"][0]["total_votes"] = serde_json::json!(7);
    fs::write(&path, serde_json::to_vec(&json).unwrap()).unwrap();

    assert!(matches!(
        BallotDb::open(&path),
        Err(StorageError::Serialization(_))
    ));

    fs::remove_dir_all(path.parent().unwrap()).unwrap();
}

#[test]
#[serial]
fn an_open_db_keeps_others_waiting_until_it_is_dropped() {
    let path = _temp_snapshot_path();
    let db = BallotDb::open(&path).unwrap();
    let (ballot, _) = _generate_ballot(&["Yes", "No"]);
    let id = ballot.id();
    db.insert(ballot).unwrap();

    let opened = Arc::new(AtomicBool::new(false));
    let second = {
        let path = path.clone();
        let opened = Arc::clone(&opened);
        thread::spawn(move || {
            let db = BallotDb::open(&path).unwrap();
            opened.store(true, Ordering::SeqCst);
            db.contains(&id)
        })
    };

    thread::sleep(Duration::from_millis(200));
    assert!(!opened.load(Ordering::SeqCst));

    db.save().unwrap();
    drop(db);

    // the second opener only gets in after the save, so it sees the ballot
    assert!(second.join().unwrap());
    assert!(opened.load(Ordering::SeqCst));

    fs::remove_dir_all(path.parent().unwrap()).unwrap();
}

#[test]
fn snapshots_are_ordered_by_id() {
    let ballots: Vec<_> = (0..5).map(|_| _generate_ballot(&["x"]).0).collect();

    let snapshot = BallotDbSnapshot::new(ballots);
    let ids: Vec<_> = snapshot.ballots.iter().map(|b| b.id()).collect();
    let mut sorted = ids.clone();
    sorted.sort();

    assert_eq!(ids, sorted);
}
