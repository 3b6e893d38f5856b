use std::{
    collections::HashMap,
    fs::File,
    path::{Path, PathBuf},
    sync::Arc,
};

use ballot::Ballot;
use parking_lot::RwLock;
use primitives::BallotId;
use storage_utils::{Result, StorageError};
use telemetry::{debug, info};

use crate::{BallotDbSnapshot, SNAPSHOT_VERSION};

/// A single stored ballot. Writers hold its lock exclusively for the whole
/// state transition, readers share it, so nobody observes a half-applied vote.
pub type BallotHandle = Arc<RwLock<Ballot>>;

/// Ballot table keyed by id.
///
/// Each ballot sits behind its own lock: votes on different ballots never
/// contend, while votes on the same ballot are applied one at a time. The
/// table lock is only held long enough to look a handle up or add one.
///
/// A db opened from a path also holds an exclusive lock on that path until it
/// is dropped, so other processes opening the same snapshot wait their turn
/// instead of working on a stale copy.
#[derive(Debug, Default)]
pub struct BallotDb {
    path: Option<PathBuf>,
    table: RwLock<HashMap<BallotId, BallotHandle>>,
    lock: Option<File>,
}

impl BallotDb {
    /// Returns a new, empty db that is never written to disk.
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Opens the snapshot at `path`, or starts empty if there is none yet.
    /// [`BallotDb::save`] writes back to the same path.
    ///
    /// Blocks while another `BallotDb` has the same path open, in this process
    /// or any other.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let lock = storage_utils::lock_exclusive(&path)?;

        let snapshot = if path.exists() {
            let file = storage_utils::read_file(&path)?;
            serde_json::from_reader(std::io::BufReader::new(file))?
        } else {
            debug!(path = %path.display(), "no snapshot found, starting empty");
            BallotDbSnapshot::default()
        };

        let mut db = Self::from_snapshot(snapshot)?;
        db.path = Some(path);
        db.lock = Some(lock);

        Ok(db)
    }

    pub fn from_snapshot(snapshot: BallotDbSnapshot) -> Result<Self> {
        if snapshot.version != SNAPSHOT_VERSION {
            return Err(StorageError::Other(format!(
                "unsupported snapshot version {}, expected {}",
                snapshot.version, SNAPSHOT_VERSION
            )));
        }

        let db = Self::in_memory();
        for ballot in snapshot.ballots {
            db.insert(ballot)?;
        }

        Ok(db)
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Adds a freshly created ballot. Ids are never reused.
    pub fn insert(&self, ballot: Ballot) -> Result<()> {
        let id = ballot.id();
        let mut table = self.table.write();

        if table.contains_key(&id) {
            return Err(StorageError::RecordExists(id));
        }

        table.insert(id, Arc::new(RwLock::new(ballot)));

        Ok(())
    }

    pub fn contains(&self, id: &BallotId) -> bool {
        self.table.read().contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.table.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.read().is_empty()
    }

    pub fn ids(&self) -> Vec<BallotId> {
        let mut ids: Vec<BallotId> = self.table.read().keys().copied().collect();
        ids.sort();
        ids
    }

    pub fn handle(&self, id: &BallotId) -> Result<BallotHandle> {
        self.table
            .read()
            .get(id)
            .cloned()
            .ok_or(StorageError::NotFound(*id))
    }

    /// Runs `f` against a consistent view of the ballot.
    pub fn read<T>(&self, id: &BallotId, f: impl FnOnce(&Ballot) -> T) -> Result<T> {
        let handle = self.handle(id)?;
        let ballot = handle.read();

        Ok(f(&ballot))
    }

    /// Runs `f` with exclusive access to the ballot. `f` is expected to either
    /// apply a complete transition or leave the ballot as it found it.
    pub fn write<T>(&self, id: &BallotId, f: impl FnOnce(&mut Ballot) -> T) -> Result<T> {
        let handle = self.handle(id)?;
        let mut ballot = handle.write();

        Ok(f(&mut ballot))
    }

    /// Runs `f` against every ballot, each one under its own read lock.
    pub fn read_all<T>(&self, mut f: impl FnMut(&Ballot) -> T) -> Vec<T> {
        let handles: Vec<BallotHandle> = self.table.read().values().cloned().collect();

        handles.iter().map(|handle| f(&*handle.read())).collect()
    }

    /// Copies every ballot, each one taken under its own read lock.
    pub fn snapshot(&self) -> BallotDbSnapshot {
        BallotDbSnapshot::new(self.read_all(Ballot::clone))
    }

    /// Persists the current snapshot to the path the db was opened from.
    /// In-memory dbs have nowhere to go and return straight away.
    pub fn save(&self) -> Result<()> {
        let Some(path) = self.path.as_deref() else {
            return Ok(());
        };

        let snapshot = self.snapshot();
        let bytes = serde_json::to_vec_pretty(&snapshot)?;
        storage_utils::write_atomically(path, &bytes)?;

        info!(
            path = %path.display(),
            ballots = snapshot.ballots.len(),
            "ballot snapshot saved"
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use primitives::{Identity, DAY};

    use super::*;

    fn ballot() -> Ballot {
        Ballot::create(
            "Title",
            "Description",
            vec!["A".into(), "B".into()],
            DAY,
            0,
            Identity::new("creator").unwrap(),
        )
        .unwrap()
        .0
    }

    #[test]
    fn creates_new_database() {
        let db = BallotDb::in_memory();

        assert!(db.is_empty());
        assert_eq!(db.path(), None);
    }

    #[test]
    fn inserted_ballots_can_be_read_back() {
        let db = BallotDb::in_memory();
        let ballot = ballot();
        let id = ballot.id();

        db.insert(ballot.clone()).unwrap();

        assert!(db.contains(&id));
        assert_eq!(db.len(), 1);
        assert_eq!(db.read(&id, |stored| stored.clone()).unwrap(), ballot);
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let db = BallotDb::in_memory();
        let ballot = ballot();
        let id = ballot.id();

        db.insert(ballot.clone()).unwrap();

        assert!(matches!(
            db.insert(ballot),
            Err(StorageError::RecordExists(existing)) if existing == id
        ));
    }

    #[test]
    fn unknown_ids_are_not_found() {
        let db = BallotDb::in_memory();
        let id = BallotId::new();

        assert!(matches!(
            db.read(&id, |_| ()),
            Err(StorageError::NotFound(missing)) if missing == id
        ));
        assert!(matches!(db.write(&id, |_| ()), Err(StorageError::NotFound(_))));
    }

    #[test]
    fn writes_are_visible_to_later_reads() {
        let db = BallotDb::in_memory();
        let ballot = ballot();
        let id = ballot.id();
        db.insert(ballot).unwrap();

        let voter = Identity::new("alice").unwrap();
        db.write(&id, |ballot| ballot.cast_vote(1, 10, &voter))
            .unwrap()
            .unwrap();

        assert_eq!(db.read(&id, |ballot| ballot.vote_count(1)).unwrap(), 1);
    }

    #[test]
    fn read_all_visits_every_ballot() {
        let db = BallotDb::in_memory();
        let first = ballot();
        let second = ballot();
        let mut expected = vec![first.id(), second.id()];
        db.insert(first).unwrap();
        db.insert(second).unwrap();

        let mut visited = db.read_all(|ballot| ballot.id());
        visited.sort();
        expected.sort();

        assert_eq!(visited, expected);
    }

    #[test]
    fn saving_an_in_memory_db_is_a_no_op() {
        let db = BallotDb::in_memory();
        db.insert(ballot()).unwrap();

        db.save().unwrap();
    }

    #[test]
    fn snapshots_of_unknown_versions_are_refused() {
        let mut snapshot = BallotDbSnapshot::new(vec![ballot()]);
        snapshot.version = SNAPSHOT_VERSION + 1;

        assert!(matches!(
            BallotDb::from_snapshot(snapshot),
            Err(StorageError::Other(_))
        ));
    }
}
