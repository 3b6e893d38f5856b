mod ballotdb;
mod snapshot;

pub use snapshot::*;

pub use crate::ballotdb::*;
pub use storage_utils::{Result, StorageError};
