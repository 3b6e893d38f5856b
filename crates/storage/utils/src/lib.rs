use std::{
    ffi::OsString,
    fs,
    fs::{File, OpenOptions},
    path::{Path, PathBuf},
    process,
    sync::atomic::{AtomicU64, Ordering},
};

use fs2::FileExt;

mod result;

pub use crate::result::{Result, StorageError};

/// Suffix of the file [`lock_exclusive`] locks next to the data file.
pub const LOCK_FILE_SUFFIX: &str = ".lock";

static TMP_FILE_COUNTER: AtomicU64 = AtomicU64::new(0);

pub fn read_file<F: AsRef<Path>>(path: F) -> Result<File> {
    match File::open(path.as_ref()) {
        Ok(file) => Ok(file),
        Err(e) => Err(StorageError::Io(e)),
    }
}

pub fn create_dir<F: AsRef<Path>>(outdir: F) -> Result<()> {
    match fs::create_dir_all(outdir) {
        Ok(_) => Ok(()),
        Err(e) => Err(StorageError::Io(e)),
    }
}

/// Takes an exclusive advisory lock guarding `path` across processes,
/// blocking until any other holder lets go. The lock lives on a sibling
/// `<path>.lock` file because `path` itself is replaced on every write. It is
/// released when the returned file is dropped.
pub fn lock_exclusive<F: AsRef<Path>>(path: F) -> Result<File> {
    let path = path.as_ref();
    create_parent_dir(path)?;

    let lock_path = sibling_path(path, LOCK_FILE_SUFFIX)?;
    let file = OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .open(&lock_path)?;

    file.lock_exclusive()?;

    Ok(file)
}

/// Writes `contents` next to `path` first and renames it into place, so
/// readers never observe a half-written file. Every call writes through its
/// own temp file.
pub fn write_atomically<F: AsRef<Path>>(path: F, contents: &[u8]) -> Result<()> {
    let path = path.as_ref();
    create_parent_dir(path)?;

    let tmp_suffix = format!(
        ".{}.{}.tmp",
        process::id(),
        TMP_FILE_COUNTER.fetch_add(1, Ordering::Relaxed)
    );
    let tmp_path = sibling_path(path, &tmp_suffix)?;

    if let Err(err) = fs::write(&tmp_path, contents).and_then(|_| fs::rename(&tmp_path, path)) {
        let _ = fs::remove_file(&tmp_path);
        return Err(err.into());
    }

    Ok(())
}

fn create_parent_dir(path: &Path) -> Result<()> {
    match path.parent().filter(|p| !p.as_os_str().is_empty()) {
        Some(parent) => create_dir(parent),
        None => Ok(()),
    }
}

fn sibling_path(path: &Path, suffix: &str) -> Result<PathBuf> {
    let mut name: OsString = path
        .file_name()
        .map(|name| name.to_os_string())
        .ok_or_else(|| StorageError::Other(format!("{} is not a file path", path.display())))?;
    name.push(suffix);

    Ok(path.with_file_name(name))
}
