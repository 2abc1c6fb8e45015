//! # File-Backed Backend
//!
//! Holds the whole database in memory and persists it as one JSON snapshot
//! (`{collection: {id: document}}`) after every mutation.
//!
//! A write goes to a temp file, is fsynced, then renamed over the snapshot.
//! The in-memory image is swapped only after the rename succeeds, so a
//! failed commit leaves both the file and the image untouched.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use super::backend::DocumentStore;
use super::document::{Document, Filter, WriteBatch};
use super::errors::{StoreError, StoreResult};
use super::memory::{apply_batch, read_document, scan_collection, Collections};

/// Snapshot file name inside the data directory
pub const SNAPSHOT_FILE: &str = "documents.json";

const TEMP_SUFFIX: &str = ".tmp";

/// Document store persisted to `<data_dir>/documents.json`
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    collections: RwLock<Collections>,
}

impl FileStore {
    /// Open the store rooted at `data_dir`, creating the directory if needed.
    ///
    /// A missing snapshot is an empty database; an unreadable one is an error.
    pub fn open(data_dir: &Path) -> StoreResult<Self> {
        fs::create_dir_all(data_dir).map_err(|e| StoreError::io_at_path(data_dir, e))?;

        let path = data_dir.join(SNAPSHOT_FILE);
        let collections = if path.exists() {
            load_snapshot(&path)?
        } else {
            Collections::new()
        };

        Ok(Self {
            path,
            collections: RwLock::new(collections),
        })
    }

    /// Path of the snapshot file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn load_snapshot(path: &Path) -> StoreResult<Collections> {
    let content = fs::read(path).map_err(|e| StoreError::io_at_path(path, e))?;
    serde_json::from_slice(&content).map_err(|e| StoreError::corrupt_at_path(path, e.to_string()))
}

fn write_snapshot(path: &Path, collections: &Collections) -> StoreResult<()> {
    let bytes = serde_json::to_vec_pretty(collections)?;

    let mut temp_name = path.as_os_str().to_owned();
    temp_name.push(TEMP_SUFFIX);
    let temp_path = PathBuf::from(temp_name);

    let mut file = File::create(&temp_path).map_err(|e| StoreError::io_at_path(&temp_path, e))?;
    file.write_all(&bytes)
        .map_err(|e| StoreError::io_at_path(&temp_path, e))?;
    file.sync_all()
        .map_err(|e| StoreError::io_at_path(&temp_path, e))?;

    if let Err(e) = fs::rename(&temp_path, path) {
        let _ = fs::remove_file(&temp_path);
        return Err(StoreError::io_at_path(path, e));
    }

    if let Some(parent) = path.parent() {
        fsync_dir(parent)?;
    }

    Ok(())
}

#[cfg(unix)]
fn fsync_dir(path: &Path) -> StoreResult<()> {
    let dir = fs::OpenOptions::new()
        .read(true)
        .open(path)
        .map_err(|e| StoreError::io_at_path(path, e))?;
    dir.sync_all().map_err(|e| StoreError::io_at_path(path, e))
}

// Directories cannot be opened for fsync on this platform.
#[cfg(not(unix))]
fn fsync_dir(_path: &Path) -> StoreResult<()> {
    Ok(())
}

impl DocumentStore for FileStore {
    fn get(&self, collection: &str, id: &str) -> StoreResult<Option<Document>> {
        let collections = self.collections.read().map_err(|_| StoreError::Poisoned)?;
        Ok(read_document(&collections, collection, id))
    }

    fn scan(&self, collection: &str, filter: Option<&Filter>) -> StoreResult<Vec<(String, Document)>> {
        let collections = self.collections.read().map_err(|_| StoreError::Poisoned)?;
        Ok(scan_collection(&collections, collection, filter))
    }

    fn set(&self, collection: &str, id: &str, document: Document) -> StoreResult<()> {
        let mut batch = WriteBatch::new();
        batch.set(collection, id, document);
        self.commit(batch)
    }

    fn commit(&self, batch: WriteBatch) -> StoreResult<()> {
        let mut collections = self.collections.write().map_err(|_| StoreError::Poisoned)?;

        let mut next = collections.clone();
        apply_batch(&mut next, batch);
        write_snapshot(&self.path, &next)?;

        *collections = next;
        Ok(())
    }
}
