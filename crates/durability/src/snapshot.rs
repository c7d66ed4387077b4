//! Snapshot file for the configuration datastore
//!
//! ## Format
//!
//! ```json
//! { "version": 3, "entries": [{"name": "alice", "value": "42"}] }
//! ```
//!
//! Writes go to `config.json.tmp`, are fsynced, then renamed over
//! `config.json`. A crash mid-write leaves the previous snapshot intact.

use exemplar_core::{Error, NameValueEntry, Result};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// File name of the snapshot inside the data directory
pub const SNAPSHOT_FILE_NAME: &str = "config.json";

/// Persisted form of the configuration datastore
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedState {
    /// Commit version the snapshot reflects
    pub version: u64,
    /// Entries, sorted by name
    pub entries: Vec<NameValueEntry>,
}

/// Snapshot file inside a data directory
#[derive(Debug, Clone)]
pub struct SnapshotFile {
    path: PathBuf,
}

impl SnapshotFile {
    /// Snapshot file for the given data directory
    ///
    /// The directory is created on first write, not here.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(SNAPSHOT_FILE_NAME),
        }
    }

    /// Full path of the snapshot file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the snapshot, or `None` if no snapshot has been written yet
    pub fn load(&self) -> Result<Option<PersistedState>> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(Error::Io(e)),
        };
        let state: PersistedState = serde_json::from_slice(&bytes)?;
        tracing::debug!(
            path = %self.path.display(),
            version = state.version,
            entries = state.entries.len(),
            "loaded snapshot"
        );
        Ok(Some(state))
    }

    /// Atomically replace the snapshot
    pub fn store(&self, state: &PersistedState) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let tmp = self.path.with_extension("json.tmp");
        let encoded = serde_json::to_vec_pretty(state)?;
        let replaced = write_synced(&tmp, &encoded).and_then(|_| fs::rename(&tmp, &self.path));
        if let Err(e) = replaced {
            match fs::remove_file(&tmp) {
                Ok(()) => {}
                Err(cleanup) if cleanup.kind() == std::io::ErrorKind::NotFound => {}
                Err(cleanup) => {
                    tracing::warn!(path = %tmp.display(), error = %cleanup, "stale snapshot temp file")
                }
            }
            return Err(Error::CommitFailed(format!(
                "failed to replace {}: {}",
                self.path.display(),
                e
            )));
        }

        tracing::trace!(version = state.version, "snapshot written");
        Ok(())
    }
}

fn write_synced(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(bytes)?;
    file.sync_all()
}
