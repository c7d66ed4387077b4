//! Point-in-time view of one datastore
//!
//! Read transactions hold a [`StoreSnapshot`] so every read inside the
//! transaction observes the same state, whatever commits land meanwhile.

use exemplar_core::{LogicalDatastoreType, NameValueEntry, VersionedEntry};
use rustc_hash::FxHashMap;

/// Cloned snapshot of a single datastore shard
#[derive(Debug, Clone)]
pub struct StoreSnapshot {
    datastore: LogicalDatastoreType,
    version: u64,
    data: FxHashMap<String, VersionedEntry>,
}

impl StoreSnapshot {
    pub(crate) fn new(
        datastore: LogicalDatastoreType,
        version: u64,
        data: FxHashMap<String, VersionedEntry>,
    ) -> Self {
        Self {
            datastore,
            version,
            data,
        }
    }

    /// Datastore this snapshot was taken from
    pub fn datastore(&self) -> LogicalDatastoreType {
        self.datastore
    }

    /// Store version at the time the snapshot was taken
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Look up an entry by key
    pub fn get(&self, key: &str) -> Option<&VersionedEntry> {
        self.data.get(key)
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the snapshot holds no entries
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// All entries, sorted by name
    pub fn entries(&self) -> Vec<NameValueEntry> {
        let mut entries: Vec<_> = self.data.values().map(|v| v.entry.clone()).collect();
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        entries
    }
}
