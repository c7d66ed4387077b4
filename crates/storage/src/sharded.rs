//! Sharded storage
//!
//! One shard per logical datastore, each an FxHashMap keyed by list key.
//!
//! # Design
//!
//! - DashMap: per-datastore sharding, configuration and operational never contend
//! - FxHashMap: O(1) lookups by entry name
//! - Batch apply and snapshot both hold the shard guard, so a snapshot never
//!   observes half of a commit

use dashmap::DashMap;
use exemplar_core::{EntryPath, LogicalDatastoreType, NameValueEntry, VersionedEntry};
use rustc_hash::FxHashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::snapshot::StoreSnapshot;

/// Per-datastore shard
#[derive(Debug, Default)]
pub struct Shard {
    pub(crate) data: FxHashMap<String, VersionedEntry>,
}

impl Shard {
    /// Create a new empty shard
    pub fn new() -> Self {
        Self::default()
    }

    /// Get number of entries in this shard
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if shard is empty
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Sharded storage - DashMap by datastore, HashMap within
///
/// # Thread Safety
///
/// All operations are thread-safe:
/// - get(): read guard on the datastore's shard only
/// - apply_batch(): write guard on the target shard for the whole batch
/// - snapshot(): read guard while cloning, so it sees whole batches
///
/// # Example
///
/// ```
/// use exemplar_core::{EntryPath, NameValueEntry};
/// use exemplar_storage::ShardedStore;
///
/// let store = ShardedStore::new();
/// store.apply_batch(&[(EntryPath::config("alice"), NameValueEntry::new("alice", "42"))], 1);
/// assert_eq!(store.get(&EntryPath::config("alice")).unwrap().entry.value, "42");
/// ```
pub struct ShardedStore {
    shards: DashMap<LogicalDatastoreType, Shard>,
    version: AtomicU64,
}

impl ShardedStore {
    /// Create new sharded store
    pub fn new() -> Self {
        Self {
            shards: DashMap::new(),
            version: AtomicU64::new(0),
        }
    }

    /// Get current version
    #[inline]
    pub fn version(&self) -> u64 {
        self.version.load(Ordering::Acquire)
    }

    /// Set version (used when restoring persisted state)
    pub fn set_version(&self, version: u64) {
        self.version.store(version, Ordering::Release);
    }

    /// Get number of populated datastores
    pub fn shard_count(&self) -> usize {
        self.shards.len()
    }

    /// Get total number of entries across all shards
    pub fn total_entries(&self) -> usize {
        self.shards.iter().map(|shard| shard.value().len()).sum()
    }

    /// Get number of entries in one datastore
    pub fn entry_count(&self, datastore: LogicalDatastoreType) -> usize {
        self.shards
            .get(&datastore)
            .map(|shard| shard.len())
            .unwrap_or(0)
    }

    /// Get an entry by path
    #[inline]
    pub fn get(&self, path: &EntryPath) -> Option<VersionedEntry> {
        self.shards
            .get(&path.datastore)
            .and_then(|shard| shard.data.get(&path.key).cloned())
    }

    /// Version that last wrote `path`, if present
    #[inline]
    pub fn version_of(&self, path: &EntryPath) -> Option<u64> {
        self.shards
            .get(&path.datastore)
            .and_then(|shard| shard.data.get(&path.key).map(|v| v.version))
    }

    /// Check if an entry exists
    #[inline]
    pub fn contains(&self, path: &EntryPath) -> bool {
        self.shards
            .get(&path.datastore)
            .map(|shard| shard.data.contains_key(&path.key))
            .unwrap_or(false)
    }

    /// Apply a batch of puts atomically with the given commit version
    ///
    /// Writes are grouped per datastore and each group is applied under one
    /// shard guard. The store version is advanced to `version` if it is
    /// behind.
    pub fn apply_batch(&self, writes: &[(EntryPath, NameValueEntry)], version: u64) {
        let mut grouped: FxHashMap<LogicalDatastoreType, Vec<&(EntryPath, NameValueEntry)>> =
            FxHashMap::default();
        for write in writes {
            grouped.entry(write.0.datastore).or_default().push(write);
        }

        for (datastore, group) in grouped {
            let mut shard = self.shards.entry(datastore).or_default();
            for (path, entry) in group {
                shard
                    .data
                    .insert(path.key.clone(), VersionedEntry::new(entry.clone(), version));
            }
            self.version.fetch_max(version, Ordering::AcqRel);
        }

        tracing::trace!(writes = writes.len(), version, "applied batch");
    }

    /// Replace a datastore's contents wholesale (used when restoring persisted state)
    pub fn restore(
        &self,
        datastore: LogicalDatastoreType,
        entries: impl IntoIterator<Item = NameValueEntry>,
        version: u64,
    ) {
        let mut shard = Shard::new();
        for entry in entries {
            shard
                .data
                .insert(entry.name.clone(), VersionedEntry::new(entry, version));
        }
        self.shards.insert(datastore, shard);
        self.version.fetch_max(version, Ordering::AcqRel);
    }

    /// Take a consistent snapshot of one datastore
    pub fn snapshot(&self, datastore: LogicalDatastoreType) -> StoreSnapshot {
        match self.shards.get(&datastore) {
            Some(shard) => StoreSnapshot::new(datastore, self.version(), shard.data.clone()),
            None => StoreSnapshot::new(datastore, self.version(), FxHashMap::default()),
        }
    }

    /// List all entries of a datastore, sorted by name
    pub fn list(&self, datastore: LogicalDatastoreType) -> Vec<VersionedEntry> {
        self.shards
            .get(&datastore)
            .map(|shard| {
                let mut results: Vec<_> = shard.data.values().cloned().collect();
                results.sort_by(|a, b| a.entry.name.cmp(&b.entry.name));
                results
            })
            .unwrap_or_default()
    }
}

impl Default for ShardedStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ShardedStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShardedStore")
            .field("shard_count", &self.shard_count())
            .field("version", &self.version())
            .field("total_entries", &self.total_entries())
            .finish()
    }
}
