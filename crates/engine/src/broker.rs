//! Data broker seam
//!
//! Everything above the engine talks to the store through these traits, so
//! tests can substitute a broker that fails on demand.

use async_trait::async_trait;
use exemplar_core::{EntryPath, LogicalDatastoreType, NameValueEntry, Result};

/// Metadata about a successful commit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommitInfo {
    /// Commit version assigned to the transaction's writes
    pub version: u64,
}

/// Read-only transaction
///
/// All reads through one transaction observe the same snapshot of each
/// datastore they touch.
#[async_trait]
pub trait ReadTransaction: Send + Sync {
    /// Read one entry
    async fn read(&self, path: &EntryPath) -> Result<Option<NameValueEntry>>;

    /// Read every entry of a datastore, sorted by name
    async fn read_all(&self, datastore: LogicalDatastoreType) -> Result<Vec<NameValueEntry>>;
}

/// Write-only transaction
///
/// Puts are staged locally; nothing is visible until [`commit`] resolves.
///
/// [`commit`]: WriteTransaction::commit
#[async_trait]
pub trait WriteTransaction: Send {
    /// Stage a put of `entry` at `path`
    fn put(&mut self, path: EntryPath, entry: NameValueEntry) -> Result<()>;

    /// Commit staged puts
    ///
    /// Resolves to the commit metadata, or to the failure cause. Never retried.
    async fn commit(self: Box<Self>) -> Result<CommitInfo>;
}

/// Factory for transactions against a datastore
pub trait DataBroker: Send + Sync {
    /// Start a read-only transaction
    fn new_read_only_transaction(&self) -> Box<dyn ReadTransaction>;

    /// Start a write-only transaction
    fn new_write_only_transaction(&self) -> Box<dyn WriteTransaction>;
}
