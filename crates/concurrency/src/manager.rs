//! Transaction manager for coordinating commit operations
//!
//! Provides atomic commit by orchestrating:
//! 1. Validation (first-committer-wins)
//! 2. Persistence (durability hook)
//! 3. Storage application (visibility)
//!
//! ## Commit Sequence
//!
//! ```text
//! 1. Acquire commit lock
//! 2. validate() - check write set against storage
//! 3. IF conflict: mark aborted and return error
//! 4. Allocate commit_version (increment global version)
//! 5. Persist post-commit configuration state (DURABILITY POINT)
//! 6. apply_batch() to storage (VISIBILITY POINT)
//! 7. Mark committed, return commit_version
//! ```
//!
//! A failure in step 5 aborts the transaction with nothing applied. The
//! allocated version is not reused, so versions may have gaps.

use crate::{TransactionContext, TransactionStatus};
use exemplar_core::{Error, LogicalDatastoreType, NameValueEntry, Result};
use exemplar_durability::{Durability, PersistedState};
use exemplar_storage::ShardedStore;
use parking_lot::Mutex;
use rustc_hash::FxHashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

/// Manages transaction lifecycle and atomic commits
///
/// # Thread Safety
///
/// Commits are serialized by an internal lock so validation and apply happen
/// atomically with respect to other commits. Without it two transactions
/// writing the same key could both validate against the old version.
pub struct TransactionManager {
    version: AtomicU64,
    next_txn_id: AtomicU64,
    commit_lock: Mutex<()>,
    closed: AtomicBool,
}

impl TransactionManager {
    /// Create a new transaction manager
    ///
    /// # Arguments
    /// * `initial_version` - Starting version (the restored store version)
    pub fn new(initial_version: u64) -> Self {
        TransactionManager {
            version: AtomicU64::new(initial_version),
            next_txn_id: AtomicU64::new(1),
            commit_lock: Mutex::new(()),
            closed: AtomicBool::new(false),
        }
    }

    /// Get current global version
    pub fn current_version(&self) -> u64 {
        self.version.load(Ordering::SeqCst)
    }

    /// Allocate next transaction ID
    pub fn next_txn_id(&self) -> u64 {
        self.next_txn_id.fetch_add(1, Ordering::SeqCst)
    }

    /// Allocate next commit version
    pub fn allocate_version(&self) -> u64 {
        self.version.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Begin a transaction against the store's current version
    pub fn begin(&self, store: &ShardedStore) -> TransactionContext {
        TransactionContext::new(self.next_txn_id(), store.version())
    }

    /// Commit a transaction atomically
    ///
    /// # Returns
    /// - Ok(commit_version) on success; for an empty write set, the current
    ///   store version
    /// - Err(Conflict) if validation fails
    /// - Err(CommitFailed) if persistence fails
    /// - Err(TransactionClosed) if the transaction is not active
    pub fn commit(
        &self,
        txn: &mut TransactionContext,
        store: &ShardedStore,
        durability: &dyn Durability,
    ) -> Result<u64> {
        let _commit_guard = self.commit_lock.lock();

        if !txn.is_active() {
            return Err(Error::TransactionClosed);
        }

        if self.is_closed() {
            txn.mark_aborted("manager closed");
            return Err(Error::StoreUnavailable("database is shut down".into()));
        }

        if txn.is_read_only() {
            let version = store.version();
            txn.mark_committed(version);
            return Ok(version);
        }

        if let Err(e) = txn.validate(store) {
            tracing::debug!(txn_id = txn.txn_id, error = %e, "validation failed");
            txn.mark_aborted(e.to_string());
            return Err(e);
        }

        let commit_version = self.allocate_version();

        if durability.requires_persist() && touches_configuration(txn) {
            let state = post_commit_state(txn, store, commit_version);
            if let Err(e) = durability.persist(&state) {
                tracing::error!(
                    txn_id = txn.txn_id,
                    commit_version,
                    error = %e,
                    "persist failed, aborting commit"
                );
                txn.mark_aborted(format!("persist failed: {}", e));
                return Err(match e {
                    Error::CommitFailed(reason) => Error::CommitFailed(reason),
                    other => Error::CommitFailed(other.to_string()),
                });
            }
        }

        store.apply_batch(txn.writes(), commit_version);
        txn.mark_committed(commit_version);

        tracing::debug!(
            txn_id = txn.txn_id,
            commit_version,
            writes = txn.writes().len(),
            "transaction committed"
        );
        Ok(commit_version)
    }

    /// Write the current configuration state through `durability`
    ///
    /// Runs under the commit lock, so it never interleaves with a commit's
    /// own persist and always reflects every acknowledged commit.
    pub fn persist_current(&self, store: &ShardedStore, durability: &dyn Durability) -> Result<()> {
        let _commit_guard = self.commit_lock.lock();
        durability.persist(&current_state(store))
    }

    /// Stop accepting commits, optionally persisting the final state
    ///
    /// Commits that already hold the lock finish first; later ones fail with
    /// [`Error::StoreUnavailable`]. Closing twice is a no-op.
    pub fn close(&self, store: &ShardedStore, durability: &dyn Durability, persist: bool) -> Result<()> {
        let _commit_guard = self.commit_lock.lock();
        if self.closed.swap(true, Ordering::SeqCst) {
            return Ok(());
        }
        if persist && durability.requires_persist() {
            durability.persist(&current_state(store))?;
        }
        tracing::debug!(version = store.version(), "transaction manager closed");
        Ok(())
    }

    /// Whether [`close`](Self::close) has run
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    /// Explicitly abort a transaction
    ///
    /// Staged writes are discarded. Aborting a finished transaction is an error.
    pub fn abort(&self, txn: &mut TransactionContext, reason: impl Into<String>) -> Result<()> {
        match txn.status {
            TransactionStatus::Active => {
                txn.mark_aborted(reason);
                Ok(())
            }
            _ => Err(Error::TransactionClosed),
        }
    }
}

impl Default for TransactionManager {
    fn default() -> Self {
        Self::new(0)
    }
}

fn touches_configuration(txn: &TransactionContext) -> bool {
    txn.writes()
        .iter()
        .any(|(path, _)| path.datastore == LogicalDatastoreType::Configuration)
}

fn current_state(store: &ShardedStore) -> PersistedState {
    let snapshot = store.snapshot(LogicalDatastoreType::Configuration);
    PersistedState {
        version: snapshot.version(),
        entries: snapshot.entries(),
    }
}

fn post_commit_state(
    txn: &TransactionContext,
    store: &ShardedStore,
    commit_version: u64,
) -> PersistedState {
    let snapshot = store.snapshot(LogicalDatastoreType::Configuration);
    let mut merged: FxHashMap<String, NameValueEntry> = snapshot
        .entries()
        .into_iter()
        .map(|entry| (entry.name.clone(), entry))
        .collect();

    for (path, entry) in txn.writes() {
        if path.datastore == LogicalDatastoreType::Configuration {
            merged.insert(path.key.clone(), entry.clone());
        }
    }

    let mut entries: Vec<_> = merged.into_values().collect();
    entries.sort_by(|a, b| a.name.cmp(&b.name));
    PersistedState {
        version: commit_version,
        entries,
    }
}
