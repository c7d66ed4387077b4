//! Transaction context
//!
//! A [`TransactionContext`] buffers puts until commit. It remembers the store
//! version it began at; validation rejects the commit if any key in the write
//! set was committed by someone else after that point.

use exemplar_core::{EntryPath, Error, NameValueEntry, Result};
use exemplar_storage::ShardedStore;
use std::fmt;

/// Lifecycle of a transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionStatus {
    /// Accepting puts
    Active,
    /// Committed at the given version
    Committed {
        /// Commit version
        version: u64,
    },
    /// Aborted; nothing was applied
    Aborted {
        /// Why the transaction aborted
        reason: String,
    },
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionStatus::Active => write!(f, "active"),
            TransactionStatus::Committed { version } => write!(f, "committed@{}", version),
            TransactionStatus::Aborted { reason } => write!(f, "aborted ({})", reason),
        }
    }
}

/// Buffered write transaction
#[derive(Debug)]
pub struct TransactionContext {
    /// Transaction identifier
    pub txn_id: u64,
    /// Store version when the transaction began
    pub start_version: u64,
    /// Current status
    pub status: TransactionStatus,
    writes: Vec<(EntryPath, NameValueEntry)>,
}

impl TransactionContext {
    /// Begin a transaction at the given store version
    pub fn new(txn_id: u64, start_version: u64) -> Self {
        Self {
            txn_id,
            start_version,
            status: TransactionStatus::Active,
            writes: Vec::new(),
        }
    }

    /// Whether puts are still accepted
    pub fn is_active(&self) -> bool {
        self.status == TransactionStatus::Active
    }

    /// Stage a put; a second put to the same path replaces the first
    pub fn put(&mut self, path: EntryPath, entry: NameValueEntry) -> Result<()> {
        self.ensure_active()?;
        match self.writes.iter_mut().find(|(p, _)| *p == path) {
            Some(slot) => slot.1 = entry,
            None => self.writes.push((path, entry)),
        }
        Ok(())
    }

    /// Staged writes in put order
    pub fn writes(&self) -> &[(EntryPath, NameValueEntry)] {
        &self.writes
    }

    /// Whether nothing has been staged
    pub fn is_read_only(&self) -> bool {
        self.writes.is_empty()
    }

    /// Check the write set against the store
    ///
    /// Fails with [`Error::Conflict`] naming the first key that was committed
    /// after `start_version`.
    pub fn validate(&self, store: &ShardedStore) -> Result<()> {
        for (path, _) in &self.writes {
            if let Some(version) = store.version_of(path) {
                if version > self.start_version {
                    return Err(Error::Conflict(format!(
                        "{} modified at version {} after transaction began at {}",
                        path, version, self.start_version
                    )));
                }
            }
        }
        Ok(())
    }

    /// Mark aborted and drop staged writes
    pub fn mark_aborted(&mut self, reason: impl Into<String>) {
        self.writes.clear();
        self.status = TransactionStatus::Aborted {
            reason: reason.into(),
        };
    }

    /// Mark committed
    pub fn mark_committed(&mut self, version: u64) {
        self.status = TransactionStatus::Committed { version };
    }

    fn ensure_active(&self) -> Result<()> {
        if self.is_active() {
            Ok(())
        } else {
            Err(Error::TransactionClosed)
        }
    }
}
