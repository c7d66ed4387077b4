//! Durability layer for Exemplar
//!
//! The configuration datastore can be persisted as a single JSON snapshot:
//! - DurabilityMode: InMemory (nothing on disk) or Strict (snapshot per commit)
//! - SnapshotFile: atomic write-then-rename of the whole keyed list
//! - Durability: trait the transaction manager calls before making a commit visible

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod mode;
pub mod snapshot;

pub use mode::DurabilityMode;
pub use snapshot::{PersistedState, SnapshotFile, SNAPSHOT_FILE_NAME};

use exemplar_core::Result;

/// Persistence hook invoked during commit
///
/// `persist` receives the full post-commit state of the configuration
/// datastore. An `Err` aborts the commit before any write becomes visible.
pub trait Durability: Send + Sync {
    /// Persist the post-commit state
    fn persist(&self, state: &PersistedState) -> Result<()>;

    /// Whether `persist` does any work
    ///
    /// The manager skips building the post-commit state when this is false.
    fn requires_persist(&self) -> bool {
        true
    }
}

/// No persistence
#[derive(Debug, Default, Clone, Copy)]
pub struct InMemoryDurability;

impl Durability for InMemoryDurability {
    fn persist(&self, _state: &PersistedState) -> Result<()> {
        Ok(())
    }

    fn requires_persist(&self) -> bool {
        false
    }
}

impl Durability for SnapshotFile {
    fn persist(&self, state: &PersistedState) -> Result<()> {
        self.store(state)
    }
}
