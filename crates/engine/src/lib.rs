//! Engine layer for Exemplar
//!
//! The [`Database`] is the in-process data broker. It owns the sharded store,
//! the transaction manager and the durability hook, and hands out
//! read-only and write-only transactions through the [`DataBroker`] trait.
//!
//! ```ignore
//! use exemplar_engine::{Database, DataBroker};
//!
//! let db = Database::ephemeral();
//! let mut tx = db.new_write_only_transaction();
//! tx.put(EntryPath::config("alice"), NameValueEntry::new("alice", "42"))?;
//! let info = tx.commit().await?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod broker;
pub mod database;
mod transaction;

pub use broker::{CommitInfo, DataBroker, ReadTransaction, WriteTransaction};
pub use database::{Database, DatabaseBuilder};
pub use exemplar_durability::DurabilityMode;
pub use exemplar_security::{AccessMode, OpenOptions};
