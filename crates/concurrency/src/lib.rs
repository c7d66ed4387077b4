//! Concurrency layer for Exemplar
//!
//! This crate implements optimistic concurrency control (OCC) with:
//! - TransactionContext: staged write set plus the version it began at
//! - Conflict detection at commit time (first-committer-wins per key)
//! - TransactionManager: serialized validate → persist → apply commit protocol

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod manager;
pub mod transaction;

pub use manager::TransactionManager;
pub use transaction::{TransactionContext, TransactionStatus};
