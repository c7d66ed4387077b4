//! Storage layer for Exemplar
//!
//! This crate implements the in-memory backing store for the data broker:
//! - ShardedStore: DashMap of per-datastore shards, FxHashMap within
//! - Global version counter advanced by every applied commit
//! - StoreSnapshot: cloned, point-in-time view of one datastore

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod sharded;
pub mod snapshot;

pub use sharded::{Shard, ShardedStore};
pub use snapshot::StoreSnapshot;
