//! Core types for Exemplar
//!
//! This crate defines the vocabulary shared by every layer:
//! - [`NameValueEntry`]: the keyed list entry stored in the configuration tree
//! - [`EntryPath`]: instance identifier addressing one entry in one datastore
//! - [`Error`]: the canonical error enum
//! - [`RpcResult`] / [`RpcError`]: typed success/failure outputs of the RPC facade
//! - [`direct`]: direct-executor future composition helpers

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod direct;
pub mod error;
pub mod rpc;
pub mod types;

pub use error::{Error, Result};
pub use rpc::{ErrorSeverity, ErrorType, RpcError, RpcResult, RpcResultBuilder};
pub use types::{EntryPath, LogicalDatastoreType, NameValueEntry, VersionedEntry, EXAMPLE_LIST};
