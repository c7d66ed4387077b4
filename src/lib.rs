//! # Exemplar
//!
//! A name/value configuration service: a transactional in-process store,
//! an RPC facade (`hello-world`, `add-name`, `get-name`) over it, and a
//! shell adapter in the `exemplar-cli` crate.
//!
//! ```ignore
//! use exemplar::prelude::*;
//!
//! let handle = Exemplar::start(&ExemplarConfig::ephemeral())?;
//! handle.add_name("alice", "42").await?;
//! let got = handle.get_name("alice").await?;
//! assert_eq!(got.result.unwrap().value, "42");
//! handle.stop()?;
//! ```

#![warn(clippy::all)]

mod config;
mod handle;
pub mod prelude;

pub use config::ExemplarConfig;
pub use handle::Exemplar;

pub use exemplar_core::{Error, Result};

/// Shared types
pub mod types {
    pub use exemplar_core::{
        EntryPath, ErrorSeverity, ErrorType, LogicalDatastoreType, NameValueEntry, RpcError,
        RpcResult, VersionedEntry,
    };
    pub use exemplar_engine::{CommitInfo, DurabilityMode};
    pub use exemplar_executor::{
        AddNameInput, AddNameOutput, GetNameInput, GetNameOutput, HelloWorldInput,
        HelloWorldOutput,
    };
}

/// Lower layers, for callers that need the broker or the command executor directly.
pub mod engine {
    pub use exemplar_engine::*;
}

pub mod executor {
    pub use exemplar_executor::*;
}
