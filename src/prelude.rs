//! Convenient imports.
//!
//! ```ignore
//! use exemplar::prelude::*;
//!
//! let handle = Exemplar::start(&ExemplarConfig::persistent("./.exemplar"))?;
//! handle.add_name("alice", "42").await?;
//! ```

pub use crate::config::ExemplarConfig;
pub use crate::handle::Exemplar;

pub use exemplar_core::{Error, ErrorType, NameValueEntry, Result, RpcError, RpcResult};
pub use exemplar_engine::{DataBroker, Database, DurabilityMode};
pub use exemplar_executor::{Command, ExampleService, Executor, Output};
