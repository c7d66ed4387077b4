//! RPC facade and command execution layer.
//!
//! - [`ConfigStoreClient`]: single-use read/write transactions against the broker
//! - [`ExampleService`] / [`ExampleProvider`]: `hello-world`, `add-name`, `get-name`
//! - [`Command`] / [`Output`] / [`Executor`]: serializable request dispatch
//!
//! ```ignore
//! let provider = ExampleProvider::new(Arc::new(Database::ephemeral()));
//! let result = provider.add_name(AddNameInput::new("alice", "42")).await?;
//! assert!(result.successful);
//! ```

mod client;
mod command;
mod provider;
mod service;
mod types;

pub use client::ConfigStoreClient;
pub use command::{Command, Executor, Output};
pub use provider::{ExampleProvider, ADD_NAME_FAILED, EMPTY_NAME, NAME_ADDED, NAME_NOT_FOUND};
pub use service::{ExampleService, RpcFuture};
pub use types::*;

pub use exemplar_core::{Error, ErrorType, NameValueEntry, Result, RpcError, RpcResult};
