//! Command/Output dispatch.
//!
//! [`Command`] is the serializable form of an RPC request, [`Output`] the
//! serializable form of its result. [`Executor`] maps one onto the other
//! through the provider, so requests can arrive as typed values or as JSON:
//!
//! ```json
//! {"op": "add_name", "name": "alice", "value": "42"}
//! ```

use exemplar_core::{Error, NameValueEntry, Result, RpcResult};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::provider::ExampleProvider;
use crate::service::ExampleService;
use crate::types::*;

/// An RPC request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Command {
    /// `hello-world`
    HelloWorld { name: String },
    /// `add-name`
    AddName { name: String, value: String },
    /// `get-name`
    GetName { name: String },
    /// Every stored entry
    ListNames,
}

impl Command {
    /// Operation name as exposed on the RPC surface
    pub fn name(&self) -> &'static str {
        match self {
            Command::HelloWorld { .. } => "hello-world",
            Command::AddName { .. } => "add-name",
            Command::GetName { .. } => "get-name",
            Command::ListNames => "list-names",
        }
    }
}

/// Result of executing a [`Command`].
///
/// Serializes as the bare payload (no enum tag).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Output {
    Greeting(RpcResult<HelloWorldOutput>),
    Added(RpcResult<AddNameOutput>),
    Value(RpcResult<GetNameOutput>),
    Entries(Vec<NameValueEntry>),
}

impl Output {
    /// Whether the underlying operation succeeded
    pub fn is_successful(&self) -> bool {
        match self {
            Output::Greeting(r) => r.successful,
            Output::Added(r) => r.successful,
            Output::Value(r) => r.successful,
            Output::Entries(_) => true,
        }
    }
}

/// Dispatches commands to the provider.
#[derive(Clone)]
pub struct Executor {
    provider: Arc<ExampleProvider>,
}

impl Executor {
    pub fn new(provider: Arc<ExampleProvider>) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &Arc<ExampleProvider> {
        &self.provider
    }

    /// Execute one command.
    pub async fn execute(&self, cmd: Command) -> Result<Output> {
        tracing::debug!(op = cmd.name(), "executing command");
        let output = match cmd {
            Command::HelloWorld { name } => Output::Greeting(
                self.provider
                    .hello_world(HelloWorldInput { name })
                    .await?,
            ),
            Command::AddName { name, value } => Output::Added(
                self.provider
                    .add_name(AddNameInput { name, value })
                    .await?,
            ),
            Command::GetName { name } => {
                Output::Value(self.provider.get_name(GetNameInput { name }).await?)
            }
            Command::ListNames => Output::Entries(self.provider.list_names().await?),
        };
        Ok(output)
    }

    /// Execute a JSON-encoded command and return the JSON-encoded output.
    pub async fn execute_json(&self, request: &str) -> Result<String> {
        let cmd: Command = serde_json::from_str(request)
            .map_err(|e| Error::MalformedInput(format!("invalid request: {}", e)))?;
        let output = self.execute(cmd).await?;
        Ok(serde_json::to_string(&output)?)
    }
}
