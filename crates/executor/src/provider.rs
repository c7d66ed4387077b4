//! RPC facade implementation backed by the config store.
//!
//! Results are composed with `FutureExt` combinators, which run on whatever
//! thread resolves the underlying store future.

use exemplar_core::direct::{add_callback, Completion};
use exemplar_core::{
    ErrorType, NameValueEntry, Result, RpcError, RpcResult, RpcResultBuilder,
};
use exemplar_engine::DataBroker;
use futures::future::{BoxFuture, FutureExt};
use std::sync::Arc;

use crate::client::ConfigStoreClient;
use crate::service::{ExampleService, RpcFuture};
use crate::types::*;

/// Message returned by a successful `add-name`.
pub const NAME_ADDED: &str = "Name added successfully";
/// Message of the `get-name` failure for an absent key.
pub const NAME_NOT_FOUND: &str = "Name not found";
/// Message of the `add-name` failure when the commit fails.
pub const ADD_NAME_FAILED: &str = "Failed to add name";
/// Message of the `add-name` failure for an empty key.
pub const EMPTY_NAME: &str = "Name must not be empty";

/// The example service provider.
pub struct ExampleProvider {
    client: ConfigStoreClient,
}

impl ExampleProvider {
    pub fn new(broker: Arc<dyn DataBroker>) -> Self {
        Self {
            client: ConfigStoreClient::new(broker),
        }
    }

    pub fn client(&self) -> &ConfigStoreClient {
        &self.client
    }

    /// Called when the owning handle starts.
    pub fn init(&self) {
        tracing::info!("ExampleProvider Session Initiated");
    }

    /// Called when the owning handle stops.
    pub fn close(&self) {
        tracing::info!("ExampleProvider Closed");
    }

    /// Fire-and-forget write; the outcome is only logged.
    pub fn add_property(&self, name: impl Into<String>, value: impl Into<String>) {
        let entry = NameValueEntry::new(name, value);
        let name = entry.name.clone();
        let completion = add_callback(self.client.write(entry), move |result| match result {
            Ok(info) => {
                tracing::info!(name = %name, version = info.version, "Property added successfully")
            }
            Err(e) => tracing::error!(name = %name, error = %e, "Failed to add property"),
        });
        drive_detached(completion);
    }

    /// Write and report the commit outcome as an RPC result.
    pub fn add_example(
        &self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> BoxFuture<'static, RpcResult<()>> {
        self.client
            .write(NameValueEntry::new(name, value))
            .map(|result| match result {
                Ok(_) => RpcResult::void(),
                Err(e) => RpcResult::failed(e.to_rpc_error(ErrorType::Application, ADD_NAME_FAILED)),
            })
            .boxed()
    }

    /// Raw read of one entry.
    pub fn get_example(
        &self,
        name: impl Into<String>,
    ) -> BoxFuture<'static, Result<Option<NameValueEntry>>> {
        self.client.read(name)
    }

    /// Every entry, sorted by name.
    pub fn list_names(&self) -> BoxFuture<'static, Result<Vec<NameValueEntry>>> {
        self.client.read_all()
    }
}

impl ExampleService for ExampleProvider {
    fn hello_world(&self, input: HelloWorldInput) -> RpcFuture<HelloWorldOutput> {
        let output = HelloWorldOutput {
            greeting: format!("Hello {}", input.name),
        };
        RpcResultBuilder::success(output).build_future().map(Ok).boxed()
    }

    fn add_name(&self, input: AddNameInput) -> RpcFuture<AddNameOutput> {
        if input.name.is_empty() {
            let error = RpcError::new(ErrorType::Protocol, EMPTY_NAME).with_tag("invalid-value");
            return futures::future::ok(RpcResult::failed(error)).boxed();
        }

        let AddNameInput { name, value } = input;
        self.client
            .write(NameValueEntry::new(name.clone(), value))
            .map(move |result| {
                Ok(match result {
                    Ok(info) => {
                        tracing::debug!(name = %name, version = info.version, "name added");
                        RpcResult::success(AddNameOutput {
                            result: NAME_ADDED.to_string(),
                        })
                    }
                    Err(e) => {
                        tracing::error!(name = %name, error = %e, "failed to add name");
                        RpcResult::failed(e.to_rpc_error(ErrorType::Application, ADD_NAME_FAILED))
                    }
                })
            })
            .boxed()
    }

    fn get_name(&self, input: GetNameInput) -> RpcFuture<GetNameOutput> {
        let name = input.name;
        self.client
            .read(name.clone())
            .inspect(|result| match result {
                Ok(Some(entry)) => tracing::info!("Future result: {}", entry),
                Ok(None) => tracing::info!("Future result: empty"),
                Err(e) => tracing::error!(error = %e, "Failed to get future result"),
            })
            .map(move |result| {
                result.map(|found| match found {
                    Some(entry) if entry.name == name => {
                        RpcResult::success(GetNameOutput { value: entry.value })
                    }
                    _ => RpcResult::failed(
                        RpcError::new(ErrorType::Application, NAME_NOT_FOUND)
                            .with_tag("data-missing"),
                    ),
                })
            })
            .boxed()
    }
}

/// Let a callback chain finish without the caller waiting on it.
fn drive_detached(completion: Completion) {
    if let Some(pending) = completion.into_pending() {
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(pending);
            }
            Err(_) => futures::executor::block_on(pending),
        }
    }
}
