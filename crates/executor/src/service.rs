//! The RPC service contract.

use exemplar_core::{Result, RpcResult};
use futures::future::BoxFuture;

use crate::types::*;

/// Future returned by every RPC
///
/// `Err` means the call itself failed (for example the store could not be
/// read); application-level failures come back as `Ok` with an unsuccessful
/// [`RpcResult`].
pub type RpcFuture<T> = BoxFuture<'static, Result<RpcResult<T>>>;

/// The three remote operations exposed by the service.
///
/// Each call is stateless and single-shot.
pub trait ExampleService: Send + Sync {
    /// Greet `input.name`; never touches the store.
    fn hello_world(&self, input: HelloWorldInput) -> RpcFuture<HelloWorldOutput>;

    /// Store `{name, value}`, overwriting any previous value.
    fn add_name(&self, input: AddNameInput) -> RpcFuture<AddNameOutput>;

    /// Look up the value stored under `input.name`.
    fn get_name(&self, input: GetNameInput) -> RpcFuture<GetNameOutput>;
}
