//! The process-wide service handle.
//!
//! [`Exemplar::start`] opens the store and initializes the provider;
//! [`Exemplar::stop`] closes the provider, flushes the snapshot and makes the
//! store unavailable. Both are driven by the caller; dropping the handle does
//! not stop it.

use exemplar_core::{NameValueEntry, Result, RpcResult};
use exemplar_engine::Database;
use exemplar_executor::{
    AddNameInput, AddNameOutput, ExampleProvider, ExampleService, Executor, GetNameInput,
    GetNameOutput, HelloWorldInput, HelloWorldOutput,
};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::config::ExemplarConfig;

/// A running service instance.
///
/// Cheap to clone; clones share the same store and provider.
#[derive(Clone)]
pub struct Exemplar {
    db: Database,
    provider: Arc<ExampleProvider>,
    executor: Executor,
    stopped: Arc<AtomicBool>,
}

impl Exemplar {
    /// Open the store described by `config` and initialize the provider.
    ///
    /// With durability enabled the persisted snapshot is loaded here.
    pub fn start(config: &ExemplarConfig) -> Result<Self> {
        let db = config.to_builder().open()?;
        let provider = Arc::new(ExampleProvider::new(Arc::new(db.clone())));
        provider.init();
        tracing::info!(
            mode = %db.durability_mode(),
            read_only = config.read_only,
            version = db.version(),
            "exemplar started"
        );
        Ok(Self {
            executor: Executor::new(Arc::clone(&provider)),
            db,
            provider,
            stopped: Arc::new(AtomicBool::new(false)),
        })
    }

    /// Start with an in-memory store.
    pub fn ephemeral() -> Result<Self> {
        Self::start(&ExemplarConfig::ephemeral())
    }

    /// Close the provider, flush and shut down the store.
    ///
    /// Idempotent. Calls issued afterwards fail with `StoreUnavailable`.
    pub fn stop(&self) -> Result<()> {
        if self.stopped.swap(true, Ordering::AcqRel) {
            return Ok(());
        }
        self.provider.close();
        self.db.shutdown()?;
        tracing::info!(version = self.db.version(), "exemplar stopped");
        Ok(())
    }

    pub fn is_running(&self) -> bool {
        !self.stopped.load(Ordering::Acquire) && self.db.is_running()
    }

    pub fn provider(&self) -> &Arc<ExampleProvider> {
        &self.provider
    }

    pub fn executor(&self) -> &Executor {
        &self.executor
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    /// `hello-world`
    pub async fn hello_world(
        &self,
        name: impl Into<String>,
    ) -> Result<RpcResult<HelloWorldOutput>> {
        self.provider.hello_world(HelloWorldInput::new(name)).await
    }

    /// `add-name`
    pub async fn add_name(
        &self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<RpcResult<AddNameOutput>> {
        self.provider.add_name(AddNameInput::new(name, value)).await
    }

    /// `get-name`
    pub async fn get_name(&self, name: impl Into<String>) -> Result<RpcResult<GetNameOutput>> {
        self.provider.get_name(GetNameInput::new(name)).await
    }

    /// Every stored entry, sorted by name.
    pub async fn list_names(&self) -> Result<Vec<NameValueEntry>> {
        self.provider.list_names().await
    }
}

impl std::fmt::Debug for Exemplar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Exemplar")
            .field("db", &self.db)
            .field("running", &self.is_running())
            .finish()
    }
}
