//! Config store client
//!
//! Thin wrapper that turns "write this entry" and "read this key" into a
//! single-use transaction against the broker. Every method returns a
//! `'static` future so callers can attach callbacks or hand it to a runtime.

use exemplar_core::{EntryPath, LogicalDatastoreType, NameValueEntry, Result};
use exemplar_engine::{CommitInfo, DataBroker};
use futures::future::{self, BoxFuture, FutureExt};
use std::sync::Arc;

/// Issues reads and writes against one datastore of a broker
#[derive(Clone)]
pub struct ConfigStoreClient {
    broker: Arc<dyn DataBroker>,
    datastore: LogicalDatastoreType,
}

impl ConfigStoreClient {
    /// Client for the configuration datastore
    pub fn new(broker: Arc<dyn DataBroker>) -> Self {
        Self::with_datastore(broker, LogicalDatastoreType::Configuration)
    }

    /// Client for an explicit datastore
    pub fn with_datastore(broker: Arc<dyn DataBroker>, datastore: LogicalDatastoreType) -> Self {
        Self { broker, datastore }
    }

    /// Datastore this client targets
    pub fn datastore(&self) -> LogicalDatastoreType {
        self.datastore
    }

    /// Put `entry` under its name and commit
    ///
    /// Resolves once the commit is applied; reads issued afterwards see it.
    pub fn write(&self, entry: NameValueEntry) -> BoxFuture<'static, Result<CommitInfo>> {
        let mut tx = self.broker.new_write_only_transaction();
        let path = entry.path(self.datastore);
        tracing::debug!(path = %path, "staging put");
        match tx.put(path, entry) {
            Ok(()) => tx.commit(),
            Err(e) => future::err(e).boxed(),
        }
    }

    /// Current entry for `key`, or `None`
    pub fn read(&self, key: impl Into<String>) -> BoxFuture<'static, Result<Option<NameValueEntry>>> {
        let tx = self.broker.new_read_only_transaction();
        let path = EntryPath::new(self.datastore, key);
        async move { tx.read(&path).await }.boxed()
    }

    /// All entries, sorted by name
    pub fn read_all(&self) -> BoxFuture<'static, Result<Vec<NameValueEntry>>> {
        let tx = self.broker.new_read_only_transaction();
        let datastore = self.datastore;
        async move { tx.read_all(datastore).await }.boxed()
    }
}

impl std::fmt::Debug for ConfigStoreClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigStoreClient")
            .field("datastore", &self.datastore)
            .finish()
    }
}
