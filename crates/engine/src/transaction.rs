//! Transactions issued by [`Database`](crate::Database)

use async_trait::async_trait;
use exemplar_concurrency::TransactionContext;
use exemplar_core::{EntryPath, Error, LogicalDatastoreType, NameValueEntry, Result};
use exemplar_storage::StoreSnapshot;
use parking_lot::Mutex;
use rustc_hash::FxHashMap;
use std::sync::Arc;

use crate::broker::{CommitInfo, ReadTransaction, WriteTransaction};
use crate::database::DatabaseInner;

/// Read-only transaction; snapshots each datastore on first touch
pub(crate) struct DbReadTransaction {
    inner: Arc<DatabaseInner>,
    snapshots: Mutex<FxHashMap<LogicalDatastoreType, Arc<StoreSnapshot>>>,
}

impl DbReadTransaction {
    pub(crate) fn new(inner: Arc<DatabaseInner>) -> Self {
        Self {
            inner,
            snapshots: Mutex::new(FxHashMap::default()),
        }
    }

    fn snapshot(&self, datastore: LogicalDatastoreType) -> Result<Arc<StoreSnapshot>> {
        self.inner.ensure_running()?;
        let mut snapshots = self.snapshots.lock();
        let snapshot = snapshots
            .entry(datastore)
            .or_insert_with(|| Arc::new(self.inner.store.snapshot(datastore)));
        Ok(Arc::clone(snapshot))
    }
}

#[async_trait]
impl ReadTransaction for DbReadTransaction {
    async fn read(&self, path: &EntryPath) -> Result<Option<NameValueEntry>> {
        let snapshot = self.snapshot(path.datastore)?;
        Ok(snapshot.get(&path.key).map(|v| v.entry.clone()))
    }

    async fn read_all(&self, datastore: LogicalDatastoreType) -> Result<Vec<NameValueEntry>> {
        Ok(self.snapshot(datastore)?.entries())
    }
}

/// Write-only transaction backed by a [`TransactionContext`]
pub(crate) struct DbWriteTransaction {
    inner: Arc<DatabaseInner>,
    ctx: TransactionContext,
}

impl DbWriteTransaction {
    pub(crate) fn new(inner: Arc<DatabaseInner>) -> Self {
        let ctx = inner.manager.begin(&inner.store);
        Self { inner, ctx }
    }
}

#[async_trait]
impl WriteTransaction for DbWriteTransaction {
    fn put(&mut self, path: EntryPath, entry: NameValueEntry) -> Result<()> {
        self.ctx.put(path, entry)
    }

    async fn commit(self: Box<Self>) -> Result<CommitInfo> {
        let DbWriteTransaction { inner, mut ctx } = *self;
        inner.ensure_running()?;
        if !ctx.is_read_only() {
            inner.options.access_mode.check_write()?;
        }

        // Snapshot persistence does file I/O; keep it off the async workers.
        let needs_io = inner.durability.requires_persist();
        let version = match tokio::runtime::Handle::try_current() {
            Ok(handle) if needs_io => handle
                .spawn_blocking(move || {
                    inner
                        .manager
                        .commit(&mut ctx, &inner.store, inner.durability.as_ref())
                })
                .await
                .map_err(|e| Error::CommitFailed(format!("commit task failed: {}", e)))??,
            _ => inner
                .manager
                .commit(&mut ctx, &inner.store, inner.durability.as_ref())?,
        };

        Ok(CommitInfo { version })
    }
}
