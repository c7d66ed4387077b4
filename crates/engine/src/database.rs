//! In-process data broker
//!
//! `Database` ties together storage, the transaction manager and the
//! durability hook. Cloning is cheap; all clones share one store.
//!
//! | Method | Disk Files | Recovery |
//! |--------|------------|----------|
//! | `Database::ephemeral()` | None | No |
//! | `Database::open(path)` | `<path>/config.json` | Yes |

use exemplar_concurrency::TransactionManager;
use exemplar_core::{Error, LogicalDatastoreType, Result};
use exemplar_durability::{Durability, DurabilityMode, InMemoryDurability, SnapshotFile};
use exemplar_security::OpenOptions;
use exemplar_storage::ShardedStore;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::broker::{DataBroker, ReadTransaction, WriteTransaction};
use crate::transaction::{DbReadTransaction, DbWriteTransaction};

pub(crate) struct DatabaseInner {
    pub(crate) store: ShardedStore,
    pub(crate) manager: TransactionManager,
    pub(crate) durability: Box<dyn Durability>,
    pub(crate) options: OpenOptions,
    mode: DurabilityMode,
    data_dir: Option<PathBuf>,
    running: AtomicBool,
}

impl DatabaseInner {
    pub(crate) fn ensure_running(&self) -> Result<()> {
        if self.running.load(Ordering::Acquire) {
            Ok(())
        } else {
            Err(Error::StoreUnavailable("database is shut down".into()))
        }
    }
}

/// The in-process transactional datastore
#[derive(Clone)]
pub struct Database {
    inner: Arc<DatabaseInner>,
}

impl Database {
    /// Create a builder for database configuration
    ///
    /// ```ignore
    /// let db = Database::builder()
    ///     .path("./data")
    ///     .read_only(true)
    ///     .open()?;
    /// ```
    pub fn builder() -> DatabaseBuilder {
        DatabaseBuilder::new()
    }

    /// Create an in-memory database with no disk I/O
    pub fn ephemeral() -> Self {
        Self::from_parts(
            ShardedStore::new(),
            Box::new(InMemoryDurability),
            DurabilityMode::InMemory,
            OpenOptions::default(),
            None,
        )
    }

    /// Open a database persisted under `path`, loading any existing snapshot
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::builder().path(path).open()
    }

    fn from_parts(
        store: ShardedStore,
        durability: Box<dyn Durability>,
        mode: DurabilityMode,
        options: OpenOptions,
        data_dir: Option<PathBuf>,
    ) -> Self {
        let manager = TransactionManager::new(store.version());
        Self {
            inner: Arc::new(DatabaseInner {
                store,
                manager,
                durability,
                options,
                mode,
                data_dir,
                running: AtomicBool::new(true),
            }),
        }
    }

    /// Whether the database accepts transactions
    pub fn is_running(&self) -> bool {
        self.inner.running.load(Ordering::Acquire)
    }

    /// Current store version
    pub fn version(&self) -> u64 {
        self.inner.store.version()
    }

    /// Number of entries in a datastore
    pub fn entry_count(&self, datastore: LogicalDatastoreType) -> usize {
        self.inner.store.entry_count(datastore)
    }

    /// Durability mode the database was opened with
    pub fn durability_mode(&self) -> DurabilityMode {
        self.inner.mode
    }

    /// Options the database was opened with
    pub fn options(&self) -> &OpenOptions {
        &self.inner.options
    }

    /// Data directory, if persisted
    pub fn data_dir(&self) -> Option<&Path> {
        self.inner.data_dir.as_deref()
    }

    /// Write the current configuration state through the durability hook
    ///
    /// A no-op for in-memory and read-only databases. Serialized with
    /// commits, so the written state includes every acknowledged commit.
    pub fn flush(&self) -> Result<()> {
        if !self.inner.durability.requires_persist() || self.inner.options.is_read_only() {
            return Ok(());
        }
        self.inner
            .manager
            .persist_current(&self.inner.store, self.inner.durability.as_ref())
    }

    /// Flush and stop accepting transactions
    ///
    /// Commits already past validation finish and are included in the final
    /// snapshot; transactions issued afterwards fail with
    /// [`Error::StoreUnavailable`]. Calling this twice is harmless.
    pub fn shutdown(&self) -> Result<()> {
        if !self.inner.running.swap(false, Ordering::AcqRel) {
            return Ok(());
        }
        let flushed = self.inner.manager.close(
            &self.inner.store,
            self.inner.durability.as_ref(),
            !self.inner.options.is_read_only(),
        );
        tracing::info!(version = self.version(), "database shut down");
        flushed
    }
}

impl DataBroker for Database {
    fn new_read_only_transaction(&self) -> Box<dyn ReadTransaction> {
        Box::new(DbReadTransaction::new(Arc::clone(&self.inner)))
    }

    fn new_write_only_transaction(&self) -> Box<dyn WriteTransaction> {
        Box::new(DbWriteTransaction::new(Arc::clone(&self.inner)))
    }
}

impl std::fmt::Debug for Database {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Database")
            .field("mode", &self.inner.mode)
            .field("access_mode", &self.inner.options.access_mode)
            .field("data_dir", &self.inner.data_dir)
            .field("running", &self.is_running())
            .field("store", &self.inner.store)
            .finish()
    }
}

/// Builder for [`Database`]
#[derive(Debug, Clone, Default)]
pub struct DatabaseBuilder {
    path: Option<PathBuf>,
    mode: Option<DurabilityMode>,
    options: OpenOptions,
}

impl DatabaseBuilder {
    /// New builder: in-memory unless a path is set
    pub fn new() -> Self {
        Self::default()
    }

    /// Data directory; implies strict durability unless overridden
    pub fn path(mut self, path: impl AsRef<Path>) -> Self {
        self.path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set the durability mode explicitly
    pub fn durability(mut self, mode: DurabilityMode) -> Self {
        self.mode = Some(mode);
        self
    }

    /// Keep everything in memory even if a path is set
    pub fn no_durability(self) -> Self {
        self.durability(DurabilityMode::InMemory)
    }

    /// Persist a snapshot on every commit
    pub fn strict(self) -> Self {
        self.durability(DurabilityMode::Strict)
    }

    /// Replace the open options
    pub fn options(mut self, options: OpenOptions) -> Self {
        self.options = options;
        self
    }

    /// Open read-only
    pub fn read_only(mut self, read_only: bool) -> Self {
        self.options = self.options.read_only(read_only);
        self
    }

    /// Open the database
    ///
    /// # Errors
    ///
    /// - [`Error::Config`] if strict durability is requested without a path
    /// - [`Error::Io`] / [`Error::Serialization`] if the snapshot cannot be loaded
    pub fn open(self) -> Result<Database> {
        let mode = self.mode.unwrap_or(if self.path.is_some() {
            DurabilityMode::Strict
        } else {
            DurabilityMode::InMemory
        });

        let store = ShardedStore::new();
        let durability: Box<dyn Durability> = if mode.requires_disk() {
            let dir = self.path.as_ref().ok_or_else(|| {
                Error::Config(format!("{} durability requires a data directory", mode))
            })?;
            let file = SnapshotFile::in_dir(dir);
            if let Some(state) = file.load()? {
                store.restore(LogicalDatastoreType::Configuration, state.entries, state.version);
            }
            Box::new(file)
        } else {
            Box::new(InMemoryDurability)
        };

        let db = Database::from_parts(store, durability, mode, self.options, self.path);
        tracing::info!(
            mode = %mode,
            read_only = db.options().is_read_only(),
            version = db.version(),
            entries = db.entry_count(LogicalDatastoreType::Configuration),
            "database opened"
        );
        Ok(db)
    }
}
