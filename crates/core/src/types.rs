//! Data model for the configuration tree
//!
//! The tree holds a single keyed list, `example-list`, of [`NameValueEntry`]
//! records. Entries are addressed by [`EntryPath`], which pairs the logical
//! datastore with the list key.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Name of the keyed list every entry lives in.
pub const EXAMPLE_LIST: &str = "example-list";

/// Logical datastore an operation targets
///
/// Facade traffic always goes to [`LogicalDatastoreType::Configuration`];
/// `Operational` exists so the broker can keep runtime state apart from
/// intended configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogicalDatastoreType {
    /// Intended configuration, the only datastore that is persisted
    Configuration,
    /// Runtime state, never persisted
    Operational,
}

impl fmt::Display for LogicalDatastoreType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogicalDatastoreType::Configuration => write!(f, "configuration"),
            LogicalDatastoreType::Operational => write!(f, "operational"),
        }
    }
}

/// One `{name, value}` record of the keyed list
///
/// `name` is the list key: unique within a datastore and matched exactly.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NameValueEntry {
    /// List key
    pub name: String,
    /// Stored value
    pub value: String,
}

impl NameValueEntry {
    /// Create a new entry
    ///
    /// # Examples
    ///
    /// ```
    /// use exemplar_core::NameValueEntry;
    ///
    /// let entry = NameValueEntry::new("alice", "42");
    /// assert_eq!(entry.name, "alice");
    /// assert_eq!(entry.value, "42");
    /// ```
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Path of this entry in the given datastore
    pub fn path(&self, datastore: LogicalDatastoreType) -> EntryPath {
        EntryPath::new(datastore, self.name.clone())
    }
}

impl fmt::Display for NameValueEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NameValueEntry{{name={}, value={}}}", self.name, self.value)
    }
}

/// Instance identifier for a list entry
///
/// Ordered by datastore first, then key, so sorted listings group naturally.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntryPath {
    /// Datastore the entry lives in
    pub datastore: LogicalDatastoreType,
    /// List key (the entry's `name`)
    pub key: String,
}

impl EntryPath {
    /// Create a new path
    pub fn new(datastore: LogicalDatastoreType, key: impl Into<String>) -> Self {
        Self {
            datastore,
            key: key.into(),
        }
    }

    /// Path into the configuration datastore
    ///
    /// # Examples
    ///
    /// ```
    /// use exemplar_core::{EntryPath, LogicalDatastoreType};
    ///
    /// let path = EntryPath::config("alice");
    /// assert_eq!(path.datastore, LogicalDatastoreType::Configuration);
    /// assert_eq!(path.to_string(), "/example-list[name=alice]");
    /// ```
    pub fn config(key: impl Into<String>) -> Self {
        Self::new(LogicalDatastoreType::Configuration, key)
    }
}

impl fmt::Display for EntryPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}[name={}]", EXAMPLE_LIST, self.key)
    }
}

/// Entry with commit metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionedEntry {
    /// The stored entry
    pub entry: NameValueEntry,
    /// Commit version that last wrote this entry
    pub version: u64,
    /// Commit time, unix seconds
    pub timestamp: i64,
}

impl VersionedEntry {
    /// Wrap an entry with the given commit version, stamped now
    pub fn new(entry: NameValueEntry, version: u64) -> Self {
        Self {
            entry,
            version,
            timestamp: chrono::Utc::now().timestamp(),
        }
    }
}
