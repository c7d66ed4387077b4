//! Access control for Exemplar stores.
//!
//! [`AccessMode`] decides whether write transactions may commit.
//! [`OpenOptions`] carries it into the broker when a store is opened.

use exemplar_core::{Error, Result};
use serde::{Deserialize, Serialize};

/// Controls whether the store accepts writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessMode {
    #[default]
    ReadWrite,
    ReadOnly,
}

impl AccessMode {
    /// Fail with [`Error::ReadOnly`] unless writes are allowed.
    pub fn check_write(&self) -> Result<()> {
        match self {
            AccessMode::ReadWrite => Ok(()),
            AccessMode::ReadOnly => Err(Error::ReadOnly),
        }
    }
}

/// Options for opening a store.
///
/// ```
/// use exemplar_security::{AccessMode, OpenOptions};
///
/// let opts = OpenOptions::new().access_mode(AccessMode::ReadOnly);
/// assert!(opts.is_read_only());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenOptions {
    pub access_mode: AccessMode,
}

impl OpenOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn access_mode(mut self, mode: AccessMode) -> Self {
        self.access_mode = mode;
        self
    }

    pub fn read_only(self, read_only: bool) -> Self {
        self.access_mode(if read_only {
            AccessMode::ReadOnly
        } else {
            AccessMode::ReadWrite
        })
    }

    pub fn is_read_only(&self) -> bool {
        self.access_mode == AccessMode::ReadOnly
    }
}
