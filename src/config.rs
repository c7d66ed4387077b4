//! Handle configuration.
//!
//! ```toml
//! data_dir = ".exemplar"
//! durability = "strict"
//! read_only = false
//! ```
//!
//! Every field is optional. Without `data_dir` the store is in-memory.

use exemplar_core::{Error, Result};
use exemplar_engine::{DatabaseBuilder, DurabilityMode};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration consumed by [`Exemplar::start`](crate::Exemplar::start).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExemplarConfig {
    /// Snapshot directory
    pub data_dir: Option<PathBuf>,
    /// Defaults to `strict` when `data_dir` is set, `in_memory` otherwise
    pub durability: Option<DurabilityMode>,
    /// Reject every write
    pub read_only: bool,
}

impl ExemplarConfig {
    /// In-memory, read-write.
    pub fn ephemeral() -> Self {
        Self::default()
    }

    /// Persist to `dir` on every commit.
    pub fn persistent(dir: impl AsRef<Path>) -> Self {
        Self {
            data_dir: Some(dir.as_ref().to_path_buf()),
            durability: Some(DurabilityMode::Strict),
            read_only: false,
        }
    }

    /// Parse a TOML document.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| Error::Config(e.to_string()))
    }

    /// Read and parse a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&text)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
        tracing::debug!(path = %path.display(), ?config, "loaded config");
        Ok(config)
    }

    pub fn with_data_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.data_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    pub fn with_durability(mut self, mode: DurabilityMode) -> Self {
        self.durability = Some(mode);
        self
    }

    pub fn with_read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self
    }

    /// The effective durability mode.
    pub fn durability_mode(&self) -> DurabilityMode {
        self.durability.unwrap_or(match self.data_dir {
            Some(_) => DurabilityMode::Strict,
            None => DurabilityMode::InMemory,
        })
    }

    pub(crate) fn to_builder(&self) -> DatabaseBuilder {
        let mut builder = DatabaseBuilder::new()
            .durability(self.durability_mode())
            .read_only(self.read_only);
        if let Some(dir) = &self.data_dir {
            builder = builder.path(dir);
        }
        builder
    }
}
