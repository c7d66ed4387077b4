//! Durability modes
//!
//! | Mode | Disk | Recovery |
//! |------|------|----------|
//! | InMemory | None | No |
//! | Strict | Snapshot rewritten on every commit | Yes |

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How commits are persisted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DurabilityMode {
    /// Nothing is written to disk
    InMemory,
    /// The configuration snapshot is rewritten before each commit becomes visible
    #[default]
    Strict,
}

impl DurabilityMode {
    /// Whether this mode touches the filesystem
    pub fn requires_disk(&self) -> bool {
        matches!(self, DurabilityMode::Strict)
    }
}

impl fmt::Display for DurabilityMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DurabilityMode::InMemory => write!(f, "in_memory"),
            DurabilityMode::Strict => write!(f, "strict"),
        }
    }
}

impl FromStr for DurabilityMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "in_memory" | "memory" => Ok(DurabilityMode::InMemory),
            "strict" => Ok(DurabilityMode::Strict),
            other => Err(format!("unknown durability mode: {}", other)),
        }
    }
}
