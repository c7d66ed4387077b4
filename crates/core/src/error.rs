//! Unified error types for Exemplar.
//!
//! Store-level failures travel as `Err(Error)` through the returned futures.
//! The RPC facade turns the application-level ones into [`RpcError`]s.

use crate::rpc::{ErrorType, RpcError};
use thiserror::Error;

/// All Exemplar errors.
#[derive(Debug, Error)]
pub enum Error {
    /// Store is stopped or was never started
    #[error("store unavailable: {0}")]
    StoreUnavailable(String),

    /// Write attempted against a read-only store
    #[error("store is read-only")]
    ReadOnly,

    /// Commit could not be applied or made durable
    #[error("commit failed: {0}")]
    CommitFailed(String),

    /// Optimistic validation failed (concurrent modification)
    #[error("conflict: {0}")]
    Conflict(String),

    /// Transaction was already committed or cancelled
    #[error("transaction closed")]
    TransactionClosed,

    /// Entry not found
    #[error("not found: {0}")]
    NotFound(String),

    /// Request input rejected before reaching the store
    #[error("malformed input: {0}")]
    MalformedInput(String),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid configuration
    #[error("configuration error: {0}")]
    Config(String),
}

/// Result type for Exemplar operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Check if this error is retryable.
    ///
    /// Conflicts may succeed on retry; nothing in Exemplar retries on its own.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::Conflict(_))
    }

    /// Check if this is a not-found error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound(_))
    }

    /// Canonical tag used when this error is carried in an [`RpcError`]
    pub fn tag(&self) -> &'static str {
        match self {
            Error::StoreUnavailable(_) => "resource-denied",
            Error::ReadOnly => "access-denied",
            Error::CommitFailed(_) => "operation-failed",
            Error::Conflict(_) => "in-use",
            Error::TransactionClosed => "operation-failed",
            Error::NotFound(_) => "data-missing",
            Error::MalformedInput(_) => "invalid-value",
            Error::Serialization(_) => "malformed-message",
            Error::Io(_) => "operation-failed",
            Error::Config(_) => "operation-failed",
        }
    }

    /// Wrap this error as the cause of an [`RpcError`]
    pub fn to_rpc_error(&self, error_type: ErrorType, message: impl Into<String>) -> RpcError {
        RpcError::new(error_type, message)
            .with_tag(self.tag())
            .with_cause(self.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}
