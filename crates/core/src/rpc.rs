//! RPC result model
//!
//! Every facade operation resolves to an [`RpcResult`]: either a successful
//! result carrying an output, or a failure carrying one or more [`RpcError`]s.
//!
//! ## Wire Format
//!
//! ```json
//! {
//!   "successful": false,
//!   "errors": [
//!     {"errorType": "application", "severity": "error",
//!      "tag": "data-missing", "message": "Name not found"}
//!   ]
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// Layer an RPC error originated from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorType {
    /// Transport failure
    Transport,
    /// RPC framework failure
    Rpc,
    /// Request did not satisfy the operation's input contract
    Protocol,
    /// Application-level failure raised by the service itself
    Application,
}

impl fmt::Display for ErrorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorType::Transport => write!(f, "TRANSPORT"),
            ErrorType::Rpc => write!(f, "RPC"),
            ErrorType::Protocol => write!(f, "PROTOCOL"),
            ErrorType::Application => write!(f, "APPLICATION"),
        }
    }
}

/// Severity of an RPC error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorSeverity {
    /// Operation failed
    #[default]
    Error,
    /// Operation succeeded with a caveat
    Warning,
}

/// One error attached to an [`RpcResult`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RpcError {
    /// Originating layer
    pub error_type: ErrorType,
    /// Severity
    pub severity: ErrorSeverity,
    /// Machine-readable tag
    pub tag: String,
    /// Human-readable message
    pub message: String,
    /// Underlying cause, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cause: Option<String>,
}

impl RpcError {
    /// Create an error with the default tag `operation-failed`
    pub fn new(error_type: ErrorType, message: impl Into<String>) -> Self {
        Self {
            error_type,
            severity: ErrorSeverity::Error,
            tag: "operation-failed".to_string(),
            message: message.into(),
            cause: None,
        }
    }

    /// Set the tag
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    /// Set the cause
    pub fn with_cause(mut self, cause: impl Into<String>) -> Self {
        self.cause = Some(cause.into());
        self
    }
}

impl fmt::Display for RpcError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.error_type, self.message)?;
        if let Some(cause) = &self.cause {
            write!(f, " ({})", cause)?;
        }
        Ok(())
    }
}

/// Outcome of an RPC invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RpcResult<T> {
    /// Whether the operation succeeded
    pub successful: bool,
    /// Output, present on success (and absent for unit outputs)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<T>,
    /// Errors, empty on plain success
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<RpcError>,
}

impl<T> RpcResult<T> {
    /// Successful result with an output
    pub fn success(result: T) -> Self {
        RpcResultBuilder::success(result).build()
    }

    /// Failed result with a single error
    pub fn failed(error: RpcError) -> Self {
        RpcResultBuilder::failed().with_rpc_error(error).build()
    }

    /// Check whether the operation succeeded
    pub fn is_successful(&self) -> bool {
        self.successful
    }

    /// First error message, if any
    pub fn first_error_message(&self) -> Option<&str> {
        self.errors.first().map(|e| e.message.as_str())
    }
}

impl RpcResult<()> {
    /// Successful result without an output
    pub fn void() -> Self {
        RpcResultBuilder::<()>::void_success().build()
    }
}

/// Builder for [`RpcResult`]
///
/// ```
/// use exemplar_core::{ErrorType, RpcResultBuilder};
///
/// let result = RpcResultBuilder::<String>::failed()
///     .with_error(ErrorType::Application, "Name not found")
///     .build();
/// assert!(!result.successful);
/// assert_eq!(result.first_error_message(), Some("Name not found"));
/// ```
#[derive(Debug)]
pub struct RpcResultBuilder<T> {
    successful: bool,
    result: Option<T>,
    errors: Vec<RpcError>,
}

impl<T> RpcResultBuilder<T> {
    /// Start a successful result carrying `result`
    pub fn success(result: T) -> Self {
        Self {
            successful: true,
            result: Some(result),
            errors: Vec::new(),
        }
    }

    /// Start a successful result without output
    pub fn void_success() -> Self {
        Self {
            successful: true,
            result: None,
            errors: Vec::new(),
        }
    }

    /// Start a failed result
    pub fn failed() -> Self {
        Self {
            successful: false,
            result: None,
            errors: Vec::new(),
        }
    }

    /// Attach an error with the default tag
    pub fn with_error(self, error_type: ErrorType, message: impl Into<String>) -> Self {
        self.with_rpc_error(RpcError::new(error_type, message))
    }

    /// Attach a prepared error
    pub fn with_rpc_error(mut self, error: RpcError) -> Self {
        self.errors.push(error);
        self
    }

    /// Finish building
    pub fn build(self) -> RpcResult<T> {
        RpcResult {
            successful: self.successful,
            result: self.result,
            errors: self.errors,
        }
    }

    /// Finish building as an already-resolved future
    pub fn build_future(self) -> futures::future::Ready<RpcResult<T>> {
        futures::future::ready(self.build())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_has_no_errors() {
        let result = RpcResult::success("ok".to_string());
        assert!(result.is_successful());
        assert_eq!(result.result.as_deref(), Some("ok"));
        assert!(result.errors.is_empty());
    }

    #[test]
    fn test_failed_carries_error() {
        let result: RpcResult<String> =
            RpcResult::failed(RpcError::new(ErrorType::Application, "Name not found"));
        assert!(!result.is_successful());
        assert!(result.result.is_none());
        assert_eq!(result.errors[0].error_type, ErrorType::Application);
    }

    #[test]
    fn test_wire_format() {
        let result: RpcResult<String> = RpcResult::failed(
            RpcError::new(ErrorType::Application, "Name not found").with_tag("data-missing"),
        );
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "successful": false,
                "errors": [{
                    "errorType": "application",
                    "severity": "error",
                    "tag": "data-missing",
                    "message": "Name not found"
                }]
            })
        );
    }

    #[test]
    fn test_display_includes_cause() {
        let err = RpcError::new(ErrorType::Application, "Failed to add name")
            .with_cause("store is read-only");
        assert_eq!(
            err.to_string(),
            "APPLICATION: Failed to add name (store is read-only)"
        );
    }

    #[tokio::test]
    async fn test_build_future_is_ready() {
        let result = RpcResultBuilder::success(7).build_future().await;
        assert_eq!(result.result, Some(7));
    }
}
