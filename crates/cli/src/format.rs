//! Output formatting for human and JSON modes.

use exemplar_core::{Error, RpcResult};
use exemplar_executor::Output;

/// How results are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Human,
    Json,
}

/// Render a command output.
pub fn format_output(output: &Output, mode: OutputMode) -> String {
    match mode {
        OutputMode::Json => serde_json::to_string_pretty(output)
            .unwrap_or_else(|e| format!("{{\"error\": \"{}\"}}", e)),
        OutputMode::Human => match output {
            Output::Greeting(r) => human(r, |o| o.greeting.clone()),
            Output::Added(r) => human(r, |o| o.result.clone()),
            Output::Value(r) => human(r, |o| o.value.clone()),
            Output::Entries(entries) if entries.is_empty() => "(empty)".to_string(),
            Output::Entries(entries) => entries
                .iter()
                .map(|e| format!("{}={}", e.name, e.value))
                .collect::<Vec<_>>()
                .join("\n"),
        },
    }
}

/// Render an error that prevented a result from being produced.
pub fn format_error(err: &Error, mode: OutputMode) -> String {
    match mode {
        OutputMode::Json => serde_json::json!({ "error": err.to_string() }).to_string(),
        OutputMode::Human => format!("(error) {}", err),
    }
}

fn human<T>(result: &RpcResult<T>, render: impl Fn(&T) -> String) -> String {
    if result.successful {
        return result.result.as_ref().map(render).unwrap_or_default();
    }
    result
        .errors
        .iter()
        .map(|e| match &e.cause {
            Some(cause) => format!("(error) {}: {} ({})", e.error_type, e.message, cause),
            None => format!("(error) {}: {}", e.error_type, e.message),
        })
        .collect::<Vec<_>>()
        .join("\n")
}
