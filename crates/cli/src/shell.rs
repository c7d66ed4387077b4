//! Shell command adapter.
//!
//! `test-command` hands its argument to the [`ExampleCliCommands`] service
//! and returns a placeholder immediately. The real result is printed to the
//! [`Console`] by a callback once the service future resolves.

use exemplar_core::direct::add_callback;
use exemplar_core::Result;
use futures::future::{self, BoxFuture, FutureExt};
use parking_lot::Mutex;
use std::io::Write;
use std::sync::Arc;

/// Returned by [`TestCommand::execute`] before the result is known.
pub const ASYNC_PLACEHOLDER: &str =
    "Command is being executed asynchronously. Check logs for the result.";

/// Commands the shell can invoke.
pub trait ExampleCliCommands: Send + Sync {
    fn test_command(&self, argument: String) -> BoxFuture<'static, Result<String>>;
}

/// In-process implementation of [`ExampleCliCommands`].
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalCliCommands;

impl ExampleCliCommands for LocalCliCommands {
    fn test_command(&self, argument: String) -> BoxFuture<'static, Result<String>> {
        tracing::debug!(argument = %argument, "testCommand invoked");
        future::ok(format!("testCommand called with argument: {}", argument)).boxed()
    }
}

/// Where command results are printed.
#[derive(Clone)]
pub struct Console {
    sink: Arc<Mutex<Box<dyn Write + Send>>>,
}

impl Console {
    pub fn stdout() -> Self {
        Self::from_writer(std::io::stdout())
    }

    pub fn from_writer(writer: impl Write + Send + 'static) -> Self {
        Self {
            sink: Arc::new(Mutex::new(Box::new(writer))),
        }
    }

    /// Print one line; write errors are logged and otherwise ignored.
    pub fn println(&self, line: &str) {
        let mut sink = self.sink.lock();
        if let Err(e) = writeln!(sink, "{}", line).and_then(|_| sink.flush()) {
            tracing::warn!(error = %e, "console write failed");
        }
    }
}

/// The `test-command` shell command.
pub struct TestCommand {
    service: Arc<dyn ExampleCliCommands>,
    console: Console,
    pending: Mutex<Vec<BoxFuture<'static, ()>>>,
}

impl TestCommand {
    pub fn new(service: Arc<dyn ExampleCliCommands>, console: Console) -> Self {
        Self {
            service,
            console,
            pending: Mutex::new(Vec::new()),
        }
    }

    /// Start the command and return the placeholder.
    ///
    /// If the service future is already resolved, its result has been
    /// printed by the time this returns. Otherwise the callback runs when
    /// [`TestCommand::wait`] drives it.
    pub fn execute(&self, argument: impl Into<String>) -> String {
        let console = self.console.clone();
        let completion = add_callback(
            self.service.test_command(argument.into()),
            move |result| match result {
                Ok(output) => console.println(&output),
                Err(e) => {
                    tracing::error!(error = %e, "test command failed");
                    console.println(&format!("Command execution failed: {}", e));
                }
            },
        );
        if let Some(rest) = completion.into_pending() {
            self.pending.lock().push(rest);
        }
        ASYNC_PLACEHOLDER.to_string()
    }

    /// Number of commands whose result has not been printed yet.
    pub fn pending(&self) -> usize {
        self.pending.lock().len()
    }

    /// Drive every outstanding command to completion.
    pub async fn wait(&self) {
        let pending = std::mem::take(&mut *self.pending.lock());
        future::join_all(pending).await;
    }
}
