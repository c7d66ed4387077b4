//! One-shot command execution.
//!
//! Output and diagnostics go to caller-supplied writers; the return value is
//! the process exit code: 0 on success, 1 on a failed RPC result or error.

use std::io::Write;
use std::sync::Arc;

use exemplar::{Exemplar, ExemplarConfig};
use exemplar_executor::Command;

use crate::format::{format_error, format_output, OutputMode};
use crate::shell::{Console, ExampleCliCommands, TestCommand};

/// Start a handle, execute `cmd`, print the result and stop the handle.
pub async fn run_facade_command(
    config: &ExemplarConfig,
    cmd: Command,
    mode: OutputMode,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> i32 {
    let handle = match Exemplar::start(config) {
        Ok(handle) => handle,
        Err(e) => {
            report(err, &format!("Failed to open database: {}", e));
            return 1;
        }
    };

    let exit_code = match handle.executor().execute(cmd).await {
        Ok(output) => {
            let formatted = format_output(&output, mode);
            if !formatted.is_empty() {
                report(out, &formatted);
            }
            if output.is_successful() {
                0
            } else {
                1
            }
        }
        Err(e) => {
            report(err, &format_error(&e, mode));
            1
        }
    };

    if let Err(e) = handle.stop() {
        report(err, &format_error(&e, mode));
        return 1;
    }
    exit_code
}

/// Run `test-command`: print the placeholder, then wait for the real result.
pub async fn run_test_command(
    service: Arc<dyn ExampleCliCommands>,
    console: Console,
    argument: String,
) -> i32 {
    let command = TestCommand::new(service, console.clone());
    console.println(&command.execute(argument));
    command.wait().await;
    0
}

fn report(writer: &mut dyn Write, line: &str) {
    if let Err(e) = writeln!(writer, "{}", line) {
        tracing::warn!(error = %e, "failed to write output");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::{LocalCliCommands, ASYNC_PLACEHOLDER};
    use parking_lot::Mutex;

    struct Captured {
        code: i32,
        out: String,
        err: String,
    }

    async fn run(config: &ExemplarConfig, cmd: Command) -> Captured {
        let (mut out, mut err) = (Vec::new(), Vec::new());
        let code = run_facade_command(config, cmd, OutputMode::Human, &mut out, &mut err).await;
        Captured {
            code,
            out: String::from_utf8(out).unwrap(),
            err: String::from_utf8(err).unwrap(),
        }
    }

    fn add(name: &str, value: &str) -> Command {
        Command::AddName {
            name: name.into(),
            value: value.into(),
        }
    }

    #[tokio::test]
    async fn test_add_name_success_exits_zero() {
        let result = run(&ExemplarConfig::ephemeral(), add("alice", "42")).await;
        assert_eq!(result.code, 0);
        assert_eq!(result.out, "Name added successfully\n");
        assert!(result.err.is_empty());
    }

    #[tokio::test]
    async fn test_add_name_read_only_exits_one() {
        let config = ExemplarConfig::ephemeral().with_read_only(true);
        let result = run(&config, add("alice", "42")).await;
        assert_eq!(result.code, 1);
        assert_eq!(
            result.out,
            "(error) APPLICATION: Failed to add name (store is read-only)\n"
        );
    }

    #[tokio::test]
    async fn test_get_missing_name_exits_one() {
        let result = run(
            &ExemplarConfig::ephemeral(),
            Command::GetName {
                name: "bob".into(),
            },
        )
        .await;
        assert_eq!(result.code, 1);
        assert_eq!(result.out, "(error) APPLICATION: Name not found\n");
    }

    #[tokio::test]
    async fn test_persisted_value_read_by_next_invocation() {
        let dir = tempfile::tempdir().unwrap();
        let config = ExemplarConfig::persistent(dir.path());
        assert_eq!(run(&config, add("alice", "42")).await.code, 0);

        let result = run(
            &config,
            Command::GetName {
                name: "alice".into(),
            },
        )
        .await;
        assert_eq!(result.code, 0);
        assert_eq!(result.out, "42\n");
    }

    #[tokio::test]
    async fn test_open_failure_exits_one() {
        let config =
            ExemplarConfig::ephemeral().with_durability(exemplar::types::DurabilityMode::Strict);
        let result = run(&config, Command::ListNames).await;
        assert_eq!(result.code, 1);
        assert!(result.out.is_empty());
        assert!(result.err.starts_with("Failed to open database"));
    }

    #[derive(Clone, Default)]
    struct Buffer(Arc<Mutex<Vec<u8>>>);

    impl Write for Buffer {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_command_prints_result_and_placeholder() {
        let buffer = Buffer::default();
        let code = run_test_command(
            Arc::new(LocalCliCommands),
            Console::from_writer(buffer.clone()),
            "abc".into(),
        )
        .await;
        assert_eq!(code, 0);
        let text = String::from_utf8(buffer.0.lock().clone()).unwrap();
        assert_eq!(
            text,
            format!("testCommand called with argument: abc\n{}\n", ASYNC_PLACEHOLDER)
        );
    }
}
