//! Exemplar CLI: one command per invocation.
//!
//! - `exemplar test-command -tA <arg>`: asynchronous test command
//! - `exemplar hello-world | add-name | get-name | list`: facade calls
//!
//! Logs go to stderr; `-v` raises the level and `RUST_LOG` overrides it.

mod commands;
mod format;
mod parse;
mod run;
mod shell;

use std::process;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use commands::{build_cli, normalize_args};
use format::OutputMode;
use parse::{matches_to_action, matches_to_config, CliAction};
use run::{run_facade_command, run_test_command};
use shell::{Console, LocalCliCommands};

fn main() {
    let matches = build_cli().get_matches_from(normalize_args(std::env::args()));
    init_tracing(matches.get_count("verbose"));

    let output_mode = if matches.get_flag("json") {
        OutputMode::Json
    } else {
        OutputMode::Human
    };

    let action = match matches_to_action(&matches) {
        Ok(action) => action,
        Err(e) => {
            eprintln!("{}", e);
            process::exit(2);
        }
    };

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Failed to start runtime: {}", e);
            process::exit(1);
        }
    };

    let exit_code = match action {
        CliAction::Test { argument } => runtime.block_on(run_test_command(
            Arc::new(LocalCliCommands),
            Console::stdout(),
            argument,
        )),
        CliAction::Execute(cmd) => {
            let config = match matches_to_config(&matches) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("{}", e);
                    process::exit(1);
                }
            };
            let (mut out, mut err) = (std::io::stdout(), std::io::stderr());
            runtime.block_on(run_facade_command(
                &config,
                cmd,
                output_mode,
                &mut out,
                &mut err,
            ))
        }
    };
    process::exit(exit_code);
}

fn init_tracing(verbosity: u8) {
    let default_level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
