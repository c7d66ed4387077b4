//! Clap command tree.

use clap::{Arg, ArgAction, Command};

/// Long form the `-tA` short flag is rewritten to.
const TEST_ARGUMENT_LONG: &str = "--testArgument";

/// Build the top-level command.
pub fn build_cli() -> Command {
    Command::new("exemplar")
        .about("Name/value configuration service shell")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("db")
                .long("db")
                .value_name("PATH")
                .global(true)
                .help("Snapshot directory (default: .exemplar)"),
        )
        .arg(
            Arg::new("ephemeral")
                .long("ephemeral")
                .action(ArgAction::SetTrue)
                .global(true)
                .conflicts_with("db")
                .help("Keep everything in memory"),
        )
        .arg(
            Arg::new("read-only")
                .long("read-only")
                .action(ArgAction::SetTrue)
                .global(true)
                .help("Reject writes"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("FILE")
                .global(true)
                .help("TOML configuration file"),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .action(ArgAction::SetTrue)
                .global(true)
                .help("Print results as JSON"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .action(ArgAction::Count)
                .global(true)
                .help("Raise log verbosity (repeatable)"),
        )
        .subcommand(
            Command::new("test-command")
                .about("Run the asynchronous test command")
                .arg(
                    Arg::new("testArgument")
                        .long("testArgument")
                        .value_name("ARG")
                        .required(true)
                        .help("Argument passed to the command (also -tA)"),
                ),
        )
        .subcommand(
            Command::new("hello-world")
                .about("Greet a name")
                .arg(name_arg()),
        )
        .subcommand(
            Command::new("add-name")
                .about("Store a value under a name")
                .arg(name_arg())
                .arg(
                    Arg::new("value")
                        .long("value")
                        .required(true)
                        .help("Value to store"),
                ),
        )
        .subcommand(
            Command::new("get-name")
                .about("Look up the value stored under a name")
                .arg(name_arg()),
        )
        .subcommand(Command::new("list").about("List every stored entry"))
}

fn name_arg() -> Arg {
    Arg::new("name").long("name").required(true).help("Entry name")
}

/// Rewrite `-tA` into its long form.
///
/// Clap short flags are a single character, so the two-character short
/// form is translated before parsing. `-tA value` and `-tA=value` are both
/// accepted.
pub fn normalize_args<I>(args: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    args.into_iter()
        .map(|arg| {
            if arg == "-tA" {
                TEST_ARGUMENT_LONG.to_string()
            } else if let Some(value) = arg.strip_prefix("-tA=") {
                format!("{}={}", TEST_ARGUMENT_LONG, value)
            } else {
                arg
            }
        })
        .collect()
}
