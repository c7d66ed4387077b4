//! ArgMatches → CliAction conversion.
//!
//! - Facade calls → `CliAction::Execute(Command)`
//! - `test-command` → `CliAction::Test`, handled by the shell adapter

use clap::ArgMatches;
use exemplar::ExemplarConfig;
use exemplar_executor::Command;

/// The result of parsing the command line.
#[derive(Debug, PartialEq, Eq)]
pub enum CliAction {
    /// A facade call executed against the store.
    Execute(Command),
    /// The asynchronous test command; never touches the store.
    Test { argument: String },
}

/// Convert clap ArgMatches into a CliAction.
pub fn matches_to_action(matches: &ArgMatches) -> Result<CliAction, String> {
    let (sub_name, m) = matches
        .subcommand()
        .ok_or_else(|| "No command provided".to_string())?;

    match sub_name {
        "test-command" => Ok(CliAction::Test {
            argument: required(m, "testArgument")?,
        }),
        "hello-world" => Ok(CliAction::Execute(Command::HelloWorld {
            name: required(m, "name")?,
        })),
        "add-name" => Ok(CliAction::Execute(Command::AddName {
            name: required(m, "name")?,
            value: required(m, "value")?,
        })),
        "get-name" => Ok(CliAction::Execute(Command::GetName {
            name: required(m, "name")?,
        })),
        "list" => Ok(CliAction::Execute(Command::ListNames)),
        other => Err(format!("Unknown command: {}", other)),
    }
}

/// Build the handle configuration from the global flags.
///
/// Precedence: `--config` file first, then `--ephemeral` / `--db`, then
/// `--read-only`. With neither a file nor flags the store lives in `.exemplar`.
pub fn matches_to_config(matches: &ArgMatches) -> Result<ExemplarConfig, String> {
    let mut config = match matches.get_one::<String>("config") {
        Some(path) => ExemplarConfig::load(path).map_err(|e| format!("Failed to load config: {}", e))?,
        None => ExemplarConfig::default(),
    };

    if matches.get_flag("ephemeral") {
        config = ExemplarConfig::ephemeral().with_read_only(config.read_only);
    } else if let Some(path) = matches.get_one::<String>("db") {
        config = config.with_data_dir(path);
    } else if config.data_dir.is_none() && matches.get_one::<String>("config").is_none() {
        config = config.with_data_dir(".exemplar");
    }

    if matches.get_flag("read-only") {
        config = config.with_read_only(true);
    }
    Ok(config)
}

fn required(m: &ArgMatches, id: &str) -> Result<String, String> {
    m.get_one::<String>(id)
        .cloned()
        .ok_or_else(|| format!("Missing argument: {}", id))
}
