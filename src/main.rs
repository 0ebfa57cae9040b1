//! launcher-ini: structure-preserving INI editor
//!
//! Entry point for the launcher-ini application.

use std::path::Path;
use std::process::ExitCode;

use launcher_ini::config::{
    Cli, Command, ConfigError, ValidatedConfig, defaults, write_config_template,
    write_default_config,
};

mod app;
mod run;

use app::{exit_code, print_config_hint, setup_tracing};
use run::Outcome;

/// Main entry point.
///
/// Excluded from coverage as it's the thin wrapper around testable components.
#[cfg(not(tarpaulin_include))]
fn main() -> ExitCode {
    let cli = Cli::parse_args();

    // Handle init subcommands
    match &cli.command {
        Command::Init { output, force } => {
            return handle_init(output, *force, write_default_config, "Launcher template");
        }
        Command::InitConfig { output, force } => {
            let Some(path) = output.clone().or_else(defaults::config_path) else {
                eprintln!("Error: no config directory on this platform; pass --output");
                return exit_code::CONFIG_ERROR;
            };
            return handle_init(&path, *force, write_config_template, "Configuration template");
        }
        _ => {}
    }

    // Load and validate configuration
    let config = match ValidatedConfig::load(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            print_config_hint(&e);
            return exit_code::CONFIG_ERROR;
        }
    };

    // Setup logging and run
    setup_tracing(config.verbose);
    tracing::debug!("{config}");

    run_command(&cli.command, &config)
}

/// Handles the `init` and `init-config` subcommands.
fn handle_init(
    output: &Path,
    force: bool,
    write: fn(&Path, bool) -> Result<(), ConfigError>,
    what: &str,
) -> ExitCode {
    match write(output, force) {
        Ok(()) => {
            println!("{what} written to: {}", output.display());
            exit_code::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            print_config_hint(&e);
            exit_code::CONFIG_ERROR
        }
    }
}

/// Runs one command against stdout.
#[cfg(not(tarpaulin_include))]
fn run_command(command: &Command, config: &ValidatedConfig) -> ExitCode {
    let mut stdout = std::io::stdout().lock();

    match run::execute(command, config, &mut stdout) {
        Ok(Outcome::Done) => exit_code::SUCCESS,
        Ok(Outcome::NotFound) => exit_code::not_found(),
        Err(e) => {
            tracing::error!("{e}");
            exit_code::runtime_error()
        }
    }
}
