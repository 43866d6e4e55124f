//! gendoc CLI entrypoint for documentation comment generation.

use std::io::{self, Write};
use std::process::ExitCode;

use gendoc::{GendocConfig, GendocError, OperationMode};
use ortho_config::OrthoConfig;
use tracing_subscriber::EnvFilter;

mod cli;

/// Environment variable holding the log filter directives.
const LOG_ENV: &str = "GENDOC_LOG";

fn main() -> ExitCode {
    init_logging();
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            drop(writeln!(io::stderr().lock(), "{error}"));
            ExitCode::FAILURE
        }
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run() -> Result<(), GendocError> {
    let config = load_config()?;
    tracing::debug!("running in {:?} mode", config.operation_mode());

    match config.operation_mode() {
        OperationMode::MigrateDatabase => cli::migrations::run(&config),
        OperationMode::SaveTemplates => cli::templates::save(&config),
        OperationMode::Generate => cli::generate::run(&config),
        OperationMode::ShowTemplates => cli::templates::show(&config),
    }
}

/// Loads configuration from CLI, environment, and files.
///
/// # Errors
///
/// Returns [`GendocError::Configuration`] when ortho-config fails to parse
/// arguments or load configuration files.
fn load_config() -> Result<GendocConfig, GendocError> {
    GendocConfig::load().map_err(|error| GendocError::Configuration {
        message: error.to_string(),
    })
}
