mod chart;
mod cli;
mod commands;
mod error;
mod logging;
mod output;
mod views;

use std::process::ExitCode;

use clap::Parser;
use tradejournal_core::JournalConfig;

use crate::cli::Cli;
use crate::error::CliError;

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(error) => {
            eprintln!("error: {error}");
            ExitCode::from(error.exit_code())
        }
    }
}

fn run() -> Result<ExitCode, CliError> {
    let cli = Cli::parse();
    let config = JournalConfig::load()?;
    logging::init(cli.log_level.as_deref(), &config);

    let output = commands::run(&cli, &config)?;
    output::render(&output, cli.format, cli.pretty)?;

    let envelope = &output.envelope;
    if cli.strict && (!envelope.meta.warnings.is_empty() || !envelope.errors.is_empty()) {
        return Err(CliError::StrictModeViolation {
            warning_count: envelope.meta.warnings.len(),
            error_count: envelope.errors.len(),
        });
    }

    if !envelope.errors.is_empty() {
        return Ok(ExitCode::from(3));
    }

    Ok(ExitCode::SUCCESS)
}
