//! Sizehint CLI Binary
//!
//! Resolves image widths and annotates URLs or HTML from the command line.
//! Configuration is loaded once and shared by logging setup and the command.

use clap::Parser;
use sizehint::cli::{map_error, Cli, RunContext};
use sizehint::config::{ConfigLoader, SizehintConfig};
use sizehint::error::SizehintError;
use sizehint::logging::{init_logging, LoggingConfig};
use std::process;
use tracing::{debug, error};

fn main() {
    let cli = Cli::parse();
    let loaded = load_config(&cli);

    let logging_config = build_logging_config(&cli, loaded.as_ref().ok());
    if let Err(e) = init_logging(Some(&logging_config)) {
        eprintln!("Failed to initialize logging: {}", e);
        process::exit(1);
    }

    match loaded.and_then(|config| run(&cli, config)) {
        Ok(output) => println!("{}", output),
        Err(e) => {
            error!(format = %cli.format, "Command failed: {}", e);
            eprintln!("{}", map_error(&e));
            process::exit(1);
        }
    }
}

/// Explicit `--config` file, or the layered global/workspace/env stack.
fn load_config(cli: &Cli) -> Result<SizehintConfig, SizehintError> {
    match cli.config {
        Some(ref path) => ConfigLoader::load_from_file(path),
        None => ConfigLoader::load(&cli.workspace),
    }
    .map_err(SizehintError::from)
}

fn run(cli: &Cli, config: SizehintConfig) -> Result<String, SizehintError> {
    debug!(workspace = %cli.workspace.display(), format = %cli.format, "Running command");
    let context = RunContext::from_config(
        config,
        cli.workspace.clone(),
        cli.config.clone(),
        &cli.format,
    );
    context.execute(&cli.command)
}

/// Logging settings from the `[logging]` config section, then CLI flags on
/// top. A config that failed to load contributes defaults.
fn build_logging_config(cli: &Cli, config: Option<&SizehintConfig>) -> LoggingConfig {
    let mut logging = config.map(|c| c.logging.clone()).unwrap_or_default();

    if cli.quiet {
        logging.enabled = false;
    }
    if cli.verbose {
        logging.level = "debug".to_string();
    }
    if let Some(ref level) = cli.log_level {
        logging.level = level.clone();
    }
    if let Some(ref format) = cli.log_format {
        logging.format = format.clone();
    }
    if let Some(ref output) = cli.log_output {
        logging.output = output.clone();
    }
    if let Some(ref file) = cli.log_file {
        logging.file = Some(file.clone());
    }
    logging
}
