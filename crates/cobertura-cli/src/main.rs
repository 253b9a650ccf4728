//! Cobertura CLI - Builds the coverage search index and trimmed map layers

mod cli;
mod commands;
mod config_loader;
mod dry_run;
mod errors;
mod output;
mod output_types;

use clap::Parser;
use cli::Cli;
use console::style;
use errors::CliError;
use std::process::ExitCode;

fn main() -> ExitCode {
    // Logs go to stderr so `--json` output on stdout stays parseable
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match commands::execute(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            match err.downcast_ref::<CliError>() {
                Some(cli_error) => cli_error.display(),
                None => eprintln!("{} {:#}", style("✗").red().bold(), err),
            }
            ExitCode::FAILURE
        }
    }
}
