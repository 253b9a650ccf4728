//! Command implementations

mod index;
mod inspect;
mod optimize;

use crate::cli::{Cli, Commands};
use crate::config_loader::load_config;
use crate::output::OutputWriter;
use anyhow::Result;

/// Execute a CLI command
pub fn execute(cli: Cli) -> Result<()> {
    let output = OutputWriter::new(cli.json);

    let urban_pattern = match &cli.command {
        Commands::Index(args) => args.urban_pattern.clone(),
        _ => None,
    };
    let config = load_config(&cli, urban_pattern)?;
    tracing::debug!(
        source_dir = %config.source_dir.value.display(),
        output_dir = %config.output_dir.value.display(),
        index_path = %config.index_path.value.display(),
        "Configuration loaded"
    );

    match cli.command {
        Commands::Index(args) => index::execute(args, &config, &output, cli.dry_run),
        Commands::Optimize(args) => optimize::execute(args, &config, &output, cli.dry_run),
        Commands::Inspect(args) => inspect::execute(args, &config, &output),
    }
}
