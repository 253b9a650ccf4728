//! Configuration loading for CLI commands

use anyhow::Result;
use cobertura_core::config::{CliConfigOverrides, LayeredConfig};
use std::path::Path;

use crate::cli::Cli;
use crate::errors;

/// Config file picked up from the working directory when `--config` is absent
pub const DEFAULT_CONFIG_FILE: &str = "cobertura.toml";

/// Defaults, then the config file, then the environment, then CLI flags
pub fn load_config(cli: &Cli, urban_pattern: Option<String>) -> Result<LayeredConfig> {
    let config = LayeredConfig::with_defaults();

    let config = match &cli.config {
        Some(path) => {
            if !path.exists() {
                return Err(errors::config_file_not_found(path).into());
            }
            config.load_from_file(path)
        }
        None => config.load_from_optional_file(Path::new(DEFAULT_CONFIG_FILE)),
    }
    .map_err(|e| errors::invalid_config(&e.to_string()))?;

    let mut config = config.load_from_env();
    config.update_from_cli(overrides(cli, urban_pattern));

    config.validate().map_err(|e| errors::invalid_config(&e.to_string()))?;
    Ok(config)
}

fn overrides(cli: &Cli, urban_pattern: Option<String>) -> CliConfigOverrides {
    CliConfigOverrides {
        source_dir: cli.source_dir.clone(),
        output_dir: cli.output_dir.clone(),
        index_path: cli.index_path.clone(),
        urban_pattern,
    }
}
