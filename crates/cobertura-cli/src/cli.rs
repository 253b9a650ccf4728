use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Cobertura - search index and trimmed GeoJSON for the health-coverage map
#[derive(Parser, Debug)]
#[command(name = "cobertura")]
#[command(about = "Builds the coverage search index and trimmed GeoJSON layers", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Output results in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Show planned actions without executing them
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Configuration file (defaults to ./cobertura.toml when present)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Directory holding the source GeoJSON files
    #[arg(long, global = true, value_name = "DIR")]
    pub source_dir: Option<PathBuf>,

    /// Directory receiving the trimmed GeoJSON files
    #[arg(long, global = true, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Search index file to merge into
    #[arg(long, global = true, value_name = "PATH")]
    pub index_path: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Rebuild one category of the search index, keeping the others
    Index(IndexArgs),

    /// Write trimmed rural GeoJSON files
    Optimize(OptimizeArgs),

    /// Show what the current search index contains
    Inspect(InspectArgs),
}

/// Category selection for index rebuilds
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CategoryArg {
    /// Urban AGEB polygons
    #[value(name = "urbano")]
    Urban,
    /// Rural locality points
    Rural,
    /// Urban, then rural
    All,
}

impl CategoryArg {
    pub fn includes_urban(self) -> bool {
        matches!(self, CategoryArg::Urban | CategoryArg::All)
    }

    pub fn includes_rural(self) -> bool {
        matches!(self, CategoryArg::Rural | CategoryArg::All)
    }
}

#[derive(Parser, Debug)]
pub struct IndexArgs {
    /// Category to rebuild
    #[arg(long, value_enum, default_value = "urbano")]
    pub category: CategoryArg,

    /// Glob pattern for urban source files (e.g. "URB_*.geojson")
    #[arg(long, value_name = "PATTERN")]
    pub urban_pattern: Option<String>,
}

#[derive(Parser, Debug)]
pub struct OptimizeArgs {
    /// Only trim the named datasets (repeatable; defaults to all)
    #[arg(long = "dataset", value_name = "NAME")]
    pub datasets: Vec<String>,
}

#[derive(Parser, Debug)]
pub struct InspectArgs {
    /// Also show the effective configuration and where each value came from
    #[arg(long)]
    pub show_config: bool,
}
