use crate::error::{CoberturaError, Result};
use crate::normalize::{default_aliases, FieldAlias};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration source for tracking where values come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Default value
    Default,
    /// Loaded from config file
    File,
    /// Loaded from environment variable
    Environment,
    /// Provided via CLI argument
    Cli,
}

impl ConfigSource {
    /// Returns the precedence level (higher = higher priority)
    pub fn precedence(&self) -> u8 {
        match self {
            ConfigSource::Default => 0,
            ConfigSource::File => 1,
            ConfigSource::Environment => 2,
            ConfigSource::Cli => 3,
        }
    }
}

/// A configuration value with its source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> ConfigValue<T> {
    pub fn new(value: T, source: ConfigSource) -> Self {
        Self { value, source }
    }

    /// Update the value if the new source has higher precedence
    pub fn update(&mut self, value: T, source: ConfigSource) {
        if source.precedence() > self.source.precedence() {
            self.value = value;
            self.source = source;
        }
    }
}

/// One rural source file and where its trimmed copy goes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetConfig {
    /// Short identifier used on the command line (e.g. "issste")
    pub name: String,
    /// File name inside the source directory
    pub source: String,
    /// File name inside the output directory
    pub output: String,
    /// Institution label written when a feature carries none
    pub institution: String,
}

impl DatasetConfig {
    pub fn new(name: &str, source: &str, output: &str, institution: &str) -> Self {
        Self {
            name: name.to_string(),
            source: source.to_string(),
            output: output.to_string(),
            institution: institution.to_string(),
        }
    }
}

/// Rural datasets published by the map
pub fn default_datasets() -> Vec<DatasetConfig> {
    vec![
        DatasetConfig::new("ssd", "RUR_SSD_JURISDICCION.geojson", "rural_ssd.geojson", "SSD"),
        DatasetConfig::new(
            "imss_bienestar",
            "RUR_IMSS_BIENESTAR.geojson",
            "rural_imss_bienestar.geojson",
            "IMSS BIENESTAR",
        ),
        DatasetConfig::new("issste", "RUR_ISSSTE.geojson", "rural_issste.geojson", "ISSSTE"),
        DatasetConfig::new(
            "sin_cobertura",
            "RUR_SIN_COBERTURA.geojson",
            "rural_sin_cobertura.geojson",
            "SIN COBERTURA",
        ),
    ]
}

/// Properties kept in trimmed rural files
pub fn default_needed_fields() -> Vec<String> {
    [
        "NOM_LOC",
        "NOM_MUN",
        "POBTOT",
        "POBFEM",
        "POBMAS",
        "JURISDICCION_NUM",
        "CVE_MUN",
        "CVEGEO9",
        "INSTITUCION",
        "TIPO",
        "CLUES",
        "HORARIO",
        "DIAS_LABORALES",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

/// Layered configuration for Cobertura
#[derive(Debug, Clone)]
pub struct LayeredConfig {
    pub source_dir: ConfigValue<PathBuf>,
    pub output_dir: ConfigValue<PathBuf>,
    pub index_path: ConfigValue<PathBuf>,
    pub urban_pattern: ConfigValue<String>,
    pub datasets: ConfigValue<Vec<DatasetConfig>>,
    pub needed_fields: ConfigValue<Vec<String>>,
    pub aliases: ConfigValue<Vec<FieldAlias>>,
}

impl LayeredConfig {
    /// Create a new configuration with default values
    pub fn with_defaults() -> Self {
        Self {
            source_dir: ConfigValue::new(PathBuf::from("data/geojson"), ConfigSource::Default),
            output_dir: ConfigValue::new(PathBuf::from("web/data"), ConfigSource::Default),
            index_path: ConfigValue::new(
                PathBuf::from("web/data/search_index.json"),
                ConfigSource::Default,
            ),
            urban_pattern: ConfigValue::new("URB_*.geojson".to_string(), ConfigSource::Default),
            datasets: ConfigValue::new(default_datasets(), ConfigSource::Default),
            needed_fields: ConfigValue::new(default_needed_fields(), ConfigSource::Default),
            aliases: ConfigValue::new(default_aliases(), ConfigSource::Default),
        }
    }

    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self> {
        let content =
            fs::read_to_string(path.as_ref()).map_err(|e| CoberturaError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to read config file: {}", e),
            })?;

        let file_config: FileConfig =
            toml::from_str(&content).map_err(|e| CoberturaError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to parse TOML: {}", e),
            })?;

        if let Some(source_dir) = file_config.source_dir {
            self.source_dir.update(source_dir, ConfigSource::File);
        }

        if let Some(output_dir) = file_config.output_dir {
            self.output_dir.update(output_dir, ConfigSource::File);
        }

        if let Some(index_path) = file_config.index_path {
            self.index_path.update(index_path, ConfigSource::File);
        }

        if let Some(urban_pattern) = file_config.urban_pattern {
            self.urban_pattern.update(urban_pattern, ConfigSource::File);
        }

        if let Some(datasets) = file_config.datasets {
            self.datasets.update(datasets, ConfigSource::File);
        }

        if let Some(needed_fields) = file_config.needed_fields {
            self.needed_fields.update(needed_fields, ConfigSource::File);
        }

        if let Some(aliases) = file_config.aliases {
            self.aliases.update(aliases, ConfigSource::File);
        }

        Ok(self)
    }

    /// Load the file only when it exists; a missing optional file is not an error
    pub fn load_from_optional_file<P: AsRef<Path>>(self, path: P) -> Result<Self> {
        if path.as_ref().exists() {
            self.load_from_file(path)
        } else {
            tracing::debug!("No config file at {}, using defaults", path.as_ref().display());
            Ok(self)
        }
    }

    /// Load configuration from environment variables
    pub fn load_from_env(mut self) -> Self {
        if let Ok(dir) = env::var("COBERTURA_SOURCE_DIR") {
            self.source_dir.update(PathBuf::from(dir), ConfigSource::Environment);
        }

        if let Ok(dir) = env::var("COBERTURA_OUTPUT_DIR") {
            self.output_dir.update(PathBuf::from(dir), ConfigSource::Environment);
        }

        if let Ok(path) = env::var("COBERTURA_INDEX_PATH") {
            self.index_path.update(PathBuf::from(path), ConfigSource::Environment);
        }

        if let Ok(pattern) = env::var("COBERTURA_URBAN_PATTERN") {
            if pattern.trim().is_empty() {
                tracing::warn!("Ignoring empty COBERTURA_URBAN_PATTERN");
            } else {
                self.urban_pattern.update(pattern, ConfigSource::Environment);
            }
        }

        self
    }

    /// Update configuration from CLI arguments
    pub fn update_from_cli(&mut self, overrides: CliConfigOverrides) {
        if let Some(source_dir) = overrides.source_dir {
            self.source_dir.update(source_dir, ConfigSource::Cli);
        }

        if let Some(output_dir) = overrides.output_dir {
            self.output_dir.update(output_dir, ConfigSource::Cli);
        }

        if let Some(index_path) = overrides.index_path {
            self.index_path.update(index_path, ConfigSource::Cli);
        }

        if let Some(urban_pattern) = overrides.urban_pattern {
            self.urban_pattern.update(urban_pattern, ConfigSource::Cli);
        }
    }

    /// Reject configurations the pipeline cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.urban_pattern.value.trim().is_empty() {
            return Err(CoberturaError::ConfigMissing { key: "urban_pattern".to_string() });
        }

        if self.needed_fields.value.is_empty() {
            return Err(CoberturaError::ConfigInvalid {
                key: "needed_fields".to_string(),
                reason: "at least one field must be kept".to_string(),
            });
        }

        let mut names = HashSet::new();
        for dataset in &self.datasets.value {
            if dataset.name.is_empty() || dataset.source.is_empty() || dataset.output.is_empty() {
                return Err(CoberturaError::ConfigInvalid {
                    key: "datasets".to_string(),
                    reason: format!("dataset '{}' needs a name, source and output", dataset.name),
                });
            }
            if !names.insert(dataset.name.as_str()) {
                return Err(CoberturaError::ConfigInvalid {
                    key: "datasets".to_string(),
                    reason: format!("duplicate dataset name '{}'", dataset.name),
                });
            }
        }

        Ok(())
    }

    /// Find a rural dataset by its short name
    pub fn dataset(&self, name: &str) -> Option<&DatasetConfig> {
        self.datasets.value.iter().find(|d| d.name == name)
    }

    /// Get all configuration values as a map for inspection
    pub fn to_inspection_map(&self) -> HashMap<String, (String, ConfigSource)> {
        let mut map = HashMap::new();

        map.insert(
            "source_dir".to_string(),
            (self.source_dir.value.display().to_string(), self.source_dir.source),
        );

        map.insert(
            "output_dir".to_string(),
            (self.output_dir.value.display().to_string(), self.output_dir.source),
        );

        map.insert(
            "index_path".to_string(),
            (self.index_path.value.display().to_string(), self.index_path.source),
        );

        map.insert(
            "urban_pattern".to_string(),
            (self.urban_pattern.value.clone(), self.urban_pattern.source),
        );

        let dataset_names: Vec<&str> =
            self.datasets.value.iter().map(|d| d.name.as_str()).collect();
        map.insert("datasets".to_string(), (dataset_names.join(", "), self.datasets.source));

        map.insert(
            "needed_fields".to_string(),
            (self.needed_fields.value.join(", "), self.needed_fields.source),
        );

        map
    }
}

/// Configuration loaded from TOML file
#[derive(Debug, Deserialize, Serialize)]
struct FileConfig {
    source_dir: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    index_path: Option<PathBuf>,
    urban_pattern: Option<String>,
    datasets: Option<Vec<DatasetConfig>>,
    needed_fields: Option<Vec<String>>,
    aliases: Option<Vec<FieldAlias>>,
}

/// CLI configuration overrides
#[derive(Debug, Default)]
pub struct CliConfigOverrides {
    pub source_dir: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub index_path: Option<PathBuf>,
    pub urban_pattern: Option<String>,
}
