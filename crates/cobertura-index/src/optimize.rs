//! Writing trimmed GeoJSON files for the map client.

use cobertura_core::config::DatasetConfig;
use cobertura_core::error::Result;
use cobertura_core::models::FeatureCollection;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::reduce::{FeatureReducer, ReduceStats};
use crate::store::write_replacing;

/// Sizes and counts for one trimmed file
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptimizeReport {
    pub dataset: String,
    pub source: PathBuf,
    pub output: PathBuf,
    #[serde(flatten)]
    pub stats: ReduceStats,
    pub input_bytes: u64,
    pub output_bytes: u64,
}

impl OptimizeReport {
    pub fn input_kib(&self) -> f64 {
        self.input_bytes as f64 / 1024.0
    }

    pub fn output_kib(&self) -> f64 {
        self.output_bytes as f64 / 1024.0
    }

    /// Size saved, as a percentage of the input size
    pub fn reduction_percent(&self) -> f64 {
        if self.input_bytes == 0 {
            return 0.0;
        }
        100.0 - (self.output_bytes as f64 / self.input_bytes as f64 * 100.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum DatasetOutcome {
    Written(OptimizeReport),
    /// Source file not present; nothing written
    Missing { dataset: String, source: PathBuf },
    /// Source file unreadable or not GeoJSON; nothing written
    Failed { dataset: String, source: PathBuf, error: String },
}

/// Trims rural datasets from `source_dir` into `output_dir`
#[derive(Debug, Clone)]
pub struct GeoJsonOptimizer {
    reducer: FeatureReducer,
    source_dir: PathBuf,
    output_dir: PathBuf,
}

impl GeoJsonOptimizer {
    pub fn new(
        reducer: FeatureReducer,
        source_dir: impl Into<PathBuf>,
        output_dir: impl Into<PathBuf>,
    ) -> Self {
        Self { reducer, source_dir: source_dir.into(), output_dir: output_dir.into() }
    }

    pub fn source_path(&self, dataset: &DatasetConfig) -> PathBuf {
        self.source_dir.join(&dataset.source)
    }

    pub fn output_path(&self, dataset: &DatasetConfig) -> PathBuf {
        self.output_dir.join(&dataset.output)
    }

    /// Trim one dataset.
    ///
    /// Missing and unparsable sources are reported in the outcome; only a
    /// failure to write the output is an error.
    pub fn optimize(&self, dataset: &DatasetConfig) -> Result<DatasetOutcome> {
        let source = self.source_path(dataset);
        if !source.exists() {
            tracing::warn!("Skipping {}: not found", source.display());
            return Ok(DatasetOutcome::Missing { dataset: dataset.name.clone(), source });
        }

        tracing::debug!("Processing {}", source.display());
        let collection = match FeatureCollection::read(&source) {
            Ok(collection) => collection,
            Err(e) => {
                tracing::warn!("Error processing {}: {}", source.display(), e);
                return Ok(DatasetOutcome::Failed {
                    dataset: dataset.name.clone(),
                    source,
                    error: e.to_string(),
                });
            }
        };

        let (trimmed, stats) =
            self.reducer.reduce_collection(&collection, Some(&dataset.institution));
        let output = self.output_path(dataset);
        let content = trimmed.to_compact_string()?;
        write_replacing(&output, content.as_bytes())?;

        let report = OptimizeReport {
            dataset: dataset.name.clone(),
            input_bytes: file_size(&source),
            output_bytes: content.len() as u64,
            source,
            output,
            stats,
        };
        tracing::info!(
            "Saved {} ({:.1}KB -> {:.1}KB, {:.1}% smaller)",
            report.output.display(),
            report.input_kib(),
            report.output_kib(),
            report.reduction_percent()
        );

        Ok(DatasetOutcome::Written(report))
    }

    /// Trim every dataset in order, stopping only on a write failure
    pub fn optimize_all(&self, datasets: &[DatasetConfig]) -> Result<Vec<DatasetOutcome>> {
        datasets.iter().map(|dataset| self.optimize(dataset)).collect()
    }
}

fn file_size(path: &Path) -> u64 {
    fs::metadata(path).map(|m| m.len()).unwrap_or(0)
}
