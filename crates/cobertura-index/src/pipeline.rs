//! Batch index building: discover sources, extract records, merge, persist.

use cobertura_core::error::{CoberturaError, Result};
use cobertura_core::models::{FeatureCollection, IndexRecord};
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::extract::{Extracted, RecordExtractor, SourceFile};
use crate::merge::{merge, MergeCounts};
use crate::store::{IndexStore, LoadStatus};

/// Find files matching `pattern` inside `source_dir`, sorted by path.
///
/// A missing source directory yields no files. Only an invalid pattern is
/// an error.
pub fn discover(source_dir: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    if !source_dir.is_dir() {
        tracing::warn!("Source directory {} does not exist", source_dir.display());
        return Ok(Vec::new());
    }

    let dir = glob::Pattern::escape(&source_dir.to_string_lossy());
    let full_pattern = format!("{}/{}", dir.trim_end_matches('/'), pattern);

    let entries = glob::glob(&full_pattern).map_err(|e| CoberturaError::Pattern {
        pattern: pattern.to_string(),
        reason: e.to_string(),
    })?;

    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| match entry {
            Ok(path) => Some(path),
            Err(e) => {
                tracing::warn!("Skipping unreadable path: {}", e);
                None
            }
        })
        .filter(|path| path.is_file())
        .collect();
    files.sort();
    Ok(files)
}

/// A source file that could not be processed
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileFailure {
    pub path: PathBuf,
    pub error: String,
}

/// Outcome of one category rebuild
#[derive(Debug, Clone, Serialize)]
pub struct BuildReport {
    pub category: String,
    pub index_path: PathBuf,
    pub files_found: usize,
    pub files_failed: Vec<FileFailure>,
    pub prior: LoadStatus,
    pub skipped_missing_identity: usize,
    pub skipped_no_coordinate: usize,
    #[serde(flatten)]
    pub counts: MergeCounts,
}

impl BuildReport {
    pub fn files_processed(&self) -> usize {
        self.files_found - self.files_failed.len()
    }
}

/// Records gathered from a batch of files
#[derive(Debug, Default)]
struct Collected {
    records: Vec<IndexRecord>,
    files_failed: Vec<FileFailure>,
    skipped_missing_identity: usize,
    skipped_no_coordinate: usize,
}

/// Rebuilds one category of the search index
#[derive(Debug, Clone)]
pub struct IndexBuilder {
    store: IndexStore,
}

impl IndexBuilder {
    pub fn new(store: IndexStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &IndexStore {
        &self.store
    }

    /// Replace the extractor's category in the persisted index with the
    /// records found in `files`.
    ///
    /// Files that cannot be read or parsed are logged, reported, and skipped.
    /// Only a failure to write the index is returned as an error.
    pub fn build<E: RecordExtractor>(
        &self,
        extractor: &E,
        files: &[SourceFile],
    ) -> Result<BuildReport> {
        let category = extractor.category();
        let (prior, prior_status) = self.store.load();

        let collected = collect(extractor, files);
        tracing::info!(
            "Extracted {} {} records from {} files",
            collected.records.len(),
            category,
            files.len()
        );

        let outcome = merge(prior, &category, collected.records);
        self.store.save(&outcome.index)?;
        tracing::info!(
            "Saved index with {} records to {}",
            outcome.index.len(),
            self.store.path().display()
        );

        Ok(BuildReport {
            category: category.to_string(),
            index_path: self.store.path().to_path_buf(),
            files_found: files.len(),
            files_failed: collected.files_failed,
            prior: prior_status,
            skipped_missing_identity: collected.skipped_missing_identity,
            skipped_no_coordinate: collected.skipped_no_coordinate,
            counts: outcome.counts(),
        })
    }
}

fn collect<E: RecordExtractor>(extractor: &E, files: &[SourceFile]) -> Collected {
    let mut collected = Collected::default();

    for file in files {
        tracing::debug!("Processing {}", file.path.display());

        let collection = match FeatureCollection::read(&file.path) {
            Ok(collection) => collection,
            Err(e) => {
                tracing::warn!("Error processing {}: {}", file.path.display(), e);
                collected
                    .files_failed
                    .push(FileFailure { path: file.path.clone(), error: e.to_string() });
                continue;
            }
        };

        for feature in &collection.features {
            match extractor.extract(feature, file) {
                Extracted::Record(record) => collected.records.push(record),
                Extracted::MissingIdentity => collected.skipped_missing_identity += 1,
                Extracted::NoCoordinate => collected.skipped_no_coordinate += 1,
            }
        }
    }

    collected
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_discover_matches_pattern_sorted() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["URB_SSD.geojson", "URB_IMSS.geojson", "RUR_ISSSTE.geojson", "URB_notes.txt"] {
            fs::write(dir.path().join(name), "{}").unwrap();
        }
        fs::create_dir(dir.path().join("URB_dir.geojson")).unwrap();

        let files = discover(dir.path(), "URB_*.geojson").unwrap();
        let names: Vec<String> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["URB_IMSS.geojson", "URB_SSD.geojson"]);
    }

    #[test]
    fn test_discover_missing_dir_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let files = discover(&dir.path().join("absent"), "URB_*.geojson").unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn test_discover_invalid_pattern() {
        let dir = tempfile::tempdir().unwrap();
        let result = discover(dir.path(), "URB_[.geojson");
        assert!(matches!(result, Err(CoberturaError::Pattern { .. })));
    }

    #[test]
    fn test_discover_escapes_directory_name() {
        let dir = tempfile::tempdir().unwrap();
        let odd = dir.path().join("datos [2024]");
        fs::create_dir(&odd).unwrap();
        fs::write(odd.join("URB_A.geojson"), "{}").unwrap();

        assert_eq!(discover(&odd, "URB_*.geojson").unwrap().len(), 1);
    }
}
