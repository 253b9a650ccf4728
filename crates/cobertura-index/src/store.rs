//! Loading and persisting the search index file.

use cobertura_core::error::Result;
use cobertura_core::models::SearchIndex;
use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// What was found at the index path when loading
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LoadStatus {
    /// No index file yet
    Missing,
    /// Index read; `dropped` entries lacked a name or coordinate
    Loaded { records: usize, dropped: usize },
    /// File unreadable or not a JSON array; treated as empty
    Corrupt { reason: String },
}

/// The persisted search index
#[derive(Debug, Clone)]
pub struct IndexStore {
    path: PathBuf,
}

impl IndexStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the prior index. Never fails: a missing or corrupt file yields an
    /// empty index and the status says why.
    pub fn load(&self) -> (SearchIndex, LoadStatus) {
        if !self.path.exists() {
            tracing::debug!("No existing index at {}", self.path.display());
            return (SearchIndex::default(), LoadStatus::Missing);
        }

        let values = match fs::read_to_string(&self.path)
            .map_err(|e| e.to_string())
            .and_then(|content| {
                serde_json::from_str::<Vec<Value>>(&content).map_err(|e| e.to_string())
            }) {
            Ok(values) => values,
            Err(reason) => {
                tracing::warn!(
                    "Existing index at {} is unreadable, starting empty: {}",
                    self.path.display(),
                    reason
                );
                return (SearchIndex::default(), LoadStatus::Corrupt { reason });
            }
        };

        let (index, dropped) = SearchIndex::from_values(values);
        if dropped > 0 {
            tracing::warn!(
                "Dropped {} entries without a name or coordinate from {}",
                dropped,
                self.path.display()
            );
        }

        let records = index.len();
        (index, LoadStatus::Loaded { records, dropped })
    }

    /// Rewrite the whole index file
    pub fn save(&self, index: &SearchIndex) -> Result<()> {
        let content = serde_json::to_vec(index)?;
        write_replacing(&self.path, &content)?;
        tracing::debug!("Wrote {} records to {}", index.len(), self.path.display());
        Ok(())
    }
}

/// Write `content` to a sibling temporary file, then rename it over `path`,
/// so readers never see a half-written file
pub(crate) fn write_replacing(path: &Path, content: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let mut tmp_name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    tmp_name.push(".tmp");
    let tmp_path = path.with_file_name(tmp_name);

    fs::write(&tmp_path, content)?;
    if let Err(e) = fs::rename(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(e.into());
    }
    Ok(())
}
