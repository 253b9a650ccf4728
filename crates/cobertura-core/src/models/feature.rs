//! Raw GeoJSON feature collections as read from source files.
//!
//! Geometry is kept as an untyped JSON value: a malformed geometry must only
//! cost the feature it belongs to, never the whole document. Top-level and
//! per-feature members this crate does not interpret (`type`, `name`, `crs`,
//! `id`, ...) are kept verbatim so re-emitted files keep their structure.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

use crate::error::{CoberturaError, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureCollection {
    #[serde(flatten)]
    pub foreign_members: Map<String, Value>,

    pub features: Vec<Feature>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    #[serde(flatten)]
    pub foreign_members: Map<String, Value>,

    #[serde(default)]
    pub geometry: Value,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub properties: Map<String, Value>,
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<Map<String, Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Map<String, Value>>::deserialize(deserializer)?.unwrap_or_default())
}

impl Feature {
    /// Build a feature with the standard `"type": "Feature"` member
    pub fn new(geometry: Value, properties: Map<String, Value>) -> Self {
        let mut foreign_members = Map::new();
        foreign_members.insert("type".to_string(), Value::String("Feature".to_string()));
        Self { foreign_members, geometry, properties }
    }
}

impl FeatureCollection {
    pub fn new(features: Vec<Feature>) -> Self {
        let mut foreign_members = Map::new();
        foreign_members
            .insert("type".to_string(), Value::String("FeatureCollection".to_string()));
        Self { foreign_members, features }
    }

    /// Parse a document, attributing failures to `path`
    pub fn parse(content: &str, path: &Path) -> Result<Self> {
        serde_json::from_str(content).map_err(|e| CoberturaError::InvalidGeoJson {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Read and parse a GeoJSON file
    pub fn read(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content, path)
    }

    /// Same collection with a different feature list
    pub fn with_features(&self, features: Vec<Feature>) -> Self {
        Self { foreign_members: self.foreign_members.clone(), features }
    }

    /// Compact serialization, non-ASCII characters kept literal
    pub fn to_compact_string(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
