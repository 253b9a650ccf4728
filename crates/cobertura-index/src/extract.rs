//! Turning source features into search-index records.
//!
//! Each category has its own identity scheme: urban records are AGEB polygons
//! keyed by `CVE_AGEB`, rural records are locality points keyed by their name.

use cobertura_core::models::{Category, Feature, IndexRecord, Institution};
use cobertura_core::normalize::{
    normalize_institution, property_text, resolve_field, title_case, FieldAlias,
};
use cobertura_geo::{centroid, representative_point};
use std::path::PathBuf;

/// Municipality shown when a feature carries none
pub const UNKNOWN_MUNICIPALITY: &str = "Desconocido";

/// A source file and the file-level context its features inherit
#[derive(Debug, Clone, PartialEq)]
pub struct SourceFile {
    pub path: PathBuf,
    /// Institution assumed for features that name none
    pub default_institution: Option<Institution>,
}

impl SourceFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), default_institution: None }
    }

    pub fn with_institution(mut self, institution: Institution) -> Self {
        self.default_institution = Some(institution);
        self
    }
}

/// Result of extracting one feature
#[derive(Debug, Clone, PartialEq)]
pub enum Extracted {
    Record(IndexRecord),
    /// The identity key is missing or blank
    MissingIdentity,
    /// No representative coordinate could be computed
    NoCoordinate,
}

/// Category-specific feature-to-record conversion
pub trait RecordExtractor {
    /// Category whose records this extractor produces
    fn category(&self) -> Category;

    /// Convert one feature. Never fails; unusable features are reported
    /// through the `Extracted` variants.
    fn extract(&self, feature: &Feature, file: &SourceFile) -> Extracted;
}

/// Normalized institution, falling back to the file default when unknown
fn institution_for(feature: &Feature, file: &SourceFile) -> Institution {
    match normalize_institution(&feature.properties) {
        Institution::Unknown => file.default_institution.clone().unwrap_or(Institution::Unknown),
        institution => institution,
    }
}

fn municipality_for(feature: &Feature) -> String {
    property_text(feature.properties.get("NOM_MUN"))
        .map(|name| title_case(&name))
        .unwrap_or_else(|| UNKNOWN_MUNICIPALITY.to_string())
}

/// AGEB polygons from `URB_*` files
#[derive(Debug, Clone, Default)]
pub struct UrbanExtractor;

impl RecordExtractor for UrbanExtractor {
    fn category(&self) -> Category {
        Category::Urban
    }

    fn extract(&self, feature: &Feature, file: &SourceFile) -> Extracted {
        let cve = property_text(feature.properties.get("CVE_AGEB"))
            .map(|cve| cve.trim().to_string())
            .unwrap_or_default();
        if cve.is_empty() {
            return Extracted::MissingIdentity;
        }

        let Some(center) = centroid(&feature.geometry) else {
            return Extracted::NoCoordinate;
        };

        let record = IndexRecord::new(
            format!("AGEB {}", cve),
            municipality_for(feature),
            institution_for(feature, file),
            center,
            Category::Urban,
        )
        .with_meta("cve", cve);

        Extracted::Record(record)
    }
}

/// Locality points from the rural datasets
#[derive(Debug, Clone)]
pub struct RuralExtractor {
    aliases: Vec<FieldAlias>,
}

impl RuralExtractor {
    pub fn new(aliases: Vec<FieldAlias>) -> Self {
        Self { aliases }
    }
}

impl RecordExtractor for RuralExtractor {
    fn category(&self) -> Category {
        Category::Rural
    }

    fn extract(&self, feature: &Feature, file: &SourceFile) -> Extracted {
        let name = property_text(resolve_field(&feature.properties, "NOM_LOC", &self.aliases))
            .map(|name| name.trim().to_string())
            .unwrap_or_default();
        if name.is_empty() {
            return Extracted::MissingIdentity;
        }

        let Some(point) = representative_point(&feature.geometry) else {
            return Extracted::NoCoordinate;
        };

        let mut record = IndexRecord::new(
            name,
            municipality_for(feature),
            institution_for(feature, file),
            point,
            Category::Rural,
        );

        if let Some(cvegeo) = property_text(feature.properties.get("CVEGEO9")) {
            record = record.with_meta("cvegeo", cvegeo);
        }

        Extracted::Record(record)
    }
}
