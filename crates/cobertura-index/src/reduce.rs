//! Feature reduction: keep only whitelisted properties of each feature.

use cobertura_core::models::{Feature, FeatureCollection};
use cobertura_core::normalize::{resolve_field, FieldAlias, INSTITUTION_FIELD};
use cobertura_geo::{geometry_type, GeometryType};
use serde::Serialize;
use serde_json::{Map, Value};

/// Which geometries survive reduction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GeometryFilter {
    /// Point-oriented datasets: anything but a Point is dropped
    #[default]
    PointsOnly,
    /// Area datasets: every geometry passes through
    Any,
}

/// Why a feature was left out of the output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    NotPoint,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Reduced {
    Kept(Feature),
    Skipped(SkipReason),
}

/// Counts for one reduced collection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReduceStats {
    pub features_in: usize,
    pub features_kept: usize,
    pub skipped_not_point: usize,
}

/// Produces minimal features carrying only the needed properties
#[derive(Debug, Clone)]
pub struct FeatureReducer {
    needed_fields: Vec<String>,
    aliases: Vec<FieldAlias>,
    filter: GeometryFilter,
}

impl FeatureReducer {
    pub fn new(needed_fields: Vec<String>, aliases: Vec<FieldAlias>) -> Self {
        Self { needed_fields, aliases, filter: GeometryFilter::default() }
    }

    pub fn with_filter(mut self, filter: GeometryFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Reduce one feature.
    ///
    /// Needed fields are copied in declaration order, each resolved through
    /// the alias table; absent or null fields are omitted. When the result has
    /// no institution, `default_institution` fills it in.
    pub fn reduce(&self, feature: &Feature, default_institution: Option<&str>) -> Reduced {
        if self.filter == GeometryFilter::PointsOnly
            && geometry_type(&feature.geometry) != Some(GeometryType::Point)
        {
            return Reduced::Skipped(SkipReason::NotPoint);
        }

        let mut properties = Map::new();
        for field in &self.needed_fields {
            if let Some(value) = resolve_field(&feature.properties, field, &self.aliases) {
                properties.insert(field.clone(), value.clone());
            }
        }

        if !properties.contains_key(INSTITUTION_FIELD) {
            if let Some(institution) = default_institution {
                properties
                    .insert(INSTITUTION_FIELD.to_string(), Value::String(institution.to_string()));
            }
        }

        Reduced::Kept(Feature {
            foreign_members: feature.foreign_members.clone(),
            geometry: feature.geometry.clone(),
            properties,
        })
    }

    /// Reduce a whole collection, keeping its top-level members
    pub fn reduce_collection(
        &self,
        collection: &FeatureCollection,
        default_institution: Option<&str>,
    ) -> (FeatureCollection, ReduceStats) {
        let mut stats =
            ReduceStats { features_in: collection.features.len(), ..Default::default() };
        let mut kept = Vec::with_capacity(collection.features.len());

        for feature in &collection.features {
            match self.reduce(feature, default_institution) {
                Reduced::Kept(feature) => kept.push(feature),
                Reduced::Skipped(SkipReason::NotPoint) => stats.skipped_not_point += 1,
            }
        }

        stats.features_kept = kept.len();
        (collection.with_features(kept), stats)
    }
}
