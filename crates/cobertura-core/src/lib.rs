//! Cobertura Core - Domain models, normalization, and configuration
//!
//! This crate holds the data model shared by the index builder and the GeoJSON
//! optimizer: institutions, categories, search-index records, the raw feature
//! collection wrapper, and the property normalization rules.

pub mod config;
pub mod error;
pub mod models;
pub mod normalize;

pub use error::{CoberturaError, Result};
