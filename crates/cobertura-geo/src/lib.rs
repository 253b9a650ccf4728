//! Cobertura Geo - Geometry classification and representative points
//!
//! Geometry arrives as untyped JSON. Everything here answers with `Option`:
//! a geometry that cannot be read is "not computable", never an error.

pub mod centroid;
pub mod models;

pub use centroid::{centroid, representative_point};
pub use models::{geometry_type, parse_geometry, GeometryType};
