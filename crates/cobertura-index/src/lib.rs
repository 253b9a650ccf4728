//! Cobertura Index - Feature reduction, index merging, and the batch pipeline
//!
//! This crate turns source GeoJSON into the two published artifacts: the
//! sorted search index and the trimmed per-dataset GeoJSON files.

pub mod extract;
pub mod merge;
pub mod optimize;
pub mod pipeline;
pub mod reduce;
pub mod store;

pub use extract::{Extracted, RecordExtractor, RuralExtractor, SourceFile, UrbanExtractor};
pub use merge::{merge, MergeCounts, MergeOutcome};
pub use optimize::{DatasetOutcome, GeoJsonOptimizer, OptimizeReport};
pub use pipeline::{discover, BuildReport, FileFailure, IndexBuilder};
pub use reduce::{FeatureReducer, GeometryFilter, ReduceStats, Reduced, SkipReason};
pub use store::{IndexStore, LoadStatus};
