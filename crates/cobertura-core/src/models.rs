pub mod feature;
pub mod institution;
pub mod record;

pub use feature::{Feature, FeatureCollection};
pub use institution::{Category, Institution};
pub use record::{IndexRecord, SearchIndex};
