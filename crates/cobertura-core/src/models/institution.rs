//! Institution and category tags used as search-index facets.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Normalized health-coverage provider tag
///
/// Serialized as its tag string (`IMSS_BIENESTAR`, `ISSSTE`, ...). Tags that do
/// not match a known provider are carried through unchanged in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Institution {
    ImssBienestar,
    ImssOrdinario,
    Issste,
    Ssd,
    /// No institution could be read from the feature
    Unknown,
    /// Unrecognized institution, kept as the trimmed uppercase source text
    Other(String),
}

impl Institution {
    pub const UNKNOWN_TAG: &'static str = "DESCONOCIDO";

    pub fn as_str(&self) -> &str {
        match self {
            Institution::ImssBienestar => "IMSS_BIENESTAR",
            Institution::ImssOrdinario => "IMSS_ORDINARIO",
            Institution::Issste => "ISSSTE",
            Institution::Ssd => "SSD",
            Institution::Unknown => Self::UNKNOWN_TAG,
            Institution::Other(tag) => tag,
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Institution::Unknown)
    }
}

impl From<String> for Institution {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "IMSS_BIENESTAR" => Institution::ImssBienestar,
            "IMSS_ORDINARIO" => Institution::ImssOrdinario,
            "ISSSTE" => Institution::Issste,
            "SSD" => Institution::Ssd,
            Self::UNKNOWN_TAG => Institution::Unknown,
            _ => Institution::Other(tag),
        }
    }
}

impl From<Institution> for String {
    fn from(institution: Institution) -> Self {
        match institution {
            Institution::Other(tag) => tag,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Institution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Record category tag
///
/// `urbano` records come from AGEB polygons, `rural` records from locality
/// points. Any other tag found in a persisted index is preserved as-is.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    Urban,
    Rural,
    Other(String),
}

impl Category {
    pub fn as_str(&self) -> &str {
        match self {
            Category::Urban => "urbano",
            Category::Rural => "rural",
            Category::Other(tag) => tag,
        }
    }
}

impl From<&str> for Category {
    fn from(tag: &str) -> Self {
        match tag {
            "urbano" => Category::Urban,
            "rural" => Category::Rural,
            other => Category::Other(other.to_string()),
        }
    }
}

impl From<String> for Category {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "urbano" => Category::Urban,
            "rural" => Category::Rural,
            _ => Category::Other(tag),
        }
    }
}

impl From<Category> for String {
    fn from(category: Category) -> Self {
        match category {
            Category::Other(tag) => tag,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
