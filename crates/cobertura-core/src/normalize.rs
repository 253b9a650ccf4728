//! Property normalization: institution tags, display text, and field aliasing.
//!
//! Source files spell the same attribute in several ways (`INSTITUCION` vs
//! `INSTITUCI`, `NOM_LOC` vs `NOMLOC`). The lookups here are driven by
//! explicit key lists so every spelling rule lives in one place.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::models::Institution;

/// Keys probed, in order, for the institution name
pub const INSTITUTION_KEYS: &[&str] = &["INSTITUCION", "INSTITUCI"];

/// Canonical key for the institution property in trimmed output
pub const INSTITUTION_FIELD: &str = "INSTITUCION";

/// A canonical property name and the alternate spellings that stand in for it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldAlias {
    pub canonical: String,
    pub alternates: Vec<String>,
}

impl FieldAlias {
    pub fn new(canonical: impl Into<String>, alternates: &[&str]) -> Self {
        Self {
            canonical: canonical.into(),
            alternates: alternates.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Alias table used when the configuration does not provide one
pub fn default_aliases() -> Vec<FieldAlias> {
    vec![FieldAlias::new("NOM_LOC", &["NOMLOC"])]
}

/// Look up `canonical`, falling back to its alternates in declaration order.
///
/// Null values count as absent.
pub fn resolve_field<'a>(
    properties: &'a Map<String, Value>,
    canonical: &str,
    aliases: &[FieldAlias],
) -> Option<&'a Value> {
    if let Some(value) = present(properties, canonical) {
        return Some(value);
    }

    aliases
        .iter()
        .filter(|alias| alias.canonical == canonical)
        .flat_map(|alias| alias.alternates.iter())
        .find_map(|key| present(properties, key))
}

fn present<'a>(properties: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    properties.get(key).filter(|value| !value.is_null())
}

/// Text form of a scalar property value
///
/// Strings are returned as-is, numbers and booleans are formatted, null and
/// missing values yield `None`. Arrays and objects are not display text.
pub fn property_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Derive the institution tag from a feature's properties.
///
/// Total: every property map yields a tag. The first non-empty value among
/// [`INSTITUTION_KEYS`] is uppercased and trimmed, then matched against the
/// ordered rules below; the first match wins.
pub fn normalize_institution(properties: &Map<String, Value>) -> Institution {
    let raw = INSTITUTION_KEYS
        .iter()
        .filter_map(|key| property_text(properties.get(*key)))
        .find(|text| !text.is_empty())
        .unwrap_or_default();

    classify_institution(&raw)
}

/// Apply the institution rules to free text
pub fn classify_institution(raw: &str) -> Institution {
    let text = raw.to_uppercase();
    let text = text.trim();

    if text.contains("IMSS") && text.contains("BIENESTAR") {
        Institution::ImssBienestar
    } else if text.contains("IMSS") && text.contains("ORDINARIO") {
        Institution::ImssOrdinario
    } else if text.contains("ISSSTE") {
        Institution::Issste
    } else if text.contains("SSD") || text.contains("JURISDICCI") {
        Institution::Ssd
    } else if text.is_empty() {
        Institution::Unknown
    } else {
        Institution::Other(text.to_string())
    }
}

/// Title-case a display name: each alphabetic run starts uppercase and
/// continues lowercase ("SANTIAGO PAPASQUIARO" -> "Santiago Papasquiaro").
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_word = false;

    for ch in text.chars() {
        if ch.is_alphabetic() {
            if in_word {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(ch);
            in_word = false;
        }
    }

    out
}
