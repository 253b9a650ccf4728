//! Search-index records and the sorted index they form.

use serde::{Serialize, Serializer};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

use super::institution::{Category, Institution};

/// Keys with a meaning in the index format
const RECORD_KEYS: &[&str] = &["n", "m", "i", "c", "t", "meta"];

/// One searchable entry of the index
///
/// Field keys are single letters to keep the published file small. Records
/// loaded from an existing index keep the entry they were read from and are
/// written back exactly as read, whatever other tools put in them.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexRecord {
    /// Display name, the sort key
    pub name: String,

    /// Municipality or locality name
    pub municipality: Option<String>,

    pub institution: Option<Institution>,

    /// Representative coordinate as `[lon, lat]`
    pub coordinate: [f64; 2],

    pub category: Option<Category>,

    pub meta: Option<Map<String, Value>>,

    /// Keys outside the index format
    pub extra: Map<String, Value>,

    source: Option<Map<String, Value>>,
}

/// Serialized shape of a record built in this process
#[derive(Serialize)]
struct RecordFields<'a> {
    n: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    m: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    i: Option<&'a Institution>,
    c: [f64; 2],
    #[serde(skip_serializing_if = "Option::is_none")]
    t: Option<&'a Category>,
    #[serde(skip_serializing_if = "Option::is_none")]
    meta: Option<&'a Map<String, Value>>,
    #[serde(flatten)]
    extra: &'a Map<String, Value>,
}

impl Serialize for IndexRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match &self.source {
            Some(source) => source.serialize(serializer),
            None => RecordFields {
                n: &self.name,
                m: self.municipality.as_deref(),
                i: self.institution.as_ref(),
                c: self.coordinate,
                t: self.category.as_ref(),
                meta: self.meta.as_ref(),
                extra: &self.extra,
            }
            .serialize(serializer),
        }
    }
}

impl IndexRecord {
    pub fn new(
        name: impl Into<String>,
        municipality: impl Into<String>,
        institution: Institution,
        coordinate: [f64; 2],
        category: Category,
    ) -> Self {
        Self {
            name: name.into(),
            municipality: Some(municipality.into()),
            institution: Some(institution),
            coordinate,
            category: Some(category),
            meta: None,
            extra: Map::new(),
            source: None,
        }
    }

    /// Attach a metadata entry, creating the `meta` map on first use
    pub fn with_meta(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.meta.get_or_insert_with(Map::new).insert(key.into(), value.into());
        self
    }

    pub fn is_category(&self, category: &Category) -> bool {
        self.category.as_ref() == Some(category)
    }

    /// Read one persisted entry.
    ///
    /// Only a string `n` and a `c` of two finite numbers are required. Other
    /// keys are read when they have the expected type and ignored otherwise;
    /// the entry itself is kept and written back unchanged.
    pub fn from_value(value: Value) -> Option<Self> {
        let Value::Object(source) = value else {
            return None;
        };

        let name = source.get("n")?.as_str()?.to_string();
        let coordinate = coordinate_from(source.get("c")?)?;
        let text = |key: &str| source.get(key).and_then(Value::as_str);

        let extra = source
            .iter()
            .filter(|(key, _)| !RECORD_KEYS.contains(&key.as_str()))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();

        Some(Self {
            name,
            municipality: text("m").map(str::to_string),
            institution: text("i").map(|tag| Institution::from(tag.to_string())),
            coordinate,
            category: text("t").map(Category::from),
            meta: source.get("meta").and_then(Value::as_object).cloned(),
            extra,
            source: Some(source),
        })
    }
}

fn coordinate_from(value: &Value) -> Option<[f64; 2]> {
    match value.as_array()?.as_slice() {
        [lon, lat] => {
            let point = [lon.as_f64()?, lat.as_f64()?];
            point.iter().all(|v| v.is_finite()).then_some(point)
        }
        _ => None,
    }
}

/// Flat list of records ordered by display name
///
/// The client does prefix and binary search over this array, so it stays a
/// plain sorted vector.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SearchIndex {
    records: Vec<IndexRecord>,
}

impl SearchIndex {
    /// Wrap records as-is, without sorting
    pub fn new(records: Vec<IndexRecord>) -> Self {
        Self { records }
    }

    /// Build an index from raw JSON entries, dropping the ones that are not
    /// valid records. Returns the index and the number of dropped entries.
    pub fn from_values(values: Vec<Value>) -> (Self, usize) {
        let total = values.len();
        let records: Vec<IndexRecord> =
            values.into_iter().filter_map(IndexRecord::from_value).collect();
        let dropped = total - records.len();
        (Self { records }, dropped)
    }

    pub fn records(&self) -> &[IndexRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<IndexRecord> {
        self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Stable sort by display name.
    ///
    /// Names compare by Unicode code point, not locale collation: uppercase
    /// sorts before lowercase and accented initials sort after `z`.
    pub fn sort(&mut self) {
        self.records.sort_by(|a, b| a.name.cmp(&b.name));
    }

    /// Check that names are non-decreasing
    pub fn is_sorted(&self) -> bool {
        self.records.windows(2).all(|pair| pair[0].name <= pair[1].name)
    }

    /// Record count per category tag
    pub fn count_by_category(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for record in &self.records {
            let tag = record.category.as_ref().map(|c| c.as_str()).unwrap_or("");
            *counts.entry(tag.to_string()).or_insert(0) += 1;
        }
        counts
    }

    /// Record count per (category, institution) pair
    pub fn count_by_institution(&self) -> BTreeMap<(String, String), usize> {
        let mut counts = BTreeMap::new();
        for record in &self.records {
            let category = record.category.as_ref().map(|c| c.as_str()).unwrap_or("");
            let institution = record.institution.as_ref().map(|i| i.as_str()).unwrap_or("");
            *counts.entry((category.to_string(), institution.to_string())).or_insert(0) += 1;
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(name: &str, category: Category) -> IndexRecord {
        IndexRecord::new(name, "Durango", Institution::Ssd, [-104.6, 24.0], category)
    }

    #[test]
    fn test_compact_keys() {
        let record = record("AGEB 001", Category::Urban).with_meta("cve", "001");
        let value = serde_json::to_value(&record).unwrap();

        assert_eq!(
            value,
            json!({
                "n": "AGEB 001",
                "m": "Durango",
                "i": "SSD",
                "c": [-104.6, 24.0],
                "t": "urbano",
                "meta": {"cve": "001"}
            })
        );
    }

    #[test]
    fn test_meta_omitted_when_absent() {
        let json = serde_json::to_string(&record("Loc A", Category::Rural)).unwrap();
        assert!(!json.contains("meta"));
    }

    #[test]
    fn test_unknown_keys_survive_roundtrip() {
        let value = json!({"n": "Loc A", "m": "Mezquital", "c": [1.0, 2.0], "t": "rural", "pob": 120});
        let record = IndexRecord::from_value(value.clone()).unwrap();

        assert_eq!(record.extra.get("pob"), Some(&json!(120)));
        assert!(record.institution.is_none());
        assert_eq!(serde_json::to_value(&record).unwrap(), value);
    }

    #[test]
    fn test_loaded_entry_written_back_unchanged() {
        let value = json!({"n": "Loc C", "m": null, "i": 3, "c": [-104, 23], "t": "rural", "meta": "x"});
        let record = IndexRecord::from_value(value.clone()).unwrap();

        assert_eq!(record.municipality, None);
        assert_eq!(record.institution, None);
        assert_eq!(record.meta, None);
        assert_eq!(record.coordinate, [-104.0, 23.0]);
        assert!(record.is_category(&Category::Rural));
        assert_eq!(serde_json::to_string(&record).unwrap(), serde_json::to_string(&value).unwrap());
    }

    #[test]
    fn test_coordinate_must_be_two_numbers() {
        assert!(IndexRecord::from_value(json!({"n": "A", "c": [1.0]})).is_none());
        assert!(IndexRecord::from_value(json!({"n": "A", "c": [1.0, 2.0, 3.0]})).is_none());
        assert!(IndexRecord::from_value(json!({"n": "A", "c": ["1", 2.0]})).is_none());
        assert!(IndexRecord::from_value(json!({"n": 5, "c": [1.0, 2.0]})).is_none());
    }

    #[test]
    fn test_from_values_drops_invalid_entries() {
        let values = vec![
            json!({"n": "Loc A", "m": "", "c": [1.0, 2.0], "t": "rural"}),
            json!({"n": "Sin coordenada", "t": "rural"}),
            json!({"n": "Nula", "c": null}),
            json!("not an object"),
        ];

        let (index, dropped) = SearchIndex::from_values(values);
        assert_eq!(index.len(), 1);
        assert_eq!(dropped, 3);
    }

    #[test]
    fn test_sort_and_counts() {
        let mut index = SearchIndex::new(vec![
            record("Loc B", Category::Rural),
            record("AGEB 010", Category::Urban),
            record("Loc A", Category::Rural),
        ]);
        assert!(!index.is_sorted());

        index.sort();
        assert!(index.is_sorted());
        let names: Vec<&str> = index.records().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["AGEB 010", "Loc A", "Loc B"]);

        let counts = index.count_by_category();
        assert_eq!(counts["rural"], 2);
        assert_eq!(counts["urbano"], 1);
    }

    #[test]
    fn test_sort_ignores_locale_collation() {
        let mut index = SearchIndex::new(vec![
            record("Ébano", Category::Rural),
            record("ejido", Category::Rural),
            record("Zacatal", Category::Rural),
        ]);
        index.sort();
        let names: Vec<&str> = index.records().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Zacatal", "ejido", "Ébano"]);
    }
}
