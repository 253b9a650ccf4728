//! Geometry type classification on top of the `geojson` crate.

use serde_json::Value;

/// Geometry type classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GeometryType {
    Point,
    LineString,
    Polygon,
    MultiPoint,
    MultiLineString,
    MultiPolygon,
    GeometryCollection,
}

impl GeometryType {
    /// Parse a GeoJSON `type` tag
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "Point" => Some(GeometryType::Point),
            "LineString" => Some(GeometryType::LineString),
            "Polygon" => Some(GeometryType::Polygon),
            "MultiPoint" => Some(GeometryType::MultiPoint),
            "MultiLineString" => Some(GeometryType::MultiLineString),
            "MultiPolygon" => Some(GeometryType::MultiPolygon),
            "GeometryCollection" => Some(GeometryType::GeometryCollection),
            _ => None,
        }
    }
}

/// Classify a raw geometry by its `type` tag alone, without reading coordinates
pub fn geometry_type(geometry: &Value) -> Option<GeometryType> {
    geometry.get("type").and_then(Value::as_str).and_then(GeometryType::from_tag)
}

/// Fully parse a raw geometry; `None` for unknown types, bad nesting, or
/// non-numeric coordinates
pub fn parse_geometry(geometry: &Value) -> Option<geojson::Geometry> {
    if !geometry.is_object() {
        return None;
    }
    geojson::Geometry::try_from(geometry.clone()).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_geometry_type_from_tag() {
        assert_eq!(
            geometry_type(&json!({"type": "Point", "coordinates": [0, 0]})),
            Some(GeometryType::Point)
        );
        assert_eq!(
            geometry_type(&json!({"type": "MultiPolygon"})),
            Some(GeometryType::MultiPolygon)
        );
        assert_eq!(geometry_type(&json!({"type": "Circle"})), None);
        assert_eq!(geometry_type(&Value::Null), None);
    }

    #[test]
    fn test_parse_geometry_rejects_malformed() {
        let segment = json!({"type": "Polygon", "coordinates": [[[0, 0], [1, 1]]]});
        assert!(parse_geometry(&segment).is_some());
        assert!(parse_geometry(&json!({"type": "Polygon", "coordinates": [[["a", 0]]]})).is_none());
        assert!(parse_geometry(&json!({"type": "Polygon", "coordinates": 5})).is_none());
        assert!(parse_geometry(&json!({"type": "Polygon"})).is_none());
        assert!(parse_geometry(&json!("Polygon")).is_none());
    }
}
