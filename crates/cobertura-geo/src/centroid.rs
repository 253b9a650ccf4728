use geojson::Position;
use serde_json::Value;

use crate::models::parse_geometry;

/// Approximate representative point of an area geometry.
///
/// Polygon uses its first ring, MultiPolygon the first ring of its first
/// polygon. The result is the arithmetic mean of every position in that ring,
/// closing point included, so it is a map-navigation target rather than a true
/// area centroid. Any other geometry type, an empty ring, or unreadable
/// coordinates give `None`.
pub fn centroid(geometry: &Value) -> Option<[f64; 2]> {
    let geometry = parse_geometry(geometry)?;

    let ring = match &geometry.value {
        geojson::Value::Polygon(rings) => rings.first()?,
        geojson::Value::MultiPolygon(polygons) => polygons.first()?.first()?,
        _ => return None,
    };

    ring_mean(ring)
}

/// Mean of the positions of a ring, in ring order
fn ring_mean(ring: &[Position]) -> Option<[f64; 2]> {
    if ring.is_empty() {
        return None;
    }

    let mut sum = [0.0_f64; 2];
    for position in ring {
        if position.len() < 2 {
            return None;
        }
        sum[0] += position[0];
        sum[1] += position[1];
    }

    let count = ring.len() as f64;
    let mean = [sum[0] / count, sum[1] / count];
    mean.iter().all(|v| v.is_finite()).then_some(mean)
}

/// Coordinate used to place a feature on the map: the position itself for a
/// Point, the ring mean for area geometries
pub fn representative_point(geometry: &Value) -> Option<[f64; 2]> {
    let parsed = parse_geometry(geometry)?;

    match &parsed.value {
        geojson::Value::Point(position) => {
            let point = [*position.first()?, *position.get(1)?];
            point.iter().all(|v| v.is_finite()).then_some(point)
        }
        _ => centroid(geometry),
    }
}
