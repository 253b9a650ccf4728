//! Property tests for the ring-mean centroid

use cobertura_geo::centroid;
use proptest::prelude::*;
use serde_json::{json, Value};

fn ring_strategy() -> impl Strategy<Value = Vec<[f64; 2]>> {
    prop::collection::vec([-180.0..180.0_f64, -90.0..90.0_f64], 1..40)
}

fn mean(ring: &[[f64; 2]]) -> [f64; 2] {
    let n = ring.len() as f64;
    let sum = ring.iter().fold([0.0, 0.0], |acc, p| [acc[0] + p[0], acc[1] + p[1]]);
    [sum[0] / n, sum[1] / n]
}

fn polygon(rings: &[Vec<[f64; 2]>]) -> Value {
    json!({"type": "Polygon", "coordinates": rings})
}

proptest! {
    #[test]
    fn polygon_centroid_is_mean_of_first_ring(
        ring in ring_strategy(),
        hole in ring_strategy(),
    ) {
        let result = centroid(&polygon(&[ring.clone(), hole])).unwrap();
        let expected = mean(&ring);
        prop_assert!((result[0] - expected[0]).abs() < 1e-6);
        prop_assert!((result[1] - expected[1]).abs() < 1e-6);
    }

    #[test]
    fn polygon_centroid_ignores_winding(ring in ring_strategy()) {
        let mut reversed = ring.clone();
        reversed.reverse();

        let forward = centroid(&polygon(&[ring])).unwrap();
        let backward = centroid(&polygon(&[reversed])).unwrap();
        prop_assert!((forward[0] - backward[0]).abs() < 1e-6);
        prop_assert!((forward[1] - backward[1]).abs() < 1e-6);
    }

    #[test]
    fn multipolygon_only_reads_first_ring(
        first in ring_strategy(),
        second_ring in ring_strategy(),
        other_polygon in ring_strategy(),
    ) {
        let multi = json!({
            "type": "MultiPolygon",
            "coordinates": [[first.clone(), second_ring], [other_polygon]]
        });
        let result = centroid(&multi).unwrap();
        let expected = mean(&first);
        prop_assert!((result[0] - expected[0]).abs() < 1e-6);
        prop_assert!((result[1] - expected[1]).abs() < 1e-6);
    }

    #[test]
    fn non_area_types_are_not_computable(
        ring in ring_strategy(),
        kind in prop::sample::select(vec!["Point", "MultiPoint", "LineString", "MultiLineString"]),
    ) {
        let coordinates = match kind {
            "Point" => json!(ring[0]),
            "MultiLineString" => json!([ring]),
            _ => json!(ring),
        };
        let geometry = json!({"type": kind, "coordinates": coordinates});
        prop_assert_eq!(centroid(&geometry), None);
    }
}
