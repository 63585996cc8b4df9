//! Final ordering and truncation.

use solar_common::GeoPoint;

use crate::types::PanelLocation;

/// Sort nearest-first from `query` and keep at most `max_panels` (0 keeps all).
///
/// Distance is squared Euclidean in degree space. The sort is stable so
/// equidistant points keep their scan order.
pub fn order_and_limit(
    mut candidates: Vec<PanelLocation>,
    query: &GeoPoint,
    max_panels: usize,
) -> Vec<PanelLocation> {
    candidates.sort_by(|a, b| {
        query
            .squared_distance(&a.position)
            .total_cmp(&query.squared_distance(&b.position))
    });
    if max_panels > 0 {
        candidates.truncate(max_panels);
    }
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(latitude: f64, longitude: f64, tag: f64) -> PanelLocation {
        PanelLocation {
            position: GeoPoint::new(latitude, longitude),
            raster_value: Some(tag),
            plane_index: None,
            azimuth_degrees: None,
            pitch_degrees: None,
            height_meters: None,
        }
    }

    fn tags(locations: &[PanelLocation]) -> Vec<f64> {
        locations.iter().filter_map(|l| l.raster_value).collect()
    }

    #[test]
    fn test_nearest_first() {
        let query = GeoPoint::new(0.0, 0.0);
        // squared distances 9, 1, 4
        let ordered = order_and_limit(vec![at(3.0, 0.0, 9.0), at(0.0, 1.0, 1.0), at(0.0, -2.0, 4.0)], &query, 0);
        assert_eq!(tags(&ordered), vec![1.0, 4.0, 9.0]);
    }

    #[test]
    fn test_ties_keep_scan_order() {
        let query = GeoPoint::new(0.0, 0.0);
        let ordered = order_and_limit(
            vec![at(0.0, 1.0, 1.0), at(1.0, 0.0, 2.0), at(0.0, -1.0, 3.0), at(-1.0, 0.0, 4.0)],
            &query,
            0,
        );
        assert_eq!(tags(&ordered), vec![1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_truncate_to_max() {
        let query = GeoPoint::new(0.0, 0.0);
        let candidates = (0..10).rev().map(|i| at(i as f64, 0.0, i as f64)).collect();
        let ordered = order_and_limit(candidates, &query, 3);
        assert_eq!(tags(&ordered), vec![0.0, 1.0, 2.0]);
    }

    #[test]
    fn test_zero_max_keeps_all() {
        let query = GeoPoint::new(0.0, 0.0);
        let candidates = (0..10).map(|i| at(i as f64, 0.0, i as f64)).collect();
        assert_eq!(order_and_limit(candidates, &query, 0).len(), 10);
    }
}
