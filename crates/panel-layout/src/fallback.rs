//! Bounding-box grid synthesis for when the mask yields nothing.

use projection::meters_per_degree;
use solar_common::GeoPoint;

use crate::types::{PanelLocation, RoofSegmentStats};

/// Candidate locations on a regular grid over each segment's bounding box.
///
/// Each valid box is split into `rows × cols` cells of roughly
/// `spacing_meters` and one point is placed at each cell center. The scan
/// stops as soon as `max_panels` points exist (0 means no limit), even in
/// the middle of a segment.
///
/// `plane_index` is the segment's position in `stats`.
pub fn bounding_box_candidates(
    stats: &[RoofSegmentStats],
    max_panels: usize,
    spacing_meters: f64,
) -> Vec<PanelLocation> {
    let mut locations = Vec::new();
    let capped = |n: usize| max_panels > 0 && n >= max_panels;

    for (plane_index, segment) in stats.iter().enumerate() {
        let Some(bbox) = segment.bounding_box.filter(|b| b.is_valid()) else {
            continue;
        };

        let lat_delta = bbox.lat_delta();
        let lng_delta = bbox.lng_delta();
        let scale = meters_per_degree(bbox.center().latitude);
        let rows = grid_cells(lat_delta * scale.lat, spacing_meters);
        let cols = grid_cells(lng_delta * scale.lng, spacing_meters);

        for row in 0..rows {
            for col in 0..cols {
                let latitude = bbox.sw.latitude + (row as f64 + 0.5) * lat_delta / rows as f64;
                let longitude = bbox.sw.longitude + (col as f64 + 0.5) * lng_delta / cols as f64;
                let Some(position) = GeoPoint::checked(latitude, longitude) else {
                    continue;
                };

                locations.push(PanelLocation {
                    position,
                    raster_value: None,
                    plane_index: i64::try_from(plane_index).ok(),
                    azimuth_degrees: segment.azimuth_degrees,
                    pitch_degrees: segment.pitch_degrees,
                    height_meters: segment.plane_height_at_center_meters,
                });
                if capped(locations.len()) {
                    return locations;
                }
            }
        }
    }

    locations
}

/// `max(1, floor(extent / spacing))`
fn grid_cells(extent_meters: f64, spacing_meters: f64) -> usize {
    let cells = (extent_meters / spacing_meters).floor();
    if cells.is_finite() && cells > 1.0 {
        cells as usize
    } else {
        1
    }
}
