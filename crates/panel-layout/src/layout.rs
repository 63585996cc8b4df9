//! Layout generation entry point.

use geotiff_parser::RasterImage;
use solar_common::GeoPoint;
use tracing::{debug, warn};

use crate::assemble::order_and_limit;
use crate::config::PanelGeometry;
use crate::fallback::bounding_box_candidates;
use crate::sampling::{compute_stride, pixel_footprint, sample_raster};
use crate::segments::RoofSegmentIndex;
use crate::types::{LayoutMetadata, LayoutOutcome, LayoutSource, RoofSegmentStats};

/// Generate panel locations for one request.
///
/// The raster scan runs first. The bounding-box grid over `stats` is used
/// only when the scan produced no location at all. `max_panels` of 0 means
/// unbounded.
pub fn generate_layout(
    raster: &RasterImage,
    segments: &RoofSegmentIndex,
    stats: &[RoofSegmentStats],
    query: GeoPoint,
    max_panels: usize,
    geometry: &PanelGeometry,
) -> LayoutOutcome {
    let spacing = geometry.spacing_meters();
    let crs = raster.crs();
    let georef = raster.georef();
    let footprint = pixel_footprint(georef.resolution, crs, query.latitude, spacing);
    let stride_x = compute_stride(spacing, footprint.width_meters);
    let stride_y = compute_stride(spacing, footprint.height_meters);

    let mut metadata = LayoutMetadata {
        width: raster.width(),
        height: raster.height(),
        origin: georef.origin,
        resolution: georef.resolution,
        geo_keys: raster.geo_keys().clone(),
        stride_x,
        stride_y,
        pixel_width_meters: footprint.width_meters,
        pixel_height_meters: footprint.height_meters,
        crs: crs.to_string(),
        samples_per_pixel: raster.samples_per_pixel(),
        source: None,
    };

    if !crs.is_supported() {
        warn!(
            projected = ?raster.geo_keys().projected_cs_type(),
            geographic = ?raster.geo_keys().geographic_type(),
            "Mask raster CRS is not supported, skipping raster sampling"
        );
    }

    let mut candidates = sample_raster(raster, crs, stride_x, stride_y, segments);
    let mut source = LayoutSource::Raster;
    debug!(
        candidates = candidates.len(),
        stride_x,
        stride_y,
        crs = %crs,
        "Sampled mask raster"
    );

    if candidates.is_empty() && !stats.is_empty() {
        candidates = bounding_box_candidates(stats, max_panels, spacing);
        source = LayoutSource::BoundingBox;
        debug!(
            candidates = candidates.len(),
            segments = stats.len(),
            "Synthesized candidates from segment bounding boxes"
        );
    }

    if candidates.is_empty() {
        return LayoutOutcome::NoViableSegments { metadata };
    }

    metadata.source = Some(source);
    LayoutOutcome::Placed {
        locations: order_and_limit(candidates, &query, max_panels),
        metadata,
    }
}
