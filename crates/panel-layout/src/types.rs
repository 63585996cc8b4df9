//! Layout inputs and outputs.

use geotiff_parser::GeoKeyDirectory;
use serde::{Deserialize, Serialize};
use solar_common::{GeoPoint, LatLngBox};

use crate::segments::RoofSegmentSummary;

/// A single candidate panel placement.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PanelLocation {
    pub position: GeoPoint,
    pub raster_value: Option<f64>,
    pub plane_index: Option<i64>,
    pub azimuth_degrees: Option<f64>,
    pub pitch_degrees: Option<f64>,
    pub height_meters: Option<f64>,
}

impl PanelLocation {
    /// A location sampled from the mask, annotated with its segment.
    pub fn sampled(
        position: GeoPoint,
        raster_value: f64,
        segment: Option<&RoofSegmentSummary>,
    ) -> Self {
        Self {
            position,
            raster_value: Some(raster_value),
            plane_index: segment.and_then(|s| s.plane_index),
            azimuth_degrees: segment.and_then(|s| s.azimuth_degrees),
            pitch_degrees: segment.and_then(|s| s.pitch_degrees),
            height_meters: segment.and_then(|s| s.plane_height_meters),
        }
    }
}

/// Per-segment statistics with a bounding box, used when the mask yields
/// nothing.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RoofSegmentStats {
    pub pitch_degrees: Option<f64>,
    pub azimuth_degrees: Option<f64>,
    pub plane_height_at_center_meters: Option<f64>,
    pub bounding_box: Option<LatLngBox>,
}

/// Which path produced the panel locations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum LayoutSource {
    Raster,
    BoundingBox,
}

/// Diagnostics describing how the raster was sampled.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutMetadata {
    pub width: usize,
    pub height: usize,
    pub origin: (f64, f64),
    pub resolution: (f64, f64),
    pub geo_keys: GeoKeyDirectory,
    pub stride_x: usize,
    pub stride_y: usize,
    pub pixel_width_meters: f64,
    pub pixel_height_meters: f64,
    pub crs: String,
    pub samples_per_pixel: usize,
    pub source: Option<LayoutSource>,
}

/// Result of layout generation.
#[derive(Debug, Clone)]
pub enum LayoutOutcome {
    /// At least one location survived, nearest first.
    Placed {
        locations: Vec<PanelLocation>,
        metadata: LayoutMetadata,
    },
    /// Neither the raster scan nor the bounding-box grid produced a point.
    NoViableSegments { metadata: LayoutMetadata },
}

impl LayoutOutcome {
    pub fn metadata(&self) -> &LayoutMetadata {
        match self {
            LayoutOutcome::Placed { metadata, .. } => metadata,
            LayoutOutcome::NoViableSegments { metadata } => metadata,
        }
    }

    pub fn locations(&self) -> &[PanelLocation] {
        match self {
            LayoutOutcome::Placed { locations, .. } => locations,
            LayoutOutcome::NoViableSegments { .. } => &[],
        }
    }
}
