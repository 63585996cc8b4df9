//! Common test fixtures for solar layout tests.
//!
//! This module provides upstream payloads shaped like the Solar API
//! responses the layout pipeline consumes.

use serde_json::{json, Value};

/// Common locations for testing.
pub mod points {
    /// Mountain View, CA (a typical residential lookup)
    pub const MOUNTAIN_VIEW: (f64, f64) = (37.4449, -122.1390);

    /// Null island
    pub const ORIGIN: (f64, f64) = (0.0, 0.0);

    /// Latitude out of range
    pub const INVALID_LAT: (f64, f64) = (91.0, 10.0);
}

/// A roof segment summary entry as the layout reads it.
pub fn segment_summary(plane_index: i64, pitch: f64, azimuth: f64, area: f64) -> Value {
    json!({
        "segmentIndex": plane_index,
        "pitchDegrees": pitch,
        "azimuthDegrees": azimuth,
        "planeHeightAtCenterMeters": 7.5,
        "stats": { "areaMeters2": area },
        "buildableAreaMeters2": area * 0.8,
    })
}

/// Per-segment stats entry with a bounding box around `center`.
pub fn segment_stats(
    center: (f64, f64),
    half_span_degrees: f64,
    pitch: f64,
    azimuth: f64,
    area: f64,
) -> Value {
    let (lat, lng) = center;
    json!({
        "pitchDegrees": pitch,
        "azimuthDegrees": azimuth,
        "planeHeightAtCenterMeters": 6.0,
        "stats": { "areaMeters2": area },
        "center": { "latitude": lat, "longitude": lng },
        "boundingBox": {
            "sw": { "latitude": lat - half_span_degrees, "longitude": lng - half_span_degrees },
            "ne": { "latitude": lat + half_span_degrees, "longitude": lng + half_span_degrees },
        },
    })
}

/// Building insights with the given segment summaries and stats.
pub fn building_insights(center: (f64, f64), summaries: Vec<Value>, stats: Vec<Value>) -> Value {
    json!({
        "name": "buildings/ChIJTestBuilding",
        "center": { "latitude": center.0, "longitude": center.1 },
        "imageryQuality": "HIGH",
        "solarPotential": {
            "maxArrayPanelsCount": 42,
            "panelCapacityWatts": 400,
            "roofSegmentSummaries": summaries,
            "roofSegmentStats": stats,
        },
    })
}

/// Data layers response pointing at `mask_url`.
pub fn data_layers(mask_url: &str) -> Value {
    json!({
        "imageryQuality": "HIGH",
        "dsmUrl": "https://solar.example.test/dsm",
        "rgbUrl": "https://solar.example.test/rgb",
        "maskUrl": mask_url,
    })
}

/// Data layers response without any mask reference.
pub fn data_layers_without_mask() -> Value {
    json!({
        "imageryQuality": "HIGH",
        "dsmUrl": "https://solar.example.test/dsm",
    })
}
