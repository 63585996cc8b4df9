//! Typed views over the raw upstream payloads.
//!
//! The raw JSON is kept for diagnostics; these views pull out only what the
//! layout needs. Every field is optional and malformed entries are skipped
//! rather than failing the whole payload.

use panel_layout::{RoofSegmentIndex, RoofSegmentStats, RoofSegmentSummary};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use solar_common::GeoPoint;
use tracing::warn;

/// Loose lat/lng pair as the provider emits it.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(default)]
pub struct LatLngView {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl LatLngView {
    pub fn to_point(self) -> Option<GeoPoint> {
        GeoPoint::checked(self.latitude?, self.longitude?)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SolarPotentialView {
    pub max_array_panels_count: Option<u64>,
    pub roof_segment_summaries: Vec<Value>,
    pub roof_segment_stats: Vec<Value>,
}

/// The parts of a building insights record the layout uses.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BuildingInsightsView {
    pub center: Option<LatLngView>,
    pub solar_potential: Option<SolarPotentialView>,
}

impl BuildingInsightsView {
    pub fn from_raw(raw: &Value) -> Self {
        parse_view(raw, "building insights")
    }

    pub fn center(&self) -> Option<GeoPoint> {
        self.center.and_then(LatLngView::to_point)
    }

    pub fn max_array_panels_count(&self) -> Option<u64> {
        self.solar_potential
            .as_ref()
            .and_then(|p| p.max_array_panels_count)
    }

    pub fn roof_segment_summaries(&self) -> Vec<RoofSegmentSummary> {
        self.solar_potential
            .as_ref()
            .map(|p| parse_entries(&p.roof_segment_summaries))
            .unwrap_or_default()
    }

    /// Per-segment stats, one entry per input element so positions stay
    /// aligned with segment indices.
    pub fn roof_segment_stats(&self) -> Vec<RoofSegmentStats> {
        self.solar_potential
            .as_ref()
            .map(|p| {
                p.roof_segment_stats
                    .iter()
                    .map(|v| RoofSegmentStats::deserialize(v).unwrap_or_default())
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UrlRef {
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NestedLayersView {
    pub mask_url: Option<String>,
}

/// The parts of a data layers response the layout uses.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DataLayersView {
    pub mask_url: Option<String>,
    #[serde(rename = "maskURL")]
    pub mask_url_upper: Option<String>,
    pub roof_mask_url: Option<String>,
    pub mask: Option<UrlRef>,
    pub data_layers: Option<NestedLayersView>,
    pub roof_segment_summaries: Vec<Value>,
    pub solar_potential: Option<SolarPotentialView>,
}

impl DataLayersView {
    pub fn from_raw(raw: &Value) -> Self {
        parse_view(raw, "data layers")
    }

    /// First non-empty mask URL, in order: `maskUrl`, `maskURL`,
    /// `roofMaskUrl`, `mask.url`, `dataLayers.maskUrl`.
    pub fn mask_url(&self) -> Option<&str> {
        [
            self.mask_url.as_deref(),
            self.mask_url_upper.as_deref(),
            self.roof_mask_url.as_deref(),
            self.mask.as_ref().and_then(|m| m.url.as_deref()),
            self.data_layers.as_ref().and_then(|d| d.mask_url.as_deref()),
        ]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|url| !url.is_empty())
    }

    pub fn roof_segment_summaries(&self) -> Vec<RoofSegmentSummary> {
        parse_entries(&self.roof_segment_summaries)
    }

    pub fn nested_roof_segment_summaries(&self) -> Vec<RoofSegmentSummary> {
        self.solar_potential
            .as_ref()
            .map(|p| parse_entries(&p.roof_segment_summaries))
            .unwrap_or_default()
    }
}

/// Segment index over every summary source, highest priority first.
pub fn segment_index(insights: &BuildingInsightsView, layers: &DataLayersView) -> RoofSegmentIndex {
    RoofSegmentIndex::from_sources([
        insights.roof_segment_summaries(),
        layers.roof_segment_summaries(),
        layers.nested_roof_segment_summaries(),
    ])
}

fn parse_view<T: DeserializeOwned + Default>(raw: &Value, what: &str) -> T {
    T::deserialize(raw).unwrap_or_else(|err| {
        warn!(error = %err, "Unexpected {} shape, ignoring typed fields", what);
        T::default()
    })
}

fn parse_entries<T: DeserializeOwned>(values: &[Value]) -> Vec<T> {
    values
        .iter()
        .filter_map(|v| T::deserialize(v).ok())
        .collect()
}
