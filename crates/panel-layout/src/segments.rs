//! Roof segment metadata and lookup.

use std::collections::HashMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Area statistics nested under a segment summary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentAreaStats {
    pub area_meters2: Option<f64>,
}

/// One roof plane as reported by the building insights provider.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RoofSegmentSummary {
    #[serde(alias = "segmentIndex")]
    pub plane_index: Option<i64>,
    #[serde(deserialize_with = "string_or_number")]
    pub plane_key: Option<String>,
    pub azimuth_degrees: Option<f64>,
    pub pitch_degrees: Option<f64>,
    pub buildable_area_meters2: Option<f64>,
    pub plane_area_meters2: Option<f64>,
    #[serde(alias = "planeHeightAtCenterMeters")]
    pub plane_height_meters: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<SegmentAreaStats>,
}

impl RoofSegmentSummary {
    /// Plane area, from the flat field or the nested stats block.
    pub fn plane_area(&self) -> Option<f64> {
        self.plane_area_meters2
            .or_else(|| self.stats.as_ref().and_then(|s| s.area_meters2))
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// Lookup structures over a building's roof segments.
///
/// Segments are matched by integer index first, then by string key. When
/// neither matches, the fallback segment is used: the one with the largest
/// buildable area, else the largest plane area, else the first one seen.
#[derive(Debug, Clone, Default)]
pub struct RoofSegmentIndex {
    by_index: HashMap<i64, RoofSegmentSummary>,
    by_key: HashMap<String, RoofSegmentSummary>,
    fallback: Option<RoofSegmentSummary>,
    len: usize,
}

impl RoofSegmentIndex {
    /// Build from several summary sources, highest priority first.
    ///
    /// An identifier seen in an earlier source is never overwritten by a
    /// later one.
    pub fn from_sources<I, S>(sources: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: IntoIterator<Item = RoofSegmentSummary>,
    {
        let mut index = Self::default();
        let mut best_buildable: Option<(f64, RoofSegmentSummary)> = None;
        let mut best_plane: Option<(f64, RoofSegmentSummary)> = None;
        let mut first: Option<RoofSegmentSummary> = None;

        for segment in sources.into_iter().flatten() {
            index.len += 1;

            // A duplicate identifier is shadowed by the earlier entry, so it
            // can't be the fallback either.
            let shadowed = segment
                .plane_index
                .map_or(false, |i| index.by_index.contains_key(&i))
                || segment
                    .plane_key
                    .as_ref()
                    .map_or(false, |k| index.by_key.contains_key(k));
            if shadowed {
                continue;
            }

            if let Some(area) = segment.buildable_area_meters2.filter(|a| a.is_finite()) {
                if best_buildable.as_ref().map_or(true, |(best, _)| area > *best) {
                    best_buildable = Some((area, segment.clone()));
                }
            }
            if let Some(area) = segment.plane_area().filter(|a| a.is_finite()) {
                if best_plane.as_ref().map_or(true, |(best, _)| area > *best) {
                    best_plane = Some((area, segment.clone()));
                }
            }
            if first.is_none() {
                first = Some(segment.clone());
            }

            if let Some(key) = segment.plane_key.clone() {
                index.by_key.insert(key, segment.clone());
            }
            if let Some(plane_index) = segment.plane_index {
                index.by_index.insert(plane_index, segment);
            }
        }

        index.fallback = best_buildable
            .or(best_plane)
            .map(|(_, segment)| segment)
            .or(first);
        index
    }

    pub fn from_summaries(summaries: impl IntoIterator<Item = RoofSegmentSummary>) -> Self {
        Self::from_sources([summaries])
    }

    /// Resolve the segment for a raw mask value.
    pub fn lookup(&self, value: f64) -> Option<&RoofSegmentSummary> {
        let rounded = value.round();
        if rounded.is_finite() {
            if let Some(segment) = self.by_index.get(&(rounded as i64)) {
                return Some(segment);
            }
        }
        self.by_key
            .get(&value.to_string())
            .or(self.fallback.as_ref())
    }

    pub fn fallback(&self) -> Option<&RoofSegmentSummary> {
        self.fallback.as_ref()
    }

    /// Number of summaries seen across all sources.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}
