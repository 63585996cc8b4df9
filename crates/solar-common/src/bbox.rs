//! Latitude/longitude bounding box types.

use serde::{Deserialize, Serialize};

use crate::GeoPoint;

/// A geographic bounding box given by its south-west and north-east corners.
///
/// This is the shape the building-insights provider uses for roof segment
/// and building extents.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLngBox {
    pub sw: GeoPoint,
    pub ne: GeoPoint,
}

impl LatLngBox {
    /// Create a new bounding box from corner coordinates.
    pub fn new(sw: GeoPoint, ne: GeoPoint) -> Self {
        Self { sw, ne }
    }

    /// A box is usable only if it has positive extent on both axes.
    pub fn is_valid(&self) -> bool {
        self.lat_delta().is_finite()
            && self.lng_delta().is_finite()
            && self.ne.latitude > self.sw.latitude
            && self.ne.longitude > self.sw.longitude
    }

    /// Height of the box in degrees of latitude.
    pub fn lat_delta(&self) -> f64 {
        self.ne.latitude - self.sw.latitude
    }

    /// Width of the box in degrees of longitude.
    pub fn lng_delta(&self) -> f64 {
        self.ne.longitude - self.sw.longitude
    }

    pub fn center(&self) -> GeoPoint {
        GeoPoint::new(
            (self.sw.latitude + self.ne.latitude) / 2.0,
            (self.sw.longitude + self.ne.longitude) / 2.0,
        )
    }

    /// Check if a point is contained within this box (edges inclusive).
    pub fn contains(&self, point: &GeoPoint) -> bool {
        point.latitude >= self.sw.latitude
            && point.latitude <= self.ne.latitude
            && point.longitude >= self.sw.longitude
            && point.longitude <= self.ne.longitude
    }
}
