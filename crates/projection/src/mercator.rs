//! Spherical Web Mercator (EPSG:3857) conversions.
//!
//! Mask rasters arrive either in Web Mercator meters or in WGS84 degrees.
//! These helpers convert projected coordinates back to lat/lng and scale
//! degree offsets to meters at a given latitude.

use std::f64::consts::PI;

use solar_common::GeoPoint;

/// Sphere radius used by Web Mercator (WGS84 semi-major axis).
pub const EARTH_RADIUS_METERS: f64 = 6_378_137.0;

/// Ground distance covered by one degree at some latitude.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetersPerDegree {
    /// Meters per degree of latitude (constant on the sphere)
    pub lat: f64,
    /// Meters per degree of longitude (shrinks with cos(latitude))
    pub lng: f64,
}

/// Meters per degree of latitude and longitude at `latitude` (degrees).
pub fn meters_per_degree(latitude: f64) -> MetersPerDegree {
    let lat = (PI / 180.0) * EARTH_RADIUS_METERS;
    let lng = lat * (latitude * PI / 180.0).cos();
    MetersPerDegree { lat, lng }
}

/// Convert Web Mercator meters to a geographic point.
///
/// Non-finite results are passed through; callers must check the point
/// with [`GeoPoint::is_valid`] before using it.
pub fn mercator_to_lng_lat(x: f64, y: f64) -> GeoPoint {
    let longitude = (x / EARTH_RADIUS_METERS) * (180.0 / PI);
    let lat_rad = 2.0 * (y / EARTH_RADIUS_METERS).exp().atan() - PI / 2.0;
    GeoPoint::new(lat_rad * (180.0 / PI), longitude)
}

/// Convert a geographic point to Web Mercator meters `(x, y)`.
pub fn lng_lat_to_mercator(point: &GeoPoint) -> (f64, f64) {
    let x = EARTH_RADIUS_METERS * point.longitude.to_radians();
    let y = EARTH_RADIUS_METERS * (PI / 4.0 + point.latitude.to_radians() / 2.0).tan().ln();
    (x, y)
}
