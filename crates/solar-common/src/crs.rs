//! Coordinate reference systems a mask raster may be delivered in.

use serde::{Deserialize, Serialize};
use std::fmt;

/// EPSG code for Web Mercator.
pub const WEB_MERCATOR_EPSG: u32 = 3857;

/// EPSG code for WGS84 geographic coordinates.
pub const GEOGRAPHIC_EPSG: u32 = 4326;

/// CRS of a decoded raster, derived from its GeoKeys.
///
/// Drives which projection formula turns pixel coordinates into lat/lng.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RasterCrs {
    /// Web Mercator (meters)
    WebMercator,
    /// WGS84 Geographic (lat/lon in degrees)
    Geographic,
    /// Anything else. Pixels under this CRS are never sampled.
    Unsupported,
}

impl RasterCrs {
    /// Classify a raster from its `ProjectedCSTypeGeoKey` and
    /// `GeographicTypeGeoKey` values.
    ///
    /// A raster with no projected CRS is treated as geographic when its
    /// geographic type is WGS84 or not stated at all.
    pub fn from_geo_key_codes(projected: Option<u32>, geographic: Option<u32>) -> Self {
        match (projected, geographic) {
            (Some(WEB_MERCATOR_EPSG), _) => RasterCrs::WebMercator,
            (None, None) | (None, Some(GEOGRAPHIC_EPSG)) => RasterCrs::Geographic,
            _ => RasterCrs::Unsupported,
        }
    }

    /// Check if this is a geographic (lat/lon) CRS.
    pub fn is_geographic(&self) -> bool {
        matches!(self, RasterCrs::Geographic)
    }

    pub fn is_supported(&self) -> bool {
        !matches!(self, RasterCrs::Unsupported)
    }
}

impl fmt::Display for RasterCrs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = match self {
            RasterCrs::WebMercator => "EPSG:3857",
            RasterCrs::Geographic => "EPSG:4326",
            RasterCrs::Unsupported => "unsupported",
        };
        write!(f, "{}", code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_crs() {
        assert_eq!(
            RasterCrs::from_geo_key_codes(Some(3857), None),
            RasterCrs::WebMercator
        );
        assert_eq!(
            RasterCrs::from_geo_key_codes(Some(3857), Some(4326)),
            RasterCrs::WebMercator
        );
        assert_eq!(
            RasterCrs::from_geo_key_codes(None, Some(4326)),
            RasterCrs::Geographic
        );
        assert_eq!(RasterCrs::from_geo_key_codes(None, None), RasterCrs::Geographic);
    }

    #[test]
    fn test_unsupported_crs() {
        // UTM zone 10N
        assert_eq!(
            RasterCrs::from_geo_key_codes(Some(32610), None),
            RasterCrs::Unsupported
        );
        // NAD83 geographic
        assert_eq!(
            RasterCrs::from_geo_key_codes(None, Some(4269)),
            RasterCrs::Unsupported
        );
        assert!(!RasterCrs::Unsupported.is_supported());
    }
}
