//! Strided raster sampling.

use geotiff_parser::RasterImage;
use projection::{mercator_to_lng_lat, meters_per_degree};
use solar_common::{GeoPoint, RasterCrs};

use crate::segments::RoofSegmentIndex;
use crate::types::PanelLocation;

/// Real-world size of one raster pixel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelFootprint {
    pub width_meters: f64,
    pub height_meters: f64,
}

/// Pixel size in meters for a raster resolution.
///
/// Web Mercator resolutions are already meters. Geographic resolutions are
/// scaled by the meters-per-degree at `latitude`. A zero component falls
/// back to `spacing_meters`, which yields a stride of 1.
pub fn pixel_footprint(
    resolution: (f64, f64),
    crs: RasterCrs,
    latitude: f64,
    spacing_meters: f64,
) -> PixelFootprint {
    let (mut width, mut height) = (resolution.0.abs(), resolution.1.abs());
    if crs.is_geographic() {
        let scale = meters_per_degree(latitude);
        width *= scale.lng;
        height *= scale.lat;
    }

    let or_spacing = |v: f64| if v == 0.0 { spacing_meters } else { v };
    PixelFootprint {
        width_meters: or_spacing(width),
        height_meters: or_spacing(height),
    }
}

/// `max(1, round(spacing / pixel_meters))`.
///
/// A zero or non-finite pixel size uses the spacing itself as the divisor.
pub fn compute_stride(spacing_meters: f64, pixel_meters: f64) -> usize {
    let divisor = if pixel_meters == 0.0 || !pixel_meters.is_finite() {
        spacing_meters
    } else {
        pixel_meters
    };
    let stride = (spacing_meters / divisor).round();
    if stride.is_finite() && stride > 1.0 {
        stride as usize
    } else {
        1
    }
}

/// Geographic position of a projected coordinate, or `None` when the CRS is
/// unsupported or the result is out of range.
fn to_geo_point(crs: RasterCrs, x: f64, y: f64) -> Option<GeoPoint> {
    let point = match crs {
        RasterCrs::WebMercator => mercator_to_lng_lat(x, y),
        RasterCrs::Geographic => GeoPoint::new(y, x),
        RasterCrs::Unsupported => return None,
    };
    point.is_valid().then_some(point)
}

/// Scan the raster row-major at the given strides.
///
/// Pixels with a packed value that is not strictly positive are skipped,
/// as are pixels whose center does not project to a valid position.
/// Nothing is produced for an unsupported CRS.
pub fn sample_raster(
    raster: &RasterImage,
    crs: RasterCrs,
    stride_x: usize,
    stride_y: usize,
    segments: &RoofSegmentIndex,
) -> Vec<PanelLocation> {
    if !crs.is_supported() {
        return Vec::new();
    }

    let georef = raster.georef();
    let mut locations = Vec::new();

    for row in (0..raster.height()).step_by(stride_y.max(1)) {
        for col in (0..raster.width()).step_by(stride_x.max(1)) {
            let Some(value) = raster.packed_value(row, col) else {
                continue;
            };
            if !(value > 0.0) {
                continue;
            }

            let (x, y) = georef.pixel_center(col, row);
            let Some(position) = to_geo_point(crs, x, y) else {
                continue;
            };

            locations.push(PanelLocation::sampled(
                position,
                value,
                segments.lookup(value),
            ));
        }
    }

    locations
}

#[cfg(test)]
mod tests {
    use super::*;
    use geotiff_parser::{GeoKeyDirectory, Georeference, PixelBuffer};

    fn raster(width: usize, height: usize, data: Vec<u8>, georef: Georeference) -> RasterImage {
        RasterImage::new(
            width,
            height,
            1,
            PixelBuffer::U8(data),
            georef,
            GeoKeyDirectory::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_stride_half_meter() {
        assert_eq!(compute_stride(3.8, 0.5), 8);
        assert_eq!(compute_stride(3.8, 0.25), 15);
    }

    #[test]
    fn test_stride_zero_pixel() {
        assert_eq!(compute_stride(3.8, 0.0), 1);
        assert_eq!(compute_stride(3.8, f64::NAN), 1);
    }

    #[test]
    fn test_stride_coarse_pixels() {
        // Pixels wider than the spacing still visit every cell
        assert_eq!(compute_stride(3.8, 10.0), 1);
        assert_eq!(compute_stride(3.8, 3.0), 1);
    }

    #[test]
    fn test_footprint_web_mercator() {
        let fp = pixel_footprint((0.5, -0.5), RasterCrs::WebMercator, 45.0, 3.8);
        assert_eq!(fp.width_meters, 0.5);
        assert_eq!(fp.height_meters, 0.5);
    }

    #[test]
    fn test_footprint_geographic() {
        let fp = pixel_footprint((1e-5, -1e-5), RasterCrs::Geographic, 0.0, 3.8);
        let expected = 1e-5 * std::f64::consts::PI / 180.0 * 6_378_137.0;
        assert!((fp.width_meters - expected).abs() < 1e-9);
        assert!((fp.height_meters - expected).abs() < 1e-9);
    }

    #[test]
    fn test_footprint_zero_falls_back() {
        let fp = pixel_footprint((0.0, -0.5), RasterCrs::WebMercator, 0.0, 3.8);
        assert_eq!(fp.width_meters, 3.8);
        assert_eq!(compute_stride(3.8, fp.width_meters), 1);
    }

    #[test]
    fn test_sample_skips_zero_pixels() {
        let r = raster(3, 3, vec![0; 9], Georeference::new((0.0, 1.0), (0.1, -0.1)));
        let locations = sample_raster(&r, RasterCrs::Geographic, 1, 1, &RoofSegmentIndex::default());
        assert!(locations.is_empty());
    }

    #[test]
    fn test_sample_geographic_pixel_centers() {
        let r = raster(
            2,
            2,
            vec![0, 1, 0, 0],
            Georeference::new((10.0, 20.0), (0.5, -0.5)),
        );
        let locations = sample_raster(&r, RasterCrs::Geographic, 1, 1, &RoofSegmentIndex::default());
        assert_eq!(locations.len(), 1);
        assert_eq!(locations[0].position, GeoPoint::new(19.75, 10.75));
        assert_eq!(locations[0].raster_value, Some(1.0));
        assert!(locations[0].pitch_degrees.is_none());
    }

    #[test]
    fn test_sample_respects_strides() {
        let r = raster(5, 5, vec![1; 25], Georeference::new((0.0, 1.0), (0.01, -0.01)));
        let locations = sample_raster(&r, RasterCrs::Geographic, 2, 3, &RoofSegmentIndex::default());
        // rows 0, 3 × cols 0, 2, 4
        assert_eq!(locations.len(), 6);
    }

    #[test]
    fn test_sample_rejects_out_of_range() {
        let r = raster(2, 1, vec![1, 1], Georeference::new((179.5, 0.0), (1.0, -1.0)));
        let locations = sample_raster(&r, RasterCrs::Geographic, 1, 1, &RoofSegmentIndex::default());
        // second pixel center lands at longitude 181
        assert_eq!(locations.len(), 1);
        assert_eq!(locations[0].position.longitude, 180.0);
    }

    #[test]
    fn test_sample_unsupported_crs() {
        let r = raster(2, 2, vec![1; 4], Georeference::new((0.0, 0.0), (1.0, -1.0)));
        let locations = sample_raster(&r, RasterCrs::Unsupported, 1, 1, &RoofSegmentIndex::default());
        assert!(locations.is_empty());
    }
}
