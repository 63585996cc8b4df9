//! Decoding tests against GeoTIFFs encoded in memory.

use std::io::Cursor;

use geotiff_parser::{decode_geotiff, FileDirectorySummary, GeoTiffError, GeoKeyValue, PixelBuffer};
use solar_common::RasterCrs;
use test_utils::{assert_approx_eq, create_mask, create_rect_mask, utm_geo_keys, MaskTiff};
use tiff::encoder::{colortype, TiffEncoder};

// ============================================================================
// Single-band masks
// ============================================================================

#[test]
fn test_decode_web_mercator_gray() {
    let data = create_mask(4, 3, |row, col| (row * 4 + col) as u8);
    let bytes = MaskTiff::web_mercator(4, 3, data, (-13_600_000.0, 4_500_000.0), 0.5).encode();

    let raster = decode_geotiff(&bytes).unwrap();
    assert_eq!(raster.width(), 4);
    assert_eq!(raster.height(), 3);
    assert_eq!(raster.samples_per_pixel(), 1);
    assert_eq!(raster.crs(), RasterCrs::WebMercator);
    assert_eq!(raster.geo_keys().projected_cs_type(), Some(3857));
    assert_eq!(raster.pixels().sample_type(), "u8");

    let georef = raster.georef();
    assert_approx_eq!(georef.origin.0, -13_600_000.0, 1e-6);
    assert_approx_eq!(georef.origin.1, 4_500_000.0, 1e-6);
    assert_approx_eq!(georef.resolution.0, 0.5, 1e-12);
    assert_approx_eq!(georef.resolution.1, -0.5, 1e-12);

    assert_eq!(raster.packed_value(0, 0), Some(0.0));
    assert_eq!(raster.packed_value(1, 2), Some(6.0));
    assert_eq!(raster.packed_value(2, 3), Some(11.0));
    assert_eq!(raster.packed_value(3, 0), None);
}

#[test]
fn test_decode_geographic_mask() {
    let data = create_rect_mask(5, 5, 1..4, 1..4, 2);
    let bytes = MaskTiff::geographic(5, 5, data, (-122.2, 37.5), 0.0001).encode();

    let raster = decode_geotiff(&bytes).unwrap();
    assert_eq!(raster.crs(), RasterCrs::Geographic);
    assert_eq!(raster.geo_keys().geographic_type(), Some(4326));
    assert_eq!(raster.packed_value(2, 2), Some(2.0));
    assert_eq!(raster.packed_value(0, 0), Some(0.0));
}

#[test]
fn test_decode_unsupported_projection() {
    let bytes = MaskTiff::web_mercator(2, 2, vec![1; 4], (500_000.0, 4_000_000.0), 1.0)
        .with_geo_keys(utm_geo_keys())
        .encode();

    let raster = decode_geotiff(&bytes).unwrap();
    assert_eq!(raster.crs(), RasterCrs::Unsupported);
    assert_eq!(
        raster.geo_keys().get(3072),
        Some(&GeoKeyValue::Short(32610))
    );
}

// ============================================================================
// Multi-band masks
// ============================================================================

#[test]
fn test_decode_rgba_packed_values() {
    let data = vec![
        1, 0, 0, 0, // 1
        0, 1, 0, 0, // 256
        0, 0, 1, 0, // 65536
        3, 2, 0, 0, // 515
    ];
    let bytes = MaskTiff::web_mercator(2, 2, vec![], (0.0, 0.0), 1.0)
        .with_bands(4, data)
        .encode();

    let raster = decode_geotiff(&bytes).unwrap();
    assert_eq!(raster.samples_per_pixel(), 4);
    assert!(matches!(raster.pixels(), PixelBuffer::U8(_)));
    assert_eq!(raster.packed_value(0, 0), Some(1.0));
    assert_eq!(raster.packed_value(0, 1), Some(256.0));
    assert_eq!(raster.packed_value(1, 0), Some(65536.0));
    assert_eq!(raster.packed_value(1, 1), Some(515.0));
    assert_eq!(raster.sample(1, 1, 1), Some(2.0));
}

// ============================================================================
// Error cases
// ============================================================================

#[test]
fn test_decode_without_georeference() {
    let mut buffer = Cursor::new(Vec::new());
    {
        let mut encoder = TiffEncoder::new(&mut buffer).unwrap();
        encoder
            .write_image::<colortype::Gray8>(2, 2, &[0, 1, 2, 3])
            .unwrap();
    }

    let result = decode_geotiff(&buffer.into_inner());
    assert!(matches!(result, Err(GeoTiffError::MissingGeoreference)));
}

#[test]
fn test_decode_truncated_file() {
    let bytes = MaskTiff::web_mercator(8, 8, vec![1; 64], (0.0, 0.0), 1.0).encode();
    let truncated = &bytes[..bytes.len() / 4];
    assert!(decode_geotiff(truncated).is_err());
}

// ============================================================================
// File directory summary
// ============================================================================

#[test]
fn test_file_directory_summary_gray() {
    let bytes = MaskTiff::web_mercator(6, 4, vec![0; 24], (0.0, 0.0), 1.0).encode();
    let summary = FileDirectorySummary::read(&bytes).unwrap();
    assert_eq!(summary.image_width, 6);
    assert_eq!(summary.image_length, 4);
    assert_eq!(summary.bits_per_sample, Some(vec![8]));
    assert_eq!(summary.photometric_interpretation, Some(1));

    let json = serde_json::to_value(&summary).unwrap();
    assert_eq!(json["ImageWidth"], 6);
    assert_eq!(json["ImageLength"], 4);
}

#[test]
fn test_file_directory_summary_rgba() {
    let bytes = MaskTiff::web_mercator(1, 1, vec![], (0.0, 0.0), 1.0)
        .with_bands(4, vec![9, 9, 9, 9])
        .encode();
    let summary = FileDirectorySummary::read(&bytes).unwrap();
    assert_eq!(summary.samples_per_pixel, Some(4));
    assert_eq!(summary.bits_per_sample, Some(vec![8, 8, 8, 8]));
    assert_eq!(summary.photometric_interpretation, Some(2));
}
