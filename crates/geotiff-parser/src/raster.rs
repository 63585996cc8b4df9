//! Decoded raster image.

use solar_common::RasterCrs;

use crate::error::{GeoTiffError, GeoTiffResult};
use crate::geokeys::GeoKeyDirectory;
use crate::georef::Georeference;
use crate::pixels::PixelBuffer;

/// Maximum number of byte planes folded into a packed value.
const MAX_PACKED_BANDS: usize = 4;

/// A decoded, georeferenced raster. Immutable once built.
#[derive(Debug, Clone)]
pub struct RasterImage {
    width: usize,
    height: usize,
    samples_per_pixel: usize,
    pixels: PixelBuffer,
    georef: Georeference,
    geo_keys: GeoKeyDirectory,
}

impl RasterImage {
    /// Build a raster, checking the buffer against the declared layout.
    pub fn new(
        width: usize,
        height: usize,
        samples_per_pixel: usize,
        pixels: PixelBuffer,
        georef: Georeference,
        geo_keys: GeoKeyDirectory,
    ) -> GeoTiffResult<Self> {
        if samples_per_pixel == 0 {
            return Err(GeoTiffError::unsupported("zero samples per pixel"));
        }

        let expected = width
            .checked_mul(height)
            .and_then(|n| n.checked_mul(samples_per_pixel))
            .ok_or_else(|| GeoTiffError::unsupported("raster dimensions overflow"))?;
        if pixels.len() != expected {
            return Err(GeoTiffError::BufferSizeMismatch {
                expected,
                actual: pixels.len(),
            });
        }

        Ok(Self {
            width,
            height,
            samples_per_pixel,
            pixels,
            georef,
            geo_keys,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn samples_per_pixel(&self) -> usize {
        self.samples_per_pixel
    }

    pub fn pixels(&self) -> &PixelBuffer {
        &self.pixels
    }

    pub fn georef(&self) -> &Georeference {
        &self.georef
    }

    pub fn geo_keys(&self) -> &GeoKeyDirectory {
        &self.geo_keys
    }

    /// CRS classification derived from the GeoKeys.
    pub fn crs(&self) -> RasterCrs {
        RasterCrs::from_geo_key_codes(
            self.geo_keys.projected_cs_type(),
            self.geo_keys.geographic_type(),
        )
    }

    /// Raw sample for one band of one pixel; `None` when any index is out of range.
    pub fn sample(&self, row: usize, col: usize, band: usize) -> Option<f64> {
        if row >= self.height || col >= self.width || band >= self.samples_per_pixel {
            return None;
        }
        let index = (row * self.width + col) * self.samples_per_pixel + band;
        self.pixels.get(index)
    }

    /// Single value for a pixel.
    ///
    /// Single-band rasters return the sample itself. Multi-band rasters fold
    /// up to four bands as little-endian byte planes:
    /// `b0 + b1·256 + b2·65536 + b3·16777216`, missing bands contributing 0.
    pub fn packed_value(&self, row: usize, col: usize) -> Option<f64> {
        if self.samples_per_pixel <= 1 {
            return self.sample(row, col, 0);
        }
        if row >= self.height || col >= self.width {
            return None;
        }

        let bands = self.samples_per_pixel.min(MAX_PACKED_BANDS);
        let base = (row * self.width + col) * self.samples_per_pixel;

        if let Some(bytes) = self.pixels.as_bytes() {
            let mut planes = [0u8; MAX_PACKED_BANDS];
            planes[..bands].copy_from_slice(bytes.get(base..base + bands)?);
            return Some(f64::from(u32::from_le_bytes(planes)));
        }

        let mut value = 0.0;
        let mut weight = 1.0;
        for band in 0..bands {
            value += self.pixels.get(base + band)? * weight;
            weight *= 256.0;
        }
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raster(width: usize, height: usize, spp: usize, pixels: PixelBuffer) -> RasterImage {
        RasterImage::new(
            width,
            height,
            spp,
            pixels,
            Georeference::new((0.0, 0.0), (1.0, -1.0)),
            GeoKeyDirectory::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_packed_value_byte_planes() {
        let r = raster(
            3,
            1,
            4,
            PixelBuffer::U8(vec![
                1, 0, 0, 0, //
                0, 1, 0, 0, //
                0, 0, 1, 0,
            ]),
        );
        assert_eq!(r.packed_value(0, 0), Some(1.0));
        assert_eq!(r.packed_value(0, 1), Some(256.0));
        assert_eq!(r.packed_value(0, 2), Some(65536.0));
    }

    #[test]
    fn test_packed_value_fourth_plane() {
        let r = raster(1, 1, 4, PixelBuffer::U8(vec![0, 0, 0, 1]));
        assert_eq!(r.packed_value(0, 0), Some(16_777_216.0));
    }

    #[test]
    fn test_packed_value_three_bands() {
        let r = raster(1, 1, 3, PixelBuffer::U8(vec![2, 1, 0]));
        assert_eq!(r.packed_value(0, 0), Some(258.0));
    }

    #[test]
    fn test_packed_value_ignores_extra_bands() {
        let r = raster(1, 1, 5, PixelBuffer::U8(vec![1, 0, 0, 0, 9]));
        assert_eq!(r.packed_value(0, 0), Some(1.0));
    }

    #[test]
    fn test_packed_value_wide_samples() {
        let r = raster(1, 1, 2, PixelBuffer::U16(vec![3, 2]));
        assert_eq!(r.packed_value(0, 0), Some(3.0 + 2.0 * 256.0));
    }

    #[test]
    fn test_single_band_value() {
        let r = raster(2, 2, 1, PixelBuffer::F32(vec![0.0, 1.5, -2.0, 4.0]));
        assert_eq!(r.packed_value(0, 1), Some(1.5));
        assert_eq!(r.packed_value(1, 0), Some(-2.0));
    }

    #[test]
    fn test_bounds_checks() {
        let r = raster(2, 2, 2, PixelBuffer::U8(vec![0; 8]));
        assert_eq!(r.packed_value(2, 0), None);
        assert_eq!(r.packed_value(0, 2), None);
        assert_eq!(r.sample(0, 0, 2), None);
        assert_eq!(r.sample(1, 1, 1), Some(0.0));
    }

    #[test]
    fn test_buffer_size_checked() {
        let result = RasterImage::new(
            2,
            2,
            1,
            PixelBuffer::U8(vec![0; 3]),
            Georeference::new((0.0, 0.0), (1.0, -1.0)),
            GeoKeyDirectory::default(),
        );
        assert!(matches!(
            result,
            Err(GeoTiffError::BufferSizeMismatch {
                expected: 4,
                actual: 3
            })
        ));
    }

    #[test]
    fn test_crs_from_keys() {
        let r = raster(1, 1, 1, PixelBuffer::U8(vec![1]));
        assert_eq!(r.crs(), RasterCrs::Geographic);
    }
}
