//! Test data generators for synthetic roof mask rasters.
//!
//! These generators create predictable, verifiable mask patterns and
//! encode them as real GeoTIFF bytes so decoding is exercised end to end.

use std::io::Cursor;

use projection::lng_lat_to_mercator;
use solar_common::GeoPoint;
use tiff::encoder::{colortype, TiffEncoder};
use tiff::tags::Tag;

/// Creates a single-band mask where each cell is produced by `f(row, col)`.
///
/// # Returns
///
/// A `Vec<u8>` in row-major order (row 0 first, then row 1, etc.)
///
/// # Example
///
/// ```
/// use test_utils::create_mask;
///
/// let mask = create_mask(4, 2, |row, col| (row * 4 + col) as u8);
/// assert_eq!(mask.len(), 8);
/// assert_eq!(mask[5], 5); // row=1, col=1
/// ```
pub fn create_mask(width: usize, height: usize, f: impl Fn(usize, usize) -> u8) -> Vec<u8> {
    let mut data = Vec::with_capacity(width * height);
    for row in 0..height {
        for col in 0..width {
            data.push(f(row, col));
        }
    }
    data
}

/// Creates a mask with a filled rectangle of `value` on a zero background.
///
/// Rows `row_range` and columns `col_range` (half-open) are set.
pub fn create_rect_mask(
    width: usize,
    height: usize,
    row_range: std::ops::Range<usize>,
    col_range: std::ops::Range<usize>,
    value: u8,
) -> Vec<u8> {
    create_mask(width, height, |row, col| {
        if row_range.contains(&row) && col_range.contains(&col) {
            value
        } else {
            0
        }
    })
}

/// GeoKey directory declaring EPSG:3857.
pub fn web_mercator_geo_keys() -> Vec<u16> {
    vec![
        1, 1, 0, 3, // header
        1024, 0, 1, 1, // GTModelTypeGeoKey = projected
        1025, 0, 1, 1, // GTRasterTypeGeoKey = PixelIsArea
        3072, 0, 1, 3857, // ProjectedCSTypeGeoKey
    ]
}

/// GeoKey directory declaring EPSG:4326.
pub fn geographic_geo_keys() -> Vec<u16> {
    vec![
        1, 1, 0, 3, // header
        1024, 0, 1, 2, // GTModelTypeGeoKey = geographic
        1025, 0, 1, 1, // GTRasterTypeGeoKey = PixelIsArea
        2048, 0, 1, 4326, // GeographicTypeGeoKey
    ]
}

/// GeoKey directory declaring UTM zone 10N, which the layout cannot use.
pub fn utm_geo_keys() -> Vec<u16> {
    vec![
        1, 1, 0, 2, // header
        1024, 0, 1, 1, // GTModelTypeGeoKey = projected
        3072, 0, 1, 32610, // ProjectedCSTypeGeoKey
    ]
}

/// Upper-left Web Mercator origin of a `width × height` raster of
/// `pixel_meters` pixels centered on `center`.
pub fn mercator_origin_around(
    center: GeoPoint,
    width: usize,
    height: usize,
    pixel_meters: f64,
) -> (f64, f64) {
    let (x, y) = lng_lat_to_mercator(&center);
    (
        x - width as f64 * pixel_meters / 2.0,
        y + height as f64 * pixel_meters / 2.0,
    )
}

/// Builder for an in-memory 8-bit GeoTIFF.
#[derive(Debug, Clone)]
pub struct MaskTiff {
    pub width: u32,
    pub height: u32,
    /// 1 (gray) or 4 (RGBA byte planes)
    pub bands: u8,
    pub data: Vec<u8>,
    /// Model coordinate of the upper-left corner
    pub origin: (f64, f64),
    /// Positive pixel size along x and y
    pub pixel_scale: (f64, f64),
    pub geo_keys: Vec<u16>,
}

impl MaskTiff {
    /// Single-band Web Mercator mask.
    pub fn web_mercator(
        width: u32,
        height: u32,
        data: Vec<u8>,
        origin: (f64, f64),
        pixel_meters: f64,
    ) -> Self {
        Self {
            width,
            height,
            bands: 1,
            data,
            origin,
            pixel_scale: (pixel_meters, pixel_meters),
            geo_keys: web_mercator_geo_keys(),
        }
    }

    /// Single-band geographic mask.
    pub fn geographic(
        width: u32,
        height: u32,
        data: Vec<u8>,
        origin: (f64, f64),
        pixel_degrees: f64,
    ) -> Self {
        Self {
            width,
            height,
            bands: 1,
            data,
            origin,
            pixel_scale: (pixel_degrees, pixel_degrees),
            geo_keys: geographic_geo_keys(),
        }
    }

    pub fn with_bands(mut self, bands: u8, data: Vec<u8>) -> Self {
        self.bands = bands;
        self.data = data;
        self
    }

    pub fn with_geo_keys(mut self, geo_keys: Vec<u16>) -> Self {
        self.geo_keys = geo_keys;
        self
    }

    /// Encode to GeoTIFF bytes.
    ///
    /// Panics on encoder failure; this is test-only code.
    pub fn encode(&self) -> Vec<u8> {
        let mut buffer = Cursor::new(Vec::new());
        {
            let mut encoder = TiffEncoder::new(&mut buffer).expect("create TIFF encoder");
            let tiepoint = [0.0, 0.0, 0.0, self.origin.0, self.origin.1, 0.0];
            let scale = [self.pixel_scale.0, self.pixel_scale.1, 0.0];

            match self.bands {
                1 => {
                    let mut image = encoder
                        .new_image::<colortype::Gray8>(self.width, self.height)
                        .expect("create gray image");
                    let dir = image.encoder();
                    dir.write_tag(Tag::ModelTiepointTag, &tiepoint[..])
                        .expect("write tiepoint");
                    dir.write_tag(Tag::ModelPixelScaleTag, &scale[..])
                        .expect("write pixel scale");
                    dir.write_tag(Tag::GeoKeyDirectoryTag, &self.geo_keys[..])
                        .expect("write geo keys");
                    image.write_data(&self.data).expect("write gray data");
                }
                4 => {
                    let mut image = encoder
                        .new_image::<colortype::RGBA8>(self.width, self.height)
                        .expect("create rgba image");
                    let dir = image.encoder();
                    dir.write_tag(Tag::ModelTiepointTag, &tiepoint[..])
                        .expect("write tiepoint");
                    dir.write_tag(Tag::ModelPixelScaleTag, &scale[..])
                        .expect("write pixel scale");
                    dir.write_tag(Tag::GeoKeyDirectoryTag, &self.geo_keys[..])
                        .expect("write geo keys");
                    image.write_data(&self.data).expect("write rgba data");
                }
                other => panic!("unsupported band count {}", other),
            }
        }
        buffer.into_inner()
    }
}
