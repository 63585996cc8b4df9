//! Raster-to-model georeferencing.

use serde::Serialize;

use crate::error::{GeoTiffError, GeoTiffResult};

/// Affine placement of a north-up raster in its native CRS.
///
/// `resolution.1` is normally negative: rows grow downward while the model
/// y coordinate decreases.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Georeference {
    /// Model coordinate of the upper-left corner of pixel (0, 0)
    pub origin: (f64, f64),
    /// Signed model units per pixel along x and y
    pub resolution: (f64, f64),
}

impl Georeference {
    pub fn new(origin: (f64, f64), resolution: (f64, f64)) -> Self {
        Self { origin, resolution }
    }

    /// Resolve georeferencing from the GeoTIFF model tags.
    ///
    /// Tie point + pixel scale takes precedence; the model transformation
    /// matrix is used otherwise.
    pub fn from_tags(
        tiepoint: Option<&[f64]>,
        pixel_scale: Option<&[f64]>,
        transformation: Option<&[f64]>,
    ) -> GeoTiffResult<Self> {
        if let (Some(tie), Some(scale)) = (tiepoint, pixel_scale) {
            if tie.len() >= 6 && scale.len() >= 2 {
                // Tie point maps raster (I, J) to model (X, Y); shift back to pixel (0, 0).
                let origin_x = tie[3] - tie[0] * scale[0];
                let origin_y = tie[4] + tie[1] * scale[1];
                return Ok(Self::new((origin_x, origin_y), (scale[0], -scale[1])));
            }
        }

        if let Some(t) = transformation {
            if t.len() >= 16 {
                return Ok(Self::new((t[3], t[7]), (t[0], t[5])));
            }
        }

        Err(GeoTiffError::MissingGeoreference)
    }

    /// Model coordinate of the center of pixel (`col`, `row`).
    pub fn pixel_center(&self, col: usize, row: usize) -> (f64, f64) {
        (
            self.origin.0 + (col as f64 + 0.5) * self.resolution.0,
            self.origin.1 + (row as f64 + 0.5) * self.resolution.1,
        )
    }
}
