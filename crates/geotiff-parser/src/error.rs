//! Error types for GeoTIFF decoding.

use thiserror::Error;

/// Result type for GeoTIFF parser operations.
pub type GeoTiffResult<T> = Result<T, GeoTiffError>;

/// Errors that can occur while decoding a mask raster.
#[derive(Error, Debug)]
pub enum GeoTiffError {
    /// The TIFF container itself could not be read.
    #[error("TIFF decode error: {0}")]
    Tiff(#[from] tiff::TiffError),

    /// File I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Neither tie point + pixel scale nor a model transformation is present.
    #[error("raster has no georeferencing tags")]
    MissingGeoreference,

    /// GeoKey directory is truncated or references missing parameters.
    #[error("invalid GeoKey directory: {0}")]
    InvalidGeoKeys(String),

    /// Pixel buffer does not match the declared dimensions.
    #[error("pixel buffer holds {actual} samples, expected {expected}")]
    BufferSizeMismatch { expected: usize, actual: usize },

    /// Dimensions or sample layout the decoder cannot interpret.
    #[error("unsupported raster layout: {0}")]
    Unsupported(String),
}

impl GeoTiffError {
    pub fn invalid_geo_keys(msg: impl Into<String>) -> Self {
        Self::InvalidGeoKeys(msg.into())
    }

    pub fn unsupported(msg: impl Into<String>) -> Self {
        Self::Unsupported(msg.into())
    }
}

impl From<GeoTiffError> for solar_common::SolarError {
    fn from(err: GeoTiffError) -> Self {
        solar_common::SolarError::Decode(err.to_string())
    }
}
