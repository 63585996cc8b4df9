//! GeoTIFF decoding for roof mask rasters.
//!
//! Byte-level TIFF parsing is delegated to the `tiff` crate. This crate
//! interprets what comes out of it: GeoKey directories, georeferencing
//! (origin and signed pixel resolution), and typed pixel buffers with
//! multi-band packed value reconstruction.
//!
//! # Example
//!
//! ```ignore
//! use geotiff_parser::decode_geotiff;
//!
//! let raster = decode_geotiff(&bytes)?;
//! let crs = raster.crs();
//! if let Some(value) = raster.packed_value(0, 0) {
//!     // ...
//! }
//! ```

pub mod decode;
pub mod error;
pub mod geokeys;
pub mod georef;
pub mod pixels;
pub mod raster;

pub use decode::{decode_geotiff, FileDirectorySummary};
pub use error::{GeoTiffError, GeoTiffResult};
pub use geokeys::{GeoKeyDirectory, GeoKeyValue};
pub use georef::Georeference;
pub use pixels::PixelBuffer;
pub use raster::RasterImage;
