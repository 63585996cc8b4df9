//! Common types and utilities shared across the solar layout crates.

pub mod bbox;
pub mod crs;
pub mod error;
pub mod geo;

pub use bbox::LatLngBox;
pub use crs::{RasterCrs, GEOGRAPHIC_EPSG, WEB_MERCATOR_EPSG};
pub use error::{SolarError, SolarResult};
pub use geo::GeoPoint;
