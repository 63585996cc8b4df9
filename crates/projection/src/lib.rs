//! Coordinate conversions between raster CRSs and geographic coordinates.
//!
//! Implements the spherical Web Mercator math from scratch without external
//! dependencies.

pub mod mercator;

pub use mercator::{
    lng_lat_to_mercator, mercator_to_lng_lat, meters_per_degree, MetersPerDegree,
    EARTH_RADIUS_METERS,
};
