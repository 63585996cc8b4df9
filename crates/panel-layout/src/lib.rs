//! Solar panel layout generation.
//!
//! Turns a decoded roof mask raster into an ordered, size-bounded list of
//! panel placements:
//!
//! 1. Derive the real-world pixel footprint and integer sampling strides
//!    from the raster's georeferencing.
//! 2. Scan the raster at those strides, projecting each viable pixel center
//!    to lat/lng and annotating it with roof segment attributes.
//! 3. If the scan produced nothing, synthesize a grid over each roof
//!    segment's bounding box.
//! 4. Order candidates nearest-first from the query point and truncate.
//!
//! An empty result is reported as [`LayoutOutcome::NoViableSegments`], not
//! as an empty success.

pub mod assemble;
pub mod config;
pub mod fallback;
pub mod layout;
pub mod sampling;
pub mod segments;
pub mod types;

pub use assemble::order_and_limit;
pub use config::{
    PanelGeometry, PANEL_LENGTH_METERS, PANEL_SPACING_BUFFER_METERS, PANEL_SPACING_METERS,
};
pub use fallback::bounding_box_candidates;
pub use layout::generate_layout;
pub use sampling::{compute_stride, pixel_footprint, sample_raster, PixelFootprint};
pub use segments::{RoofSegmentIndex, RoofSegmentSummary};
pub use types::{LayoutMetadata, LayoutOutcome, LayoutSource, PanelLocation, RoofSegmentStats};
