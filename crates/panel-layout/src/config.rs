//! Panel geometry constants.

/// Long edge of a panel footprint.
pub const PANEL_LENGTH_METERS: f64 = 3.2;

/// Clearance kept between neighbouring panels.
pub const PANEL_SPACING_BUFFER_METERS: f64 = 0.6;

/// Minimum center-to-center spacing between sampled points.
pub const PANEL_SPACING_METERS: f64 = PANEL_LENGTH_METERS + PANEL_SPACING_BUFFER_METERS;

/// Physical panel dimensions driving the sampling grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelGeometry {
    pub length_meters: f64,
    pub buffer_meters: f64,
}

impl PanelGeometry {
    pub fn new(length_meters: f64, buffer_meters: f64) -> Self {
        Self {
            length_meters,
            buffer_meters,
        }
    }

    /// Center-to-center spacing between panels.
    pub fn spacing_meters(&self) -> f64 {
        self.length_meters + self.buffer_meters
    }
}

impl Default for PanelGeometry {
    fn default() -> Self {
        Self::new(PANEL_LENGTH_METERS, PANEL_SPACING_BUFFER_METERS)
    }
}
