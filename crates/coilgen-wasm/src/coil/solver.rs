//! Turn-independent dimensions derived from a [`CoilConfig`].

use serde::Serialize;

use crate::error::CoilError;

use super::config::CoilConfig;

/// Scalar dimensions shared by every winding of a spiral.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedDimensions {
    /// Via outer diameter.
    pub via_diameter: f64,
    /// Terminal pad outer diameter.
    pub pad_diameter: f64,
    /// Lateral room the via stack needs: `max(via_diameter, trace_width)`.
    pub clearance_unit: f64,
    /// Winding center offset used by turn 0 (halved) and the even turns.
    pub inner_offset_1: f64,
    /// Winding center offset used by the odd turns.
    pub inner_offset_2: f64,
    /// Center-to-center distance of adjacent traces.
    pub pitch: f64,
    /// Aperture radius plus gap; every winding starts outside it.
    pub baseline: f64,
    /// `-1` for an odd turn count (mirrored layout), `+1` otherwise.
    pub parity_multiplier: f64,
    /// `+1` clockwise, `-1` counter-clockwise.
    pub direction_multiplier: f64,
}

impl DerivedDimensions {
    /// Validates `config` and derives the shared dimensions.
    ///
    /// # Errors
    ///
    /// Returns [`CoilError::InvalidConfiguration`] when the config fails
    /// [`CoilConfig::validate`].
    pub fn derive(config: &CoilConfig) -> Result<Self, CoilError> {
        config.validate()?;

        let via_diameter = config.via_diameter();
        let clearance_unit = via_diameter.max(config.trace_width);
        let half_clearance = clearance_unit / 2.0;

        Ok(Self {
            via_diameter,
            pad_diameter: config.pad_diameter(),
            clearance_unit,
            inner_offset_1: half_clearance - config.trace_width / 2.0,
            inner_offset_2: half_clearance + config.trace_spacing / 2.0,
            pitch: config.trace_width + config.trace_spacing,
            baseline: config.aperture_radius + config.aperture_gap,
            parity_multiplier: if config.turns % 2 == 1 { -1.0 } else { 1.0 },
            direction_multiplier: config.direction.multiplier(),
        })
    }

    /// X of the start via, signed by parity.
    pub fn start_via_x(&self) -> f64 {
        (self.baseline + self.clearance_unit / 2.0) * self.parity_multiplier
    }
}
