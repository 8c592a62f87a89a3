//! Generator inputs.
//!
//! All lengths are millimetres. Every config deserialises from a partial
//! camelCase object; missing fields take the defaults of the footprint
//! wizard the generators were first written for.

use serde::{Deserialize, Serialize};

use crate::error::CoilError;

use super::layer::{Layer, LayerPair};

/// Winding direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Direction {
    /// Clockwise winding.
    #[default]
    Clockwise,
    /// Counter-clockwise winding.
    CounterClockwise,
}

impl Direction {
    /// `+1` for clockwise, `-1` for counter-clockwise.
    pub const fn multiplier(self) -> f64 {
        match self {
            Self::Clockwise => 1.0,
            Self::CounterClockwise => -1.0,
        }
    }

    /// Short label used in fabrication notes.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Clockwise => "CW",
            Self::CounterClockwise => "CCW",
        }
    }
}

/// Two-layer spiral coil wound around a circular aperture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CoilConfig {
    /// Total number of turns.
    pub turns: u32,
    /// Radius of the aperture the coil winds around.
    pub aperture_radius: f64,
    /// Gap between the aperture and the innermost winding.
    pub aperture_gap: f64,
    /// Trace width.
    pub trace_width: f64,
    /// Minimum spacing between traces.
    pub trace_spacing: f64,
    /// Via drill diameter.
    pub via_drill_diameter: f64,
    /// Via annular ring (radial).
    pub via_annular_ring: f64,
    /// Terminal pad drill diameter.
    pub pad_drill_diameter: f64,
    /// Terminal pad annular ring (radial).
    pub pad_annular_ring: f64,
    /// Copper weight in ounces per square foot.
    pub copper_thickness_oz: f64,
    /// Winding direction.
    pub direction: Direction,
    /// Copper layers the spiral alternates across.
    pub layers: LayerPair,
}

impl Default for CoilConfig {
    fn default() -> Self {
        Self {
            turns: 15,
            aperture_radius: 30.0,
            aperture_gap: 0.5,
            trace_width: 0.2,
            trace_spacing: 0.2,
            via_drill_diameter: 0.3,
            via_annular_ring: 0.15,
            pad_drill_diameter: 0.5,
            pad_annular_ring: 0.2,
            copper_thickness_oz: 1.0,
            direction: Direction::Clockwise,
            layers: LayerPair::default(),
        }
    }
}

impl CoilConfig {
    /// Checks structural validity before any geometry is computed.
    ///
    /// # Errors
    ///
    /// Returns [`CoilError::InvalidConfiguration`] for zero turns, a
    /// non-positive aperture radius, trace width, trace spacing or copper
    /// thickness, any negative or non-finite length, or an unusable layer pair.
    pub fn validate(&self) -> Result<(), CoilError> {
        if self.turns == 0 {
            return Err(CoilError::config("turns must be at least 1"));
        }
        positive("aperture radius", self.aperture_radius)?;
        non_negative("aperture gap", self.aperture_gap)?;
        positive("trace width", self.trace_width)?;
        positive("trace spacing", self.trace_spacing)?;
        non_negative("via drill diameter", self.via_drill_diameter)?;
        non_negative("via annular ring", self.via_annular_ring)?;
        non_negative("pad drill diameter", self.pad_drill_diameter)?;
        non_negative("pad annular ring", self.pad_annular_ring)?;
        positive("copper thickness", self.copper_thickness_oz)?;
        self.layers.validate()
    }

    /// Via outer diameter: drill plus the ring on both sides.
    pub fn via_diameter(&self) -> f64 {
        2.0f64.mul_add(self.via_annular_ring, self.via_drill_diameter)
    }

    /// Terminal pad outer diameter.
    pub fn pad_diameter(&self) -> f64 {
        2.0f64.mul_add(self.pad_annular_ring, self.pad_drill_diameter)
    }
}

/// Single-layer, single-turn loop at a circular aperture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SingleTurnConfig {
    /// Radius of the aperture the loop hugs.
    pub radius: f64,
    /// Length of the straight stubs leading to the pads.
    pub stub_length: f64,
    /// Copper layer of the loop.
    pub layer: Layer,
    /// Winding direction.
    pub direction: Direction,
    /// Trace width.
    pub trace_width: f64,
    /// Minimum spacing between traces.
    pub trace_spacing: f64,
    /// Terminal pad drill diameter.
    pub pad_drill_diameter: f64,
    /// Terminal pad annular ring (radial).
    pub pad_annular_ring: f64,
    /// Copper weight in ounces per square foot.
    pub copper_thickness_oz: f64,
}

impl Default for SingleTurnConfig {
    fn default() -> Self {
        Self {
            radius: 30.0,
            stub_length: 5.0,
            layer: Layer::FrontCopper,
            direction: Direction::Clockwise,
            trace_width: 0.2,
            trace_spacing: 0.2,
            pad_drill_diameter: 0.5,
            pad_annular_ring: 0.2,
            copper_thickness_oz: 1.0,
        }
    }
}

impl SingleTurnConfig {
    /// Checks structural validity.
    ///
    /// # Errors
    ///
    /// Returns [`CoilError::InvalidConfiguration`] for a non-positive radius,
    /// trace width, spacing or copper thickness, a negative length, or a
    /// non-copper layer.
    pub fn validate(&self) -> Result<(), CoilError> {
        positive("radius", self.radius)?;
        non_negative("stub length", self.stub_length)?;
        positive("trace width", self.trace_width)?;
        positive("trace spacing", self.trace_spacing)?;
        non_negative("pad drill diameter", self.pad_drill_diameter)?;
        non_negative("pad annular ring", self.pad_annular_ring)?;
        positive("copper thickness", self.copper_thickness_oz)?;
        if !self.layer.is_copper() {
            return Err(CoilError::config(format!(
                "layer `{}` is not a copper layer",
                self.layer
            )));
        }
        Ok(())
    }

    /// Terminal pad outer diameter.
    pub fn pad_diameter(&self) -> f64 {
        2.0f64.mul_add(self.pad_annular_ring, self.pad_drill_diameter)
    }
}

/// Flux-neutral two-layer coil inside a circular aperture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FluxNeutralConfig {
    /// Number of loops.
    pub turns: u32,
    /// Radius of the innermost corner arcs.
    pub min_radius: f64,
    /// Length of the terminal stubs.
    pub stub_length: f64,
    /// Copper layers of the coil.
    pub layers: LayerPair,
    /// Radius of the aperture the coil must stay within.
    pub outer_radius: f64,
    /// Gap between the outermost loop and the aperture.
    pub outer_gap: f64,
    /// Trace width.
    pub trace_width: f64,
    /// Minimum spacing between traces.
    pub trace_spacing: f64,
    /// Via drill diameter.
    pub via_drill_diameter: f64,
    /// Via annular ring (radial).
    pub via_annular_ring: f64,
    /// Terminal pad drill diameter.
    pub pad_drill_diameter: f64,
    /// Terminal pad annular ring (radial).
    pub pad_annular_ring: f64,
}

impl Default for FluxNeutralConfig {
    fn default() -> Self {
        Self {
            turns: 5,
            min_radius: 1.0,
            stub_length: 5.0,
            layers: LayerPair::new(Layer::FrontCopper, Layer::InnerCopper(1)),
            outer_radius: 75.0,
            outer_gap: 2.0,
            trace_width: 0.2,
            trace_spacing: 0.2,
            via_drill_diameter: 0.254,
            via_annular_ring: 0.127,
            pad_drill_diameter: 0.5,
            pad_annular_ring: 0.2,
        }
    }
}

impl FluxNeutralConfig {
    /// Checks structural validity.
    ///
    /// # Errors
    ///
    /// Returns [`CoilError::InvalidConfiguration`] for zero turns, a
    /// non-positive outer radius, trace width or spacing, a negative length,
    /// or an unusable layer pair.
    pub fn validate(&self) -> Result<(), CoilError> {
        if self.turns == 0 {
            return Err(CoilError::config("turns must be at least 1"));
        }
        non_negative("minimum radius", self.min_radius)?;
        non_negative("stub length", self.stub_length)?;
        positive("outer radius", self.outer_radius)?;
        non_negative("outer gap", self.outer_gap)?;
        positive("trace width", self.trace_width)?;
        positive("trace spacing", self.trace_spacing)?;
        non_negative("via drill diameter", self.via_drill_diameter)?;
        non_negative("via annular ring", self.via_annular_ring)?;
        non_negative("pad drill diameter", self.pad_drill_diameter)?;
        non_negative("pad annular ring", self.pad_annular_ring)?;
        self.layers.validate()
    }

    /// Via outer diameter.
    pub fn via_diameter(&self) -> f64 {
        2.0f64.mul_add(self.via_annular_ring, self.via_drill_diameter)
    }

    /// Terminal pad outer diameter.
    pub fn pad_diameter(&self) -> f64 {
        2.0f64.mul_add(self.pad_annular_ring, self.pad_drill_diameter)
    }
}

fn positive(label: &str, value: f64) -> Result<(), CoilError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(CoilError::config(format!(
            "{label} must be positive, got {value}"
        )));
    }
    Ok(())
}

fn non_negative(label: &str, value: f64) -> Result<(), CoilError> {
    if !value.is_finite() || value < 0.0 {
        return Err(CoilError::config(format!(
            "{label} must be non-negative, got {value}"
        )));
    }
    Ok(())
}
