//! Two-layer spiral winding around a circular aperture.
//!
//! Every turn is one 180° arc drawn twice, once per layer, with opposite
//! sweep. Arc centers sit on the X axis, so the two layers together close
//! each turn and a single via at the innermost point joins them. An odd turn
//! count cannot close through that via symmetrically; the whole pattern is
//! mirrored in X instead (the parity multiplier).

use tracing::debug;

use crate::error::CoilError;
use crate::geometry::Point;

use super::config::CoilConfig;
use super::instruction::DrawingSurface;
use super::layout::{CoilLayout, RunningTotals, Sketch};
use super::report::spiral_report;
use super::solver::DerivedDimensions;

/// Sweep of one winding arc.
pub const WINDING_DEGREES: f64 = 180.0;

/// Sweep of the exit arc. Opposite in sense to the windings so the trace
/// leaves the last winding tangentially.
pub const TERMINAL_DEGREES: f64 = -90.0;

/// Pad number shared by the layer-changing vias.
pub const VIA_PAD_NUMBER: u32 = 3;

/// One winding arc pair on the X axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Winding {
    /// Turn index, 0 being innermost.
    pub index: u32,
    /// Arc center X.
    pub center_x: f64,
    /// Arc start X.
    pub start_x: f64,
}

impl Winding {
    /// Arc radius.
    pub fn radius(&self) -> f64 {
        (self.start_x - self.center_x).abs()
    }

    /// X where the arc returns to the axis after half a turn.
    pub fn end_x(&self) -> f64 {
        2.0f64.mul_add(self.center_x, -self.start_x)
    }
}

/// Exit arc and terminal pad placement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TerminalRoute {
    /// Exit arc start X, where the last winding ends.
    pub start_x: f64,
    /// Exit arc center X; also the X of both terminal pads.
    pub center_x: f64,
    /// Y of pad 1; pad 2 sits at the negated value.
    pub pad_1_y: f64,
}

/// Computes the center and start of every winding, innermost first.
///
/// # Errors
///
/// Returns [`CoilError::InvalidConfiguration`] for an invalid config.
pub fn winding_plan(config: &CoilConfig) -> Result<Vec<Winding>, CoilError> {
    let dims = DerivedDimensions::derive(config)?;
    Ok((0..config.turns)
        .map(|index| winding(config, &dims, index))
        .collect())
}

fn winding(config: &CoilConfig, dims: &DerivedDimensions, index: u32) -> Winding {
    let parity = dims.parity_multiplier;
    let half_turns = f64::from(index) / 2.0;
    let (center_x, start_x) = if index == 0 {
        (dims.inner_offset_1 / 2.0 * parity, dims.start_via_x())
    } else if index % 2 == 1 {
        let reach = half_turns.mul_add(dims.pitch, dims.baseline) - config.trace_spacing / 2.0;
        (dims.inner_offset_2 * parity, -reach * parity)
    } else {
        let reach = half_turns.mul_add(dims.pitch, dims.baseline + dims.clearance_unit)
            - config.trace_width / 2.0;
        (dims.inner_offset_1 * parity, reach * parity)
    };
    Winding {
        index,
        center_x,
        start_x,
    }
}

fn terminal_route(config: &CoilConfig, dims: &DerivedDimensions) -> TerminalRoute {
    let last_offset = if config.turns % 2 == 1 {
        config.trace_width
    } else {
        dims.clearance_unit
    };
    let start_x = f64::from(config.turns / 2).mul_add(dims.pitch, dims.baseline + last_offset)
        - config.trace_width / 2.0;
    let reach = 2.0 * dims.clearance_unit;
    TerminalRoute {
        start_x,
        center_x: start_x + reach,
        pad_1_y: -reach * dims.direction_multiplier,
    }
}

/// Lays out the complete spiral footprint.
///
/// The returned instructions are, in order: the aperture outline, the start
/// via, one arc pair per turn, the exit arc pair, terminal pads 1 and 2, and
/// the two annotation texts.
///
/// # Errors
///
/// Returns [`CoilError::InvalidConfiguration`] for an invalid config and
/// [`CoilError::InvalidGeometry`] when an arc degenerates. Nothing is
/// returned on failure.
pub fn layout_spiral(config: &CoilConfig) -> Result<CoilLayout, CoilError> {
    let dims = DerivedDimensions::derive(config)?;
    let layers = (config.layers.first, config.layers.second);
    let direction = dims.direction_multiplier;

    let mut sketch = Sketch::new(config.trace_width);
    sketch.outline(config.aperture_radius);
    sketch.via(
        VIA_PAD_NUMBER,
        Point::new(dims.start_via_x(), 0.0),
        dims.via_diameter,
        config.via_drill_diameter,
    );

    for index in 0..config.turns {
        let turn = winding(config, &dims, index);
        sketch.arc_pair_y_sym(layers, turn.center_x, turn.start_x, WINDING_DEGREES, direction)?;
    }

    let exit = terminal_route(config, &dims);
    sketch.arc_pair_y_sym(layers, exit.center_x, exit.start_x, TERMINAL_DEGREES, direction)?;
    for (number, y) in [(1, exit.pad_1_y), (2, -exit.pad_1_y)] {
        sketch.pad(
            number,
            Point::new(exit.center_x, y),
            dims.pad_diameter,
            config.pad_drill_diameter,
        );
    }

    let totals = sketch.totals();
    debug!(
        turns = config.turns,
        trace_length = totals.trace_length,
        vias = totals.via_count,
        "spiral layout complete"
    );
    Ok(sketch.finish(spiral_report(config, totals.trace_length)))
}

/// Lays out the spiral and streams it into `surface`.
///
/// The layout is computed in full before the first call on `surface`, so a
/// failing config never leaves a half-drawn footprint behind.
///
/// # Errors
///
/// Same as [`layout_spiral`].
pub fn emit_spiral<S: DrawingSurface + ?Sized>(
    config: &CoilConfig,
    surface: &mut S,
) -> Result<RunningTotals, CoilError> {
    let layout = layout_spiral(config)?;
    layout.replay(surface);
    Ok(layout.totals)
}

/// Exit route for `config`, for hosts that place extra copper at the
/// terminals.
///
/// # Errors
///
/// Returns [`CoilError::InvalidConfiguration`] for an invalid config.
pub fn terminal_plan(config: &CoilConfig) -> Result<TerminalRoute, CoilError> {
    let dims = DerivedDimensions::derive(config)?;
    Ok(terminal_route(config, &dims))
}
