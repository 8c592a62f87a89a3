//! Single-layer, single-turn loop.
//!
//! A near-complete circle hugs the aperture and leaves a gap on +X just wide
//! enough for two stub traces to curl out to the terminal pads without
//! touching. The gap angle has a closed-form solution.

use std::f64::consts::FRAC_PI_2;

use tracing::debug;

use crate::error::CoilError;
use crate::geometry::Point;

use super::config::SingleTurnConfig;
use super::layout::{CoilLayout, Sketch};
use super::report::single_turn_report;

/// Closed-form solution of the gap geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GapSolution {
    /// Centerline radius of the main loop.
    pub loop_radius: f64,
    /// Centerline radius of the stub arcs.
    pub stub_radius: f64,
    /// Half-angle of the gap, radians.
    pub theta1: f64,
    /// Sweep of each stub arc, radians.
    pub theta2: f64,
    /// `max(pad_diameter, trace_width)`.
    pub clearance: f64,
}

impl GapSolution {
    /// Sweep of the main loop in degrees, `360° − 2·θ1`.
    pub fn loop_degrees(&self) -> f64 {
        2.0f64.mul_add(-self.theta1.to_degrees(), 360.0)
    }

    /// Distance of each stub line from the X axis.
    pub fn stub_offset(&self, trace_spacing: f64) -> f64 {
        self.clearance / 2.0 + trace_spacing
    }
}

/// Solves the gap angle for a loop of `radius`.
///
/// # Errors
///
/// Returns [`CoilError::InvalidGeometry`] when the stubs and pads cannot fit,
/// i.e. the `acos` argument leaves `[-1, 1]`.
pub fn solve_gap(
    radius: f64,
    trace_width: f64,
    trace_spacing: f64,
    pad_diameter: f64,
) -> Result<GapSolution, CoilError> {
    let loop_radius = radius + trace_width / 2.0;
    let stub_radius = trace_width;
    let clearance = pad_diameter.max(trace_width);

    let needed = trace_spacing + clearance / 2.0 + stub_radius;
    let reach = loop_radius + stub_radius;
    let ratio = needed / reach;
    if !ratio.is_finite() || ratio.abs() > 1.0 {
        return Err(CoilError::geometry(format!(
            "stub clearance {needed:.4} exceeds the stub reach {reach:.4}; radius too small"
        )));
    }

    let theta2 = ratio.acos();
    Ok(GapSolution {
        loop_radius,
        stub_radius,
        theta1: FRAC_PI_2 - theta2,
        theta2,
        clearance,
    })
}

/// Lays out the single-turn loop.
///
/// Counter-clockwise is the mirror image of clockwise across the X axis.
///
/// # Errors
///
/// Returns [`CoilError::InvalidConfiguration`] for an invalid config and
/// [`CoilError::InvalidGeometry`] when the gap cannot be solved.
pub fn layout_single_turn(config: &SingleTurnConfig) -> Result<CoilLayout, CoilError> {
    config.validate()?;
    let gap = solve_gap(
        config.radius,
        config.trace_width,
        config.trace_spacing,
        config.pad_diameter(),
    )?;
    let mirror = config.direction.multiplier();
    let layer = config.layer;

    let (sin1, cos1) = gap.theta1.sin_cos();
    let stub_center_distance = gap.loop_radius + gap.stub_radius;

    let mut sketch = Sketch::new(config.trace_width);

    let start = Point::new(gap.loop_radius * cos1, -gap.loop_radius * sin1 * mirror);
    sketch.arc(
        layer,
        Point::new(0.0, 0.0),
        start,
        -gap.loop_degrees() * mirror,
    )?;

    let stub_x = stub_center_distance * cos1;
    let stub_y = stub_center_distance * sin1 * mirror;
    let stub_degrees = gap.theta2.to_degrees() * mirror;
    sketch.arc(layer, Point::new(stub_x, -stub_y), start, -stub_degrees)?;
    sketch.arc(
        layer,
        Point::new(stub_x, stub_y),
        Point::new(start.x, -start.y),
        stub_degrees,
    )?;

    let offset = gap.stub_offset(config.trace_spacing);
    let pad_x = stub_x + config.stub_length;
    for y in [offset, -offset] {
        sketch.line(layer, Point::new(stub_x, y), Point::new(pad_x, y));
    }

    let pad_diameter = config.pad_diameter();
    sketch.pad(
        1,
        Point::new(pad_x, -offset * mirror),
        pad_diameter,
        config.pad_drill_diameter,
    );
    sketch.pad(
        2,
        Point::new(pad_x, offset * mirror),
        pad_diameter,
        config.pad_drill_diameter,
    );

    let totals = sketch.totals();
    debug!(
        theta1 = gap.theta1,
        theta2 = gap.theta2,
        trace_length = totals.trace_length,
        "single-turn layout complete"
    );
    Ok(sketch.finish(single_turn_report(config, totals.trace_length)))
}
