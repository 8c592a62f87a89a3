//! Flux-neutral two-layer coil inside a circular aperture.
//!
//! The coil is a pair of point-mirrored "D" shapes: big half-circle arcs on
//! the outside, straight vertical tracks through the middle and small
//! quarter-circle corners joining them. Stitching vias at the ends of the big
//! arcs hand the trace from one layer to the other once per turn, so the two
//! halves carry current in opposite senses and their far fields cancel.

use tracing::debug;

use crate::error::CoilError;
use crate::geometry::Point;

use super::config::FluxNeutralConfig;
use super::layer::Layer;
use super::layout::{CoilLayout, Sketch};
use super::report::flux_neutral_report;
use super::spiral::VIA_PAD_NUMBER;

const MIN_CORNER_RADIUS: f64 = 1e-9;

/// Dimensions shared by every loop of the flux-neutral coil.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FluxNeutralDimensions {
    /// Center-to-center distance of adjacent tracks.
    pub pitch: f64,
    /// Via radius plus spacing plus half a trace: the lateral room of a via
    /// next to a track.
    pub via_clearance: f64,
    /// Horizontal run that lets adjacent vias stack diagonally.
    pub via_gap: f64,
    /// Via outer diameter.
    pub via_diameter: f64,
    /// Terminal pad outer diameter.
    pub pad_diameter: f64,
    /// X of the big arcs' center (first layer side).
    pub arc_center_x: f64,
    /// Y of the outermost big arc's start point.
    pub arc_start_y: f64,
    /// X of the outermost vertical track.
    pub track_x: f64,
    /// Half-length of the vertical tracks, also the Y of the corner arcs.
    pub track_half_length: f64,
}

impl FluxNeutralDimensions {
    /// Validates `config` and derives the shared dimensions.
    ///
    /// # Errors
    ///
    /// Returns [`CoilError::InvalidConfiguration`] for an invalid config and
    /// [`CoilError::InvalidGeometry`] when vias are narrower than traces or the
    /// coil does not fit inside the aperture.
    pub fn derive(config: &FluxNeutralConfig) -> Result<Self, CoilError> {
        config.validate()?;

        let tw = config.trace_width;
        let ts = config.trace_spacing;
        let via_diameter = config.via_diameter();
        let pitch = ts + tw / 2.0 + (tw / 2.0).max(via_diameter / 2.0);

        let via_clearance = via_diameter / 2.0 + ts + tw / 2.0;
        let via_pitch = via_diameter + ts;
        if via_pitch < via_clearance {
            return Err(CoilError::geometry(format!(
                "via diameter {via_diameter} is narrower than the trace width {tw}"
            )));
        }
        let via_gap = via_pitch.mul_add(via_pitch, -(via_clearance * via_clearance)).sqrt();

        let loops = f64::from(config.turns - 1);
        let spread = pitch * loops / 2.0;
        let inner_reach = config.outer_radius - config.outer_gap - config.min_radius - via_gap;
        let arc_start_y = inner_reach - spread;
        let track_half_length = (pitch * loops).mul_add(-1.5, inner_reach) - config.min_radius;
        if track_half_length <= 0.0 {
            return Err(CoilError::geometry(format!(
                "{} turns do not fit inside an aperture of radius {}",
                config.turns, config.outer_radius
            )));
        }

        Ok(Self {
            pitch,
            via_clearance,
            via_gap,
            via_diameter,
            pad_diameter: config.pad_diameter(),
            arc_center_x: -spread - config.min_radius - via_gap,
            arc_start_y,
            track_x: spread,
            track_half_length,
        })
    }
}

/// Lays out the flux-neutral coil.
///
/// # Errors
///
/// See [`FluxNeutralDimensions::derive`]; any degenerate arc is reported as
/// [`CoilError::InvalidGeometry`].
pub fn layout_flux_neutral(config: &FluxNeutralConfig) -> Result<CoilLayout, CoilError> {
    let dims = FluxNeutralDimensions::derive(config)?;
    let mut sketch = Sketch::new(config.trace_width);
    sketch.outline(config.outer_radius);

    draw_loops(&mut sketch, config, &dims)?;
    draw_tracks(&mut sketch, config, &dims);
    draw_corners(&mut sketch, config, &dims)?;
    draw_via_runs(&mut sketch, config, &dims);
    draw_taps(&mut sketch, config, &dims)?;

    let totals = sketch.totals();
    debug!(
        turns = config.turns,
        vias = totals.via_count,
        trace_length = totals.trace_length,
        "flux-neutral layout complete"
    );
    Ok(sketch.finish(flux_neutral_report(config)))
}

fn draw_loops(
    sketch: &mut Sketch,
    config: &FluxNeutralConfig,
    dims: &FluxNeutralDimensions,
) -> Result<(), CoilError> {
    let (cx, sy) = (dims.arc_center_x, dims.arc_start_y);
    for i in 0..config.turns {
        let step = f64::from(i) * dims.pitch;
        sketch.arc(
            config.layers.first,
            Point::new(cx, 0.0),
            Point::new(cx, sy - step),
            180.0,
        )?;
        sketch.arc(
            config.layers.second,
            Point::new(-cx, 0.0),
            Point::new(-cx, -sy + step),
            180.0,
        )?;
    }
    Ok(())
}

fn draw_tracks(sketch: &mut Sketch, config: &FluxNeutralConfig, dims: &FluxNeutralDimensions) {
    let (x, half) = (dims.track_x, dims.track_half_length);
    for i in 0..config.turns {
        let tx = f64::from(i).mul_add(-dims.pitch, x);
        if i + 1 < config.turns {
            sketch.line(config.layers.first, Point::new(tx, half), Point::new(tx, -half));
        }
        sketch.line(config.layers.second, Point::new(tx, half), Point::new(tx, -half));
    }
    // The innermost front track stops short to break out to the tap.
    sketch.line(
        config.layers.first,
        Point::new(-x, half),
        Point::new(-x, 2.0f64.mul_add(dims.via_clearance, -half)),
    );
}

fn draw_corners(
    sketch: &mut Sketch,
    config: &FluxNeutralConfig,
    dims: &FluxNeutralDimensions,
) -> Result<(), CoilError> {
    let cx = dims.track_x + config.min_radius;
    let cy = dims.track_half_length;
    let (first, second) = (config.layers.first, config.layers.second);
    for i in 0..config.turns {
        let reach = f64::from(i).mul_add(dims.pitch, config.min_radius);
        corner(sketch, first, Point::new(cx, cy), Point::new(cx - reach, cy), -90.0)?;
        if i > 0 {
            corner(
                sketch,
                first,
                Point::new(-cx + dims.pitch, -cy),
                Point::new(-cx + reach, -cy),
                -90.0,
            )?;
        }
        corner(sketch, second, Point::new(-cx, cy), Point::new(-cx + reach, cy), 90.0)?;
        corner(sketch, second, Point::new(cx, -cy), Point::new(cx - reach, -cy), 90.0)?;
    }
    Ok(())
}

/// Zero-radius corners (innermost loop with no minimum radius) are skipped.
fn corner(
    sketch: &mut Sketch,
    layer: Layer,
    center: Point,
    start: Point,
    degrees: f64,
) -> Result<(), CoilError> {
    if (start.x - center.x).hypot(start.y - center.y) <= MIN_CORNER_RADIUS {
        return Ok(());
    }
    sketch.arc(layer, center, start, degrees)
}

fn draw_via_runs(sketch: &mut Sketch, config: &FluxNeutralConfig, dims: &FluxNeutralDimensions) {
    let (x, y, gap) = (dims.arc_center_x, dims.arc_start_y, dims.via_gap);
    let (first, second) = (config.layers.first, config.layers.second);

    for i in 0..config.turns {
        let step = f64::from(i) * dims.pitch;
        sketch.line(second, Point::new(-x, -y + step), Point::new(-x - gap, -y + step));
        if i > 0 {
            sketch.line(
                first,
                Point::new(x, -y + step),
                Point::new(x + gap + dims.pitch, -y + step),
            );
        }
    }

    for i in 0..config.turns {
        let step = f64::from(i) * dims.pitch;
        let (right, left) = if i % 2 == 1 {
            (first, second)
        } else {
            (second, first)
        };
        sketch.line(right, Point::new(x, y - step), Point::new(x + gap, y - step));
        sketch.line(left, Point::new(-x, y - step), Point::new(-x - gap, y - step));

        let offset = if i % 2 == 1 { gap } else { 0.0 };
        sketch.via(
            VIA_PAD_NUMBER,
            Point::new(x + offset, y - step),
            dims.via_diameter,
            config.via_drill_diameter,
        );
        sketch.via(
            VIA_PAD_NUMBER,
            Point::new(-x - offset, y - step),
            dims.via_diameter,
            config.via_drill_diameter,
        );
    }
}

fn draw_taps(
    sketch: &mut Sketch,
    config: &FluxNeutralConfig,
    dims: &FluxNeutralDimensions,
) -> Result<(), CoilError> {
    let (first, second) = (config.layers.first, config.layers.second);
    let aa = dims.via_clearance;
    let x = dims.arc_center_x;
    let y = dims.arc_start_y;
    let pad_y = -y - aa - config.stub_length;

    // Outer end: curl off the outermost front arc straight down to pad 1.
    sketch.arc(first, Point::new(x, -y - aa), Point::new(x, -y), -90.0)?;
    sketch.line(first, Point::new(x + aa, -y - aa), Point::new(x + aa, pad_y));
    sketch.pad(1, Point::new(x + aa, pad_y), dims.pad_diameter, config.pad_drill_diameter);

    // Inner end: dive to the back layer to pass under the coil, then back up.
    let track_x = dims.track_x;
    let half = dims.track_half_length;
    let dive = Point::new(-track_x - aa, -half + aa);
    sketch.line(first, Point::new(-track_x, 2.0f64.mul_add(aa, -half)), dive);
    sketch.via(VIA_PAD_NUMBER, dive, dims.via_diameter, config.via_drill_diameter);

    let under_y = f64::from(config.turns - 1).mul_add(-dims.pitch, -half - aa);
    let under = Point::new(dive.x, under_y);
    let surface = Point::new(dive.x + config.min_radius, under_y - config.min_radius);
    sketch.line(second, dive, under);
    sketch.line(second, under, surface);
    sketch.via(VIA_PAD_NUMBER, surface, dims.via_diameter, config.via_drill_diameter);

    sketch.line(first, surface, Point::new(surface.x, pad_y));
    sketch.pad(2, Point::new(surface.x, pad_y), dims.pad_diameter, config.pad_drill_diameter);
    Ok(())
}
