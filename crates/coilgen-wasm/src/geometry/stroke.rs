//! Straight trace widening.
//!
//! A segment becomes a quad along its length plus a semicircle cap at each
//! end, the shape a round-tipped trace leaves on copper.

use std::f64::consts::{FRAC_PI_2, PI};

use crate::error::CoilError;

use super::types::{GeometryBuilder, Point};

/// Segments per semicircular end cap.
pub const ROUND_CAP_SEGMENTS: u32 = 16;

/// Segments used for a zero-length trace, drawn as a dot.
const DOT_SEGMENTS: u32 = 32;

/// Widens the segment `from -> to` into triangles.
///
/// # Errors
///
/// Returns [`CoilError::Preview`] when `width` or an endpoint is not finite.
/// A zero width only records a warning.
pub fn stroke_line(
    builder: &mut GeometryBuilder,
    from: Point,
    to: Point,
    width: f64,
) -> Result<(), CoilError> {
    let Some(half_width) = half_width(builder, width)? else {
        return Ok(());
    };
    if ![from.x, from.y, to.x, to.y].iter().all(|v| v.is_finite()) {
        return Err(CoilError::Preview(format!(
            "trace endpoint is not finite: {from:?} -> {to:?}"
        )));
    }

    let delta_x = to.x - from.x;
    let delta_y = to.y - from.y;
    let length_sq = delta_x.mul_add(delta_x, delta_y * delta_y);
    if length_sq <= f64::EPSILON {
        builder.push_ngon(from.x, from.y, half_width, DOT_SEGMENTS);
        return Ok(());
    }

    let inverse_length = 1.0 / length_sq.sqrt();
    let normal_x = -delta_y * inverse_length;
    let normal_y = delta_x * inverse_length;

    let a = builder.push_vertex(
        normal_x.mul_add(half_width, from.x),
        normal_y.mul_add(half_width, from.y),
    );
    let b = builder.push_vertex(
        (-normal_x).mul_add(half_width, from.x),
        (-normal_y).mul_add(half_width, from.y),
    );
    let c = builder.push_vertex(
        (-normal_x).mul_add(half_width, to.x),
        (-normal_y).mul_add(half_width, to.y),
    );
    let d = builder.push_vertex(
        normal_x.mul_add(half_width, to.x),
        normal_y.mul_add(half_width, to.y),
    );
    builder.push_quad(a, b, c, d);

    let heading = delta_y.atan2(delta_x);
    push_round_cap(builder, from, half_width, heading + FRAC_PI_2, heading + PI + FRAC_PI_2);
    push_round_cap(builder, to, half_width, heading - FRAC_PI_2, heading + FRAC_PI_2);
    Ok(())
}

/// Validates a stroke width and halves it. `None` means nothing to draw.
pub(crate) fn half_width(
    builder: &mut GeometryBuilder,
    width: f64,
) -> Result<Option<f64>, CoilError> {
    if !width.is_finite() {
        return Err(CoilError::Preview(format!(
            "stroke width must be finite, got {width}"
        )));
    }
    if width <= f64::EPSILON {
        builder.warn(format!("stroke width {width} is not positive; skipping"));
        return Ok(None);
    }
    Ok(Some(width / 2.0))
}

fn push_round_cap(
    builder: &mut GeometryBuilder,
    center: Point,
    radius: f64,
    start_angle: f64,
    end_angle: f64,
) {
    let center_index = builder.push_vertex(center.x, center.y);
    let step = (end_angle - start_angle) / f64::from(ROUND_CAP_SEGMENTS);

    let mut previous: Option<u32> = None;
    for idx in 0..=ROUND_CAP_SEGMENTS {
        let angle = step.mul_add(f64::from(idx), start_angle);
        let current = builder.push_vertex(
            radius.mul_add(angle.cos(), center.x),
            radius.mul_add(angle.sin(), center.y),
        );
        if let Some(previous) = previous {
            builder.push_triangle(center_index, previous, current);
        }
        previous = Some(current);
    }
}
