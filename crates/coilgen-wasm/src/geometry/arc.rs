//! Arc tessellation and widening.
//!
//! Arcs are described the way the generators emit them: a center, a start
//! point and a signed sweep in degrees, positive from +X toward +Y. The
//! centerline is split into short chords; the widened arc is a band of quads
//! between the inner and outer edge, closed by round caps.

use std::f64::consts::{FRAC_PI_2, PI};

use crate::error::CoilError;

use super::stroke::{half_width, ROUND_CAP_SEGMENTS};
use super::types::{GeometryBuilder, Point};

const MIN_ARC_SEGMENTS: u32 = 16;
const MAX_ARC_SEGMENTS: u32 = 4096;
const MIN_SEGMENT_LENGTH_FLOOR: f64 = 0.01;

/// Chord length used when no stroke width is available to size segments.
pub const DEFAULT_ARC_SEGMENT_LENGTH: f64 = 0.1;

/// Point reached after sweeping `signed_degrees` from `start` around `center`.
pub fn arc_end_point(center: Point, start: Point, signed_degrees: f64) -> Point {
    let radius = center.distance(start);
    let angle = (start.y - center.y).atan2(start.x - center.x) + signed_degrees.to_radians();
    Point::new(
        radius.mul_add(angle.cos(), center.x),
        radius.mul_add(angle.sin(), center.y),
    )
}

/// Tessellates an arc into centerline points, first point at `start`.
///
/// Returns `None` for a zero radius, a zero sweep or non-finite input.
pub fn arc_centerline(
    center: Point,
    start: Point,
    signed_degrees: f64,
    max_segment_length: f64,
) -> Option<Vec<Point>> {
    let radius = center.distance(start);
    let sweep = signed_degrees.to_radians();
    if !radius.is_finite() || radius <= f64::EPSILON || !sweep.is_finite() || sweep.abs() <= f64::EPSILON {
        return None;
    }

    let start_angle = (start.y - center.y).atan2(start.x - center.x);
    let segments = segment_count(sweep.abs() * radius, max_segment_length);
    Some(
        (0..=segments)
            .map(|step| {
                let angle = sweep.mul_add(f64::from(step) / f64::from(segments), start_angle);
                Point::new(
                    radius.mul_add(angle.cos(), center.x),
                    radius.mul_add(angle.sin(), center.y),
                )
            })
            .collect(),
    )
}

/// Widens an arc of the given stroke `width` into triangles.
///
/// Degenerate arcs record a warning and draw nothing.
///
/// # Errors
///
/// Returns [`CoilError::Preview`] when `width` is not finite.
pub fn stroke_arc(
    builder: &mut GeometryBuilder,
    center: Point,
    start: Point,
    signed_degrees: f64,
    width: f64,
) -> Result<(), CoilError> {
    let Some(half) = half_width(builder, width)? else {
        return Ok(());
    };
    let radius = center.distance(start);
    let Some(points) = arc_centerline(
        center,
        start,
        signed_degrees,
        max_segment_length_from_stroke(width),
    ) else {
        builder.warn(format!(
            "degenerate arc at ({}, {}) with radius {radius} and sweep {signed_degrees}; skipping",
            center.x, center.y
        ));
        return Ok(());
    };

    let inner_scale = (radius - half).max(0.0) / radius;
    let outer_scale = (radius + half) / radius;
    let mut previous: Option<(u32, u32)> = None;
    for point in &points {
        let dx = point.x - center.x;
        let dy = point.y - center.y;
        let inner = builder.push_vertex(
            dx.mul_add(inner_scale, center.x),
            dy.mul_add(inner_scale, center.y),
        );
        let outer = builder.push_vertex(
            dx.mul_add(outer_scale, center.x),
            dy.mul_add(outer_scale, center.y),
        );
        if let Some((prev_inner, prev_outer)) = previous {
            builder.push_quad(prev_inner, prev_outer, outer, inner);
        }
        previous = Some((inner, outer));
    }

    // Caps face away from the arc body, along the tangent.
    let sense = signed_degrees.signum();
    let start_angle = (start.y - center.y).atan2(start.x - center.x);
    let end_angle = start_angle + signed_degrees.to_radians();
    if let (Some(first), Some(last)) = (points.first(), points.last()) {
        let back = sense.mul_add(-FRAC_PI_2, start_angle);
        push_cap(builder, *first, half, back - FRAC_PI_2, back + FRAC_PI_2);
        let ahead = sense.mul_add(FRAC_PI_2, end_angle);
        push_cap(builder, *last, half, ahead - FRAC_PI_2, ahead + FRAC_PI_2);
    }
    Ok(())
}

fn push_cap(builder: &mut GeometryBuilder, at: Point, radius: f64, from: f64, to: f64) {
    let hub = builder.push_vertex(at.x, at.y);
    let step = (to - from) / f64::from(ROUND_CAP_SEGMENTS);
    let mut previous: Option<u32> = None;
    for idx in 0..=ROUND_CAP_SEGMENTS {
        let angle = step.mul_add(f64::from(idx), from);
        let rim = builder.push_vertex(
            radius.mul_add(angle.cos(), at.x),
            radius.mul_add(angle.sin(), at.y),
        );
        if let Some(previous) = previous {
            builder.push_triangle(hub, previous, rim);
        }
        previous = Some(rim);
    }
}

fn max_segment_length_from_stroke(stroke_width: f64) -> f64 {
    (stroke_width * 0.25).max(MIN_SEGMENT_LENGTH_FLOOR)
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub(crate) fn segment_count(length: f64, max_segment_length: f64) -> u32 {
    let raw = (length / max_segment_length).ceil();
    if !raw.is_finite() || raw <= 0.0 {
        return MIN_ARC_SEGMENTS;
    }
    // Bounded above, so the cast cannot truncate.
    (raw.min(f64::from(MAX_ARC_SEGMENTS)) as u32).max(MIN_ARC_SEGMENTS)
}

/// Length of an arc of `radius` sweeping `signed_degrees`.
pub fn arc_length(radius: f64, signed_degrees: f64) -> f64 {
    radius * signed_degrees.abs() * PI / 180.0
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn assert_point(actual: Point, x: f64, y: f64) {
        assert!(
            (actual.x - x).abs() < EPSILON && (actual.y - y).abs() < EPSILON,
            "expected ({x}, {y}), got {actual:?}"
        );
    }

    #[test]
    fn positive_sweep_turns_from_x_toward_y() {
        let end = arc_end_point(Point::new(0.0, 0.0), Point::new(1.0, 0.0), 90.0);
        assert_point(end, 0.0, 1.0);
        let end = arc_end_point(Point::new(0.0, 0.0), Point::new(1.0, 0.0), -90.0);
        assert_point(end, 0.0, -1.0);
    }

    #[test]
    fn half_turn_lands_on_the_mirrored_point() {
        let end = arc_end_point(Point::new(0.4, 0.0), Point::new(-30.6, 0.0), 180.0);
        assert_point(end, 31.4, 0.0);
    }

    #[test]
    fn centerline_spans_start_to_end_on_the_radius() {
        let center = Point::new(1.0, 2.0);
        let start = Point::new(4.0, 2.0);
        let points = arc_centerline(center, start, -270.0, 0.05).expect("arc");
        assert!(points.len() > usize::try_from(MIN_ARC_SEGMENTS).unwrap_or(0));
        assert_point(*points.first().expect("first"), 4.0, 2.0);
        assert_point(*points.last().expect("last"), 1.0, 5.0);
        for point in &points {
            assert!((center.distance(*point) - 3.0).abs() < EPSILON);
        }
    }

    #[test]
    fn zero_radius_or_zero_sweep_has_no_centerline() {
        let origin = Point::new(0.0, 0.0);
        assert!(arc_centerline(origin, origin, 90.0, 0.1).is_none());
        assert!(arc_centerline(origin, Point::new(1.0, 0.0), 0.0, 0.1).is_none());
    }

    #[test]
    fn stroked_arc_bounds_cover_the_band() {
        let mut builder = GeometryBuilder::new();
        let result = stroke_arc(
            &mut builder,
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            180.0,
            2.0,
        );
        assert!(result.is_ok());
        let geom = builder.build();
        assert!(geom.warnings.is_empty());
        // the apex falls between chords
        assert!((geom.bounds.max_y - 11.0).abs() < 1e-2);
        assert!((geom.bounds.max_x - 11.0).abs() < 1e-4);
        assert!((geom.bounds.min_x + 11.0).abs() < 1e-4);
        // round caps dip below the X axis
        assert!((geom.bounds.min_y + 1.0).abs() < 1e-4);
    }

    #[test]
    fn degenerate_arc_warns() {
        let mut builder = GeometryBuilder::new();
        let origin = Point::new(0.0, 0.0);
        assert!(stroke_arc(&mut builder, origin, origin, 90.0, 0.2).is_ok());
        let geom = builder.build();
        assert_eq!(geom.vertex_count, 0);
        assert_eq!(geom.warnings.len(), 1);
    }

    #[test]
    fn arc_length_of_a_half_turn() {
        assert!((arc_length(2.0, -180.0) - 2.0 * PI).abs() < EPSILON);
    }
}
