//! Annular copper: through-hole pads, vias and reference outlines.
//!
//! The ring is a polygon with one hole, triangulated with `earclip`.

use std::f64::consts::TAU;

use crate::error::CoilError;

use super::arc::{segment_count, DEFAULT_ARC_SEGMENT_LENGTH};
use super::types::{GeometryBuilder, Point};

const MAX_RING_SEGMENTS: u32 = 512;

/// Fills the ring between `inner_radius` and `outer_radius` around `center`.
///
/// A non-positive inner radius fills a solid disc. A ring with no copper
/// (outer radius not above the inner one) records a warning.
///
/// # Errors
///
/// Returns [`CoilError::Preview`] for non-finite input or vertex index
/// overflow.
pub fn fill_annulus(
    builder: &mut GeometryBuilder,
    center: Point,
    outer_radius: f64,
    inner_radius: f64,
) -> Result<(), CoilError> {
    if ![center.x, center.y, outer_radius, inner_radius]
        .iter()
        .all(|v| v.is_finite())
    {
        return Err(CoilError::Preview(format!(
            "ring at {center:?} has non-finite radii {outer_radius}/{inner_radius}"
        )));
    }
    if outer_radius <= f64::EPSILON || outer_radius <= inner_radius {
        builder.warn(format!(
            "ring at ({}, {}) has no copper (outer {outer_radius}, inner {inner_radius}); skipping",
            center.x, center.y
        ));
        return Ok(());
    }

    let segments =
        segment_count(TAU * outer_radius, DEFAULT_ARC_SEGMENT_LENGTH).min(MAX_RING_SEGMENTS);
    if inner_radius <= f64::EPSILON {
        builder.push_ngon(center.x, center.y, outer_radius, segments);
        return Ok(());
    }

    let mut flat = Vec::with_capacity(segments as usize * 4);
    push_circle(&mut flat, center, outer_radius, segments, 1.0);
    let hole_start = flat.len() / 2;
    push_circle(&mut flat, center, inner_radius, segments, -1.0);

    let indices = earclip::earcut::earcut(&flat, &[hole_start], 2);
    if indices.is_empty() {
        builder.warn("earclip produced no triangles for ring; skipping".to_string());
        return Ok(());
    }

    let mut base: Option<u32> = None;
    for pair in flat.chunks_exact(2) {
        if let [x, y] = *pair {
            let idx = builder.push_vertex(x, y);
            base.get_or_insert(idx);
        }
    }
    let base = base.unwrap_or(0);
    for tri in indices.chunks_exact(3) {
        if let [ia, ib, ic] = *tri {
            builder.push_triangle(
                offset_index(base, ia)?,
                offset_index(base, ib)?,
                offset_index(base, ic)?,
            );
        }
    }
    Ok(())
}

/// Appends `segments` points of a circle; `sense` is `1.0` for
/// counter-clockwise, `-1.0` for clockwise.
fn push_circle(flat: &mut Vec<f64>, center: Point, radius: f64, segments: u32, sense: f64) {
    for i in 0..segments {
        let angle = sense * TAU * f64::from(i) / f64::from(segments);
        flat.push(radius.mul_add(angle.cos(), center.x));
        flat.push(radius.mul_add(angle.sin(), center.y));
    }
}

fn offset_index(base: u32, offset: usize) -> Result<u32, CoilError> {
    u32::try_from(offset)
        .ok()
        .and_then(|offset| base.checked_add(offset))
        .ok_or_else(|| CoilError::Preview("vertex index overflow".into()))
}
