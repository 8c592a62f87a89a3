//! Per-layer preview tessellation of a coil layout.

use tracing::{debug, warn};

use crate::coil::{DrawInstruction, Layer};
use crate::error::CoilError;

use super::arc::stroke_arc;
use super::pad::fill_annulus;
use super::stroke::stroke_line;
use super::types::{GeometryBuilder, LayerGeometry, Point};

/// Triangulates every instruction that puts ink on `layer`.
///
/// Pads and vias appear on every copper layer. Text is not rendered. Degenerate
/// primitives are skipped with a warning on the returned geometry.
///
/// # Errors
///
/// Returns [`CoilError::Preview`] for non-finite coordinates or widths.
pub fn render_layer(
    instructions: &[DrawInstruction],
    layer: Layer,
) -> Result<LayerGeometry, CoilError> {
    let mut builder = GeometryBuilder::new();
    let mut rendered = 0u32;

    for instruction in instructions.iter().filter(|i| i.touches(layer)) {
        match instruction {
            DrawInstruction::Arc {
                center_x,
                center_y,
                start_x,
                start_y,
                signed_degrees,
                width,
                ..
            } => stroke_arc(
                &mut builder,
                Point::new(*center_x, *center_y),
                Point::new(*start_x, *start_y),
                *signed_degrees,
                *width,
            )?,
            DrawInstruction::Line {
                x1,
                y1,
                x2,
                y2,
                width,
                ..
            } => stroke_line(
                &mut builder,
                Point::new(*x1, *y1),
                Point::new(*x2, *y2),
                *width,
            )?,
            DrawInstruction::Circle {
                center_x,
                center_y,
                radius,
                width,
                ..
            } => fill_annulus(
                &mut builder,
                Point::new(*center_x, *center_y),
                radius + width / 2.0,
                radius - width / 2.0,
            )?,
            DrawInstruction::Pad(pad) => fill_annulus(
                &mut builder,
                pad.center(),
                pad.diameter / 2.0,
                pad.drill_diameter / 2.0,
            )?,
            DrawInstruction::Text { .. } => continue,
        }
        rendered = rendered.saturating_add(1);
    }

    let mut geometry = builder.build();
    geometry.instruction_count = rendered;
    for message in &geometry.warnings {
        warn!(%layer, "{message}");
    }
    debug!(
        %layer,
        instructions = rendered,
        vertices = geometry.vertex_count,
        warnings = geometry.warnings.len(),
        "layer preview tessellated"
    );
    Ok(geometry)
}
