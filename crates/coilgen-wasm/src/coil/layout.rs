//! Layout results and the accumulator the generators draw into.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::error::CoilError;
use crate::geometry::{arc_length, Point};

use super::instruction::{DrawInstruction, DrawingSurface, Pad, PadLayers};
use super::layer::Layer;
use super::report::CoilReport;

/// Arcs at or below this radius are treated as degenerate.
const MIN_ARC_RADIUS: f64 = 1e-9;

/// Stroke width of the aperture reference outline.
pub const OUTLINE_WIDTH: f64 = 0.1;

/// Counters accumulated while a layout is assembled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunningTotals {
    /// Total copper trace length in millimetres, both layers included.
    pub trace_length: f64,
    /// Number of vias placed.
    pub via_count: u32,
}

/// Output of one generation run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CoilLayout {
    /// Instructions in emission order.
    pub instructions: Vec<DrawInstruction>,
    /// Final counters.
    pub totals: RunningTotals,
    /// Sorted, de-duplicated pad numbers that are intentionally shorted.
    pub net_tie_group: Vec<u32>,
    /// Derived metrics and annotation text.
    pub report: CoilReport,
}

impl CoilLayout {
    /// Net-tie pad group in the host's comma-separated form, e.g. `"1,2,3"`.
    pub fn net_tie_pad_group(&self) -> String {
        self.net_tie_group
            .iter()
            .map(u32::to_string)
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Streams every instruction into `surface`, in order.
    pub fn replay<S: DrawingSurface + ?Sized>(&self, surface: &mut S) {
        for instruction in &self.instructions {
            surface.draw(instruction);
        }
    }

    /// All pads and vias.
    pub fn pads(&self) -> impl Iterator<Item = &Pad> + '_ {
        self.instructions.iter().filter_map(|instruction| match instruction {
            DrawInstruction::Pad(pad) => Some(pad),
            _ => None,
        })
    }

    /// Number of arc instructions on `layer`.
    pub fn arc_count(&self, layer: Layer) -> usize {
        self.instructions
            .iter()
            .filter(|instruction| {
                matches!(instruction, DrawInstruction::Arc { layer: l, .. } if *l == layer)
            })
            .count()
    }
}

/// Accumulator shared by the generators.
///
/// Owns the instruction list and the running totals for exactly one run; a
/// fresh sketch starts from zero, so nothing leaks between runs.
#[derive(Debug)]
pub(crate) struct Sketch {
    instructions: Vec<DrawInstruction>,
    totals: RunningTotals,
    pad_numbers: BTreeSet<u32>,
    trace_width: f64,
}

impl Sketch {
    pub(crate) const fn new(trace_width: f64) -> Self {
        Self {
            instructions: Vec::new(),
            totals: RunningTotals {
                trace_length: 0.0,
                via_count: 0,
            },
            pad_numbers: BTreeSet::new(),
            trace_width,
        }
    }

    pub(crate) const fn totals(&self) -> RunningTotals {
        self.totals
    }

    /// Draws the same arc on two layers with opposite sweep, both centered on
    /// the X axis. Layer A sweeps `+degrees·direction`.
    pub(crate) fn arc_pair_y_sym(
        &mut self,
        layers: (Layer, Layer),
        center_x: f64,
        start_x: f64,
        degrees: f64,
        direction: f64,
    ) -> Result<(), CoilError> {
        let radius = checked_radius(center_x - start_x)?;
        let center = Point::new(center_x, 0.0);
        let start = Point::new(start_x, 0.0);
        let width = self.trace_width;
        self.instructions
            .arc(center, start, degrees * direction, width, layers.0);
        self.instructions
            .arc(center, start, -degrees * direction, width, layers.1);
        self.totals.trace_length += 2.0 * arc_length(radius, degrees);
        Ok(())
    }

    /// Draws a single arc and adds its length.
    pub(crate) fn arc(
        &mut self,
        layer: Layer,
        center: Point,
        start: Point,
        signed_degrees: f64,
    ) -> Result<(), CoilError> {
        let radius = checked_radius((start.x - center.x).hypot(start.y - center.y))?;
        let width = self.trace_width;
        self.instructions
            .arc(center, start, signed_degrees, width, layer);
        self.totals.trace_length += arc_length(radius, signed_degrees);
        Ok(())
    }

    /// Draws a straight trace and adds its length.
    pub(crate) fn line(&mut self, layer: Layer, from: Point, to: Point) {
        let width = self.trace_width;
        self.instructions.line(from, to, width, layer);
        self.totals.trace_length += (to.x - from.x).hypot(to.y - from.y);
    }

    /// Draws the aperture reference outline.
    pub(crate) fn outline(&mut self, radius: f64) {
        self.instructions
            .circle(Point::new(0.0, 0.0), radius, OUTLINE_WIDTH, Layer::OUTLINE);
    }

    /// Places a terminal pad.
    pub(crate) fn pad(&mut self, number: u32, at: Point, diameter: f64, drill_diameter: f64) {
        self.place(number, at, diameter, drill_diameter, false);
    }

    /// Places a via and counts it.
    pub(crate) fn via(&mut self, number: u32, at: Point, diameter: f64, drill_diameter: f64) {
        self.place(number, at, diameter, drill_diameter, true);
        self.totals.via_count += 1;
    }

    fn place(&mut self, number: u32, at: Point, diameter: f64, drill_diameter: f64, is_via: bool) {
        self.instructions.pad(&Pad {
            number,
            x: at.x,
            y: at.y,
            diameter,
            drill_diameter,
            is_via,
            layers: PadLayers::AllCopper,
        });
        self.pad_numbers.insert(number);
    }

    /// Closes the run: appends the report texts and hands everything off.
    pub(crate) fn finish(mut self, report: CoilReport) -> CoilLayout {
        let origin = Point::new(0.0, 0.0);
        self.instructions
            .text(&report.fab_notes, origin, Layer::FAB_NOTES);
        if let Some(summary) = &report.summary {
            self.instructions
                .text(summary, origin, Layer::FrontSilkscreen);
        }
        CoilLayout {
            instructions: self.instructions,
            totals: self.totals,
            net_tie_group: self.pad_numbers.into_iter().collect(),
            report,
        }
    }
}

fn checked_radius(radius: f64) -> Result<f64, CoilError> {
    let radius = radius.abs();
    if !radius.is_finite() || radius <= MIN_ARC_RADIUS {
        return Err(CoilError::geometry(format!(
            "arc radius must be positive, got {radius}"
        )));
    }
    Ok(radius)
}
