//! Resistance estimate and footprint annotation text.

use std::fmt::Write as _;

use serde::Serialize;

use super::config::{CoilConfig, FluxNeutralConfig, SingleTurnConfig};

/// Thickness of 1 oz/ft² copper, in metres.
pub const TRACE_THICKNESS_1OZ: f64 = 0.035e-3;

/// Resistivity of copper at 25 °C, in Ω·m.
pub const RHO_COPPER: f64 = 1.678e-8;

const MM_PER_M: f64 = 1e3;

/// Derived metrics and the text placed on the footprint.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CoilReport {
    /// Series resistance estimate, when the generator tracks copper weight.
    pub resistance_ohms: Option<f64>,
    /// Parameter dump for the fabrication layer.
    pub fab_notes: String,
    /// Short summary for the silkscreen.
    pub summary: Option<String>,
}

/// Series resistance of a uniform rectangular trace.
///
/// Lengths are millimetres; the result is ohms.
pub fn resistance_ohms(trace_length_mm: f64, trace_width_mm: f64, copper_thickness_oz: f64) -> f64 {
    RHO_COPPER * (trace_length_mm / MM_PER_M)
        / (TRACE_THICKNESS_1OZ * copper_thickness_oz * (trace_width_mm / MM_PER_M))
}

/// Silkscreen summary: turn count and resistance.
pub fn summary(turns: u32, resistance: f64, copper_thickness_oz: f64) -> String {
    format!("Turns: {turns}\nR(@25C & {copper_thickness_oz:.1} Oz Cu): {resistance:.4} Ohms\n")
}

pub(crate) fn spiral_report(config: &CoilConfig, trace_length: f64) -> CoilReport {
    let resistance = resistance_ohms(trace_length, config.trace_width, config.copper_thickness_oz);

    let mut notes = String::from("Coil Generator from ID, 2 Layers\n");
    let _ = writeln!(notes, "Direction: {}", config.direction.label());
    let _ = writeln!(notes, "Inner Radius: {}", config.aperture_radius);
    let _ = writeln!(notes, "Inner Ring Gap: {}", config.aperture_gap);
    let _ = writeln!(notes, "Turns: {}", config.turns);
    let _ = writeln!(notes, "Layers (Start->Finish): {}", config.layers);
    push_fab_specs(&mut notes, config.trace_width, config.trace_spacing);
    let _ = writeln!(
        notes,
        "Via Drill/annular ring: {}/{}",
        config.via_drill_diameter, config.via_annular_ring
    );
    push_pad_specs(&mut notes, config.pad_drill_diameter, config.pad_annular_ring);

    CoilReport {
        resistance_ohms: Some(resistance),
        fab_notes: notes,
        summary: Some(summary(config.turns, resistance, config.copper_thickness_oz)),
    }
}

pub(crate) fn single_turn_report(config: &SingleTurnConfig, trace_length: f64) -> CoilReport {
    let resistance = resistance_ohms(trace_length, config.trace_width, config.copper_thickness_oz);

    let mut notes = String::from("Coil Generator, Single Layer, 1 Turn\n");
    let _ = writeln!(notes, "Direction: {}", config.direction.label());
    let _ = writeln!(notes, "Radius: {}", config.radius);
    let _ = writeln!(notes, "Layer: {}", config.layer);
    push_fab_specs(&mut notes, config.trace_width, config.trace_spacing);
    push_pad_specs(&mut notes, config.pad_drill_diameter, config.pad_annular_ring);
    let _ = writeln!(notes, "Stub Length: {}", config.stub_length);

    CoilReport {
        resistance_ohms: Some(resistance),
        fab_notes: notes,
        summary: Some(summary(1, resistance, config.copper_thickness_oz)),
    }
}

pub(crate) fn flux_neutral_report(config: &FluxNeutralConfig) -> CoilReport {
    let mut notes = String::from("Flux Neutral Coil\n");
    let _ = writeln!(notes, "Outer Radius: {}", config.outer_radius);
    let _ = writeln!(notes, "Outer Ring Gap: {}", config.outer_gap);
    let _ = writeln!(notes, "Turns: {}", config.turns);
    let _ = writeln!(notes, "Min Radius: {}", config.min_radius);
    let _ = writeln!(notes, "Layers (Start->Finish): {}", config.layers);
    push_fab_specs(&mut notes, config.trace_width, config.trace_spacing);
    let _ = writeln!(
        notes,
        "Via Drill/annular ring: {}/{}",
        config.via_drill_diameter, config.via_annular_ring
    );
    push_pad_specs(&mut notes, config.pad_drill_diameter, config.pad_annular_ring);
    let _ = writeln!(notes, "Stub Length: {}", config.stub_length);

    CoilReport {
        resistance_ohms: None,
        fab_notes: notes,
        summary: None,
    }
}

fn push_fab_specs(notes: &mut String, trace_width: f64, trace_spacing: f64) {
    let _ = writeln!(notes, "Trace Width/space: {trace_width}/{trace_spacing}");
}

fn push_pad_specs(notes: &mut String, drill: f64, ring: f64) {
    let _ = writeln!(notes, "Pad Drill/annular ring: {drill}/{ring}");
}
