//! Integration tests for the two-layer spiral generator.

use std::f64::consts::PI;

use coilgen_wasm::coil::{
    emit_spiral, layout_spiral, winding_plan, CoilConfig, Direction, DrawInstruction,
    DrawingSurface, Layer, LayerPair, Pad, RunningTotals,
};
use coilgen_wasm::error::CoilError;
use coilgen_wasm::geometry::{arc_end_point, Point};

#[derive(Debug, Clone, Copy, PartialEq)]
struct RecordedArc {
    center: Point,
    start: Point,
    signed_degrees: f64,
    layer: Layer,
}

/// Surface that keeps everything it is asked to draw.
#[derive(Debug, Default)]
struct Recorder {
    arcs: Vec<RecordedArc>,
    lines: usize,
    circles: usize,
    pads: Vec<Pad>,
    texts: Vec<(String, Layer)>,
}

impl Recorder {
    fn is_empty(&self) -> bool {
        self.arcs.is_empty()
            && self.lines == 0
            && self.circles == 0
            && self.pads.is_empty()
            && self.texts.is_empty()
    }

    fn arcs_on(&self, layer: Layer) -> Vec<RecordedArc> {
        self.arcs.iter().copied().filter(|a| a.layer == layer).collect()
    }
}

impl DrawingSurface for Recorder {
    fn arc(&mut self, center: Point, start: Point, signed_degrees: f64, _width: f64, layer: Layer) {
        self.arcs.push(RecordedArc {
            center,
            start,
            signed_degrees,
            layer,
        });
    }

    fn line(&mut self, _from: Point, _to: Point, _width: f64, _layer: Layer) {
        self.lines += 1;
    }

    fn circle(&mut self, _center: Point, _radius: f64, _width: f64, _layer: Layer) {
        self.circles += 1;
    }

    fn pad(&mut self, pad: &Pad) {
        self.pads.push(*pad);
    }

    fn text(&mut self, text: &str, _at: Point, layer: Layer) {
        self.texts.push((text.to_string(), layer));
    }
}

fn config(turns: u32) -> CoilConfig {
    CoilConfig {
        turns,
        ..CoilConfig::default()
    }
}

#[allow(clippy::expect_used)]
fn record(config: &CoilConfig) -> (Recorder, RunningTotals) {
    let mut recorder = Recorder::default();
    let totals = emit_spiral(config, &mut recorder).expect("spiral should lay out");
    (recorder, totals)
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

#[test]
fn one_arc_pair_per_turn_plus_the_exit() {
    for turns in [1, 2, 5, 15] {
        let (recorder, totals) = record(&config(turns));
        let expected = turns as usize + 1;
        assert_eq!(recorder.arcs_on(Layer::FrontCopper).len(), expected);
        assert_eq!(recorder.arcs_on(Layer::BackCopper).len(), expected);

        let vias = recorder.pads.iter().filter(|p| p.is_via).count();
        let terminals: Vec<u32> = recorder
            .pads
            .iter()
            .filter(|p| !p.is_via)
            .map(|p| p.number)
            .collect();
        assert_eq!(vias, 1);
        assert_eq!(terminals, vec![1, 2]);
        assert_eq!(totals.via_count, 1);
        assert_eq!(recorder.circles, 1);
        assert_eq!(recorder.lines, 0);
    }
}

#[test]
fn trace_length_is_the_sum_of_recorded_arcs() {
    for turns in [1, 4, 15] {
        let (recorder, totals) = record(&config(turns));
        let sum: f64 = recorder
            .arcs
            .iter()
            .map(|a| a.center.distance(a.start) * PI * a.signed_degrees.abs() / 180.0)
            .sum();
        assert!(
            (totals.trace_length - sum).abs() < 1e-6,
            "turns {turns}: {} vs {sum}",
            totals.trace_length
        );
    }
}

#[test]
fn back_layer_mirrors_front_layer() {
    let (recorder, _) = record(&config(6));
    let front = recorder.arcs_on(Layer::FrontCopper);
    let back = recorder.arcs_on(Layer::BackCopper);
    assert_eq!(front.len(), back.len());
    for (a, b) in front.iter().zip(&back) {
        assert_eq!(a.center, b.center);
        assert_eq!(a.start, b.start);
        assert_close(a.signed_degrees, -b.signed_degrees);
    }
}

#[test]
fn every_arc_starts_where_the_previous_one_ends() {
    for turns in [1, 2, 7, 12] {
        let (recorder, _) = record(&config(turns));
        let front = recorder.arcs_on(Layer::FrontCopper);
        let back = recorder.arcs_on(Layer::BackCopper);
        for arcs in [front, back] {
            for pair in arcs.windows(2) {
                if let [previous, next] = pair {
                    let end =
                        arc_end_point(previous.center, previous.start, previous.signed_degrees);
                    assert!(end.distance(next.start) < 1e-9, "gap at {end:?}");
                }
            }
        }
    }
}

#[test]
#[allow(clippy::expect_used)]
fn odd_turn_count_mirrors_the_even_layout() {
    let even = winding_plan(&config(4)).expect("plan");
    let odd = winding_plan(&config(5)).expect("plan");
    for (e, o) in even.iter().zip(&odd) {
        assert_close(o.center_x, -e.center_x);
        assert_close(o.start_x, -e.start_x);
    }

    let (even_rec, _) = record(&config(4));
    let (odd_rec, _) = record(&config(5));
    let via_x = |r: &Recorder| r.pads.iter().find(|p| p.is_via).map(|p| p.x);
    let even_via = via_x(&even_rec).expect("via");
    let odd_via = via_x(&odd_rec).expect("via");
    assert_close(odd_via, -even_via);
}

#[test]
#[allow(clippy::expect_used)]
fn identical_configs_give_identical_layouts() {
    let a = layout_spiral(&config(9)).expect("layout");
    let b = layout_spiral(&config(9)).expect("layout");
    assert_eq!(a, b);
}

#[test]
#[allow(clippy::expect_used)]
fn axis_crossings_are_at_least_one_pitch_apart() {
    let configs = [
        config(2),
        config(15),
        CoilConfig {
            trace_width: 1.0,
            turns: 6,
            ..CoilConfig::default()
        },
    ];
    for cfg in configs {
        let pitch = cfg.trace_width + cfg.trace_spacing;
        let plan = winding_plan(&cfg).expect("plan");
        let mut positive = Vec::new();
        let mut negative = Vec::new();
        for turn in &plan {
            for x in [turn.start_x, turn.end_x()] {
                if x > 0.0 {
                    positive.push(x);
                } else {
                    negative.push(-x);
                }
            }
        }
        for side in [&mut positive, &mut negative] {
            side.sort_by(f64::total_cmp);
            side.dedup_by(|a, b| (*a - *b).abs() < 1e-9);
            for pair in side.windows(2) {
                if let [inner, outer] = pair {
                    assert!(outer - inner >= pitch - 1e-9, "{inner} and {outer} overlap");
                }
            }
            assert!(side.iter().all(|x| *x >= cfg.aperture_radius + cfg.aperture_gap));
        }
    }
}

#[test]
#[allow(clippy::expect_used)]
fn start_via_clears_neighbouring_traces() {
    for turns in [2, 3, 10] {
        let cfg = config(turns);
        let (recorder, _) = record(&cfg);
        let via = recorder.pads.iter().find(|p| p.is_via).expect("via");
        let needed = cfg.via_diameter() / 2.0 + cfg.trace_spacing + cfg.trace_width / 2.0;
        let plan = winding_plan(&cfg).expect("plan");
        let nearest = plan
            .iter()
            .flat_map(|t| [t.start_x, t.end_x()])
            .filter(|x| (x - via.x).abs() > 1e-9)
            .filter(|x| x.signum() == via.x.signum())
            .map(|x| (x - via.x).abs())
            .fold(f64::INFINITY, f64::min);
        assert!(nearest >= needed - 1e-9, "turns {turns}: {nearest} < {needed}");
    }
}

#[test]
#[allow(clippy::expect_used)]
fn winding_radii_grow_outward() {
    let plan = winding_plan(&config(15)).expect("plan");
    for pair in plan.windows(2) {
        if let [inner, outer] = pair {
            assert!(outer.radius() > inner.radius());
        }
    }
}

#[test]
fn counter_clockwise_negates_every_sweep_and_swaps_pads() {
    let (cw, _) = record(&config(4));
    let (ccw, _) = record(&CoilConfig {
        direction: Direction::CounterClockwise,
        ..config(4)
    });
    for (a, b) in cw.arcs.iter().zip(&ccw.arcs) {
        assert_close(a.signed_degrees, -b.signed_degrees);
    }
    let pad_y = |r: &Recorder, n: u32| r.pads.iter().find(|p| p.number == n).map(|p| p.y);
    assert_eq!(pad_y(&cw, 1).map(f64::signum), Some(-1.0));
    assert_eq!(pad_y(&ccw, 1).map(f64::signum), Some(1.0));
}

#[test]
fn invalid_configs_emit_nothing() {
    let bad = [
        config(0),
        CoilConfig {
            aperture_radius: 0.0,
            ..CoilConfig::default()
        },
        CoilConfig {
            layers: LayerPair::new(Layer::FrontCopper, Layer::FrontSilkscreen),
            ..CoilConfig::default()
        },
    ];
    for cfg in bad {
        let mut recorder = Recorder::default();
        let result = emit_spiral(&cfg, &mut recorder);
        assert!(matches!(result, Err(CoilError::InvalidConfiguration(_))));
        assert!(recorder.is_empty());
    }
}

#[test]
#[allow(clippy::expect_used)]
fn texts_go_to_fab_and_silkscreen() {
    let (recorder, _) = record(&config(15));
    let layers: Vec<Layer> = recorder.texts.iter().map(|(_, l)| *l).collect();
    assert_eq!(layers, vec![Layer::FAB_NOTES, Layer::FrontSilkscreen]);
    let (silk, _) = recorder.texts.last().expect("summary");
    assert!(silk.starts_with("Turns: 15\nR(@25C & 1.0 Oz Cu): "));
    assert!(silk.ends_with(" Ohms\n"));
}

#[test]
#[allow(clippy::expect_used, clippy::indexing_slicing)]
fn serialised_instructions_are_tagged_camel_case() {
    let layout = layout_spiral(&config(2)).expect("layout");
    let json = serde_json::to_value(&layout).expect("serialise");

    let first_arc = json["instructions"]
        .as_array()
        .expect("array")
        .iter()
        .find(|i| i["kind"] == "arc")
        .expect("arc");
    assert!(first_arc.get("signedDegrees").is_some());
    assert!(first_arc.get("centerX").is_some());
    assert_eq!(first_arc["layer"], "F_Cu");

    let via = &json["instructions"][1];
    assert_eq!(via["kind"], "pad");
    assert_eq!(via["isVia"], true);
    assert_eq!(via["number"], 3);
    assert_eq!(via["layers"], "allCopper");

    assert_eq!(json["netTieGroup"], serde_json::json!([1, 2, 3]));
    assert!(json["totals"]["traceLength"].as_f64().expect("number") > 0.0);
    assert_eq!(json["totals"]["viaCount"], 1);
}

#[test]
#[allow(clippy::expect_used)]
fn layout_instructions_replay_in_order() {
    let layout = layout_spiral(&config(3)).expect("layout");
    let mut replayed: Vec<DrawInstruction> = Vec::new();
    layout.replay(&mut replayed);
    assert_eq!(replayed, layout.instructions);
}
