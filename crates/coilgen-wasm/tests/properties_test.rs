//! Property tests over the spiral parameter space.

use coilgen_wasm::coil::{layout_spiral, terminal_plan, winding_plan, CoilConfig, Layer};
use proptest::prelude::*;

fn config_strategy() -> impl Strategy<Value = CoilConfig> {
    (
        1u32..=40,
        1.0f64..60.0,
        0.0f64..2.0,
        0.1f64..1.0,
        0.1f64..1.0,
        0.2f64..0.8,
        0.05f64..0.3,
        any::<bool>(),
    )
        .prop_map(
            |(turns, aperture_radius, aperture_gap, trace_width, trace_spacing, drill, ring, ccw)| {
                CoilConfig {
                    turns,
                    aperture_radius,
                    aperture_gap,
                    trace_width,
                    trace_spacing,
                    via_drill_diameter: drill,
                    via_annular_ring: ring,
                    direction: if ccw {
                        coilgen_wasm::coil::Direction::CounterClockwise
                    } else {
                        coilgen_wasm::coil::Direction::Clockwise
                    },
                    ..CoilConfig::default()
                }
            },
        )
}

proptest! {
    #[test]
    fn every_valid_config_lays_out(config in config_strategy()) {
        let layout = layout_spiral(&config);
        prop_assert!(layout.is_ok(), "{:?}", layout.err());
        if let Ok(layout) = layout {
            let pairs = config.turns as usize + 1;
            prop_assert_eq!(layout.arc_count(Layer::FrontCopper), pairs);
            prop_assert_eq!(layout.arc_count(Layer::BackCopper), pairs);
            prop_assert_eq!(layout.totals.via_count, 1);
            prop_assert!(layout.totals.trace_length > 0.0);
            prop_assert!(layout.report.resistance_ohms.is_some_and(|r| r > 0.0));
        }
    }

    #[test]
    fn windings_chain_into_the_exit(config in config_strategy()) {
        let plan = winding_plan(&config);
        let exit = terminal_plan(&config);
        prop_assert!(plan.is_ok() && exit.is_ok());
        if let (Ok(plan), Ok(exit)) = (plan, exit) {
            for pair in plan.windows(2) {
                if let [a, b] = pair {
                    prop_assert!((a.end_x() - b.start_x).abs() < 1e-9);
                }
            }
            if let Some(last) = plan.last() {
                prop_assert!((last.end_x() - exit.start_x).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn same_side_crossings_keep_one_pitch(config in config_strategy()) {
        let pitch = config.trace_width + config.trace_spacing;
        if let Ok(plan) = winding_plan(&config) {
            let mut positive = Vec::new();
            let mut negative = Vec::new();
            for turn in &plan {
                for x in [turn.start_x, turn.end_x()] {
                    if x > 0.0 { positive.push(x) } else { negative.push(-x) }
                }
            }
            for side in [&mut positive, &mut negative] {
                side.sort_by(f64::total_cmp);
                side.dedup_by(|a, b| (*a - *b).abs() < 1e-9);
                for pair in side.windows(2) {
                    if let [inner, outer] = pair {
                        prop_assert!(outer - inner >= pitch - 1e-9);
                    }
                }
            }
        }
    }
}
