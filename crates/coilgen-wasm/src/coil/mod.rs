//! Coil footprint generators and the drawing vocabulary they emit.

pub mod config;
pub mod flux_neutral;
pub mod instruction;
pub mod layer;
pub mod layout;
pub mod report;
pub mod single_turn;
pub mod solver;
pub mod spiral;

pub use config::{CoilConfig, Direction, FluxNeutralConfig, SingleTurnConfig};
pub use flux_neutral::{layout_flux_neutral, FluxNeutralDimensions};
pub use instruction::{DrawInstruction, DrawingSurface, Pad, PadLayers};
pub use layer::{Layer, LayerPair};
pub use layout::{CoilLayout, RunningTotals};
pub use report::{resistance_ohms, CoilReport};
pub use single_turn::{layout_single_turn, solve_gap, GapSolution};
pub use solver::DerivedDimensions;
pub use spiral::{emit_spiral, layout_spiral, terminal_plan, winding_plan, TerminalRoute, Winding};
