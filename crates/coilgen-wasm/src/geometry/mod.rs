//! Core geometry types and the preview tessellation pipeline.

pub mod arc;
pub mod pad;
pub mod preview;
pub mod stroke;
pub mod types;

pub use arc::*;
pub use pad::*;
pub use preview::*;
pub use stroke::*;
pub use types::*;
