//! Error types for coil layout and preview tessellation.

use thiserror::Error;

/// Errors that can occur while generating a coil footprint.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoilError {
    /// The configuration is structurally invalid (zero turns, negative
    /// lengths, unknown or unusable layers). Detected before layout starts.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// The configuration is well formed but yields a degenerate layout
    /// (non-positive radius, `acos` out of domain, coil does not fit).
    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),

    /// Preview tessellation failed.
    #[error("preview error: {0}")]
    Preview(String),
}

impl CoilError {
    /// Shorthand for [`CoilError::InvalidConfiguration`].
    pub fn config(msg: impl Into<String>) -> Self {
        Self::InvalidConfiguration(msg.into())
    }

    /// Shorthand for [`CoilError::InvalidGeometry`].
    pub fn geometry(msg: impl Into<String>) -> Self {
        Self::InvalidGeometry(msg.into())
    }
}
