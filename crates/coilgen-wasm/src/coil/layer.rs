//! Board layers addressed by the generators.
//!
//! Names follow KiCad's scripting convention (`F_Cu`, `In1_Cu`, `User_1`);
//! the dotted board-file spelling (`F.Cu`) is accepted as well.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoilError;

const MAX_INNER_LAYER: u8 = 30;
const MAX_USER_LAYER: u8 = 9;

/// A board layer an instruction is drawn on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Layer {
    /// Front copper (`F_Cu`).
    FrontCopper,
    /// Back copper (`B_Cu`).
    BackCopper,
    /// Inner copper layer `InN_Cu`, numbered from 1.
    InnerCopper(u8),
    /// Front silkscreen (`F_SilkS`).
    FrontSilkscreen,
    /// Front fabrication layer (`F_Fab`).
    FrontFab,
    /// User drawing layer `User_N`, numbered from 1.
    User(u8),
}

impl Layer {
    /// Layer carrying the aperture reference outline.
    pub const OUTLINE: Self = Self::User(1);
    /// Layer carrying the fabrication notes.
    pub const FAB_NOTES: Self = Self::User(2);

    /// Returns `true` for conductive layers.
    pub const fn is_copper(self) -> bool {
        matches!(
            self,
            Self::FrontCopper | Self::BackCopper | Self::InnerCopper(_)
        )
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FrontCopper => f.write_str("F_Cu"),
            Self::BackCopper => f.write_str("B_Cu"),
            Self::InnerCopper(n) => write!(f, "In{n}_Cu"),
            Self::FrontSilkscreen => f.write_str("F_SilkS"),
            Self::FrontFab => f.write_str("F_Fab"),
            Self::User(n) => write!(f, "User_{n}"),
        }
    }
}

impl FromStr for Layer {
    type Err = CoilError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().replace('.', "_");
        let layer = match name.as_str() {
            "F_Cu" => Self::FrontCopper,
            "B_Cu" => Self::BackCopper,
            "F_SilkS" => Self::FrontSilkscreen,
            "F_Fab" => Self::FrontFab,
            other => parse_numbered(other)
                .ok_or_else(|| CoilError::config(format!("unknown layer `{s}`")))?,
        };
        Ok(layer)
    }
}

fn parse_numbered(name: &str) -> Option<Layer> {
    if let Some(n) = name
        .strip_prefix("In")
        .and_then(|rest| rest.strip_suffix("_Cu"))
    {
        let n: u8 = n.parse().ok()?;
        return (1..=MAX_INNER_LAYER)
            .contains(&n)
            .then_some(Layer::InnerCopper(n));
    }
    let n: u8 = name.strip_prefix("User_")?.parse().ok()?;
    (1..=MAX_USER_LAYER).contains(&n).then_some(Layer::User(n))
}

impl TryFrom<String> for Layer {
    type Error = CoilError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Layer> for String {
    fn from(layer: Layer) -> Self {
        layer.to_string()
    }
}

/// The two copper layers a coil alternates across.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerPair {
    /// Layer the winding starts on.
    pub first: Layer,
    /// Layer the winding finishes on.
    pub second: Layer,
}

impl LayerPair {
    /// Creates a pair from two layers.
    pub const fn new(first: Layer, second: Layer) -> Self {
        Self { first, second }
    }

    /// Checks that both layers are copper and distinct.
    ///
    /// # Errors
    ///
    /// Returns [`CoilError::InvalidConfiguration`] otherwise.
    pub fn validate(&self) -> Result<(), CoilError> {
        for layer in [self.first, self.second] {
            if !layer.is_copper() {
                return Err(CoilError::config(format!(
                    "layer `{layer}` is not a copper layer"
                )));
            }
        }
        if self.first == self.second {
            return Err(CoilError::config(format!(
                "first and second layer are both `{}`",
                self.first
            )));
        }
        Ok(())
    }
}

impl Default for LayerPair {
    fn default() -> Self {
        Self::new(Layer::FrontCopper, Layer::BackCopper)
    }
}

impl fmt::Display for LayerPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}->{}", self.first, self.second)
    }
}
