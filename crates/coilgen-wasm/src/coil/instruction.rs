//! Drawing instructions emitted by the generators and the surface they are
//! replayed onto.
//!
//! Every instruction is self-contained: it names its own layer and stroke
//! width, so a host never has to track a "current layer" between calls.

use serde::Serialize;

use crate::geometry::Point;

use super::layer::Layer;

/// Which layers a through-hole pad occupies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum PadLayers {
    /// Plated through-hole present on every copper layer.
    #[default]
    AllCopper,
}

/// A plated through-hole pad or via.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pad {
    /// Pad number; pads sharing a number form one electrical group.
    pub number: u32,
    /// Center X.
    pub x: f64,
    /// Center Y.
    pub y: f64,
    /// Copper diameter.
    pub diameter: f64,
    /// Drill diameter.
    pub drill_diameter: f64,
    /// `true` for layer-changing vias, `false` for terminals.
    pub is_via: bool,
    /// Layers the pad occupies.
    pub layers: PadLayers,
}

impl Pad {
    /// Center point of the pad.
    pub const fn center(&self) -> Point {
        Point {
            x: self.x,
            y: self.y,
        }
    }
}

/// One drawing command.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum DrawInstruction {
    /// Circular arc from a start point around a center.
    #[serde(rename_all = "camelCase")]
    Arc {
        /// Center X.
        center_x: f64,
        /// Center Y.
        center_y: f64,
        /// Start X.
        start_x: f64,
        /// Start Y.
        start_y: f64,
        /// Sweep in degrees; the sign gives the rotation sense.
        signed_degrees: f64,
        /// Stroke width.
        width: f64,
        /// Layer.
        layer: Layer,
    },
    /// Straight trace segment.
    #[serde(rename_all = "camelCase")]
    Line {
        /// Start X.
        x1: f64,
        /// Start Y.
        y1: f64,
        /// End X.
        x2: f64,
        /// End Y.
        y2: f64,
        /// Stroke width.
        width: f64,
        /// Layer.
        layer: Layer,
    },
    /// Through-hole pad or via.
    Pad(Pad),
    /// Reference circle outline.
    #[serde(rename_all = "camelCase")]
    Circle {
        /// Center X.
        center_x: f64,
        /// Center Y.
        center_y: f64,
        /// Radius.
        radius: f64,
        /// Stroke width.
        width: f64,
        /// Layer.
        layer: Layer,
    },
    /// Multi-line annotation anchored at its top-left corner.
    Text {
        /// Text content.
        text: String,
        /// Anchor X.
        x: f64,
        /// Anchor Y.
        y: f64,
        /// Layer.
        layer: Layer,
    },
}

impl DrawInstruction {
    /// Layer the instruction draws on, or `None` for pads, which sit on every
    /// copper layer.
    pub const fn layer(&self) -> Option<Layer> {
        match self {
            Self::Arc { layer, .. }
            | Self::Line { layer, .. }
            | Self::Circle { layer, .. }
            | Self::Text { layer, .. } => Some(*layer),
            Self::Pad(_) => None,
        }
    }

    /// Whether the instruction puts copper on `layer`.
    pub fn touches(&self, layer: Layer) -> bool {
        match self {
            Self::Pad(_) => layer.is_copper(),
            other => other.layer() == Some(layer),
        }
    }

    /// Radius of an arc instruction.
    pub fn arc_radius(&self) -> Option<f64> {
        match self {
            Self::Arc {
                center_x,
                center_y,
                start_x,
                start_y,
                ..
            } => Some((start_x - center_x).hypot(start_y - center_y)),
            _ => None,
        }
    }
}

/// A host-side sink for drawing instructions.
///
/// Implement this to stream a layout straight into a native footprint
/// instead of collecting a `Vec<DrawInstruction>`.
pub trait DrawingSurface {
    /// Draws an arc of `signed_degrees` from `start` around `center`.
    fn arc(&mut self, center: Point, start: Point, signed_degrees: f64, width: f64, layer: Layer);

    /// Draws a straight segment.
    fn line(&mut self, from: Point, to: Point, width: f64, layer: Layer);

    /// Draws a circle outline.
    fn circle(&mut self, center: Point, radius: f64, width: f64, layer: Layer);

    /// Places a pad or via.
    fn pad(&mut self, pad: &Pad);

    /// Places a text annotation. Ignored by default.
    fn text(&mut self, text: &str, at: Point, layer: Layer) {
        let _ = (text, at, layer);
    }

    /// Dispatches one instruction to the matching primitive.
    fn draw(&mut self, instruction: &DrawInstruction) {
        match instruction {
            DrawInstruction::Arc {
                center_x,
                center_y,
                start_x,
                start_y,
                signed_degrees,
                width,
                layer,
            } => self.arc(
                Point::new(*center_x, *center_y),
                Point::new(*start_x, *start_y),
                *signed_degrees,
                *width,
                *layer,
            ),
            DrawInstruction::Line {
                x1,
                y1,
                x2,
                y2,
                width,
                layer,
            } => self.line(Point::new(*x1, *y1), Point::new(*x2, *y2), *width, *layer),
            DrawInstruction::Pad(pad) => self.pad(pad),
            DrawInstruction::Circle {
                center_x,
                center_y,
                radius,
                width,
                layer,
            } => self.circle(Point::new(*center_x, *center_y), *radius, *width, *layer),
            DrawInstruction::Text { text, x, y, layer } => {
                self.text(text, Point::new(*x, *y), *layer);
            }
        }
    }
}

impl DrawingSurface for Vec<DrawInstruction> {
    fn arc(&mut self, center: Point, start: Point, signed_degrees: f64, width: f64, layer: Layer) {
        self.push(DrawInstruction::Arc {
            center_x: center.x,
            center_y: center.y,
            start_x: start.x,
            start_y: start.y,
            signed_degrees,
            width,
            layer,
        });
    }

    fn line(&mut self, from: Point, to: Point, width: f64, layer: Layer) {
        self.push(DrawInstruction::Line {
            x1: from.x,
            y1: from.y,
            x2: to.x,
            y2: to.y,
            width,
            layer,
        });
    }

    fn circle(&mut self, center: Point, radius: f64, width: f64, layer: Layer) {
        self.push(DrawInstruction::Circle {
            center_x: center.x,
            center_y: center.y,
            radius,
            width,
            layer,
        });
    }

    fn pad(&mut self, pad: &Pad) {
        self.push(DrawInstruction::Pad(*pad));
    }

    fn text(&mut self, text: &str, at: Point, layer: Layer) {
        self.push(DrawInstruction::Text {
            text: text.to_string(),
            x: at.x,
            y: at.y,
            layer,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<DrawInstruction> {
        vec![
            DrawInstruction::Arc {
                center_x: 1.0,
                center_y: 0.0,
                start_x: 4.0,
                start_y: 0.0,
                signed_degrees: 180.0,
                width: 0.2,
                layer: Layer::FrontCopper,
            },
            DrawInstruction::Line {
                x1: 0.0,
                y1: 0.0,
                x2: 1.0,
                y2: 1.0,
                width: 0.2,
                layer: Layer::BackCopper,
            },
            DrawInstruction::Pad(Pad {
                number: 3,
                x: 2.0,
                y: 0.0,
                diameter: 0.6,
                drill_diameter: 0.3,
                is_via: true,
                layers: PadLayers::AllCopper,
            }),
            DrawInstruction::Circle {
                center_x: 0.0,
                center_y: 0.0,
                radius: 30.0,
                width: 0.1,
                layer: Layer::OUTLINE,
            },
            DrawInstruction::Text {
                text: "Turns: 1".to_string(),
                x: 0.0,
                y: 0.0,
                layer: Layer::FrontSilkscreen,
            },
        ]
    }

    #[test]
    fn vec_surface_replays_identically() {
        let original = sample();
        let mut replayed: Vec<DrawInstruction> = Vec::new();
        for instruction in &original {
            replayed.draw(instruction);
        }
        assert_eq!(replayed, original);
    }

    #[test]
    fn pads_touch_every_copper_layer_only() {
        let instructions = sample();
        let pad = instructions.get(2).cloned();
        let Some(pad) = pad else {
            return;
        };
        assert!(pad.touches(Layer::FrontCopper));
        assert!(pad.touches(Layer::InnerCopper(2)));
        assert!(!pad.touches(Layer::FrontSilkscreen));
        assert_eq!(pad.layer(), None);
    }

    #[test]
    fn arc_radius_is_distance_from_center_to_start() {
        let radius = sample().first().and_then(DrawInstruction::arc_radius);
        assert_eq!(radius, Some(3.0));
    }
}
