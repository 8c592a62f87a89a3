//! Core geometry types and the `GeometryBuilder` accumulator.

use serde::Serialize;

/// 2D point in footprint coordinates, millimetres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    /// X coordinate.
    pub x: f64,
    /// Y coordinate.
    pub y: f64,
}

impl Point {
    /// Creates a point.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    pub fn distance(self, other: Self) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoundingBox {
    /// Minimum X coordinate.
    pub min_x: f64,
    /// Minimum Y coordinate.
    pub min_y: f64,
    /// Maximum X coordinate.
    pub max_x: f64,
    /// Maximum Y coordinate.
    pub max_y: f64,
}

impl BoundingBox {
    /// Creates an empty bounding box that will expand with the first `update` call.
    pub const fn new() -> Self {
        Self {
            min_x: f64::INFINITY,
            min_y: f64::INFINITY,
            max_x: f64::NEG_INFINITY,
            max_y: f64::NEG_INFINITY,
        }
    }

    /// Expands the bounding box to include the given point.
    pub fn update(&mut self, x: f64, y: f64) {
        self.min_x = self.min_x.min(x);
        self.min_y = self.min_y.min(y);
        self.max_x = self.max_x.max(x);
        self.max_y = self.max_y.max(y);
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::new()
    }
}

/// Triangulated preview of a single layer.
///
/// Positions are interleaved `[x0, y0, x1, y1, ...]` as `f32` for WebGL.
/// Indices reference into the positions array as a triangle list.
#[derive(Debug, Clone)]
pub struct LayerGeometry {
    /// Interleaved vertex positions `[x0, y0, x1, y1, ...]`.
    pub positions: Vec<f32>,
    /// Triangle-list indices into the positions array.
    pub indices: Vec<u32>,
    /// Axis-aligned bounding box of all vertices.
    pub bounds: BoundingBox,
    /// Number of draw instructions rendered onto this layer.
    pub instruction_count: u32,
    /// Number of vertices (`positions.len() / 2`).
    pub vertex_count: u32,
    /// Warnings raised while tessellating.
    pub warnings: Vec<String>,
}

impl LayerGeometry {
    /// Summary handed to JavaScript alongside the raw buffers.
    pub fn meta(&self) -> LayerMeta {
        LayerMeta {
            bounds: self.bounds,
            vertex_count: self.vertex_count,
            index_count: saturate_u32(self.indices.len()),
            instruction_count: self.instruction_count,
            warning_count: saturate_u32(self.warnings.len()),
            warnings: self.warnings.clone(),
        }
    }
}

/// Metadata returned to JavaScript for a rendered layer.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayerMeta {
    /// Axis-aligned bounding box.
    pub bounds: BoundingBox,
    /// Number of vertices.
    pub vertex_count: u32,
    /// Number of triangle indices.
    pub index_count: u32,
    /// Number of draw instructions rendered.
    pub instruction_count: u32,
    /// Number of warnings.
    pub warning_count: u32,
    /// Warning messages.
    pub warnings: Vec<String>,
}

/// Converts a length to `u32`, saturating at `u32::MAX`.
pub fn saturate_u32(len: usize) -> u32 {
    u32::try_from(len).unwrap_or(u32::MAX)
}

/// Accumulator for building layer geometry incrementally.
///
/// Passed by mutable reference to geometry conversion functions.
/// Vertices and indices are collected in flat `Vec`s to minimize allocations.
#[derive(Debug)]
pub struct GeometryBuilder {
    positions: Vec<f32>,
    indices: Vec<u32>,
    bounds: BoundingBox,
    warnings: Vec<String>,
}

impl GeometryBuilder {
    /// Creates an empty builder.
    pub const fn new() -> Self {
        Self {
            positions: Vec::new(),
            indices: Vec::new(),
            bounds: BoundingBox::new(),
            warnings: Vec::new(),
        }
    }

    /// Adds a vertex and returns its index.
    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    pub fn push_vertex(&mut self, x: f64, y: f64) -> u32 {
        let idx = self.positions.len() / 2;
        self.positions.push(x as f32);
        self.positions.push(y as f32);
        self.bounds.update(x, y);
        idx as u32
    }

    /// Adds a triangle from three vertex indices.
    pub fn push_triangle(&mut self, a: u32, b: u32, c: u32) {
        self.indices.push(a);
        self.indices.push(b);
        self.indices.push(c);
    }

    /// Adds a quad as two triangles `(a, b, c)` and `(a, c, d)`.
    pub fn push_quad(&mut self, a: u32, b: u32, c: u32, d: u32) {
        self.push_triangle(a, b, c);
        self.push_triangle(a, c, d);
    }

    /// Adds an N-gon centered at `(cx, cy)` with the given `radius` and `segments`.
    ///
    /// Vertices are placed on a circle and fan-triangulated from the first vertex.
    /// Returns the index of the first vertex. `segments` should be >= 3 for
    /// meaningful polygons.
    pub fn push_ngon(&mut self, cx: f64, cy: f64, radius: f64, segments: u32) -> u32 {
        let first = self.push_vertex(cx + radius, cy);

        for i in 1..segments {
            let angle = 2.0 * std::f64::consts::PI * f64::from(i) / f64::from(segments);
            self.push_vertex(
                radius.mul_add(angle.cos(), cx),
                radius.mul_add(angle.sin(), cy),
            );
        }

        for i in 1..segments.saturating_sub(1) {
            self.push_triangle(first, first + i, first + i + 1);
        }

        first
    }

    /// Records a warning message.
    pub fn warn(&mut self, msg: String) {
        self.warnings.push(msg);
    }

    /// Returns the current number of triangle indices.
    #[must_use]
    pub fn index_count(&self) -> u32 {
        saturate_u32(self.indices.len())
    }

    /// Returns the current number of vertices.
    #[must_use]
    pub fn vertex_count(&self) -> u32 {
        saturate_u32(self.positions.len() / 2)
    }

    /// Consumes the builder and produces a [`LayerGeometry`].
    ///
    /// `instruction_count` is set to 0; the caller should update it as needed.
    pub fn build(self) -> LayerGeometry {
        let vertex_count = saturate_u32(self.positions.len() / 2);
        LayerGeometry {
            positions: self.positions,
            indices: self.indices,
            bounds: self.bounds,
            instruction_count: 0,
            vertex_count,
            warnings: self.warnings,
        }
    }
}

impl Default for GeometryBuilder {
    fn default() -> Self {
        Self::new()
    }
}
