//! Lyon-based tessellation of flat ring geometry (orbit paths).
//!
//! Shapes are tessellated in a 2D plane and written as a flat triangle-list
//! vertex buffer. The host maps plane coordinates `(u, v)` to world
//! `(u, 0, v)`, so rings lie in the orbital plane.
//!
//! ```ignore
//! // In your Game::init():
//! ctx.vectors.stroke_ring(Vec2::ZERO, 7.0, 0.04, VectorColor::WHITE.with_alpha(0.1));
//! ```

use bytemuck::{Pod, Zeroable};
use glam::Vec2;
use lyon::math::point;
use lyon::path::{Path, Winding};
use lyon::tessellation::{
    BuffersBuilder, StrokeOptions, StrokeTessellator, StrokeVertex, StrokeVertexConstructor,
    VertexBuffers,
};

/// Per-vertex data for ring rendering.
/// 6 floats = 24 bytes per vertex.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, Pod, Zeroable)]
pub struct VectorVertex {
    pub u: f32,
    pub v: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl VectorVertex {
    pub const FLOATS: usize = 6;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4; // 24
}

/// RGBA color for vector drawing operations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VectorColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl VectorColor {
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
}

impl Default for VectorColor {
    fn default() -> Self {
        Self::WHITE
    }
}

struct StrokeVertexCtor {
    color: VectorColor,
}

impl StrokeVertexConstructor<VectorVertex> for StrokeVertexCtor {
    fn new_vertex(&mut self, vertex: StrokeVertex) -> VectorVertex {
        VectorVertex {
            u: vertex.position().x,
            v: vertex.position().y,
            r: self.color.r,
            g: self.color.g,
            b: self.color.b,
            a: self.color.a,
        }
    }
}

/// Holds the lyon tessellator and the output vertex buffer.
/// Unlike per-frame overlays, ring geometry is static: games build it once
/// in `init` and only clear it when the layout changes.
pub struct VectorState {
    stroke_tess: StrokeTessellator,
    geometry: VertexBuffers<VectorVertex, u32>,
    buffer: Vec<f32>,
    /// Maximum distance between the true curve and its flattening, in world units.
    tolerance: f32,
}

impl VectorState {
    pub fn new() -> Self {
        Self {
            stroke_tess: StrokeTessellator::new(),
            geometry: VertexBuffers::new(),
            buffer: Vec::with_capacity(4096 * VectorVertex::FLOATS),
            tolerance: 0.01,
        }
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    pub fn vertex_count(&self) -> usize {
        self.buffer.len() / VectorVertex::FLOATS
    }

    /// Raw pointer to the flat float buffer (for SAB copy).
    pub fn buffer_ptr(&self) -> *const f32 {
        self.buffer.as_ptr()
    }

    /// Flush indexed geometry to the flat buffer as triangle list.
    fn flush_geometry(&mut self) {
        for idx in &self.geometry.indices {
            let v = &self.geometry.vertices[*idx as usize];
            self.buffer.extend_from_slice(&[v.u, v.v, v.r, v.g, v.b, v.a]);
        }
        self.geometry.vertices.clear();
        self.geometry.indices.clear();
    }

    /// Tessellate an annulus of the given mid radius and width.
    pub fn stroke_ring(&mut self, center: Vec2, radius: f32, width: f32, color: VectorColor) {
        if radius <= 0.0 || width <= 0.0 {
            return;
        }

        let mut builder = Path::builder();
        builder.add_circle(point(center.x, center.y), radius, Winding::Positive);
        let path = builder.build();

        let result = self.stroke_tess.tessellate_path(
            &path,
            &StrokeOptions::tolerance(self.tolerance).with_line_width(width),
            &mut BuffersBuilder::new(&mut self.geometry, StrokeVertexCtor { color }),
        );

        match result {
            Ok(()) => self.flush_geometry(),
            Err(e) => {
                log::warn!("ring tessellation failed (r={}): {:?}", radius, e);
                self.geometry.vertices.clear();
                self.geometry.indices.clear();
            }
        }
    }
}

impl Default for VectorState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vector_vertex_is_24_bytes() {
        assert_eq!(std::mem::size_of::<VectorVertex>(), 24);
        assert_eq!(VectorVertex::STRIDE_BYTES, 24);
    }

    #[test]
    fn ring_produces_whole_triangles() {
        let mut state = VectorState::new();
        state.stroke_ring(Vec2::ZERO, 7.0, 0.04, VectorColor::WHITE.with_alpha(0.1));
        assert!(state.vertex_count() > 0);
        assert_eq!(state.vertex_count() % 3, 0);
    }

    #[test]
    fn ring_vertices_hug_the_radius() {
        let mut state = VectorState::new();
        state.stroke_ring(Vec2::ZERO, 4.0, 0.04, VectorColor::WHITE);
        for vtx in state.buffer.chunks_exact(VectorVertex::FLOATS) {
            let r = Vec2::new(vtx[0], vtx[1]).length();
            assert!((r - 4.0).abs() < 0.05, "vertex at radius {}", r);
        }
    }

    #[test]
    fn ring_carries_color() {
        let mut state = VectorState::new();
        state.stroke_ring(Vec2::ZERO, 2.0, 0.1, VectorColor::new(0.2, 0.4, 0.6, 0.1));
        let first = &state.buffer[..VectorVertex::FLOATS];
        assert_eq!(&first[2..], &[0.2, 0.4, 0.6, 0.1]);
    }

    #[test]
    fn degenerate_ring_produces_nothing() {
        let mut state = VectorState::new();
        state.stroke_ring(Vec2::ZERO, 0.0, 0.04, VectorColor::WHITE);
        state.stroke_ring(Vec2::ZERO, 3.0, 0.0, VectorColor::WHITE);
        assert_eq!(state.vertex_count(), 0);
    }

    #[test]
    fn clear_resets_buffer() {
        let mut state = VectorState::new();
        state.stroke_ring(Vec2::ZERO, 5.0, 0.04, VectorColor::WHITE);
        state.clear();
        assert_eq!(state.vertex_count(), 0);
    }
}
