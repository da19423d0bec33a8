//! Mesh representation for text quads
//!
//! Pure data structures with no backend dependencies: the host renderer
//! uploads `vertices` and `indices` as they are.

use bytemuck::{Pod, Zeroable};

/// Vertex data structure for atlas text rendering
///
/// The `#[repr(C)]` attribute keeps the layout stable for GPU buffer uploads.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    /// Position in local space
    pub position: [f32; 3],

    /// Normal vector
    pub normal: [f32; 3],

    /// Texture coordinates into the atlas
    pub tex_coord: [f32; 2],

    /// Atlas page the glyph lives on
    pub page: f32,
}

impl Vertex {
    /// Create a new vertex on atlas page 0
    pub const fn new(position: [f32; 3], normal: [f32; 3], tex_coord: [f32; 2]) -> Self {
        Self {
            position,
            normal,
            tex_coord,
            page: 0.0,
        }
    }

    /// Set the atlas page
    #[must_use]
    pub fn with_page(mut self, page: f32) -> Self {
        self.page = page;
        self
    }
}

/// Mesh containing vertices and triangle indices
///
/// The text mesh owns one of these and replaces its contents in place on
/// every re-layout, so the host keeps a stable object to draw.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    /// Vertex data
    pub vertices: Vec<Vertex>,

    /// Index data for triangles
    pub indices: Vec<u32>,
}

impl Mesh {
    /// Create a new mesh
    pub const fn new(vertices: Vec<Vertex>, indices: Vec<u32>) -> Self {
        Self { vertices, indices }
    }

    /// Replace the geometry, reusing the existing allocations
    pub fn replace(&mut self, vertices: impl IntoIterator<Item = Vertex>, indices: &[u32]) {
        self.vertices.clear();
        self.vertices.extend(vertices);
        self.indices.clear();
        self.indices.extend_from_slice(indices);
    }

    /// Number of vertices
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of triangles
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// True when there is nothing to draw
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Check that every index points at an existing vertex
    pub fn indices_in_bounds(&self) -> bool {
        let count = self.vertices.len();
        self.indices.iter().all(|&index| (index as usize) < count)
    }

    /// Raw vertex bytes for GPU upload
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Raw index bytes for GPU upload
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }
}
