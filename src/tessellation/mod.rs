mod tessellate_face;
mod tessellate_shape;

pub use tessellate_face::TessellateFace;
pub use tessellate_shape::TessellateShape;

use crate::math::{Point3, Vector3};
use crate::topology::StyleId;

/// A triangle mesh approximation of assembled faces.
///
/// Vertices are not shared between faces, so every face keeps its own flat
/// normal.
#[derive(Debug, Clone, Default)]
pub struct TriangleMesh {
    /// Vertex positions.
    pub vertices: Vec<Point3>,
    /// Vertex normals.
    pub normals: Vec<Vector3>,
    /// Triangle indices (each triple defines a triangle).
    pub indices: Vec<[u32; 3]>,
    /// Style of the face each triangle came from.
    pub styles: Vec<Option<StyleId>>,
}

impl TriangleMesh {
    /// Appends another mesh, offsetting its indices.
    #[allow(clippy::cast_possible_truncation)]
    pub fn merge(&mut self, other: &TriangleMesh) {
        let offset = self.vertices.len() as u32;
        self.vertices.extend_from_slice(&other.vertices);
        self.normals.extend_from_slice(&other.normals);
        self.indices.extend(
            other
                .indices
                .iter()
                .map(|tri| [tri[0] + offset, tri[1] + offset, tri[2] + offset]),
        );
        self.styles.extend_from_slice(&other.styles);
    }

    /// Number of triangles.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len()
    }

    /// Total area of all triangles.
    #[must_use]
    pub fn area(&self) -> f64 {
        self.indices
            .iter()
            .map(|tri| {
                let v0 = self.vertices[tri[0] as usize];
                let v1 = self.vertices[tri[1] as usize];
                let v2 = self.vertices[tri[2] as usize];
                (v1 - v0).cross(&(v2 - v0)).norm() * 0.5
            })
            .sum()
    }
}
