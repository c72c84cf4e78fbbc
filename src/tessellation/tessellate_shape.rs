use tracing::debug;

use crate::error::Result;
use crate::operations::assemble::Shape;

use super::{TessellateFace, TriangleMesh};

/// Tessellates every face of an assembled shape into a single mesh.
///
/// Faces are visited shell by shell in result order, so a solid's outer
/// shell comes first. Each triangle carries the style of its face.
#[derive(Debug, Default)]
pub struct TessellateShape;

impl TessellateShape {
    /// Creates a new shape tessellation operation.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Executes the tessellation.
    ///
    /// # Errors
    ///
    /// Returns an error if any face fails to tessellate.
    pub fn execute(&self, shape: &Shape) -> Result<TriangleMesh> {
        let store = shape.store();
        let mut mesh = TriangleMesh::default();
        for &shell_id in shape.shells() {
            let shell = store.shell(shell_id)?;
            for &face_id in &shell.faces {
                let face_mesh = TessellateFace::new(face_id).execute(store)?;
                mesh.merge(&face_mesh);
            }
        }
        debug!(
            faces = shape.face_count(),
            triangles = mesh.triangle_count(),
            "shape tessellated"
        );
        Ok(mesh)
    }
}
