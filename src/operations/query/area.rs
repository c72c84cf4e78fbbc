use crate::error::Result;
use crate::math::polygon_3d::polygon_area_3d;
use crate::topology::{ShellId, TopologyStore};

/// Computes the total surface area of a shell.
///
/// Sums the exact areas of the planar face loops; no tessellation needed.
pub struct Area {
    shell: ShellId,
}

impl Area {
    /// Creates a new `Area` query.
    #[must_use]
    pub fn new(shell: ShellId) -> Self {
        Self { shell }
    }

    /// Executes the query, returning the total surface area.
    ///
    /// # Errors
    ///
    /// Returns an error if the shell or one of its faces is not in the store.
    pub fn execute(&self, store: &TopologyStore) -> Result<f64> {
        let shell = store.shell(self.shell)?;
        let mut total_area = 0.0;
        for &face in &shell.faces {
            total_area += polygon_area_3d(&store.face_points(face)?);
        }
        Ok(total_area)
    }
}
