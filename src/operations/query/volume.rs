use crate::error::Result;
use crate::math::polygon_3d::newell_vector;
use crate::math::Vector3;
use crate::topology::{ShellId, TopologyStore};

/// Computes the signed volume enclosed by a shell.
///
/// Applies the divergence theorem face by face: for a planar face with
/// Newell vector `N` (twice the area times the unit normal) and any point
/// `c` on it, the contribution is `c . N / 6`. Outward-wound closed shells
/// give a positive volume, inward-wound ones a negative volume. The result
/// is only meaningful for closed shells.
pub struct Volume {
    shell: ShellId,
}

impl Volume {
    /// Creates a new `Volume` query.
    #[must_use]
    pub fn new(shell: ShellId) -> Self {
        Self { shell }
    }

    /// Executes the query, returning the signed volume.
    ///
    /// # Errors
    ///
    /// Returns an error if the shell or one of its faces is not in the store.
    pub fn execute(&self, store: &TopologyStore) -> Result<f64> {
        let shell = store.shell(self.shell)?;
        let mut signed_volume = 0.0;
        for &face in &shell.faces {
            let points = store.face_points(face)?;
            if points.is_empty() {
                continue;
            }
            // Loop centroid: exact on planar faces, averages out noise otherwise
            #[allow(clippy::cast_precision_loss)]
            let inv = 1.0 / points.len() as f64;
            let centroid = points
                .iter()
                .fold(Vector3::zeros(), |acc, p| acc + p.coords)
                * inv;
            signed_volume += centroid.dot(&newell_vector(&points));
        }
        Ok(signed_volume / 6.0)
    }
}
