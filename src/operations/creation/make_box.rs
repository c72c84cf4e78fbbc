use crate::config::BuildOptions;
use crate::error::{GeometryError, Result};
use crate::math::Point3;

use super::FaceSet;

/// Creates the closed face set of an axis-aligned box.
///
/// Faces are wound outward and added in the order bottom, top, back
/// (`y = max`), front (`y = min`), right (`x = max`), left (`x = min`).
pub struct MakeBox {
    min_corner: Point3,
    max_corner: Point3,
    options: BuildOptions,
}

impl MakeBox {
    /// Creates a new `MakeBox` operation.
    #[must_use]
    pub fn new(min_corner: Point3, max_corner: Point3) -> Self {
        Self {
            min_corner,
            max_corner,
            options: BuildOptions::default(),
        }
    }

    /// Checks the faces against custom tolerances.
    #[must_use]
    pub fn with_options(mut self, options: BuildOptions) -> Self {
        self.options = options;
        self
    }

    /// Executes the operation, returning a closed face set.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::Degenerate`] if the box has no positive
    /// extent along an axis, or a face error if a face is degenerate under
    /// the configured tolerances.
    pub fn execute(&self) -> Result<FaceSet> {
        let extent = self.max_corner - self.min_corner;
        if !(extent.x > 0.0 && extent.y > 0.0 && extent.z > 0.0) {
            return Err(GeometryError::Degenerate(format!(
                "box extent ({}, {}, {}) must be positive on every axis",
                extent.x, extent.y, extent.z
            ))
            .into());
        }

        let (min, max) = (self.min_corner, self.max_corner);
        let pt0 = min;
        let pt1 = Point3::new(max.x, min.y, min.z);
        let pt2 = Point3::new(max.x, max.y, min.z);
        let pt3 = Point3::new(min.x, max.y, min.z);
        let pt4 = Point3::new(min.x, min.y, max.z);
        let pt5 = Point3::new(max.x, min.y, max.z);
        let pt6 = max;
        let pt7 = Point3::new(min.x, max.y, max.z);

        let mut set = FaceSet::open_with_options(false, &self.options);
        set.add_face(vec![pt3, pt2, pt1, pt0], None)?;
        set.add_face(vec![pt4, pt5, pt6, pt7], None)?;
        set.add_face(vec![pt2, pt3, pt7, pt6], None)?;
        set.add_face(vec![pt0, pt1, pt5, pt4], None)?;
        set.add_face(vec![pt1, pt2, pt6, pt5], None)?;
        set.add_face(vec![pt0, pt4, pt7, pt3], None)?;
        set.close()?;
        Ok(set)
    }
}
