use crate::config::BuildOptions;
use crate::error::{GeometryError, Result};
use crate::math::{Point3, Vector3};

use super::FaceSet;

/// Creates the closed face set of a right-corner tetrahedron.
///
/// The vertices are `origin` and `origin + size` along each axis. All four
/// faces are wound outward.
pub struct MakeTetrahedron {
    origin: Point3,
    size: f64,
    options: BuildOptions,
}

impl MakeTetrahedron {
    /// Creates a new `MakeTetrahedron` operation.
    #[must_use]
    pub fn new(origin: Point3, size: f64) -> Self {
        Self {
            origin,
            size,
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
    /// Returns [`GeometryError::ParameterOutOfRange`] if `size` is not a
    /// positive finite number, or a face error once the faces become
    /// degenerate under the configured tolerances.
    pub fn execute(&self) -> Result<FaceSet> {
        if !(self.size.is_finite() && self.size > 0.0) {
            return Err(GeometryError::ParameterOutOfRange {
                parameter: "size",
                value: self.size,
                min: 0.0,
                max: f64::MAX,
            }
            .into());
        }

        let p0 = self.origin;
        let p1 = self.origin + Vector3::new(self.size, 0.0, 0.0);
        let p2 = self.origin + Vector3::new(0.0, self.size, 0.0);
        let p3 = self.origin + Vector3::new(0.0, 0.0, self.size);

        let mut set = FaceSet::open_with_options(false, &self.options);
        set.add_face(vec![p0, p2, p1], None)?;
        set.add_face(vec![p0, p1, p3], None)?;
        set.add_face(vec![p0, p3, p2], None)?;
        set.add_face(vec![p1, p2, p3], None)?;
        set.close()?;
        Ok(set)
    }
}
