//! Tolerances and build-wide settings.

use crate::topology::StyleId;

/// Default distance below which two points are treated as the same vertex.
pub const DEFAULT_TOLERANCE: f64 = 1e-9;

/// Options shared by [`FaceSet`](crate::operations::creation::FaceSet) and
/// [`ShapeBuilder`](crate::operations::assemble::ShapeBuilder).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BuildOptions {
    /// Coincidence distance used for vertex merging and distinct-point checks.
    pub tolerance: f64,
    /// Minimum area of an accepted face. `None` uses `tolerance`.
    pub area_tolerance: Option<f64>,
    /// If `true`, a point within `tolerance` of more than one merged vertex
    /// fails the build instead of merging into the nearest one.
    pub strict_coincidence: bool,
    /// Style applied to faces that were added without one.
    pub default_style: Option<StyleId>,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            area_tolerance: None,
            strict_coincidence: false,
            default_style: None,
        }
    }
}

impl BuildOptions {
    /// Sets the coincidence tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets a minimum face area independent of the coincidence tolerance.
    #[must_use]
    pub fn with_area_tolerance(mut self, area_tolerance: f64) -> Self {
        self.area_tolerance = Some(area_tolerance);
        self
    }

    /// Area below which a face loop is degenerate.
    #[must_use]
    pub fn min_face_area(&self) -> f64 {
        self.area_tolerance.unwrap_or(self.tolerance)
    }

    /// Enables or disables strict coincidence checking.
    #[must_use]
    pub fn with_strict_coincidence(mut self, strict: bool) -> Self {
        self.strict_coincidence = strict;
        self
    }

    /// Sets the style given to unstyled faces.
    #[must_use]
    pub fn with_default_style(mut self, style: Option<StyleId>) -> Self {
        self.default_style = style;
        self
    }
}
