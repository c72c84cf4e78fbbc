use tracing::{debug, trace};

use crate::config::BuildOptions;
use crate::error::{FaceError, Result, StateError};
use crate::math::polygon_3d::{all_finite, count_distinct_points, newell_vector};
use crate::math::{Point3, Vector3};
use crate::topology::StyleId;

/// Lifecycle of a [`FaceSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaceSetState {
    /// Faces may be added.
    Open,
    /// Frozen; ready for assembly.
    Closed,
}

/// A validated planar face loop as supplied by the caller.
#[derive(Debug, Clone)]
pub struct FaceLoop {
    points: Vec<Point3>,
    normal: Vector3,
    area: f64,
    style: Option<StyleId>,
}

impl FaceLoop {
    /// The loop points in the caller's order.
    #[must_use]
    pub fn points(&self) -> &[Point3] {
        &self.points
    }

    /// Unit normal by the right-hand rule over the loop order.
    #[must_use]
    pub fn normal(&self) -> &Vector3 {
        &self.normal
    }

    /// Enclosed area.
    #[must_use]
    pub fn area(&self) -> f64 {
        self.area
    }

    /// Style reference, if any.
    #[must_use]
    pub fn style(&self) -> Option<StyleId> {
        self.style
    }
}

/// Accumulates planar faces that together describe one shell.
///
/// Faces are checked for degeneracy as they are added, so a bad loop is
/// reported at the call that supplied it. Winding is never changed: the
/// caller is responsible for outward-facing loops.
#[derive(Debug, Clone)]
pub struct FaceSet {
    state: FaceSetState,
    is_open_mesh: bool,
    options: BuildOptions,
    faces: Vec<FaceLoop>,
}

impl FaceSet {
    /// Opens a new face set with default tolerances.
    ///
    /// `is_open_mesh` marks the set as an expected open sheet: its border
    /// edges are not reported as warnings during assembly.
    #[must_use]
    pub fn open(is_open_mesh: bool) -> Self {
        Self::open_with_options(is_open_mesh, &BuildOptions::default())
    }

    /// Opens a new face set that checks faces against `options`.
    #[must_use]
    pub fn open_with_options(is_open_mesh: bool, options: &BuildOptions) -> Self {
        Self {
            state: FaceSetState::Open,
            is_open_mesh,
            options: *options,
            faces: Vec::new(),
        }
    }

    /// Appends a face loop.
    ///
    /// # Errors
    ///
    /// - [`StateError::AlreadyClosed`] if the set has been closed.
    /// - [`FaceError::NonFinite`] if a coordinate is NaN or infinite.
    /// - [`FaceError::TooFewPoints`] if fewer than 3 points are distinct.
    /// - [`FaceError::ZeroArea`] if the loop encloses (almost) no area.
    ///
    /// On error the set is left unchanged.
    pub fn add_face(&mut self, points: Vec<Point3>, style: Option<StyleId>) -> Result<()> {
        if self.state == FaceSetState::Closed {
            return Err(StateError::AlreadyClosed.into());
        }

        let face = self.faces.len();
        if !all_finite(&points) {
            return Err(FaceError::NonFinite { face }.into());
        }

        let distinct = count_distinct_points(&points, self.options.tolerance);
        if distinct < 3 {
            return Err(FaceError::TooFewPoints { face, distinct }.into());
        }

        let newell = newell_vector(&points);
        let len = newell.norm();
        let area = 0.5 * len;
        let min_area = self.options.min_face_area();
        if area < min_area || len <= 0.0 {
            return Err(FaceError::ZeroArea {
                face,
                area,
                tolerance: min_area,
            }
            .into());
        }

        trace!(face, points = points.len(), area, "face added");
        self.faces.push(FaceLoop {
            points,
            normal: newell / len,
            area,
            style,
        });
        Ok(())
    }

    /// Freezes the set.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::AlreadyClosed`] if the set was already closed.
    pub fn close(&mut self) -> Result<()> {
        if self.state == FaceSetState::Closed {
            return Err(StateError::AlreadyClosed.into());
        }
        self.state = FaceSetState::Closed;
        debug!(faces = self.faces.len(), open_mesh = self.is_open_mesh, "face set closed");
        Ok(())
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> FaceSetState {
        self.state
    }

    /// Returns `true` once [`close`](Self::close) has succeeded.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.state == FaceSetState::Closed
    }

    /// Whether the set was opened as an expected open sheet.
    #[must_use]
    pub fn is_open_mesh(&self) -> bool {
        self.is_open_mesh
    }

    /// Faces added so far, in insertion order.
    #[must_use]
    pub fn faces(&self) -> &[FaceLoop] {
        &self.faces
    }

    /// Number of faces.
    #[must_use]
    pub fn len(&self) -> usize {
        self.faces.len()
    }

    /// Returns `true` if no faces have been added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    pub(crate) fn into_faces(self) -> Vec<FaceLoop> {
        self.faces
    }
}
