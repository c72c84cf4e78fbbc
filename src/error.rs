use thiserror::Error;

use crate::operations::assemble::{AmbiguousPoints, Diagnostic};

/// Top-level error type for face-set assembly.
#[derive(Debug, Error)]
pub enum FacetShellError {
    #[error(transparent)]
    Face(#[from] FaceError),

    #[error(transparent)]
    State(#[from] StateError),

    #[error(transparent)]
    Assembly(#[from] AssemblyError),

    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Topology(#[from] TopologyError),

    #[error(transparent)]
    Tessellation(#[from] TessellationError),
}

/// A face loop rejected when it was added to a face set.
#[derive(Debug, Error)]
pub enum FaceError {
    #[error("face {face} is degenerate: {distinct} distinct points, at least 3 required")]
    TooFewPoints { face: usize, distinct: usize },

    #[error("face {face} is degenerate: area {area:e} is below tolerance {tolerance:e}")]
    ZeroArea {
        face: usize,
        area: f64,
        tolerance: f64,
    },

    #[error("face {face} has a non-finite coordinate")]
    NonFinite { face: usize },
}

/// Misuse of the open/closed face-set lifecycle.
#[derive(Debug, Error)]
pub enum StateError {
    #[error("face set is already closed")]
    AlreadyClosed,

    #[error("face set {face_set} is still open")]
    NotClosed { face_set: usize },
}

/// Terminal failure of an assembly run.
#[derive(Debug, Error)]
pub enum AssemblyError {
    #[error("nothing to assemble: no faces were supplied")]
    Empty,

    #[error("shape is not a closed manifold: {0}")]
    NonManifold(Diagnostic),

    #[error("ambiguous vertex coincidence: {0}")]
    CoincidenceAmbiguity(AmbiguousPoints),
}

/// Errors related to geometric parameters.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("parameter {parameter} = {value} is out of range [{min}, {max}]")]
    ParameterOutOfRange {
        parameter: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("degenerate geometry: {0}")]
    Degenerate(String),
}

/// Errors related to arena lookups.
#[derive(Debug, Error)]
pub enum TopologyError {
    #[error("entity not found: {0}")]
    EntityNotFound(String),
}

/// Errors related to tessellation.
#[derive(Debug, Error)]
pub enum TessellationError {
    #[error("face loop is self-intersecting")]
    SelfIntersecting,

    #[error("tessellation failed: {0}")]
    Failed(String),
}

impl FacetShellError {
    /// Returns the manifold diagnostic if this is a non-manifold failure.
    #[must_use]
    pub fn diagnostic(&self) -> Option<&Diagnostic> {
        match self {
            Self::Assembly(AssemblyError::NonManifold(diagnostic)) => Some(diagnostic),
            _ => None,
        }
    }
}

/// Convenience type alias for results using [`FacetShellError`].
pub type Result<T> = std::result::Result<T, FacetShellError>;
