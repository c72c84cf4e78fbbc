use super::face::{FaceId, FaceRef};
use super::vertex::VertexId;

/// An undirected edge, stored as an ordered vertex pair (`a <= b`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeKey {
    a: VertexId,
    b: VertexId,
}

impl EdgeKey {
    /// Creates a key from two endpoints in either order.
    #[must_use]
    pub fn new(v0: VertexId, v1: VertexId) -> Self {
        if v0 <= v1 {
            Self { a: v0, b: v1 }
        } else {
            Self { a: v1, b: v0 }
        }
    }

    /// The smaller endpoint.
    #[must_use]
    pub fn a(&self) -> VertexId {
        self.a
    }

    /// The larger endpoint.
    #[must_use]
    pub fn b(&self) -> VertexId {
        self.b
    }
}

/// One traversal of an edge by a face loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeUse {
    /// The face whose loop traverses the edge.
    pub face: FaceId,
    /// Input position of that face.
    pub source: FaceRef,
    /// If `true`, the loop runs from `a` to `b` of the [`EdgeKey`].
    pub forward: bool,
}
