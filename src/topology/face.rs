use std::fmt;

use crate::math::Vector3;

use super::vertex::VertexId;

slotmap::new_key_type! {
    /// Unique identifier for a face in the topology store.
    pub struct FaceId;
}

/// Opaque style or category reference attached to a face.
///
/// Carried through assembly and tessellation untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StyleId(u64);

impl StyleId {
    /// Wraps a host-defined identifier.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the host-defined identifier.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// Position of a face in the caller's input: face set index, then face index
/// within that set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FaceRef {
    /// Index of the face set in the list passed to the assembler.
    pub face_set: usize,
    /// Index of the face within its face set, in insertion order.
    pub face: usize,
}

impl FaceRef {
    /// Creates a new face reference.
    #[must_use]
    pub const fn new(face_set: usize, face: usize) -> Self {
        Self { face_set, face }
    }
}

impl fmt::Display for FaceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "face {} of set {}", self.face, self.face_set)
    }
}

/// Data associated with an assembled planar face.
///
/// The vertex loop keeps the caller's winding; the normal follows it by the
/// right-hand rule.
#[derive(Debug, Clone)]
pub struct FaceData {
    /// Merged vertices in loop order.
    pub vertices: Vec<VertexId>,
    /// Unit normal of the input loop.
    pub normal: Vector3,
    /// Style reference, if any.
    pub style: Option<StyleId>,
    /// Where this face came from in the input.
    pub source: FaceRef,
}

impl FaceData {
    /// Iterates the directed edges `(from, to)` of the loop, closing back to
    /// the first vertex.
    pub fn directed_edges(&self) -> impl Iterator<Item = (VertexId, VertexId)> + '_ {
        let n = self.vertices.len();
        (0..n).map(move |i| (self.vertices[i], self.vertices[(i + 1) % n]))
    }
}
