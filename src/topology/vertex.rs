use crate::math::Point3;

slotmap::new_key_type! {
    /// Unique identifier for a merged vertex in the topology store.
    pub struct VertexId;
}

/// Data associated with a merged vertex.
///
/// Every input point within tolerance of `point` resolves to this vertex.
#[derive(Debug, Clone)]
pub struct VertexData {
    /// The 3D position of the vertex (the first input point that created it).
    pub point: Point3,
}

impl VertexData {
    /// Creates a new vertex at the given point.
    #[must_use]
    pub fn new(point: Point3) -> Self {
        Self { point }
    }
}
