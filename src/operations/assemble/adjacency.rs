//! Edge-to-face adjacency of an assembled shape.

use std::collections::BTreeMap;

use crate::error::Result;
use crate::topology::{EdgeKey, EdgeUse, FaceId, TopologyStore, VertexId};

/// Maps every undirected edge to the face loops that traverse it.
///
/// Keys are ordered, so iteration is deterministic for a given input.
#[derive(Debug, Clone, Default)]
pub struct EdgeAdjacency {
    edges: BTreeMap<EdgeKey, Vec<EdgeUse>>,
}

impl EdgeAdjacency {
    /// Builds adjacency from every face in the store.
    #[must_use]
    pub fn build(store: &TopologyStore) -> Self {
        let mut edges: BTreeMap<EdgeKey, Vec<EdgeUse>> = BTreeMap::new();

        for (face_id, face) in store.faces() {
            for (from, to) in face.directed_edges() {
                if from == to {
                    continue;
                }
                let key = EdgeKey::new(from, to);
                edges.entry(key).or_default().push(EdgeUse {
                    face: face_id,
                    source: face.source,
                    forward: key.a() == from,
                });
            }
        }

        Self { edges }
    }

    /// Uses of the edge between two vertices, in either order.
    ///
    /// Returns `None` if no face traverses the edge.
    #[must_use]
    pub fn uses(&self, v0: VertexId, v1: VertexId) -> Option<&[EdgeUse]> {
        self.edges.get(&EdgeKey::new(v0, v1)).map(Vec::as_slice)
    }

    /// Iterates all edges with their uses.
    pub fn iter(&self) -> impl Iterator<Item = (&EdgeKey, &[EdgeUse])> {
        self.edges.iter().map(|(key, uses)| (key, uses.as_slice()))
    }

    /// Faces that share at least one edge with `face`, in edge order, without
    /// duplicates.
    ///
    /// # Errors
    ///
    /// Returns an error if `face` is not in the store.
    pub fn adjacent_faces(&self, store: &TopologyStore, face: FaceId) -> Result<Vec<FaceId>> {
        let data = store.face(face)?;
        let mut neighbours = Vec::new();
        for (from, to) in data.directed_edges() {
            let Some(uses) = self.uses(from, to) else {
                continue;
            };
            for edge_use in uses {
                if edge_use.face != face && !neighbours.contains(&edge_use.face) {
                    neighbours.push(edge_use.face);
                }
            }
        }
        Ok(neighbours)
    }

    /// Iterate over all boundary edges (edges with exactly one adjacent face).
    pub fn boundary_edges(&self) -> impl Iterator<Item = EdgeKey> + '_ {
        self.edges
            .iter()
            .filter(|(_, uses)| uses.len() == 1)
            .map(|(&edge, _)| edge)
    }

    /// Count the number of boundary edges.
    #[must_use]
    pub fn boundary_edge_count(&self) -> usize {
        self.edges.values().filter(|uses| uses.len() == 1).count()
    }

    /// Count the number of non-manifold edges (more than two adjacent faces).
    #[must_use]
    pub fn non_manifold_edge_count(&self) -> usize {
        self.edges.values().filter(|uses| uses.len() > 2).count()
    }

    /// Check if every edge has at most two adjacent faces.
    #[must_use]
    pub fn is_manifold(&self) -> bool {
        self.edges.values().all(|uses| uses.len() <= 2)
    }

    /// Check if there are no boundary edges.
    #[must_use]
    pub fn is_watertight(&self) -> bool {
        self.edges.values().all(|uses| uses.len() >= 2)
    }

    /// Check if every two-face edge is traversed once in each direction.
    #[must_use]
    pub fn is_consistently_oriented(&self) -> bool {
        self.edges
            .values()
            .filter(|uses| uses.len() == 2)
            .all(|uses| uses[0].forward != uses[1].forward)
    }

    /// Every edge is shared by exactly two faces with opposite direction.
    #[must_use]
    pub fn is_closed_manifold(&self) -> bool {
        self.edges
            .values()
            .all(|uses| uses.len() == 2 && uses[0].forward != uses[1].forward)
    }

    /// Get the total number of edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}
