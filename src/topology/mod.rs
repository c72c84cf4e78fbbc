pub mod edge;
pub mod face;
pub mod shell;
pub mod vertex;

pub use edge::{EdgeKey, EdgeUse};
pub use face::{FaceData, FaceId, FaceRef, StyleId};
pub use shell::{ShellData, ShellId};
pub use vertex::{VertexData, VertexId};

use crate::error::TopologyError;
use crate::math::Point3;
use slotmap::SlotMap;

/// Central arena that owns all topological entities of an assembled shape.
///
/// Faces refer to shared vertices by id, so two faces that meet along an
/// edge hold the same pair of [`VertexId`]s.
#[derive(Debug, Default, Clone)]
pub struct TopologyStore {
    vertices: SlotMap<VertexId, VertexData>,
    faces: SlotMap<FaceId, FaceData>,
    shells: SlotMap<ShellId, ShellData>,
}

impl TopologyStore {
    /// Creates a new, empty topology store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- Vertex operations ---

    /// Inserts a vertex and returns its ID.
    pub fn add_vertex(&mut self, data: VertexData) -> VertexId {
        self.vertices.insert(data)
    }

    /// Returns a reference to the vertex data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the store.
    pub fn vertex(&self, id: VertexId) -> Result<&VertexData, TopologyError> {
        self.vertices
            .get(id)
            .ok_or_else(|| TopologyError::EntityNotFound("vertex".into()))
    }

    /// Iterates all vertices in insertion order.
    pub fn vertices(&self) -> impl Iterator<Item = (VertexId, &VertexData)> {
        self.vertices.iter()
    }

    /// Number of merged vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    // --- Face operations ---

    /// Inserts a face and returns its ID.
    pub fn add_face(&mut self, data: FaceData) -> FaceId {
        self.faces.insert(data)
    }

    /// Returns a reference to the face data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the store.
    pub fn face(&self, id: FaceId) -> Result<&FaceData, TopologyError> {
        self.faces
            .get(id)
            .ok_or_else(|| TopologyError::EntityNotFound("face".into()))
    }

    /// Iterates all faces in insertion order.
    pub fn faces(&self) -> impl Iterator<Item = (FaceId, &FaceData)> {
        self.faces.iter()
    }

    /// Number of faces.
    #[must_use]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Resolves a face's vertex loop to positions.
    ///
    /// # Errors
    ///
    /// Returns an error if the face or one of its vertices is not found.
    pub fn face_points(&self, id: FaceId) -> Result<Vec<Point3>, TopologyError> {
        let face = self.face(id)?;
        face.vertices
            .iter()
            .map(|&v| self.vertex(v).map(|data| data.point))
            .collect()
    }

    // --- Shell operations ---

    /// Inserts a shell and returns its ID.
    pub fn add_shell(&mut self, data: ShellData) -> ShellId {
        self.shells.insert(data)
    }

    /// Returns a reference to the shell data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the store.
    pub fn shell(&self, id: ShellId) -> Result<&ShellData, TopologyError> {
        self.shells
            .get(id)
            .ok_or_else(|| TopologyError::EntityNotFound("shell".into()))
    }

    /// Returns a mutable reference to the shell data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the store.
    pub fn shell_mut(&mut self, id: ShellId) -> Result<&mut ShellData, TopologyError> {
        self.shells
            .get_mut(id)
            .ok_or_else(|| TopologyError::EntityNotFound("shell".into()))
    }

    /// Iterates all shells in insertion order.
    pub fn shells(&self) -> impl Iterator<Item = (ShellId, &ShellData)> {
        self.shells.iter()
    }
}
