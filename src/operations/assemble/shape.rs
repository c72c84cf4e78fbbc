use crate::error::{GeometryError, Result};
use crate::operations::query::{Aabb, Area, BoundingBox, Volume};
use crate::topology::{FaceData, FaceId, ShellId, TopologyStore};

use super::adjacency::EdgeAdjacency;
use super::diagnostic::{BuildWarning, EdgeIssueKind};

/// Classification of an assembled shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    /// Closed, consistently oriented 2-manifold shells.
    Solid,
    /// A face collection without a closed-solid guarantee.
    Mesh,
}

/// The result of a successful assembly.
///
/// Owns the merged topology and its edge adjacency. For solids the first
/// shell is the outer boundary and the rest are voids or separate bodies.
#[derive(Debug, Clone)]
pub struct Shape {
    kind: ShapeKind,
    store: TopologyStore,
    adjacency: EdgeAdjacency,
    shells: Vec<ShellId>,
    warnings: Vec<BuildWarning>,
}

impl Shape {
    pub(crate) fn new(
        kind: ShapeKind,
        store: TopologyStore,
        adjacency: EdgeAdjacency,
        shells: Vec<ShellId>,
        warnings: Vec<BuildWarning>,
    ) -> Self {
        Self {
            kind,
            store,
            adjacency,
            shells,
            warnings,
        }
    }

    /// Solid or mesh.
    #[must_use]
    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    /// Returns `true` for [`ShapeKind::Solid`].
    #[must_use]
    pub fn is_solid(&self) -> bool {
        self.kind == ShapeKind::Solid
    }

    /// The merged topology.
    #[must_use]
    pub fn store(&self) -> &TopologyStore {
        &self.store
    }

    /// Edge-to-face adjacency of all faces.
    #[must_use]
    pub fn adjacency(&self) -> &EdgeAdjacency {
        &self.adjacency
    }

    /// Shells in result order; for a solid the outer shell comes first.
    #[must_use]
    pub fn shells(&self) -> &[ShellId] {
        &self.shells
    }

    /// The outer shell of a solid.
    #[must_use]
    pub fn outer_shell(&self) -> Option<ShellId> {
        match self.kind {
            ShapeKind::Solid => self.shells.first().copied(),
            ShapeKind::Mesh => None,
        }
    }

    /// Shells after the outer one: voids nested in it and separate bodies.
    #[must_use]
    pub fn inner_shells(&self) -> &[ShellId] {
        match self.kind {
            ShapeKind::Solid if !self.shells.is_empty() => &self.shells[1..],
            _ => &[],
        }
    }

    /// Problems tolerated by the fallback policy.
    #[must_use]
    pub fn warnings(&self) -> &[BuildWarning] {
        &self.warnings
    }

    /// Warnings about edges of one kind.
    pub fn edge_warnings(&self, kind: EdgeIssueKind) -> impl Iterator<Item = &BuildWarning> {
        self.warnings
            .iter()
            .filter(move |w| matches!(w, BuildWarning::Edge(issue) if issue.kind == kind))
    }

    /// All faces, in input order.
    pub fn faces(&self) -> impl Iterator<Item = (FaceId, &FaceData)> {
        self.store.faces()
    }

    /// Number of faces.
    #[must_use]
    pub fn face_count(&self) -> usize {
        self.store.face_count()
    }

    /// Number of distinct edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.adjacency.edge_count()
    }

    /// Number of merged vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.store.vertex_count()
    }

    /// `V - E + F`; 2 for each closed shell of genus 0.
    #[must_use]
    #[allow(clippy::cast_possible_wrap)]
    pub fn euler_characteristic(&self) -> i64 {
        self.vertex_count() as i64 - self.edge_count() as i64 + self.face_count() as i64
    }

    /// Bounding box over all shells.
    ///
    /// # Errors
    ///
    /// Returns an error if the shape has no faces.
    pub fn bounding_box(&self) -> Result<Aabb> {
        let mut aabb: Option<Aabb> = None;
        for &shell in &self.shells {
            if self.store.shell(shell)?.faces.is_empty() {
                continue;
            }
            let bb = BoundingBox::new(shell).execute(&self.store)?;
            aabb = Some(aabb.map_or(bb, |acc| acc.union(&bb)));
        }
        aabb.ok_or_else(|| GeometryError::Degenerate("shape has no faces".into()).into())
    }

    /// Total surface area.
    ///
    /// # Errors
    ///
    /// Returns an error if a shell cannot be read from the store.
    pub fn area(&self) -> Result<f64> {
        let mut total = 0.0;
        for &shell in &self.shells {
            total += Area::new(shell).execute(&self.store)?;
        }
        Ok(total)
    }

    /// Net signed volume: outer shell minus voids for a correctly wound solid.
    ///
    /// # Errors
    ///
    /// Returns an error if a shell cannot be read from the store.
    pub fn volume(&self) -> Result<f64> {
        let mut total = 0.0;
        for &shell in &self.shells {
            total += Volume::new(shell).execute(&self.store)?;
        }
        Ok(total)
    }
}
