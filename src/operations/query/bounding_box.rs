use crate::error::{GeometryError, Result};
use crate::math::Point3;
use crate::topology::{ShellId, TopologyStore};

/// An axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner of the bounding box.
    pub min: Point3,
    /// Maximum corner of the bounding box.
    pub max: Point3,
}

impl Aabb {
    /// Box around a single point.
    #[must_use]
    pub fn from_point(point: Point3) -> Self {
        Self {
            min: point,
            max: point,
        }
    }

    /// Grows the box to contain `point`.
    pub fn include(&mut self, point: &Point3) {
        self.min = self.min.inf(point);
        self.max = self.max.sup(point);
    }

    /// Smallest box containing both boxes.
    #[must_use]
    pub fn union(&self, other: &Aabb) -> Aabb {
        Aabb {
            min: self.min.inf(&other.min),
            max: self.max.sup(&other.max),
        }
    }

    /// Returns `true` if `other` lies entirely within this box.
    #[must_use]
    pub fn contains(&self, other: &Aabb) -> bool {
        self.min.inf(&other.min) == self.min && self.max.sup(&other.max) == self.max
    }
}

/// Computes the axis-aligned bounding box of a shell.
pub struct BoundingBox {
    shell: ShellId,
}

impl BoundingBox {
    /// Creates a new `BoundingBox` query.
    #[must_use]
    pub fn new(shell: ShellId) -> Self {
        Self { shell }
    }

    /// Executes the query, returning the AABB.
    ///
    /// # Errors
    ///
    /// Returns an error if the shell is not in the store or has no faces.
    pub fn execute(&self, store: &TopologyStore) -> Result<Aabb> {
        let shell = store.shell(self.shell)?;
        let mut aabb: Option<Aabb> = None;
        for &face in &shell.faces {
            for point in store.face_points(face)? {
                match aabb.as_mut() {
                    Some(bb) => bb.include(&point),
                    None => aabb = Some(Aabb::from_point(point)),
                }
            }
        }
        aabb.ok_or_else(|| GeometryError::Degenerate("shell has no faces".into()).into())
    }
}
