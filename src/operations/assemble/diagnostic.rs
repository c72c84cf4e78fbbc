//! Issues found while validating an assembled shape.

use std::fmt;

use crate::math::Point3;
use crate::topology::{EdgeUse, FaceRef};

/// Why an edge prevents a closed, consistently oriented shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeIssueKind {
    /// Only one face uses the edge: the shell has a hole.
    Boundary,
    /// More than two faces use the edge.
    NonManifold,
    /// Two faces use the edge in the same direction: one of them is wound
    /// the wrong way.
    SameDirection,
}

impl fmt::Display for EdgeIssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Boundary => write!(f, "boundary"),
            Self::NonManifold => write!(f, "non-manifold"),
            Self::SameDirection => write!(f, "same-direction"),
        }
    }
}

/// An offending edge together with every face that uses it.
#[derive(Debug, Clone)]
pub struct EdgeIssue {
    /// What is wrong with the edge.
    pub kind: EdgeIssueKind,
    /// Position of the edge's first endpoint.
    pub start: Point3,
    /// Position of the edge's second endpoint.
    pub end: Point3,
    /// All traversals of the edge.
    pub uses: Vec<EdgeUse>,
}

impl EdgeIssue {
    /// Input positions of the faces using this edge.
    pub fn faces(&self) -> impl Iterator<Item = FaceRef> + '_ {
        self.uses.iter().map(|u| u.source)
    }

    /// Returns `true` if `face` uses this edge.
    #[must_use]
    pub fn involves(&self, face: FaceRef) -> bool {
        self.faces().any(|f| f == face)
    }

    /// Boundary edges only make a shell open; the other kinds make it
    /// inconsistent.
    #[must_use]
    pub fn is_inconsistent(&self) -> bool {
        self.kind != EdgeIssueKind::Boundary
    }
}

impl fmt::Display for EdgeIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} edge {}-{} used by ",
            self.kind,
            PointDisplay(&self.start),
            PointDisplay(&self.end)
        )?;
        for (i, edge_use) in self.uses.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            let direction = if edge_use.forward { "forward" } else { "reversed" };
            write!(f, "{} ({direction})", edge_use.source)?;
        }
        Ok(())
    }
}

/// Why a face was dropped during assembly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaceIssueKind {
    /// Vertex merging left fewer than three distinct vertices.
    Collapsed {
        /// Distinct vertices left after merging.
        distinct: usize,
    },
}

/// An offending face.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaceIssue {
    /// Input position of the face.
    pub face: FaceRef,
    /// What is wrong with it.
    pub kind: FaceIssueKind,
}

impl fmt::Display for FaceIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            FaceIssueKind::Collapsed { distinct } => write!(
                f,
                "{} collapsed to {distinct} distinct vertices after merging",
                self.face
            ),
        }
    }
}

/// An input point within tolerance of more than one merged vertex.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmbiguousPoint {
    /// Face the point belongs to.
    pub face: FaceRef,
    /// Index of the point in the face loop.
    pub position: usize,
    /// The input point.
    pub point: Point3,
    /// Number of merged vertices within tolerance.
    pub candidates: usize,
}

impl fmt::Display for AmbiguousPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "point {} of {} at {} is within tolerance of {} vertices",
            self.position,
            self.face,
            PointDisplay(&self.point),
            self.candidates
        )
    }
}

/// All ambiguous points of a strict-mode assembly.
#[derive(Debug, Clone, Default)]
pub struct AmbiguousPoints(pub Vec<AmbiguousPoint>);

impl fmt::Display for AmbiguousPoints {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ambiguous point(s)", self.0.len())?;
        for point in &self.0 {
            write!(f, "; {point}")?;
        }
        Ok(())
    }
}

/// Everything that stops a face soup from forming a closed solid.
#[derive(Debug, Clone, Default)]
pub struct Diagnostic {
    /// Offending edges in deterministic edge order.
    pub edges: Vec<EdgeIssue>,
    /// Faces dropped during assembly.
    pub faces: Vec<FaceIssue>,
}

impl Diagnostic {
    /// No issues: the faces form closed, consistently oriented shells.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty() && self.faces.is_empty()
    }

    /// Returns `true` if any issue goes beyond an open border.
    #[must_use]
    pub fn has_inconsistencies(&self) -> bool {
        !self.faces.is_empty() || self.edges.iter().any(EdgeIssue::is_inconsistent)
    }

    /// Offending edges of one kind.
    pub fn edges_of_kind(&self, kind: EdgeIssueKind) -> impl Iterator<Item = &EdgeIssue> {
        self.edges.iter().filter(move |issue| issue.kind == kind)
    }

    /// Total number of issues.
    #[must_use]
    pub fn issue_count(&self) -> usize {
        self.edges.len() + self.faces.len()
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} offending edge(s), {} collapsed face(s)",
            self.edges.len(),
            self.faces.len()
        )?;
        for issue in &self.edges {
            write!(f, "; {issue}")?;
        }
        for issue in &self.faces {
            write!(f, "; {issue}")?;
        }
        Ok(())
    }
}

/// A problem tolerated by the fallback policy and reported on the result.
#[derive(Debug, Clone)]
pub enum BuildWarning {
    /// An offending edge in a mesh result.
    Edge(EdgeIssue),
    /// A face dropped from a mesh result.
    Face(FaceIssue),
    /// A point merged into the nearest of several candidate vertices.
    AmbiguousMerge(AmbiguousPoint),
    /// Two consecutive loop points merged into one vertex; the loop edge
    /// between them was removed.
    CollapsedEdge {
        /// Face whose loop lost an edge.
        face: FaceRef,
        /// Index of the point whose outgoing edge collapsed.
        position: usize,
    },
    /// A closed shell whose winding encloses volume the wrong way: an outer
    /// shell or separate body facing inward, or a void facing outward.
    InsideOut {
        /// Source face set of the shell.
        face_set: usize,
        /// Signed volume of the shell.
        signed_volume: f64,
    },
}

impl fmt::Display for BuildWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Edge(issue) => write!(f, "{issue}"),
            Self::Face(issue) => write!(f, "{issue}"),
            Self::AmbiguousMerge(point) => write!(f, "{point}"),
            Self::CollapsedEdge { face, position } => {
                write!(f, "edge after point {position} of {face} collapsed")
            }
            Self::InsideOut {
                face_set,
                signed_volume,
            } => write!(
                f,
                "shell of face set {face_set} is inside out (signed volume {signed_volume})"
            ),
        }
    }
}

struct PointDisplay<'a>(&'a Point3);

impl fmt::Display for PointDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.0.x, self.0.y, self.0.z)
    }
}
