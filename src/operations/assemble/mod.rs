//! Stitches closed face sets into a validated solid or mesh.
//!
//! Assembly runs in three passes over the input:
//!
//! 1. merge coincident points of all faces into shared vertices,
//! 2. map every undirected edge to the faces that traverse it,
//! 3. classify each edge and apply the target/fallback policy.

mod adjacency;
mod diagnostic;
mod shape;
mod vertex_merge;

pub use adjacency::EdgeAdjacency;
pub use diagnostic::{
    AmbiguousPoint, AmbiguousPoints, BuildWarning, Diagnostic, EdgeIssue, EdgeIssueKind,
    FaceIssue, FaceIssueKind,
};
pub use shape::{Shape, ShapeKind};

use std::collections::HashSet;

use tracing::{debug, info, instrument, warn};

use crate::config::BuildOptions;
use crate::error::{AssemblyError, Result, StateError};
use crate::operations::creation::FaceSet;
use crate::operations::query::{Aabb, BoundingBox, Volume};
use crate::topology::{FaceData, FaceId, FaceRef, ShellData, ShellId, TopologyStore, VertexId};

use vertex_merge::VertexMerger;

/// The kind of result the caller accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssemblyTarget {
    /// Only a closed solid.
    Solid,
    /// Always a mesh, even when the faces close up.
    Mesh,
    /// A solid when possible, otherwise a mesh.
    AnyGeometry,
}

/// What to do when the faces do not form a closed solid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackPolicy {
    /// Fail when a [`AssemblyTarget::Solid`] target is not met. Targets that
    /// accept a mesh still get one.
    Abort,
    /// Return a mesh instead of failing a solid target.
    PermitOpenMesh,
    /// Return a best-effort mesh instead of failing a solid target, with
    /// inconsistent winding, over-shared edges and collapsed faces expected.
    PermitInconsistentFaces,
}

/// Assembles closed [`FaceSet`]s into a [`Shape`].
///
/// Each face set becomes one shell. Faces from all sets share one vertex
/// arena, so edges are matched across sets as well.
pub struct ShapeBuilder {
    target: AssemblyTarget,
    fallback: FallbackPolicy,
    options: BuildOptions,
}

impl ShapeBuilder {
    /// Creates a new `ShapeBuilder` with default options.
    #[must_use]
    pub fn new(target: AssemblyTarget, fallback: FallbackPolicy) -> Self {
        Self {
            target,
            fallback,
            options: BuildOptions::default(),
        }
    }

    /// Sets tolerances, strictness and the default style.
    #[must_use]
    pub fn with_options(mut self, options: BuildOptions) -> Self {
        self.options = options;
        self
    }

    /// Executes the assembly, consuming the face sets.
    ///
    /// # Errors
    ///
    /// - [`StateError::NotClosed`] if any face set is still open.
    /// - [`AssemblyError::Empty`] if there are no faces at all.
    /// - [`AssemblyError::CoincidenceAmbiguity`] in strict mode, listing
    ///   every ambiguous point.
    /// - [`AssemblyError::NonManifold`] if the target and fallback reject
    ///   the topology, listing every offending edge and face.
    #[instrument(skip_all, fields(face_sets = face_sets.len()))]
    pub fn execute(&self, face_sets: Vec<FaceSet>) -> Result<Shape> {
        if let Some(face_set) = face_sets.iter().position(|set| !set.is_closed()) {
            return Err(StateError::NotClosed { face_set }.into());
        }
        if face_sets.iter().all(FaceSet::is_empty) {
            return Err(AssemblyError::Empty.into());
        }

        let mut store = TopologyStore::new();
        let mut merger = VertexMerger::new(self.options.tolerance);
        let mut shells: Vec<ShellId> = Vec::with_capacity(face_sets.len());
        let mut ambiguous: Vec<AmbiguousPoint> = Vec::new();
        let mut collapsed_edges: Vec<BuildWarning> = Vec::new();
        let mut diagnostic = Diagnostic::default();
        let mut open_mesh_sets: HashSet<usize> = HashSet::new();

        for (set_index, face_set) in face_sets.into_iter().enumerate() {
            let is_open_mesh = face_set.is_open_mesh();
            if is_open_mesh {
                open_mesh_sets.insert(set_index);
            }

            let mut shell_faces = Vec::with_capacity(face_set.len());
            for (face_index, face) in face_set.into_faces().into_iter().enumerate() {
                let source = FaceRef::new(set_index, face_index);
                let mut vertices: Vec<VertexId> = Vec::with_capacity(face.points().len());

                for (position, point) in face.points().iter().enumerate() {
                    let merged = merger.get_or_create(&mut store, point);
                    if merged.candidates > 1 {
                        ambiguous.push(AmbiguousPoint {
                            face: source,
                            position,
                            point: *point,
                            candidates: merged.candidates,
                        });
                    }
                    if vertices.last() == Some(&merged.vertex) {
                        collapsed_edges.push(BuildWarning::CollapsedEdge {
                            face: source,
                            position: position - 1,
                        });
                        continue;
                    }
                    vertices.push(merged.vertex);
                }
                if vertices.len() > 1 && vertices.first() == vertices.last() {
                    vertices.pop();
                    collapsed_edges.push(BuildWarning::CollapsedEdge {
                        face: source,
                        position: face.points().len() - 1,
                    });
                }

                let distinct = count_distinct(&vertices);
                if distinct < 3 {
                    warn!(%source, distinct, "face collapsed during vertex merging");
                    diagnostic.faces.push(FaceIssue {
                        face: source,
                        kind: FaceIssueKind::Collapsed { distinct },
                    });
                    continue;
                }

                let face_id = store.add_face(FaceData {
                    vertices,
                    normal: *face.normal(),
                    style: face.style().or(self.options.default_style),
                    source,
                });
                shell_faces.push(face_id);
            }

            shells.push(store.add_shell(ShellData {
                faces: shell_faces,
                is_closed: false,
                is_open_mesh,
                face_set: set_index,
            }));
        }

        if self.options.strict_coincidence && !ambiguous.is_empty() {
            warn!(count = ambiguous.len(), "ambiguous vertex coincidence in strict mode");
            return Err(AssemblyError::CoincidenceAmbiguity(AmbiguousPoints(ambiguous)).into());
        }

        let adjacency = EdgeAdjacency::build(&store);
        debug!(
            vertices = store.vertex_count(),
            faces = store.face_count(),
            edges = adjacency.edge_count(),
            "topology merged"
        );

        diagnostic.edges = classify_edges(&store, &adjacency)?;
        mark_closed_shells(&mut store, &shells, &diagnostic)?;

        let Some(kind) = resolve(self.target, self.fallback, &diagnostic) else {
            warn!(
                issues = diagnostic.issue_count(),
                assembly_target = ?self.target,
                fallback_policy = ?self.fallback,
                "assembly rejected"
            );
            return Err(AssemblyError::NonManifold(diagnostic).into());
        };
        if diagnostic.has_inconsistencies()
            && self.fallback != FallbackPolicy::PermitInconsistentFaces
        {
            warn!(
                issues = diagnostic.issue_count(),
                assembly_target = ?self.target,
                "mesh contains inconsistent faces"
            );
        }

        let mut warnings: Vec<BuildWarning> = Vec::new();
        for point in ambiguous {
            warn!(%point, "ambiguous merge");
            warnings.push(BuildWarning::AmbiguousMerge(point));
        }
        warnings.extend(collapsed_edges);
        for issue in diagnostic.edges {
            let expected_border = issue.kind == EdgeIssueKind::Boundary
                && issue.faces().all(|f| open_mesh_sets.contains(&f.face_set));
            if expected_border {
                debug!(%issue, "open sheet border");
                continue;
            }
            warn!(%issue, "tolerated edge issue");
            warnings.push(BuildWarning::Edge(issue));
        }
        warnings.extend(diagnostic.faces.into_iter().map(BuildWarning::Face));

        if kind == ShapeKind::Solid {
            shells = order_solid_shells(&store, shells, &mut warnings)?;
        }

        info!(?kind, faces = store.face_count(), warnings = warnings.len(), "assembly complete");
        Ok(Shape::new(kind, store, adjacency, shells, warnings))
    }
}

/// Decides the result kind, or `None` if the build must fail.
fn resolve(
    target: AssemblyTarget,
    fallback: FallbackPolicy,
    diagnostic: &Diagnostic,
) -> Option<ShapeKind> {
    if diagnostic.is_empty() {
        return Some(match target {
            AssemblyTarget::Mesh => ShapeKind::Mesh,
            AssemblyTarget::Solid | AssemblyTarget::AnyGeometry => ShapeKind::Solid,
        });
    }

    if target == AssemblyTarget::Solid && fallback == FallbackPolicy::Abort {
        return None;
    }
    Some(ShapeKind::Mesh)
}

/// Collects every edge not shared by exactly two oppositely wound faces.
fn classify_edges(store: &TopologyStore, adjacency: &EdgeAdjacency) -> Result<Vec<EdgeIssue>> {
    let mut issues = Vec::new();
    for (key, uses) in adjacency.iter() {
        let kind = match uses.len() {
            1 => EdgeIssueKind::Boundary,
            2 if uses[0].forward != uses[1].forward => continue,
            2 => EdgeIssueKind::SameDirection,
            _ => EdgeIssueKind::NonManifold,
        };
        issues.push(EdgeIssue {
            kind,
            start: store.vertex(key.a())?.point,
            end: store.vertex(key.b())?.point,
            uses: uses.to_vec(),
        });
    }
    Ok(issues)
}

/// A shell is closed when none of its faces touch an offending edge and none
/// of its faces collapsed.
fn mark_closed_shells(
    store: &mut TopologyStore,
    shells: &[ShellId],
    diagnostic: &Diagnostic,
) -> Result<()> {
    let offending: HashSet<FaceId> = diagnostic
        .edges
        .iter()
        .flat_map(|issue| issue.uses.iter().map(|u| u.face))
        .collect();
    let collapsed_sets: HashSet<usize> = diagnostic.faces.iter().map(|f| f.face.face_set).collect();

    for &shell_id in shells {
        let shell = store.shell_mut(shell_id)?;
        shell.is_closed = !shell.faces.is_empty()
            && !collapsed_sets.contains(&shell.face_set)
            && shell.faces.iter().all(|face| !offending.contains(face));
    }
    Ok(())
}

/// Puts the shell enclosing the largest volume first and flags shells whose
/// orientation disagrees with their role: voids nested in the outer bounding
/// box must face inward, separate bodies outward.
fn order_solid_shells(
    store: &TopologyStore,
    shells: Vec<ShellId>,
    warnings: &mut Vec<BuildWarning>,
) -> Result<Vec<ShellId>> {
    let mut measured = Vec::with_capacity(shells.len());
    for shell in shells {
        let volume = Volume::new(shell).execute(store)?;
        measured.push((shell, volume));
    }

    let outer = measured
        .iter()
        .enumerate()
        .max_by(|(_, a), (_, b)| a.1.abs().total_cmp(&b.1.abs()))
        .map_or(0, |(i, _)| i);
    if outer != 0 {
        let outer_shell = measured.remove(outer);
        measured.insert(0, outer_shell);
    }

    let outer_box = match measured.first() {
        Some(&(shell, _)) => shell_box(store, shell)?,
        None => None,
    };
    for (i, &(shell, signed_volume)) in measured.iter().enumerate() {
        let inside_out = if i == 0 {
            signed_volume < 0.0
        } else {
            // Shells outside the outer bounding box are separate bodies
            let nested = match (&outer_box, shell_box(store, shell)?) {
                (Some(outer), Some(inner)) => outer.contains(&inner),
                _ => false,
            };
            if nested {
                signed_volume > 0.0
            } else {
                signed_volume < 0.0
            }
        };
        if inside_out {
            let face_set = store.shell(shell)?.face_set;
            warn!(face_set, signed_volume, "shell is inside out");
            warnings.push(BuildWarning::InsideOut {
                face_set,
                signed_volume,
            });
        }
    }

    Ok(measured.into_iter().map(|(shell, _)| shell).collect())
}

fn shell_box(store: &TopologyStore, shell: ShellId) -> Result<Option<Aabb>> {
    if store.shell(shell)?.faces.is_empty() {
        return Ok(None);
    }
    BoundingBox::new(shell).execute(store).map(Some)
}

fn count_distinct(vertices: &[VertexId]) -> usize {
    let mut sorted = vertices.to_vec();
    sorted.sort_unstable();
    sorted.dedup();
    sorted.len()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::FacetShellError;
    use crate::math::Point3;
    use crate::operations::creation::{MakeBox, MakeTetrahedron};
    use crate::topology::StyleId;

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    fn box_loops() -> Vec<Vec<Point3>> {
        MakeBox::new(p(0.0, 0.0, 0.0), p(2.0, 1.0, 1.0))
            .execute()
            .unwrap()
            .faces()
            .iter()
            .map(|f| f.points().to_vec())
            .collect()
    }

    fn closed_set(loops: Vec<Vec<Point3>>) -> FaceSet {
        let mut set = FaceSet::open(false);
        for lp in loops {
            set.add_face(lp, None).unwrap();
        }
        set.close().unwrap();
        set
    }

    // ── policy ──────────────────────────────────────────────────

    #[test]
    fn resolve_policy_table() {
        use AssemblyTarget as T;
        use FallbackPolicy as F;

        let closed = Diagnostic::default();
        let open = Diagnostic {
            edges: vec![EdgeIssue {
                kind: EdgeIssueKind::Boundary,
                start: p(0.0, 0.0, 0.0),
                end: p(1.0, 0.0, 0.0),
                uses: vec![],
            }],
            faces: vec![],
        };
        let mut inconsistent = open.clone();
        inconsistent.edges[0].kind = EdgeIssueKind::SameDirection;

        assert_eq!(resolve(T::Solid, F::Abort, &closed), Some(ShapeKind::Solid));
        assert_eq!(resolve(T::AnyGeometry, F::Abort, &closed), Some(ShapeKind::Solid));
        assert_eq!(resolve(T::Mesh, F::Abort, &closed), Some(ShapeKind::Mesh));

        assert_eq!(resolve(T::Solid, F::Abort, &open), None);
        assert_eq!(resolve(T::Solid, F::PermitOpenMesh, &open), Some(ShapeKind::Mesh));
        assert_eq!(resolve(T::AnyGeometry, F::Abort, &open), Some(ShapeKind::Mesh));
        assert_eq!(resolve(T::Mesh, F::Abort, &open), Some(ShapeKind::Mesh));

        assert_eq!(resolve(T::Solid, F::Abort, &inconsistent), None);
        assert_eq!(
            resolve(T::Solid, F::PermitOpenMesh, &inconsistent),
            Some(ShapeKind::Mesh)
        );
        assert_eq!(resolve(T::AnyGeometry, F::Abort, &inconsistent), Some(ShapeKind::Mesh));
        assert_eq!(resolve(T::Mesh, F::Abort, &inconsistent), Some(ShapeKind::Mesh));
        assert_eq!(
            resolve(T::Solid, F::PermitInconsistentFaces, &inconsistent),
            Some(ShapeKind::Mesh)
        );
    }

    // ── solids ──────────────────────────────────────────────────

    #[test]
    fn tetrahedron_is_solid() {
        let set = MakeTetrahedron::new(p(0.0, 0.0, 0.0), 1.0).execute().unwrap();
        let shape = ShapeBuilder::new(AssemblyTarget::Solid, FallbackPolicy::Abort)
            .execute(vec![set])
            .unwrap();
        assert!(shape.is_solid());
        assert_eq!(shape.face_count(), 4);
        assert_eq!(shape.edge_count(), 6);
        assert_eq!(shape.vertex_count(), 4);
        assert_eq!(shape.euler_characteristic(), 2);
        assert!(shape.warnings().is_empty());
        let outer = shape.outer_shell().unwrap();
        assert!(shape.store().shell(outer).unwrap().is_closed);
    }

    #[test]
    fn mesh_target_keeps_closed_faces_as_mesh() {
        let shape = ShapeBuilder::new(AssemblyTarget::Mesh, FallbackPolicy::Abort)
            .execute(vec![closed_set(box_loops())])
            .unwrap();
        assert_eq!(shape.kind(), ShapeKind::Mesh);
        assert!(shape.outer_shell().is_none());
        assert!(shape.warnings().is_empty());
    }

    #[test]
    fn noisy_coordinates_are_stitched() {
        let mut loops = box_loops();
        for lp in &mut loops {
            for point in lp.iter_mut() {
                point.x += 1e-11;
            }
        }
        loops[3][0].y -= 2e-11;
        let shape = ShapeBuilder::new(AssemblyTarget::Solid, FallbackPolicy::Abort)
            .execute(vec![closed_set(loops)])
            .unwrap();
        assert!(shape.is_solid());
        assert_eq!(shape.vertex_count(), 8);
    }

    #[test]
    fn box_with_void_orders_outer_shell_first() {
        // Void is wound inward (reversed loops)
        let inner_loops: Vec<Vec<Point3>> = MakeBox::new(p(0.5, 0.25, 0.25), p(1.5, 0.75, 0.75))
            .execute()
            .unwrap()
            .faces()
            .iter()
            .map(|f| f.points().iter().rev().copied().collect())
            .collect();

        let shape = ShapeBuilder::new(AssemblyTarget::Solid, FallbackPolicy::Abort)
            .execute(vec![closed_set(inner_loops), closed_set(box_loops())])
            .unwrap();

        assert!(shape.is_solid());
        let outer = shape.outer_shell().unwrap();
        assert_eq!(shape.store().shell(outer).unwrap().face_set, 1);
        assert_eq!(shape.inner_shells().len(), 1);
        assert!(shape.warnings().is_empty());
        assert!((shape.volume().unwrap() - (2.0 - 0.25)).abs() < 1e-9);
    }

    #[test]
    fn disjoint_bodies_are_not_voids() {
        let far_loops = |reverse: bool| -> Vec<Vec<Point3>> {
            MakeBox::new(p(5.0, 0.0, 0.0), p(6.0, 1.0, 1.0))
                .execute()
                .unwrap()
                .faces()
                .iter()
                .map(|f| {
                    let mut lp = f.points().to_vec();
                    if reverse {
                        lp.reverse();
                    }
                    lp
                })
                .collect()
        };

        let shape = ShapeBuilder::new(AssemblyTarget::Solid, FallbackPolicy::Abort)
            .execute(vec![closed_set(far_loops(false)), closed_set(box_loops())])
            .unwrap();
        assert!(shape.is_solid());
        assert!(shape.warnings().is_empty());
        assert!((shape.volume().unwrap() - 3.0).abs() < 1e-9);

        let shape = ShapeBuilder::new(AssemblyTarget::Solid, FallbackPolicy::Abort)
            .execute(vec![closed_set(far_loops(true)), closed_set(box_loops())])
            .unwrap();
        assert!(matches!(
            shape.warnings(),
            [BuildWarning::InsideOut { face_set: 0, .. }]
        ));
    }

    #[test]
    fn inward_wound_solid_is_flagged() {
        let loops: Vec<Vec<Point3>> = box_loops()
            .into_iter()
            .map(|lp| lp.into_iter().rev().collect())
            .collect();
        let shape = ShapeBuilder::new(AssemblyTarget::Solid, FallbackPolicy::Abort)
            .execute(vec![closed_set(loops)])
            .unwrap();
        assert!(shape.is_solid());
        assert!(matches!(
            shape.warnings(),
            [BuildWarning::InsideOut { face_set: 0, .. }]
        ));
    }

    // ── failures ────────────────────────────────────────────────

    #[test]
    fn open_set_is_state_error() {
        let mut set = FaceSet::open(false);
        set.add_face(box_loops().remove(0), None).unwrap();
        let err = ShapeBuilder::new(AssemblyTarget::AnyGeometry, FallbackPolicy::Abort)
            .execute(vec![closed_set(box_loops()), set])
            .unwrap_err();
        assert!(matches!(
            err,
            FacetShellError::State(StateError::NotClosed { face_set: 1 })
        ));
    }

    #[test]
    fn no_faces_is_empty_error() {
        let mut set = FaceSet::open(false);
        set.close().unwrap();
        let err = ShapeBuilder::new(AssemblyTarget::AnyGeometry, FallbackPolicy::Abort)
            .execute(vec![set])
            .unwrap_err();
        assert!(matches!(err, FacetShellError::Assembly(AssemblyError::Empty)));

        let err = ShapeBuilder::new(AssemblyTarget::AnyGeometry, FallbackPolicy::Abort)
            .execute(vec![])
            .unwrap_err();
        assert!(matches!(err, FacetShellError::Assembly(AssemblyError::Empty)));
    }

    #[test]
    fn open_box_with_reversed_face_reports_both_issue_kinds() {
        let mut loops = box_loops();
        loops.pop();
        loops[0].reverse();
        let err = ShapeBuilder::new(AssemblyTarget::Solid, FallbackPolicy::Abort)
            .execute(vec![closed_set(loops.clone())])
            .unwrap_err();
        let diagnostic = err.diagnostic().unwrap();
        assert_eq!(diagnostic.edges_of_kind(EdgeIssueKind::Boundary).count(), 4);
        assert_eq!(diagnostic.edges_of_kind(EdgeIssueKind::SameDirection).count(), 3);

        let shape = ShapeBuilder::new(AssemblyTarget::Solid, FallbackPolicy::PermitOpenMesh)
            .execute(vec![closed_set(loops)])
            .unwrap();
        assert_eq!(shape.kind(), ShapeKind::Mesh);
        assert_eq!(shape.face_count(), 5);
        assert_eq!(shape.edge_warnings(EdgeIssueKind::Boundary).count(), 4);
        assert_eq!(shape.edge_warnings(EdgeIssueKind::SameDirection).count(), 3);
    }

    #[test]
    fn duplicated_face_is_non_manifold() {
        let mut loops = box_loops();
        let mut twin = loops[2].clone();
        twin.reverse();
        loops.push(twin);
        let err = ShapeBuilder::new(AssemblyTarget::Solid, FallbackPolicy::Abort)
            .execute(vec![closed_set(loops)])
            .unwrap_err();
        let diagnostic = err.diagnostic().unwrap();
        assert_eq!(diagnostic.edges_of_kind(EdgeIssueKind::NonManifold).count(), 4);
    }

    // ── fallbacks ───────────────────────────────────────────────

    #[test]
    fn inconsistent_faces_fallback_keeps_every_face() {
        let mut loops = box_loops();
        loops[1].reverse();
        let shape = ShapeBuilder::new(AssemblyTarget::Solid, FallbackPolicy::PermitInconsistentFaces)
            .execute(vec![closed_set(loops)])
            .unwrap();
        assert_eq!(shape.kind(), ShapeKind::Mesh);
        assert_eq!(shape.face_count(), 6);
        assert_eq!(shape.edge_warnings(EdgeIssueKind::SameDirection).count(), 4);
        let shell = shape.shells()[0];
        assert!(!shape.store().shell(shell).unwrap().is_closed);
    }

    #[test]
    fn mesh_targets_accept_a_reversed_face() {
        let mut loops = box_loops();
        loops[2].reverse();
        for (target, fallback) in [
            (AssemblyTarget::Mesh, FallbackPolicy::Abort),
            (AssemblyTarget::AnyGeometry, FallbackPolicy::Abort),
            (AssemblyTarget::Solid, FallbackPolicy::PermitOpenMesh),
        ] {
            let shape = ShapeBuilder::new(target, fallback)
                .execute(vec![closed_set(loops.clone())])
                .unwrap();
            assert_eq!(shape.kind(), ShapeKind::Mesh);
            assert_eq!(shape.face_count(), 6);
            assert_eq!(shape.edge_warnings(EdgeIssueKind::SameDirection).count(), 4);
        }
    }

    #[test]
    fn open_mesh_hint_suppresses_border_warnings() {
        let mut set = FaceSet::open(true);
        set.add_face(vec![p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0), p(1.0, 1.0, 0.0)], None)
            .unwrap();
        set.add_face(vec![p(0.0, 0.0, 0.0), p(1.0, 1.0, 0.0), p(0.0, 1.0, 0.0)], None)
            .unwrap();
        set.close().unwrap();

        let shape = ShapeBuilder::new(AssemblyTarget::AnyGeometry, FallbackPolicy::Abort)
            .execute(vec![set])
            .unwrap();
        assert_eq!(shape.kind(), ShapeKind::Mesh);
        assert!(shape.warnings().is_empty());
        assert_eq!(shape.adjacency().boundary_edge_count(), 4);
    }

    // ── merging ─────────────────────────────────────────────────

    #[test]
    fn collapsed_face_is_dropped_from_mesh() {
        let options = BuildOptions::default().with_tolerance(0.1);
        let mut sliver = FaceSet::open(true);
        sliver
            .add_face(vec![p(0.0, 0.0, 0.0), p(0.05, 0.0, 0.0), p(0.0, 0.3, 0.0)], None)
            .unwrap();
        sliver.close().unwrap();

        let err = ShapeBuilder::new(AssemblyTarget::Solid, FallbackPolicy::Abort)
            .with_options(options)
            .execute(vec![sliver.clone()])
            .unwrap_err();
        assert_eq!(err.diagnostic().unwrap().faces.len(), 1);

        let mut tri = FaceSet::open(true);
        tri.add_face(vec![p(5.0, 0.0, 0.0), p(6.0, 0.0, 0.0), p(5.0, 1.0, 0.0)], None)
            .unwrap();
        tri.close().unwrap();
        let shape = ShapeBuilder::new(AssemblyTarget::AnyGeometry, FallbackPolicy::PermitInconsistentFaces)
            .with_options(options)
            .execute(vec![sliver, tri])
            .unwrap();
        assert_eq!(shape.face_count(), 1);
        assert!(shape
            .warnings()
            .iter()
            .any(|w| matches!(w, BuildWarning::Face(issue) if issue.face == FaceRef::new(0, 0))));
        assert!(shape
            .warnings()
            .iter()
            .any(|w| matches!(w, BuildWarning::CollapsedEdge { position: 0, .. })));
    }

    #[test]
    fn strict_mode_rejects_ambiguous_points() {
        let options = BuildOptions::default()
            .with_tolerance(0.5)
            .with_strict_coincidence(true);
        let mut set = FaceSet::open_with_options(true, &options);
        set.add_face(vec![p(0.0, 0.0, 0.0), p(0.8, 0.0, 0.0), p(0.0, 3.0, 0.0)], None)
            .unwrap();
        // (0.4, 0, 0) is within 0.5 of both (0, 0, 0) and (0.8, 0, 0)
        set.add_face(vec![p(0.4, 0.0, 0.0), p(3.0, 0.0, 1.0), p(3.0, 3.0, 1.0)], None)
            .unwrap();
        set.close().unwrap();

        let err = ShapeBuilder::new(AssemblyTarget::AnyGeometry, FallbackPolicy::PermitInconsistentFaces)
            .with_options(options)
            .execute(vec![set.clone()])
            .unwrap_err();
        let points = match err {
            FacetShellError::Assembly(AssemblyError::CoincidenceAmbiguity(points)) => points,
            other => panic!("expected coincidence ambiguity, got {other}"),
        };
        assert_eq!(points.0.len(), 1);
        assert_eq!(points.0[0].face, FaceRef::new(0, 1));
        assert_eq!(points.0[0].candidates, 2);

        let lenient = options.with_strict_coincidence(false);
        let shape = ShapeBuilder::new(AssemblyTarget::AnyGeometry, FallbackPolicy::PermitInconsistentFaces)
            .with_options(lenient)
            .execute(vec![set])
            .unwrap();
        assert!(shape
            .warnings()
            .iter()
            .any(|w| matches!(w, BuildWarning::AmbiguousMerge(_))));
    }

    // ── styles ──────────────────────────────────────────────────

    #[test]
    fn default_style_fills_unstyled_faces() {
        let mut loops = box_loops();
        let mut set = FaceSet::open(false);
        let first = loops.remove(0);
        set.add_face(first, Some(StyleId::new(1))).unwrap();
        for lp in loops {
            set.add_face(lp, None).unwrap();
        }
        set.close().unwrap();

        let shape = ShapeBuilder::new(AssemblyTarget::Solid, FallbackPolicy::Abort)
            .with_options(BuildOptions::default().with_default_style(Some(StyleId::new(9))))
            .execute(vec![set])
            .unwrap();
        let styles: Vec<Option<StyleId>> = shape.faces().map(|(_, f)| f.style).collect();
        assert_eq!(styles[0], Some(StyleId::new(1)));
        assert!(styles[1..].iter().all(|s| *s == Some(StyleId::new(9))));
    }

    #[test]
    fn results_are_send() {
        fn assert_send<T: Send>() {}
        assert_send::<FaceSet>();
        assert_send::<Shape>();
        assert_send::<FacetShellError>();
    }
}
