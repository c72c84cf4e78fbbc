use std::collections::{HashMap, HashSet, VecDeque};

use spade::handles::{FixedFaceHandle, FixedVertexHandle, InnerTag};
use spade::{
    ConstrainedDelaunayTriangulation, InsertionError, Point2 as SpadePoint2, Triangulation,
};

use crate::error::{Result, TessellationError};
use crate::math::polygon_3d::plane_basis;
use crate::math::Point3;
use crate::topology::{FaceId, TopologyStore};

use super::TriangleMesh;

type Cdt = ConstrainedDelaunayTriangulation<SpadePoint2<f64>>;

/// Tessellates a planar face into a triangle mesh.
///
/// Triangles are wound so their geometric normal agrees with the face normal.
/// Mesh vertices keep the merged 3D positions, so neighbouring faces meet
/// exactly along shared edges.
pub struct TessellateFace {
    face: FaceId,
}

impl TessellateFace {
    /// Creates a new tessellation operation for a face.
    #[must_use]
    pub fn new(face: FaceId) -> Self {
        Self { face }
    }

    /// Executes the tessellation.
    ///
    /// # Errors
    ///
    /// - [`TessellationError::SelfIntersecting`] if two loop edges cross.
    /// - [`TessellationError::Failed`] if a point cannot be triangulated.
    /// - A topology error if the face is not in the store.
    pub fn execute(&self, store: &TopologyStore) -> Result<TriangleMesh> {
        let face = store.face(self.face)?;
        let points = store.face_points(self.face)?;
        let Some(&origin) = points.first() else {
            return Err(TessellationError::Failed("face has no vertices".into()).into());
        };

        let normal = face.normal;
        let (u_dir, v_dir) = plane_basis(&normal);
        let project = |p: &Point3| -> SpadePoint2<f64> {
            let d = p - origin;
            SpadePoint2::new(d.dot(&u_dir), d.dot(&v_dir))
        };
        let loop_2d: Vec<_> = points.iter().map(project).collect();

        let mut cdt = Cdt::new();
        let handles = insert_constraint_loop(&mut cdt, &loop_2d)?;

        // First 3D point wins when two loop points project onto one site
        let mut positions: HashMap<usize, Point3> = HashMap::with_capacity(points.len());
        for (handle, point) in handles.iter().zip(&points) {
            positions.entry(handle.index()).or_insert(*point);
        }

        let interior_faces = classify_interior_faces(&cdt);

        let mut mesh = TriangleMesh::default();
        let mut vertex_map: HashMap<usize, u32> = HashMap::new();

        for face_handle in cdt.inner_faces() {
            if !interior_faces.contains(&face_handle.fix().index()) {
                continue;
            }

            let mut tri_indices = [0u32; 3];
            for (i, vh) in face_handle.vertices().iter().enumerate() {
                let idx = vh.fix().index();
                let mesh_idx = if let Some(&existing) = vertex_map.get(&idx) {
                    existing
                } else {
                    let p3 = positions.get(&idx).copied().unwrap_or_else(|| {
                        let pos = vh.position();
                        origin + u_dir * pos.x + v_dir * pos.y
                    });
                    #[allow(clippy::cast_possible_truncation)]
                    let new_idx = mesh.vertices.len() as u32;
                    mesh.vertices.push(p3);
                    mesh.normals.push(normal);
                    vertex_map.insert(idx, new_idx);
                    new_idx
                };
                tri_indices[i] = mesh_idx;
            }

            mesh.indices.push(tri_indices);
            mesh.styles.push(face.style);
        }

        Ok(mesh)
    }
}

/// Inserts a closed polygon as constraint edges into the CDT and returns the
/// vertex handle of every loop point.
fn insert_constraint_loop(
    cdt: &mut Cdt,
    points: &[SpadePoint2<f64>],
) -> Result<Vec<FixedVertexHandle>> {
    if points.len() < 3 {
        return Err(
            TessellationError::Failed("constraint loop needs at least 3 points".into()).into(),
        );
    }

    let mut handles = Vec::with_capacity(points.len());
    for &pt in points {
        let h = cdt
            .insert(pt)
            .map_err(|e: InsertionError| TessellationError::Failed(format!("CDT insert: {e}")))?;
        handles.push(h);
    }

    for i in 0..handles.len() {
        let from = handles[i];
        let to = handles[(i + 1) % handles.len()];
        if from == to {
            continue;
        }
        if !cdt.can_add_constraint(from, to) {
            return Err(TessellationError::SelfIntersecting.into());
        }
        cdt.add_constraint(from, to);
    }

    Ok(handles)
}

/// Classifies which inner faces of the CDT are inside the polygon using flood-fill.
///
/// Starts from faces adjacent to the outer (infinite) face at depth 0. Each time
/// a constraint edge is crossed, depth increments. Odd depth = interior.
fn classify_interior_faces(cdt: &Cdt) -> HashSet<usize> {
    let mut interior = HashSet::new();
    let mut depth_map: HashMap<usize, u32> = HashMap::new();
    let mut queue: VecDeque<(FixedFaceHandle<InnerTag>, u32)> = VecDeque::new();

    let outer_fix = cdt.outer_face().fix();

    for edge in cdt.directed_edges() {
        if edge.face().fix() != outer_fix {
            continue;
        }
        if let Some(inner) = edge.rev().face().as_inner() {
            let idx = inner.fix().index();
            if depth_map.contains_key(&idx) {
                continue;
            }
            let depth = u32::from(cdt.is_constraint_edge(edge.as_undirected().fix()));
            depth_map.insert(idx, depth);
            if depth % 2 == 1 {
                interior.insert(idx);
            }
            queue.push_back((inner.fix(), depth));
        }
    }

    while let Some((face_fix, depth)) = queue.pop_front() {
        let face = cdt.face(face_fix);
        for edge in face.adjacent_edges() {
            let Some(neighbor) = edge.rev().face().as_inner() else {
                continue;
            };
            let n_idx = neighbor.fix().index();
            if depth_map.contains_key(&n_idx) {
                continue;
            }
            let new_depth = depth + u32::from(cdt.is_constraint_edge(edge.as_undirected().fix()));
            depth_map.insert(n_idx, new_depth);
            if new_depth % 2 == 1 {
                interior.insert(n_idx);
            }
            queue.push_back((neighbor.fix(), new_depth));
        }
    }

    interior
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::FacetShellError;
    use crate::math::Vector3;
    use crate::topology::{FaceData, FaceRef, StyleId, VertexData};

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    fn face_from_points(store: &mut TopologyStore, points: &[Point3], normal: Vector3) -> FaceId {
        let vertices = points
            .iter()
            .map(|&pt| store.add_vertex(VertexData::new(pt)))
            .collect();
        store.add_face(FaceData {
            vertices,
            normal,
            style: Some(StyleId::new(7)),
            source: FaceRef::new(0, 0),
        })
    }

    fn triangle_normal(mesh: &TriangleMesh, tri: [u32; 3]) -> Vector3 {
        let v0 = mesh.vertices[tri[0] as usize];
        let v1 = mesh.vertices[tri[1] as usize];
        let v2 = mesh.vertices[tri[2] as usize];
        (v1 - v0).cross(&(v2 - v0))
    }

    #[test]
    fn square_produces_2_triangles() {
        let mut store = TopologyStore::new();
        let face = face_from_points(
            &mut store,
            &[p(0.0, 0.0, 0.0), p(4.0, 0.0, 0.0), p(4.0, 4.0, 0.0), p(0.0, 4.0, 0.0)],
            Vector3::z(),
        );
        let mesh = TessellateFace::new(face).execute(&store).unwrap();
        assert_eq!(mesh.triangle_count(), 2);
        assert_eq!(mesh.vertices.len(), 4);
        assert_eq!(mesh.styles, vec![Some(StyleId::new(7)); 2]);
        assert!((mesh.area() - 16.0).abs() < 1e-9);
    }

    #[test]
    fn l_shape_concave_tessellates() {
        let mut store = TopologyStore::new();
        let face = face_from_points(
            &mut store,
            &[
                p(0.0, 0.0, 0.0),
                p(4.0, 0.0, 0.0),
                p(4.0, 2.0, 0.0),
                p(2.0, 2.0, 0.0),
                p(2.0, 4.0, 0.0),
                p(0.0, 4.0, 0.0),
            ],
            Vector3::z(),
        );
        let mesh = TessellateFace::new(face).execute(&store).unwrap();
        assert_eq!(mesh.triangle_count(), 4);
        assert_eq!(mesh.vertices.len(), 6);
        assert!((mesh.area() - 12.0).abs() < 1e-9);
    }

    #[test]
    fn triangles_follow_face_winding() {
        let mut store = TopologyStore::new();
        // Clockwise seen from +z: the face points down
        let face = face_from_points(
            &mut store,
            &[p(0.0, 0.0, 1.0), p(0.0, 3.0, 1.0), p(3.0, 3.0, 1.0), p(3.0, 0.0, 1.0)],
            -Vector3::z(),
        );
        let mesh = TessellateFace::new(face).execute(&store).unwrap();
        for &tri in &mesh.indices {
            assert!(triangle_normal(&mesh, tri).z < 0.0);
        }
        for n in &mesh.normals {
            assert!((n.z + 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn vertices_keep_input_positions() {
        let mut store = TopologyStore::new();
        let input = [p(1.0, 0.0, 0.0), p(0.0, 1.0, 0.0), p(0.0, 0.0, 1.0)];
        let normal = Vector3::new(1.0, 1.0, 1.0).normalize();
        let face = face_from_points(&mut store, &input, normal);
        let mesh = TessellateFace::new(face).execute(&store).unwrap();
        assert_eq!(mesh.triangle_count(), 1);
        for v in &mesh.vertices {
            assert!(input.contains(v));
        }
        assert!(triangle_normal(&mesh, mesh.indices[0]).dot(&normal) > 0.0);
    }

    #[test]
    fn bowtie_is_self_intersecting() {
        let mut store = TopologyStore::new();
        let face = face_from_points(
            &mut store,
            &[p(0.0, 0.0, 0.0), p(2.0, 2.0, 0.0), p(2.0, 0.0, 0.0), p(0.0, 2.0, 0.0)],
            Vector3::z(),
        );
        let err = TessellateFace::new(face).execute(&store).unwrap_err();
        assert!(matches!(
            err,
            FacetShellError::Tessellation(TessellationError::SelfIntersecting)
        ));
    }
}
