use super::{Point3, Vector3};

/// Newell vector of a closed polygon loop.
///
/// The direction follows the right-hand rule over the loop order and the
/// magnitude equals twice the polygon's area. Works for non-convex and
/// slightly non-planar loops.
#[must_use]
pub fn newell_vector(points: &[Point3]) -> Vector3 {
    let n = points.len();
    let mut normal = Vector3::new(0.0, 0.0, 0.0);
    for i in 0..n {
        let curr = &points[i];
        let next = &points[(i + 1) % n];
        normal.x += (curr.y - next.y) * (curr.z + next.z);
        normal.y += (curr.z - next.z) * (curr.x + next.x);
        normal.z += (curr.x - next.x) * (curr.y + next.y);
    }
    normal
}

/// Area of a planar polygon loop.
///
/// Returns 0.0 for loops with fewer than 3 points.
#[must_use]
pub fn polygon_area_3d(points: &[Point3]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    0.5 * newell_vector(points).norm()
}

/// Counts points that are pairwise further apart than `tolerance`.
///
/// Quadratic in the loop length, which is fine for face loops.
#[must_use]
pub fn count_distinct_points(points: &[Point3], tolerance: f64) -> usize {
    let mut distinct: Vec<&Point3> = Vec::with_capacity(points.len());
    for p in points {
        if distinct.iter().all(|q| (p - *q).norm() > tolerance) {
            distinct.push(p);
        }
    }
    distinct.len()
}

/// Returns `true` if every coordinate of every point is finite.
#[must_use]
pub fn all_finite(points: &[Point3]) -> bool {
    points
        .iter()
        .all(|p| p.x.is_finite() && p.y.is_finite() && p.z.is_finite())
}

/// Builds an orthonormal `(u, v)` basis spanning the plane with the given
/// unit normal, such that `u × v = normal`.
#[must_use]
pub fn plane_basis(normal: &Vector3) -> (Vector3, Vector3) {
    // Choose a reference vector not parallel to the normal
    let reference = if normal.x.abs() < 0.9 {
        Vector3::new(1.0, 0.0, 0.0)
    } else {
        Vector3::new(0.0, 1.0, 0.0)
    };

    let u_dir = normal.cross(&reference).normalize();
    let v_dir = normal.cross(&u_dir);
    (u_dir, v_dir)
}
