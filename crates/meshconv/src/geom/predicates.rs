//! Geometric predicates used by the edge and metric stages.
//!
//! All inputs are plain `Vector3<f64>`; spherical variants assume unit vectors.

use nalgebra::{Matrix2, Vector2, Vector3};

use super::point::arc_length;
use crate::cfg::{GC_DEGENERATE_EPS, PARALLEL_EPS};

/// Crossing point of the line through `c1, c2` with the line through `v1, v2`,
/// solved in the xy-plane. Parallel lines fall back to the vertex midpoint.
pub fn planar_intersect(
    c1: &Vector3<f64>,
    c2: &Vector3<f64>,
    v1: &Vector3<f64>,
    v2: &Vector3<f64>,
) -> Vector3<f64> {
    let dc = c2 - c1;
    let dv = v2 - v1;
    let m = Matrix2::new(dc.x, -dv.x, dc.y, -dv.y);
    let scale = dc.xy().norm() * dv.xy().norm();
    if m.determinant().abs() <= PARALLEL_EPS * scale.max(f64::MIN_POSITIVE) {
        return (v1 + v2) * 0.5;
    }
    let rhs = Vector2::new(v1.x - c1.x, v1.y - c1.y);
    match m.lu().solve(&rhs) {
        Some(st) => c1 + dc * st.x,
        None => (v1 + v2) * 0.5,
    }
}

/// Intersection of the great circle through `c1, c2` with the great circle
/// through `v1, v2`, taking the antipode on the side of `c1 + c2`.
/// Degenerate circles fall back to the normalized vertex midpoint.
pub fn gc_intersect(
    c1: &Vector3<f64>,
    c2: &Vector3<f64>,
    v1: &Vector3<f64>,
    v2: &Vector3<f64>,
) -> Vector3<f64> {
    let n1 = c1.cross(c2);
    let n2 = v1.cross(v2);
    let d = n1.cross(&n2);
    if d.norm_squared() <= GC_DEGENERATE_EPS {
        let mid = v1 + v2;
        return mid.try_normalize(0.0).unwrap_or(mid);
    }
    let d = d.normalize();
    if d.dot(&(c1 + c2)) < 0.0 {
        -d
    } else {
        d
    }
}

/// Area of the planar triangle `abc`, `½|ab × ac|`.
#[inline]
pub fn planar_triangle_area(a: &Vector3<f64>, b: &Vector3<f64>, c: &Vector3<f64>) -> f64 {
    0.5 * (b - a).cross(&(c - a)).norm()
}

/// Area of the spherical triangle `abc` on the unit sphere (L'Huilier's
/// formula for the spherical excess). Always non-negative.
pub fn spherical_triangle_area(a: &Vector3<f64>, b: &Vector3<f64>, c: &Vector3<f64>) -> f64 {
    let ab = arc_length(a, b);
    let bc = arc_length(b, c);
    let ca = arc_length(c, a);
    let s = 0.5 * (ab + bc + ca);
    let t = (0.5 * s).tan()
        * (0.5 * (s - ab)).tan()
        * (0.5 * (s - bc)).tan()
        * (0.5 * (s - ca)).tan();
    4.0 * t.max(0.0).sqrt().atan()
}

/// Signed angle at `a` from `b - a` to `c - a`, positive when the rotation is
/// counter-clockwise about `normal`.
pub fn plane_angle(
    a: &Vector3<f64>,
    b: &Vector3<f64>,
    c: &Vector3<f64>,
    normal: &Vector3<f64>,
) -> f64 {
    let ab = b - a;
    let ac = c - a;
    let n = normal.try_normalize(0.0).unwrap_or(*normal);
    ab.cross(&ac).dot(&n).atan2(ab.dot(&ac))
}
