//! Point algebra and geometric predicates.
//!
//! Purpose
//! - Thin helpers over `nalgebra::Vector3<f64>` (lat/lon, periodic unwrap,
//!   great-circle distance).
//! - Double-precision predicates: segment intersection, triangle area, signed
//!   angle, each in a planar and a unit-sphere flavor.
//! - `Domain`: the single switch every stage consults instead of branching on
//!   "sphere or plane" by hand.
//!
//! References
//! - Code cross-refs: `edges::build_edges`, `metrics::build_areas`,
//!   `ordering::order_ccw`.

mod point;
mod predicates;

pub use point::{arc_length, from_lat_lon, lat, lon, Periodicity};
pub use predicates::{
    gc_intersect, plane_angle, planar_intersect, planar_triangle_area, spherical_triangle_area,
};

use nalgebra::Vector3;

/// Geometry of the mesh surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Domain {
    /// Unit sphere; all points are kept normalized.
    Sphere,
    /// The z = 0 plane, optionally periodic in x and/or y.
    Plane(Periodicity),
}

impl Domain {
    #[inline]
    pub fn is_sphere(&self) -> bool {
        matches!(self, Domain::Sphere)
    }

    /// Local "up" direction at `p`, used by every counter-clockwise test.
    #[inline]
    pub fn normal_at(&self, p: &Vector3<f64>) -> Vector3<f64> {
        match self {
            Domain::Sphere => *p,
            Domain::Plane(_) => Vector3::z(),
        }
    }

    /// `p` translated to the periodic image closest to `reference`.
    #[inline]
    pub fn unwrap(&self, p: Vector3<f64>, reference: &Vector3<f64>) -> Vector3<f64> {
        match self {
            Domain::Sphere => p,
            Domain::Plane(periodicity) => periodicity.fix(p, reference),
        }
    }

    /// Snap a constructed point back onto the surface.
    #[inline]
    pub fn project(&self, p: Vector3<f64>) -> Vector3<f64> {
        match self {
            Domain::Sphere => p.try_normalize(0.0).unwrap_or(p),
            Domain::Plane(_) => p,
        }
    }

    #[inline]
    pub fn distance(&self, a: &Vector3<f64>, b: &Vector3<f64>) -> f64 {
        match self {
            Domain::Sphere => arc_length(a, b),
            Domain::Plane(_) => (b - a).norm(),
        }
    }

    #[inline]
    pub fn triangle_area(&self, a: &Vector3<f64>, b: &Vector3<f64>, c: &Vector3<f64>) -> f64 {
        match self {
            Domain::Sphere => spherical_triangle_area(a, b, c),
            Domain::Plane(_) => planar_triangle_area(a, b, c),
        }
    }

    /// Location of an interior edge: crossing of the cell-center segment with
    /// the vertex segment.
    #[inline]
    pub fn intersect(
        &self,
        c1: &Vector3<f64>,
        c2: &Vector3<f64>,
        v1: &Vector3<f64>,
        v2: &Vector3<f64>,
    ) -> Vector3<f64> {
        match self {
            Domain::Sphere => gc_intersect(c1, c2, v1, v2),
            Domain::Plane(_) => planar_intersect(c1, c2, v1, v2),
        }
    }
}
