//! Point helpers on top of `nalgebra::Vector3<f64>`.
//!
//! - Latitude/longitude accessors and their inverse for unit-sphere points.
//! - `Periodicity`: axis offsets of a doubly periodic planar domain and the
//!   unwrap rule that moves a point next to a reference point.
//! - `arc_length`: great-circle distance between unit vectors.

use std::f64::consts::TAU;

use nalgebra::Vector3;

/// Latitude in radians, `asin(z / |p|)`.
#[inline]
pub fn lat(p: &Vector3<f64>) -> f64 {
    let r = p.norm();
    if r == 0.0 {
        return 0.0;
    }
    (p.z / r).clamp(-1.0, 1.0).asin()
}

/// Longitude in radians, wrapped into `[0, 2π)`.
#[inline]
pub fn lon(p: &Vector3<f64>) -> f64 {
    let l = p.y.atan2(p.x);
    if l < 0.0 {
        l + TAU
    } else {
        l
    }
}

/// Unit-sphere point at the given latitude and longitude.
#[inline]
pub fn from_lat_lon(lat: f64, lon: f64) -> Vector3<f64> {
    Vector3::new(lat.cos() * lon.cos(), lat.cos() * lon.sin(), lat.sin())
}

/// Great-circle distance between two unit vectors, `atan2(|a×b|, a·b)`.
#[inline]
pub fn arc_length(a: &Vector3<f64>, b: &Vector3<f64>) -> f64 {
    a.cross(b).norm().atan2(a.dot(b))
}

/// Translation offsets of a periodic planar domain. An offset `<= 0`
/// disables periodicity along that axis.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Periodicity {
    pub x: f64,
    pub y: f64,
}

impl Periodicity {
    /// Offsets derived from the cell-center extent.
    ///
    /// Quadrilateral duals (`vertex_degree == 4`) are not staggered, so the
    /// period spans `min + max`; staggered triangular duals use `max`.
    pub fn from_cell_extent(x_range: [f64; 2], y_range: [f64; 2], vertex_degree: usize) -> Self {
        if vertex_degree == 4 {
            Self {
                x: x_range[0] + x_range[1],
                y: y_range[0] + y_range[1],
            }
        } else {
            Self {
                x: x_range[1],
                y: y_range[1],
            }
        }
    }

    /// Translate `p` per axis by `-offset`, `0` or `+offset`, whichever lands
    /// closest to `reference`. Ties keep the point where it is.
    pub fn fix(&self, p: Vector3<f64>, reference: &Vector3<f64>) -> Vector3<f64> {
        Vector3::new(
            fix_axis(p.x, reference.x, self.x),
            fix_axis(p.y, reference.y, self.y),
            p.z,
        )
    }
}

fn fix_axis(value: f64, reference: f64, offset: f64) -> f64 {
    if offset <= 0.0 {
        return value;
    }
    let mut best = value;
    let mut best_dist = (value - reference).abs();
    for candidate in [value - offset, value + offset] {
        let dist = (candidate - reference).abs();
        if dist < best_dist {
            best = candidate;
            best_dist = dist;
        }
    }
    best
}
