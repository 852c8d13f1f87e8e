//! Greedy counter-clockwise ordering of neighbor lists.
//!
//! One routine serves vertices around a cell, edges around a vertex and edges
//! around a cell: starting from the entry already in place, pick among the
//! remaining entries the one with the smallest positive (CCW) angle about the
//! local normal and swap it into the next slot. Degree is small and bounded,
//! so the O(n²) selection is cheaper than sorting by angle.

use std::f64::consts::TAU;

use nalgebra::Vector3;

use crate::geom::Domain;

/// Order `items` (indices into `locations`) counter-clockwise around `center`.
///
/// The first entry stays in place. Entries that are not CCW from the current
/// one are left behind; the order of an open fan therefore depends on the
/// starting entry.
pub fn order_ccw(
    items: &mut [usize],
    center: &Vector3<f64>,
    domain: &Domain,
    locations: &[Vector3<f64>],
) {
    let normal = domain.normal_at(center);
    let n = items.len();
    for j in 0..n.saturating_sub(1) {
        let vec1 = domain.unwrap(locations[items[j]], center) - center;
        let mag1 = vec1.norm();
        let mut min_angle = TAU;
        let mut next = None;
        for k in (j + 1)..n {
            let vec2 = domain.unwrap(locations[items[k]], center) - center;
            let cross = vec1.cross(&vec2);
            let dot = cross.dot(&normal) / (cross.norm() * normal.norm());
            if dot > 0.0 {
                let angle = (vec1.dot(&vec2) / (mag1 * vec2.norm()))
                    .clamp(-1.0, 1.0)
                    .acos();
                if angle < min_angle {
                    min_angle = angle;
                    next = Some(k);
                }
            }
        }
        if let Some(k) = next {
            items.swap(j + 1, k);
        }
    }
}
