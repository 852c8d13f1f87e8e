//! Edge orientation angle (`angleEdge`).

use std::f64::consts::{PI, TAU};

use nalgebra::Vector3;

use crate::cfg::ConvertCfg;
use crate::error::ConvertError;
use crate::geom::{from_lat_lon, lat, lon, plane_angle, Domain};
use crate::mesh::Mesh;

/// Fill `angle_edge`.
///
/// Plane: angle in `[0, π]` between the x axis and `cell1 → cell2` (the edge
/// location stands in for a missing `cell2`).
///
/// Sphere: angle of the tangential direction `v1 → v2` from local north,
/// in `[-π, π]`. The magnitude comes from the latitude change along the edge,
/// the sign from which side of the edge a slightly poleward point lies.
pub fn build_angle_edge(mesh: &mut Mesh, cfg: &ConvertCfg) -> Result<(), ConvertError> {
    let mut angle_edge = Vec::with_capacity(mesh.n_edges());
    for edge in 0..mesh.n_edges() {
        let angle = match mesh.domain {
            Domain::Sphere => sphere_angle(mesh, edge, cfg.pole_offset),
            Domain::Plane(_) => plane_angle_from_x(mesh, edge),
        };
        angle_edge.push(angle);
    }
    mesh.angle_edge = angle_edge;
    Ok(())
}

fn plane_angle_from_x(mesh: &Mesh, edge: usize) -> f64 {
    let cells = mesh.cells_on_edge[edge];
    let c1 = mesh.cells[cells.cell1];
    let c2 = cells.cell2.map_or(mesh.edges[edge], |c| mesh.cells[c]);
    let normal = mesh.domain.unwrap(c2, &c1) - c1;
    (Vector3::x().dot(&normal) / normal.norm())
        .clamp(-1.0, 1.0)
        .acos()
}

fn sphere_angle(mesh: &Mesh, edge: usize, pole_offset: f64) -> f64 {
    let here = mesh.edges[edge];
    let [vertex1, vertex2] = mesh.vertices_on_edge[edge];
    let v1 = mesh.vertices[vertex1];
    let v2 = mesh.vertices[vertex2];
    let np = from_lat_lon(lat(&here) + pole_offset, lon(&here)).normalize();

    let angle = ((lat(&v2) - lat(&v1)) / mesh.dv_edge[edge])
        .clamp(-1.0, 1.0)
        .acos();
    let side = plane_angle(&here, &np, &v2, &here);
    let sign = if side != 0.0 { side.signum() } else { 1.0 };
    wrap_pi(angle * sign)
}

fn wrap_pi(angle: f64) -> f64 {
    if angle > PI {
        angle - TAU
    } else if angle < -PI {
        angle + TAU
    } else {
        angle
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::convert;
    use crate::special::{hex_patch, icosphere, periodic_hex};
    use std::f64::consts::FRAC_PI_3;

    #[test]
    fn wrap_pi_folds_once() {
        assert!((wrap_pi(1.5 * PI) + 0.5 * PI).abs() < 1e-12);
        assert!((wrap_pi(-1.5 * PI) - 0.5 * PI).abs() < 1e-12);
        assert_eq!(wrap_pi(0.25), 0.25);
    }

    #[test]
    fn planar_angles_are_multiples_of_sixty_degrees() {
        for input in [hex_patch(true), periodic_hex(4, 4)] {
            let mesh = convert(input, &ConvertCfg::default()).unwrap();
            for (edge, angle) in mesh.angle_edge.iter().enumerate() {
                assert!((0.0..=PI).contains(angle), "edge {edge}: {angle}");
                let k = angle / FRAC_PI_3;
                // acos loses half the digits next to 0 and π.
                assert!((k - k.round()).abs() < 1e-6, "edge {edge}: {angle}");
            }
        }
    }

    #[test]
    fn planar_angle_points_from_cell1_to_cell2() {
        let mesh = convert(hex_patch(true), &ConvertCfg::default()).unwrap();
        for (edge, cells) in mesh.cells_on_edge.iter().enumerate() {
            let Some(cell2) = cells.cell2 else { continue };
            let d = mesh.cells[cell2] - mesh.cells[cells.cell1];
            let a = mesh.angle_edge[edge];
            assert!((d.x - a.cos()).abs() < 1e-6, "edge {edge}");
            assert!((d.y.abs() - a.sin()).abs() < 1e-6, "edge {edge}");
        }
    }

    #[test]
    fn sphere_angles_stay_in_range() {
        let mesh = convert(icosphere(2), &ConvertCfg::default()).unwrap();
        assert_eq!(mesh.angle_edge.len(), mesh.n_edges());
        for angle in &mesh.angle_edge {
            assert!(angle.is_finite());
            assert!((-PI..=PI).contains(angle));
        }
    }

    #[test]
    fn sphere_angle_of_a_meridian_edge() {
        // Edge on the equator at lon 0, tangent running due north.
        let input = icosphere(0);
        let mut mesh = convert(input, &ConvertCfg::default()).unwrap();
        mesh.edges[0] = Vector3::x();
        mesh.vertices[mesh.vertices_on_edge[0][0]] = from_lat_lon(-0.1, 0.0);
        mesh.vertices[mesh.vertices_on_edge[0][1]] = from_lat_lon(0.1, 0.0);
        mesh.dv_edge[0] = 0.2;
        build_angle_edge(&mut mesh, &ConvertCfg::default()).unwrap();
        assert!(mesh.angle_edge[0].abs() < 1e-6);
        // Flipping the tangent points south.
        mesh.vertices_on_edge[0].swap(0, 1);
        build_angle_edge(&mut mesh, &ConvertCfg::default()).unwrap();
        assert!((mesh.angle_edge[0].abs() - PI).abs() < 1e-6);
    }
}
