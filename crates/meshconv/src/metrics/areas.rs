//! Cell areas, kite areas and dual triangle areas.

use crate::cfg::ConvertCfg;
use crate::error::ConvertError;
use crate::mesh::Mesh;

/// Area assigned to cells that fail the completeness check.
pub const INCOMPLETE_CELL_AREA: f64 = -1.0;

/// Fill `area_cell`, `kite_areas_on_vertex` and `area_triangle`.
///
/// Completeness sums the angles subtended at the cell center by the two
/// vertices of each of the first `n - 1` edges. Cells whose sum does not
/// reach `cfg.completeness_threshold` get `INCOMPLETE_CELL_AREA`.
pub fn build_areas(mesh: &mut Mesh, cfg: &ConvertCfg) -> Result<(), ConvertError> {
    let domain = mesh.domain;
    let mut area_cell = Vec::with_capacity(mesh.n_cells());
    let mut incomplete = 0usize;
    for (cell, edges) in mesh.edges_on_cell.iter().enumerate() {
        let center = mesh.cells[cell];
        let mut angle_sum = 0.0;
        for &edge in edges.iter().take(edges.len().saturating_sub(1)) {
            let [vertex1, vertex2] = mesh.vertices_on_edge[edge];
            let a = domain.unwrap(mesh.vertices[vertex1], &center) - center;
            let b = domain.unwrap(mesh.vertices[vertex2], &center) - center;
            angle_sum += (a.dot(&b) / (a.norm() * b.norm())).clamp(-1.0, 1.0).acos();
        }
        if angle_sum >= cfg.completeness_threshold {
            let mut area = 0.0;
            for &edge in edges {
                let [mut vertex1, mut vertex2] = mesh.vertices_on_edge[edge];
                if mesh.cells_on_edge[edge].cell1 != cell {
                    std::mem::swap(&mut vertex1, &mut vertex2);
                }
                let v1 = domain.unwrap(mesh.vertices[vertex1], &center);
                let v2 = domain.unwrap(mesh.vertices[vertex2], &center);
                area += domain.triangle_area(&center, &v1, &v2);
            }
            area_cell.push(area);
        } else {
            tracing::warn!(
                cell,
                angle_sum,
                angle_sum_deg = angle_sum.to_degrees(),
                "incomplete cell"
            );
            incomplete += 1;
            area_cell.push(INCOMPLETE_CELL_AREA);
        }
    }
    if incomplete > 0 {
        tracing::info!(incomplete, "cells flagged incomplete");
    }

    let mut kite_areas_on_vertex = Vec::with_capacity(mesh.n_vertices());
    let mut area_triangle = Vec::with_capacity(mesh.n_vertices());
    for (vertex, cells) in mesh.cells_on_vertex.iter().enumerate() {
        let here = mesh.vertices[vertex];
        let edges = &mesh.edges_on_vertex[vertex];
        let n = cells.len();
        let mut kites = vec![0.0; n];
        for (j, cell) in cells.iter().enumerate() {
            let Some(cell) = *cell else { continue };
            let c = domain.unwrap(mesh.cells[cell], &here);
            let e1 = domain.unwrap(mesh.edges[edges[j]], &here);
            let e2 = domain.unwrap(mesh.edges[edges[(j + 1) % n]], &here);
            kites[j] = domain.triangle_area(&here, &e1, &c) + domain.triangle_area(&here, &c, &e2);
        }
        area_triangle.push(kites.iter().sum());
        kite_areas_on_vertex.push(kites);
    }

    mesh.area_cell = area_cell;
    mesh.kite_areas_on_vertex = kite_areas_on_vertex;
    mesh.area_triangle = area_triangle;
    Ok(())
}
