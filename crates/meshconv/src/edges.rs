//! Edge synthesis: discovery, location, distances and orientation.
//!
//! Every consecutive vertex pair around a cell bounds an edge. The pair is
//! keyed together with the cells on both sides, deduplicated, and numbered in
//! key order so that edge ids do not depend on the order cells were visited.
//!
//! Orientation convention: for the stored `[v1, v2]` and `cell1 → cell2`,
//! `(c2 - c1) × (v2 - v1)` points along the local normal.

use std::collections::HashSet;

use crate::cfg::ConvertCfg;
use crate::error::ConvertError;
use crate::mesh::{EdgeCells, Mesh};

/// Canonical, orientation-free identity of an edge during discovery.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeKey {
    /// Smaller vertex id first.
    pub vertices: [usize; 2],
    /// Smaller cell id first for interior edges; `(cell, None)` on the boundary.
    pub cell1: usize,
    pub cell2: Option<usize>,
}

impl EdgeKey {
    pub fn new(vertex1: usize, vertex2: usize, cell: usize, other: Option<usize>) -> Self {
        let vertices = [vertex1.min(vertex2), vertex1.max(vertex2)];
        match other {
            Some(o) => Self {
                vertices,
                cell1: cell.min(o),
                cell2: Some(cell.max(o)),
            },
            None => Self {
                vertices,
                cell1: cell,
                cell2: None,
            },
        }
    }
}

/// The cell other than `cell` that both vertices touch, scanning the first
/// vertex's incidence list in order.
fn second_cell(mesh: &Mesh, cell: usize, vertex1: usize, vertex2: usize) -> Option<usize> {
    let others = &mesh.cells_on_vertex[vertex2];
    mesh.cells_on_vertex[vertex1]
        .iter()
        .flatten()
        .copied()
        .find(|&c| c != cell && others.contains(&Some(c)))
}

/// Discover all edges from the provisional `vertices_on_cell` and fill
/// `edges`, `cells_on_edge`, `vertices_on_edge`, `dc_edge` and `dv_edge`.
///
/// Cells with fewer than two vertices contribute no edge.
pub fn build_edges(mesh: &mut Mesh, cfg: &ConvertCfg) -> Result<(), ConvertError> {
    let mut keys = HashSet::new();
    for (cell, list) in mesh.vertices_on_cell.iter().enumerate() {
        let n = list.len();
        if n < 2 {
            continue;
        }
        for j in 0..n {
            let vertex1 = list[(j + n - 1) % n];
            let vertex2 = list[j];
            let other = second_cell(mesh, cell, vertex1, vertex2);
            keys.insert(EdgeKey::new(vertex1, vertex2, cell, other));
        }
    }
    let mut keys: Vec<EdgeKey> = keys.into_iter().collect();
    keys.sort_unstable();

    let domain = mesh.domain;
    let n_edges = keys.len();
    let mut edges = Vec::with_capacity(n_edges);
    let mut cells_on_edge = Vec::with_capacity(n_edges);
    let mut vertices_on_edge = Vec::with_capacity(n_edges);
    let mut dc_edge = Vec::with_capacity(n_edges);
    let mut dv_edge = Vec::with_capacity(n_edges);
    let mut swapped = 0usize;

    for key in &keys {
        let [mut vertex1, mut vertex2] = key.vertices;
        let c1 = mesh.cells[key.cell1];
        // Keep the edge next to cell1 in a periodic plane.
        let v1 = domain.unwrap(mesh.vertices[vertex1], &c1);
        let v2 = domain.unwrap(mesh.vertices[vertex2], &c1);
        let dv = domain.distance(&v1, &v2);

        let (location, c2, dc) = match key.cell2 {
            Some(cell2) => {
                let c2 = domain.unwrap(mesh.cells[cell2], &c1);
                (domain.intersect(&c1, &c2, &v1, &v2), c2, domain.distance(&c1, &c2))
            }
            None => {
                let mid = (v1 + v2) * 0.5;
                (mid, mid, cfg.boundary_dc_factor * dv)
            }
        };

        let normal = domain.normal_at(&c1);
        if (c2 - c1).cross(&(v2 - v1)).dot(&normal) < 0.0 {
            std::mem::swap(&mut vertex1, &mut vertex2);
            swapped += 1;
        }

        edges.push(domain.project(location));
        cells_on_edge.push(EdgeCells {
            cell1: key.cell1,
            cell2: key.cell2,
        });
        vertices_on_edge.push([vertex1, vertex2]);
        dc_edge.push(dc);
        dv_edge.push(dv);
    }
    tracing::debug!(edges = n_edges, swapped, "oriented edges");

    mesh.edges = edges;
    mesh.cells_on_edge = cells_on_edge;
    mesh.vertices_on_edge = vertices_on_edge;
    mesh.dc_edge = dc_edge;
    mesh.dv_edge = dv_edge;
    Ok(())
}
