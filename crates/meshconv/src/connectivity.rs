//! Provisional cell→vertex connectivity.
//!
//! The raw input only says which cells touch each vertex. Inverting that and
//! ordering each cell's vertices counter-clockwise is enough to walk the
//! vertex pairs that bound a cell; the edge stage then builds the real
//! topology from those pairs.

use crate::error::ConvertError;
use crate::mesh::Mesh;
use crate::ordering::order_ccw;

/// Invert `cells_on_vertex` into `vertices_on_cell`, skipping absent slots
/// and repeated entries. Vertices appear in ascending index order.
///
/// A cell touched by fewer than two vertices is kept with its short list; it
/// bounds no edge and ends up flagged incomplete by the area stage.
pub fn build_unordered_cell_connectivity(mesh: &mut Mesh) -> Result<(), ConvertError> {
    let mut vertices_on_cell: Vec<Vec<usize>> = vec![Vec::new(); mesh.n_cells()];
    for (vertex, cells) in mesh.cells_on_vertex.iter().enumerate() {
        for &cell in cells.iter().flatten() {
            let list = &mut vertices_on_cell[cell];
            if !list.contains(&vertex) {
                list.push(vertex);
            }
        }
    }
    let degenerate = vertices_on_cell.iter().filter(|list| list.len() < 2).count();
    if degenerate > 0 {
        tracing::debug!(degenerate, "cells with fewer than two vertices bound no edge");
    }
    mesh.vertices_on_cell = vertices_on_cell;
    Ok(())
}

/// Greedy counter-clockwise ordering of every cell's vertices around its
/// center. The first vertex of each list keeps its slot.
pub fn first_ordering_vertices_on_cell(mesh: &mut Mesh) -> Result<(), ConvertError> {
    let domain = mesh.domain;
    for (cell, list) in mesh.vertices_on_cell.iter_mut().enumerate() {
        order_ccw(list, &mesh.cells[cell], &domain, &mesh.vertices);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::special::hex_patch;

    fn patch(include_outer: bool) -> Mesh {
        Mesh::from_input(hex_patch(include_outer)).unwrap()
    }

    #[test]
    fn inversion_collects_each_vertex_once() {
        let mut mesh = patch(true);
        // Repeat a cell in one row; the inverse must not repeat the vertex.
        let again = mesh.cells_on_vertex[0][0];
        mesh.cells_on_vertex[0].push(again);
        build_unordered_cell_connectivity(&mut mesh).unwrap();
        assert_eq!(mesh.vertices_on_cell.len(), 7);
        for list in &mesh.vertices_on_cell {
            let mut sorted = list.clone();
            sorted.dedup();
            assert_eq!(&sorted, list);
            assert!(list.windows(2).all(|w| w[0] < w[1]));
        }
        assert_eq!(mesh.vertices_on_cell[0].len(), 6);
    }

    #[test]
    fn cells_without_two_vertices_are_kept() {
        let mut mesh = patch(true);
        for row in mesh.cells_on_vertex.iter_mut() {
            for slot in row.iter_mut() {
                if *slot == Some(4) {
                    *slot = None;
                }
            }
        }
        let single = mesh
            .cells_on_vertex
            .iter()
            .position(|row| row.contains(&Some(5)))
            .unwrap();
        for (vertex, row) in mesh.cells_on_vertex.iter_mut().enumerate() {
            if vertex != single {
                row.iter_mut().filter(|s| **s == Some(5)).for_each(|s| *s = None);
            }
        }
        build_unordered_cell_connectivity(&mut mesh).unwrap();
        first_ordering_vertices_on_cell(&mut mesh).unwrap();
        assert!(mesh.vertices_on_cell[4].is_empty());
        assert_eq!(mesh.vertices_on_cell[5], vec![single]);
        assert_eq!(mesh.vertices_on_cell[0].len(), 6);
    }

    #[test]
    fn first_ordering_is_counter_clockwise() {
        let mut mesh = patch(true);
        build_unordered_cell_connectivity(&mut mesh).unwrap();
        first_ordering_vertices_on_cell(&mut mesh).unwrap();
        for (cell, list) in mesh.vertices_on_cell.iter().enumerate() {
            let c = mesh.cells[cell];
            let n = list.len();
            for j in 0..n {
                let a = mesh.vertices[list[j]] - c;
                let b = mesh.vertices[list[(j + 1) % n]] - c;
                assert!(a.cross(&b).z > 0.0, "cell {cell} slot {j}");
            }
        }
    }
}
