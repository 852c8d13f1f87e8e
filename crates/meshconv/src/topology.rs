//! Authoritative neighbor lists, rebuilt from the finished edge set.
//!
//! Edges are ordered counter-clockwise around each vertex and each cell; the
//! cell and vertex lists are then read off the ordered edges, so all lists of
//! an entity share one rotation.

use crate::error::ConvertError;
use crate::mesh::Mesh;
use crate::ordering::order_ccw;

/// Rebuild `edges_on_vertex` and `cells_on_vertex`.
///
/// `cells_on_vertex[v][j]` is the cell counter-clockwise after edge `j`:
/// `cell1` when `v` is the edge's first vertex, otherwise `cell2` (possibly
/// `None` on the boundary). The raw incidence from the input is discarded.
pub fn order_vertex_arrays(mesh: &mut Mesh) -> Result<(), ConvertError> {
    let mut edges_on_vertex: Vec<Vec<usize>> = vec![Vec::new(); mesh.n_vertices()];
    for (edge, [vertex1, vertex2]) in mesh.vertices_on_edge.iter().enumerate() {
        edges_on_vertex[*vertex1].push(edge);
        edges_on_vertex[*vertex2].push(edge);
    }

    let domain = mesh.domain;
    let mut cells_on_vertex = Vec::with_capacity(mesh.n_vertices());
    for (vertex, list) in edges_on_vertex.iter_mut().enumerate() {
        order_ccw(list, &mesh.vertices[vertex], &domain, &mesh.edges);
        let cells = list
            .iter()
            .map(|&edge| {
                let on_edge = mesh.cells_on_edge[edge];
                if mesh.vertices_on_edge[edge][0] == vertex {
                    Some(on_edge.cell1)
                } else {
                    on_edge.cell2
                }
            })
            .collect();
        cells_on_vertex.push(cells);
    }

    mesh.edges_on_vertex = edges_on_vertex;
    mesh.cells_on_vertex = cells_on_vertex;
    Ok(())
}

/// Rebuild `edges_on_cell`, `cells_on_cell` and `vertices_on_cell`, and set
/// `max_edges`.
///
/// For each ordered edge the cell across it goes to `cells_on_cell` and the
/// edge's counter-clockwise vertex (the second vertex when the cell is
/// `cell1`) goes to `vertices_on_cell`.
pub fn order_cell_arrays(mesh: &mut Mesh) -> Result<(), ConvertError> {
    let mut edges_on_cell: Vec<Vec<usize>> = vec![Vec::new(); mesh.n_cells()];
    for (edge, cells) in mesh.cells_on_edge.iter().enumerate() {
        edges_on_cell[cells.cell1].push(edge);
        if let Some(cell2) = cells.cell2 {
            edges_on_cell[cell2].push(edge);
        }
    }

    let domain = mesh.domain;
    let mut cells_on_cell = Vec::with_capacity(mesh.n_cells());
    let mut vertices_on_cell = Vec::with_capacity(mesh.n_cells());
    let mut max_edges = 0;
    for (cell, list) in edges_on_cell.iter_mut().enumerate() {
        order_ccw(list, &mesh.cells[cell], &domain, &mesh.edges);
        let mut neighbors = Vec::with_capacity(list.len());
        let mut corners = Vec::with_capacity(list.len());
        for &edge in list.iter() {
            let on_edge = mesh.cells_on_edge[edge];
            let [vertex1, vertex2] = mesh.vertices_on_edge[edge];
            neighbors.push(on_edge.across(cell));
            corners.push(if on_edge.cell1 == cell { vertex2 } else { vertex1 });
        }
        max_edges = max_edges.max(list.len());
        cells_on_cell.push(neighbors);
        vertices_on_cell.push(corners);
    }

    mesh.edges_on_cell = edges_on_cell;
    mesh.cells_on_cell = cells_on_cell;
    mesh.vertices_on_cell = vertices_on_cell;
    mesh.max_edges = max_edges;
    Ok(())
}
