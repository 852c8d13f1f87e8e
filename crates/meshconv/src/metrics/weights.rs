//! Edge reconstruction stencil (`edgesOnEdge`, `weightsOnEdge`).

use crate::error::ConvertError;
use crate::mesh::Mesh;

/// For each edge, walk `cell1` and then `cell2` counter-clockwise from just
/// after the edge to just before it. Each visited edge joins the stencil with
/// weight `±(0.5 - R) dv(visited) / dc(edge)`, where `R` accumulates the kite
/// area of the shared vertex over the walking cell's area, and the sign is
/// positive when the walking cell is the visited edge's `cell1`.
///
/// Requires `dc_edge`, `dv_edge`, `area_cell` and `kite_areas_on_vertex`.
pub fn build_edges_on_edge_arrays(mesh: &mut Mesh) -> Result<(), ConvertError> {
    let n_edges = mesh.n_edges();
    let mut edges_on_edge = Vec::with_capacity(n_edges);
    let mut weights_on_edge = Vec::with_capacity(n_edges);
    for edge in 0..n_edges {
        let cells = mesh.cells_on_edge[edge];
        let mut stencil = Vec::new();
        let mut weights = Vec::new();
        for cell in std::iter::once(cells.cell1).chain(cells.cell2) {
            walk_cell(mesh, edge, cell, &mut stencil, &mut weights)?;
        }
        edges_on_edge.push(stencil);
        weights_on_edge.push(weights);
    }
    mesh.edges_on_edge = edges_on_edge;
    mesh.weights_on_edge = weights_on_edge;
    Ok(())
}

fn walk_cell(
    mesh: &Mesh,
    edge: usize,
    cell: usize,
    stencil: &mut Vec<usize>,
    weights: &mut Vec<f64>,
) -> Result<(), ConvertError> {
    let ring = &mesh.edges_on_cell[cell];
    let start = ring
        .iter()
        .position(|&e| e == edge)
        .ok_or(ConvertError::EdgeNotOnCell { edge, cell })?;
    let n = ring.len();
    let mut last = edge;
    let mut area_sum = 0.0;
    for step in 1..n {
        let cur = ring[(start + step) % n];
        if cur == edge {
            continue;
        }
        stencil.push(cur);
        if let Some(vertex) = shared_vertex(mesh.vertices_on_edge[last], mesh.vertices_on_edge[cur]) {
            for (j, around) in mesh.cells_on_vertex[vertex].iter().enumerate() {
                if *around == Some(cell) {
                    area_sum += mesh.kite_areas_on_vertex[vertex][j] / mesh.area_cell[cell];
                }
            }
        }
        let sign = if mesh.cells_on_edge[cur].cell1 == cell { 1.0 } else { -1.0 };
        weights.push(sign * (0.5 - area_sum) * mesh.dv_edge[cur] / mesh.dc_edge[edge]);
        last = cur;
    }
    Ok(())
}

/// First vertex of `a` that is also a vertex of `b`.
fn shared_vertex(a: [usize; 2], b: [usize; 2]) -> Option<usize> {
    a.into_iter().find(|v| b.contains(v))
}
