//! End-to-end conversion: raw grid input to a fully connected mesh.
//!
//! Stages run in a fixed order; each replaces the arrays it owns and the
//! first failure aborts the run.

use crate::cfg::ConvertCfg;
use crate::connectivity::{build_unordered_cell_connectivity, first_ordering_vertices_on_cell};
use crate::edges::build_edges;
use crate::error::ConvertError;
use crate::io::input::GridInput;
use crate::mesh::Mesh;
use crate::metrics::{build_angle_edge, build_areas, build_edges_on_edge_arrays};
use crate::topology::{order_cell_arrays, order_vertex_arrays};

/// Run every conversion stage on `input`.
pub fn convert(input: GridInput, cfg: &ConvertCfg) -> Result<Mesh, ConvertError> {
    let mut mesh = Mesh::with_periodicity(input, cfg.periodicity)?;
    tracing::info!(
        cells = mesh.n_cells(),
        vertices = mesh.n_vertices(),
        vertex_degree = mesh.vertex_degree,
        sphere = mesh.domain.is_sphere(),
        "read grid"
    );

    build_unordered_cell_connectivity(&mut mesh)?;
    first_ordering_vertices_on_cell(&mut mesh)?;
    tracing::info!("built preliminary cell connectivity");

    build_edges(&mut mesh, cfg)?;
    tracing::info!(edges = mesh.n_edges(), "built edges, dvEdge and dcEdge");

    order_vertex_arrays(&mut mesh)?;
    order_cell_arrays(&mut mesh)?;
    tracing::info!(max_edges = mesh.max_edges, "ordered vertex and cell arrays");

    build_areas(&mut mesh, cfg)?;
    tracing::info!("built areaCell, areaTriangle and kiteAreasOnVertex");

    build_edges_on_edge_arrays(&mut mesh)?;
    tracing::info!("built edgesOnEdge and weightsOnEdge");

    build_angle_edge(&mut mesh, cfg)?;
    tracing::info!("built angleEdge");
    Ok(mesh)
}
