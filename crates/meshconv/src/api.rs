//! Curated surface for tools built on the converter.
//!
//! Prefer these re-exports over reaching into individual modules; stage
//! internals may move between modules.

// Pipeline
pub use crate::cfg::{ConvertCfg, PeriodicityPolicy};
pub use crate::error::ConvertError;
pub use crate::pipeline::convert;
// Individual stages, in pipeline order
pub use crate::connectivity::{build_unordered_cell_connectivity, first_ordering_vertices_on_cell};
pub use crate::edges::build_edges;
pub use crate::metrics::{build_angle_edge, build_areas, build_edges_on_edge_arrays, INCOMPLETE_CELL_AREA};
pub use crate::topology::{order_cell_arrays, order_vertex_arrays};
// Data model and I/O
pub use crate::geom::{Domain, Periodicity};
pub use crate::io::{generate_mesh_id, write_mesh, ArrayFile, GridAttributes, GridInput, InputMeta};
pub use crate::mesh::{EdgeCells, Mesh};
