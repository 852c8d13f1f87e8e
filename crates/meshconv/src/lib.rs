//! Convert a raw point set with vertex→cell incidence into an oriented MPAS
//! unstructured mesh: edges, counter-clockwise neighbor lists, areas,
//! reconstruction weights and edge angles.
//!
//! Layout
//! - `geom`: point helpers, periodicity, intersections and areas on the plane
//!   and the unit sphere.
//! - `mesh`: the owned structure-of-arrays `Mesh` threaded through the stages.
//! - `connectivity`, `edges`, `topology`, `metrics`: the pipeline stages, run
//!   in order by `pipeline::convert`.
//! - `io`: the JSON array document, the grid reader and the mesh writer.
//! - `special`: canonical grids for tests and benchmarks.
//!
//! API Policy
//! - Stage functions are public so tests and tools can run partial pipelines;
//!   `api` lists the surface callers normally need.

pub mod api;
pub mod cfg;
pub mod connectivity;
pub mod edges;
pub mod error;
pub mod geom;
pub mod io;
pub mod mesh;
pub mod metrics;
pub mod ordering;
pub mod pipeline;
pub mod special;
pub mod topology;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use cfg::{ConvertCfg, PeriodicityPolicy};
pub use error::ConvertError;
pub use mesh::{EdgeCells, Mesh};
pub use nalgebra::Vector3 as Vec3;
pub use pipeline::convert;

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::cfg::{ConvertCfg, PeriodicityPolicy};
    pub use crate::error::ConvertError;
    pub use crate::geom::{Domain, Periodicity};
    pub use crate::io::{generate_mesh_id, write_mesh, ArrayFile, GridAttributes, GridInput};
    pub use crate::mesh::{EdgeCells, Mesh};
    pub use crate::pipeline::convert;
    pub use nalgebra::Vector3 as Vec3;
}
