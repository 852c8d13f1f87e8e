//! Physical mesh metrics.
//!
//! Purpose
//! - Cell areas (with a completeness check) and vertex dual (kite) areas.
//! - The edge reconstruction stencil: neighbor edges and weights recovering
//!   the tangential component from normal components.
//! - Edge orientation angles.
//!
//! References
//! - Thuburn, Ringler, Skamarock, Klemp (2009), "Numerical representation of
//!   geostrophic modes on arbitrarily structured C-grids", JCP 228.

mod angle;
mod areas;
mod weights;

pub use angle::build_angle_edge;
pub use areas::{build_areas, INCOMPLETE_CELL_AREA};
pub use weights::build_edges_on_edge_arrays;
