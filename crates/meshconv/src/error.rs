//! Errors surfaced by reading, converting, and writing meshes.

use std::path::PathBuf;

/// Failure of any conversion stage. Geometric degeneracy is not an error;
/// incomplete cells are reported through the sentinel area instead.
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    /// Planar input whose cell or vertex z-coordinates are not constant.
    #[error("planar point set has non-zero z extent (cells {cell_extent}, vertices {vertex_extent})")]
    NonPlanarInput {
        cell_extent: f64,
        vertex_extent: f64,
    },
    #[error("missing dimension `{0}`")]
    MissingDimension(String),
    #[error("missing variable `{0}`")]
    MissingVariable(String),
    #[error("variable `{name}` has {actual} values, expected {expected}")]
    LengthMismatch {
        name: String,
        expected: usize,
        actual: usize,
    },
    #[error("variable `{name}` holds {found} data, expected {expected}")]
    WrongKind {
        name: String,
        expected: &'static str,
        found: &'static str,
    },
    /// A 1-based cell id in `cellsOnVertex` beyond `nCells`.
    #[error("cellsOnVertex of vertex {vertex} names cell {cell_id}, but nCells = {n_cells}")]
    CellIndexOutOfRange {
        vertex: usize,
        cell_id: i64,
        n_cells: usize,
    },
    /// Topology inconsistency found while building the reconstruction stencil.
    #[error("edge {edge} is missing from the edge list of its bounding cell {cell}")]
    EdgeNotOnCell { edge: usize, cell: usize },
    /// A connectivity row does not fit its padded output width.
    #[error("row {row} of `{variable}` has {len} entries, exceeding width {width}")]
    RowOverflow {
        variable: &'static str,
        row: usize,
        len: usize,
        width: usize,
    },
    #[error("i/o on {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed array document {path}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
