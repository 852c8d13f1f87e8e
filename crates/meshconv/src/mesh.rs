//! The mesh under construction.
//!
//! `Mesh` owns every array of the conversion in structure-of-arrays form.
//! Each pipeline stage takes `&mut Mesh`, reads what earlier stages left, and
//! replaces the arrays it is responsible for. Missing neighbors are `None`.

use nalgebra::Vector3;

use crate::cfg::PeriodicityPolicy;
use crate::error::ConvertError;
use crate::geom::Domain;
use crate::io::input::{GridInput, InputMeta};

/// Cells on either side of an edge. `cell2 == None` marks a boundary edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EdgeCells {
    pub cell1: usize,
    pub cell2: Option<usize>,
}

impl EdgeCells {
    #[inline]
    pub fn is_boundary(&self) -> bool {
        self.cell2.is_none()
    }

    /// The cell across the edge as seen from `cell`.
    #[inline]
    pub fn across(&self, cell: usize) -> Option<usize> {
        if self.cell1 == cell {
            self.cell2
        } else {
            Some(self.cell1)
        }
    }
}

#[derive(Clone, Debug)]
pub struct Mesh {
    pub domain: Domain,
    pub vertex_degree: usize,

    pub cells: Vec<Vector3<f64>>,
    pub vertices: Vec<Vector3<f64>>,
    pub edges: Vec<Vector3<f64>>,

    pub vertices_on_cell: Vec<Vec<usize>>,
    pub edges_on_cell: Vec<Vec<usize>>,
    pub cells_on_cell: Vec<Vec<Option<usize>>>,

    pub cells_on_edge: Vec<EdgeCells>,
    pub vertices_on_edge: Vec<[usize; 2]>,
    pub edges_on_edge: Vec<Vec<usize>>,
    pub weights_on_edge: Vec<Vec<f64>>,

    pub cells_on_vertex: Vec<Vec<Option<usize>>>,
    pub edges_on_vertex: Vec<Vec<usize>>,

    pub dc_edge: Vec<f64>,
    pub dv_edge: Vec<f64>,
    pub angle_edge: Vec<f64>,
    pub area_cell: Vec<f64>,
    pub area_triangle: Vec<f64>,
    pub kite_areas_on_vertex: Vec<Vec<f64>>,

    pub mesh_density: Vec<f64>,
    pub max_edges: usize,
    pub meta: InputMeta,
}

impl Mesh {
    /// Validate the input and set up the point sets.
    ///
    /// Spherical points are normalized. Planar input must have constant
    /// (zero-extent) z; its periodic offsets come from the cell-center extent.
    pub fn from_input(input: GridInput) -> Result<Self, ConvertError> {
        Self::with_periodicity(input, PeriodicityPolicy::FromExtent)
    }

    /// [`Mesh::from_input`] with the planar periodic offsets chosen by `periodicity`.
    pub fn with_periodicity(
        input: GridInput,
        periodicity: PeriodicityPolicy,
    ) -> Result<Self, ConvertError> {
        let GridInput {
            on_sphere,
            vertex_degree,
            mut cells,
            mut vertices,
            cells_on_vertex,
            mesh_density,
            meta,
        } = input;
        let n_cells = cells.len();
        if cells_on_vertex.len() != vertices.len() {
            return Err(ConvertError::LengthMismatch {
                name: "cellsOnVertex".to_string(),
                expected: vertices.len(),
                actual: cells_on_vertex.len(),
            });
        }
        if mesh_density.len() != n_cells {
            return Err(ConvertError::LengthMismatch {
                name: "meshDensity".to_string(),
                expected: n_cells,
                actual: mesh_density.len(),
            });
        }
        for (vertex, row) in cells_on_vertex.iter().enumerate() {
            if let Some(&cell) = row.iter().flatten().find(|&&c| c >= n_cells) {
                return Err(ConvertError::CellIndexOutOfRange {
                    vertex,
                    cell_id: cell as i64 + 1,
                    n_cells,
                });
            }
        }

        let domain = if on_sphere {
            for p in cells.iter_mut().chain(vertices.iter_mut()) {
                if let Some(unit) = p.try_normalize(0.0) {
                    *p = unit;
                }
            }
            Domain::Sphere
        } else {
            let cell_ext = Extent::of(&cells);
            let vertex_ext = Extent::of(&vertices);
            let cell_z = cell_ext.span(2);
            let vertex_z = vertex_ext.span(2);
            if cell_z > 0.0 || vertex_z > 0.0 {
                return Err(ConvertError::NonPlanarInput {
                    cell_extent: cell_z,
                    vertex_extent: vertex_z,
                });
            }
            Domain::Plane(periodicity.resolve(
                cell_ext.range(0),
                cell_ext.range(1),
                vertex_degree,
            ))
        };

        Ok(Self {
            domain,
            vertex_degree,
            cells,
            vertices,
            edges: Vec::new(),
            vertices_on_cell: Vec::new(),
            edges_on_cell: Vec::new(),
            cells_on_cell: Vec::new(),
            cells_on_edge: Vec::new(),
            vertices_on_edge: Vec::new(),
            edges_on_edge: Vec::new(),
            weights_on_edge: Vec::new(),
            cells_on_vertex,
            edges_on_vertex: Vec::new(),
            dc_edge: Vec::new(),
            dv_edge: Vec::new(),
            angle_edge: Vec::new(),
            area_cell: Vec::new(),
            area_triangle: Vec::new(),
            kite_areas_on_vertex: Vec::new(),
            mesh_density,
            max_edges: 0,
            meta,
        })
    }

    #[inline]
    pub fn n_cells(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn n_vertices(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn n_edges(&self) -> usize {
        self.edges.len()
    }
}

/// Axis-aligned bounds of a point set; empty sets collapse to the origin.
struct Extent {
    min: Vector3<f64>,
    max: Vector3<f64>,
}

impl Extent {
    fn of(points: &[Vector3<f64>]) -> Self {
        if points.is_empty() {
            return Self {
                min: Vector3::zeros(),
                max: Vector3::zeros(),
            };
        }
        let mut min = Vector3::repeat(f64::INFINITY);
        let mut max = Vector3::repeat(f64::NEG_INFINITY);
        for p in points {
            min = min.inf(p);
            max = max.sup(p);
        }
        Self { min, max }
    }

    fn range(&self, axis: usize) -> [f64; 2] {
        [self.min[axis], self.max[axis]]
    }

    fn span(&self, axis: usize) -> f64 {
        (self.max[axis] - self.min[axis]).abs()
    }
}
