//! Serialize a finished `Mesh` into the MPAS array layout.
//!
//! Ids are written 1-based, absent neighbors as `0`, and ragged rows are
//! padded with zeros to their dimension width. The mesh is consumed: each
//! group of arrays is taken out of it as soon as its section is written.

use rand::{distributions::Alphanumeric, Rng};

use super::array_file::{ArrayFile, VarData};
use super::input::InputMeta;
use crate::error::ConvertError;
use crate::geom::{lat, lon};
use crate::mesh::Mesh;

/// Revision of the MPAS mesh specification the output follows.
pub const MESH_SPEC: f64 = 1.0;
/// Length of a generated `mesh_id`.
pub const MESH_ID_LEN: usize = 40;

/// Random alphanumeric identity for a new mesh.
pub fn generate_mesh_id(rng: &mut impl Rng) -> String {
    rng.sample_iter(&Alphanumeric)
        .take(MESH_ID_LEN)
        .map(char::from)
        .collect()
}

/// Provenance attributes of an output grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GridAttributes {
    pub history: String,
    /// Lineage of the input mesh; `None` when the input had no `mesh_id`.
    pub parent_id: Option<String>,
    pub mesh_id: String,
    pub source: String,
}

impl GridAttributes {
    /// `command` is prepended to the input history; the input's `mesh_id`
    /// heads the new `parent_id` chain.
    pub fn new(meta: &InputMeta, source: &str, command: &str, mesh_id: String) -> Self {
        let mut history = command.to_string();
        if !meta.history.is_empty() {
            history.push('\n');
            history.push_str(&meta.history);
        }
        let parent_id = (!meta.mesh_id.is_empty()).then(|| {
            let mut chain = meta.mesh_id.clone();
            if !meta.parent_id.is_empty() {
                chain.push('\n');
                chain.push_str(&meta.parent_id);
            }
            chain
        });
        Self {
            history,
            parent_id,
            mesh_id,
            source: source.to_string(),
        }
    }
}

/// Lay out `mesh` as an output document.
///
/// Fails with `RowOverflow` when a connectivity row is wider than its
/// dimension (e.g. a vertex with more edges than `vertexDegree`).
pub fn write_mesh(mut mesh: Mesh, attrs: &GridAttributes) -> Result<ArrayFile, ConvertError> {
    let mut file = ArrayFile::default();
    let n_cells = mesh.n_cells();
    let n_edges = mesh.n_edges();
    let n_vertices = mesh.n_vertices();
    let max_edges = mesh.max_edges;
    let degree = mesh.vertex_degree;
    let sphere = mesh.domain.is_sphere();

    file.add_dimension("nCells", n_cells);
    file.add_dimension("nEdges", n_edges);
    file.add_dimension("nVertices", n_vertices);
    file.add_dimension("maxEdges", max_edges);
    file.add_dimension("maxEdges2", 2 * max_edges);
    file.add_dimension("TWO", 2);
    file.add_dimension("vertexDegree", degree);
    file.add_unlimited_dimension("Time");

    file.add_text("on_a_sphere", if sphere { "YES" } else { "NO" });
    file.add_double("sphere_radius", if sphere { 1.0 } else { 0.0 });
    file.add_text("history", attrs.history.clone());
    if let Some(parent_id) = &attrs.parent_id {
        file.add_text("parent_id", parent_id.clone());
    }
    file.add_double("mesh_spec", MESH_SPEC);
    file.add_text("Conventions", "MPAS");
    file.add_text("source", attrs.source.clone());
    file.add_text("mesh_id", attrs.mesh_id.clone());

    for (entity, dim, points) in [
        ("Cell", "nCells", std::mem::take(&mut mesh.cells)),
        ("Edge", "nEdges", std::mem::take(&mut mesh.edges)),
        ("Vertex", "nVertices", std::mem::take(&mut mesh.vertices)),
    ] {
        let (lats, lons) = if sphere {
            (points.iter().map(lat).collect(), points.iter().map(lon).collect())
        } else {
            (vec![0.0; points.len()], vec![0.0; points.len()])
        };
        file.add_variable(&format!("lat{entity}"), &[dim], VarData::Double(lats));
        file.add_variable(&format!("lon{entity}"), &[dim], VarData::Double(lons));
        for (axis, name) in ["x", "y", "z"].iter().enumerate() {
            let values = points.iter().map(|p| p[axis]).collect();
            file.add_variable(&format!("{name}{entity}"), &[dim], VarData::Double(values));
        }
        let ids = (1..=points.len() as i64).collect();
        file.add_variable(&format!("indexTo{entity}ID"), &[dim], VarData::Int(ids));
    }

    let cells_on_cell = std::mem::take(&mut mesh.cells_on_cell);
    let edges_on_cell = std::mem::take(&mut mesh.edges_on_cell);
    let vertices_on_cell = std::mem::take(&mut mesh.vertices_on_cell);
    let n_edges_on_cell = edges_on_cell.iter().map(|r| r.len() as i64).collect();
    let cell_dims = ["nCells", "maxEdges"];
    file.add_variable("cellsOnCell", &cell_dims, neighbor_rows("cellsOnCell", &cells_on_cell, max_edges)?);
    file.add_variable("edgesOnCell", &cell_dims, id_rows("edgesOnCell", &edges_on_cell, max_edges)?);
    file.add_variable("verticesOnCell", &cell_dims, id_rows("verticesOnCell", &vertices_on_cell, max_edges)?);
    file.add_variable("nEdgesOnCell", &["nCells"], VarData::Int(n_edges_on_cell));

    let edges_on_edge = std::mem::take(&mut mesh.edges_on_edge);
    let n_edges_on_edge = edges_on_edge.iter().map(|r| r.len() as i64).collect();
    file.add_variable(
        "edgesOnEdge",
        &["nEdges", "maxEdges2"],
        id_rows("edgesOnEdge", &edges_on_edge, 2 * max_edges)?,
    );
    let cells_on_edge = std::mem::take(&mut mesh.cells_on_edge)
        .into_iter()
        .flat_map(|c| [c.cell1 as i64 + 1, c.cell2.map_or(0, |c| c as i64 + 1)])
        .collect();
    file.add_variable("cellsOnEdge", &["nEdges", "TWO"], VarData::Int(cells_on_edge));
    let vertices_on_edge = std::mem::take(&mut mesh.vertices_on_edge)
        .into_iter()
        .flat_map(|pair| pair.map(|v| v as i64 + 1))
        .collect();
    file.add_variable("verticesOnEdge", &["nEdges", "TWO"], VarData::Int(vertices_on_edge));
    file.add_variable("nEdgesOnEdge", &["nEdges"], VarData::Int(n_edges_on_edge));

    let cells_on_vertex = std::mem::take(&mut mesh.cells_on_vertex);
    let edges_on_vertex = std::mem::take(&mut mesh.edges_on_vertex);
    let boundary_vertex = cells_on_vertex
        .iter()
        .map(|row| i64::from(row.len() != degree))
        .collect();
    let vertex_dims = ["nVertices", "vertexDegree"];
    file.add_variable("cellsOnVertex", &vertex_dims, neighbor_rows("cellsOnVertex", &cells_on_vertex, degree)?);
    file.add_variable("edgesOnVertex", &vertex_dims, id_rows("edgesOnVertex", &edges_on_vertex, degree)?);
    file.add_variable("boundaryVertex", &["nVertices"], VarData::Int(boundary_vertex));

    file.add_variable("areaCell", &["nCells"], VarData::Double(std::mem::take(&mut mesh.area_cell)));

    file.add_variable("angleEdge", &["nEdges"], VarData::Double(std::mem::take(&mut mesh.angle_edge)));
    file.add_variable("dcEdge", &["nEdges"], VarData::Double(std::mem::take(&mut mesh.dc_edge)));
    file.add_variable("dvEdge", &["nEdges"], VarData::Double(std::mem::take(&mut mesh.dv_edge)));
    let weights = std::mem::take(&mut mesh.weights_on_edge);
    file.add_variable(
        "weightsOnEdge",
        &["nEdges", "maxEdges2"],
        VarData::Double(padded("weightsOnEdge", &weights, 2 * max_edges, 0.0, |&w| w)?),
    );

    file.add_variable(
        "areaTriangle",
        &["nVertices"],
        VarData::Double(std::mem::take(&mut mesh.area_triangle)),
    );
    let kites = std::mem::take(&mut mesh.kite_areas_on_vertex);
    file.add_variable(
        "kiteAreasOnVertex",
        &vertex_dims,
        VarData::Double(padded("kiteAreasOnVertex", &kites, degree, 0.0, |&k| k)?),
    );

    file.add_variable("meshDensity", &["nCells"], VarData::Double(mesh.mesh_density));
    Ok(file)
}

/// Flatten `rows` to `width` columns, filling the tail of each row with `fill`.
fn padded<T, U: Copy>(
    variable: &'static str,
    rows: &[Vec<T>],
    width: usize,
    fill: U,
    map: impl Fn(&T) -> U,
) -> Result<Vec<U>, ConvertError> {
    let mut out = Vec::with_capacity(rows.len() * width);
    for (row, values) in rows.iter().enumerate() {
        if values.len() > width {
            return Err(ConvertError::RowOverflow {
                variable,
                row,
                len: values.len(),
                width,
            });
        }
        out.extend(values.iter().map(&map));
        out.extend(std::iter::repeat(fill).take(width - values.len()));
    }
    Ok(out)
}

fn id_rows(variable: &'static str, rows: &[Vec<usize>], width: usize) -> Result<VarData, ConvertError> {
    padded(variable, rows, width, 0, |&id| id as i64 + 1).map(VarData::Int)
}

fn neighbor_rows(
    variable: &'static str,
    rows: &[Vec<Option<usize>>],
    width: usize,
) -> Result<VarData, ConvertError> {
    padded(variable, rows, width, 0, |&id| id.map_or(0, |id| id as i64 + 1)).map(VarData::Int)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cfg::ConvertCfg;
    use crate::io::input::GridInput;
    use crate::pipeline::convert;
    use crate::special::{hex_patch, icosphere};
    use rand::{rngs::StdRng, SeedableRng};

    fn attrs() -> GridAttributes {
        GridAttributes::new(&InputMeta::default(), "meshconv", "meshconv in out", "x".repeat(40))
    }

    fn ints<'a>(file: &'a ArrayFile, name: &str) -> &'a [i64] {
        match &file.variable(name).unwrap().data {
            VarData::Int(v) => v,
            other => panic!("{name} is {}", other.kind()),
        }
    }

    fn doubles<'a>(file: &'a ArrayFile, name: &str) -> &'a [f64] {
        match &file.variable(name).unwrap().data {
            VarData::Double(v) => v,
            other => panic!("{name} is {}", other.kind()),
        }
    }

    #[test]
    fn mesh_id_is_forty_alphanumerics() {
        let mut rng = StdRng::seed_from_u64(5);
        let id = generate_mesh_id(&mut rng);
        assert_eq!(id.len(), MESH_ID_LEN);
        assert!(id.chars().all(|c| c.is_ascii_alphanumeric()));
        assert_ne!(id, generate_mesh_id(&mut rng));
    }

    #[test]
    fn provenance_chains_input_identity() {
        let meta = InputMeta {
            history: "make_grid".into(),
            mesh_id: "abc".into(),
            parent_id: "root".into(),
        };
        let a = GridAttributes::new(&meta, "meshconv", "meshconv g.json o.json", "new".into());
        assert_eq!(a.history, "meshconv g.json o.json\nmake_grid");
        assert_eq!(a.parent_id.as_deref(), Some("abc\nroot"));

        let fresh = GridAttributes::new(&InputMeta::default(), "meshconv", "cmd", "id".into());
        assert_eq!(fresh.history, "cmd");
        assert_eq!(fresh.parent_id, None);
    }

    #[test]
    fn hex_patch_layout() {
        let mesh = convert(hex_patch(true), &ConvertCfg::default()).unwrap();
        let areas = mesh.area_cell.clone();
        let file = write_mesh(mesh, &attrs()).unwrap();

        assert_eq!(file.dimension("nCells"), Some(7));
        assert_eq!(file.dimension("nEdges"), Some(30));
        assert_eq!(file.dimension("maxEdges"), Some(6));
        assert_eq!(file.dimension("maxEdges2"), Some(12));
        assert_eq!(file.dimension("TWO"), Some(2));
        assert_eq!(file.text_attribute("on_a_sphere"), Some("NO"));
        assert_eq!(file.text_attribute("Conventions"), Some("MPAS"));
        assert!(file.attribute("parent_id").is_none());

        assert_eq!(ints(&file, "nEdgesOnCell"), &[6; 7]);
        assert_eq!(doubles(&file, "areaCell"), areas.as_slice());
        assert!(doubles(&file, "latCell").iter().all(|&x| x == 0.0));
        assert_eq!(ints(&file, "indexToEdgeID")[29], 30);

        // Boundary edges carry a zero second cell; every id is in range.
        let cells_on_edge = ints(&file, "cellsOnEdge");
        assert_eq!(cells_on_edge.len(), 60);
        let open = cells_on_edge.chunks(2).filter(|p| p[1] == 0).count();
        assert_eq!(open, 18);
        assert!(cells_on_edge.iter().all(|&c| (0..=7).contains(&c)));
        assert!(cells_on_edge.chunks(2).all(|p| p[0] >= 1));

        // Single-cell corners have two edges and are flagged.
        let boundary = ints(&file, "boundaryVertex");
        assert_eq!(boundary.iter().filter(|&&b| b == 1).count(), 12);
        assert_eq!(ints(&file, "edgesOnVertex").len(), 24 * 3);
        assert_eq!(doubles(&file, "weightsOnEdge").len(), 30 * 12);
    }

    #[test]
    fn sphere_coordinates_carry_lat_lon() {
        let mesh = convert(icosphere(0), &ConvertCfg::default()).unwrap();
        let file = write_mesh(mesh, &attrs()).unwrap();
        assert_eq!(file.text_attribute("on_a_sphere"), Some("YES"));
        assert_eq!(file.attribute("sphere_radius"), Some(&crate::io::AttrValue::Double(1.0)));
        let z = doubles(&file, "zVertex");
        let lats = doubles(&file, "latVertex");
        for (z, lat) in z.iter().zip(lats) {
            assert!((z - lat.sin()).abs() < 1e-12);
        }
        assert!(ints(&file, "boundaryVertex").iter().all(|&b| b == 0));
    }

    #[test]
    fn wide_rows_overflow() {
        let mut mesh = convert(hex_patch(true), &ConvertCfg::default()).unwrap();
        mesh.vertex_degree = 2;
        let err = write_mesh(mesh, &attrs()).unwrap_err();
        assert!(matches!(err, ConvertError::RowOverflow { variable: "cellsOnVertex", width: 2, .. }));
    }

    #[test]
    fn output_reads_back_as_input() {
        let input = hex_patch(true);
        let mesh = convert(input.clone(), &ConvertCfg::default()).unwrap();
        let file = write_mesh(mesh, &attrs()).unwrap();
        let again = GridInput::from_array_file(&file).unwrap();
        assert_eq!(again.cells, input.cells);
        assert_eq!(again.vertices, input.vertices);
        assert_eq!(again.meta.mesh_id, "x".repeat(40));
    }
}
