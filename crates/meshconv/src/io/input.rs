//! Raw grid input: point sets plus the provisional vertex→cell incidence.

use nalgebra::Vector3;

use super::array_file::{ArrayFile, VarData};
use crate::error::ConvertError;

/// Provenance attributes carried over from the input file.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InputMeta {
    pub history: String,
    pub mesh_id: String,
    pub parent_id: String,
}

/// Everything the conversion needs from an input grid.
///
/// `cells_on_vertex` is 0-based with `None` for absent slots; rows may be
/// shorter than `vertex_degree`.
#[derive(Clone, Debug, PartialEq)]
pub struct GridInput {
    pub on_sphere: bool,
    pub vertex_degree: usize,
    pub cells: Vec<Vector3<f64>>,
    pub vertices: Vec<Vector3<f64>>,
    pub cells_on_vertex: Vec<Vec<Option<usize>>>,
    pub mesh_density: Vec<f64>,
    pub meta: InputMeta,
}

impl GridInput {
    /// Parse an input document.
    ///
    /// Incidence ids are 1-based; any value `<= 0` marks an absent slot.
    /// A missing `meshDensity` defaults to `1.0` per cell.
    pub fn from_array_file(file: &ArrayFile) -> Result<Self, ConvertError> {
        let n_cells = dimension(file, "nCells")?;
        let n_vertices = dimension(file, "nVertices")?;
        let vertex_degree = dimension(file, "vertexDegree")?;
        let on_sphere = file
            .text_attribute("on_a_sphere")
            .is_some_and(|s| s.trim().eq_ignore_ascii_case("YES"));

        let cells = points(file, ["xCell", "yCell", "zCell"], n_cells)?;
        let vertices = points(file, ["xVertex", "yVertex", "zVertex"], n_vertices)?;

        let raw = ints(file, "cellsOnVertex", n_vertices * vertex_degree)?;
        let mut cells_on_vertex = Vec::with_capacity(n_vertices);
        for (vertex, row) in raw.chunks(vertex_degree.max(1)).enumerate() {
            let mut out = Vec::with_capacity(vertex_degree);
            for &id in row {
                if id <= 0 {
                    out.push(None);
                } else if id as usize > n_cells {
                    return Err(ConvertError::CellIndexOutOfRange {
                        vertex,
                        cell_id: id,
                        n_cells,
                    });
                } else {
                    out.push(Some(id as usize - 1));
                }
            }
            cells_on_vertex.push(out);
        }
        cells_on_vertex.resize_with(n_vertices, Vec::new);

        let mesh_density = match file.variable("meshDensity") {
            Some(_) => doubles(file, "meshDensity", n_cells)?.to_vec(),
            None => vec![1.0; n_cells],
        };

        let meta = InputMeta {
            history: file.text_attribute("history").unwrap_or_default().to_string(),
            mesh_id: file.text_attribute("mesh_id").unwrap_or_default().to_string(),
            parent_id: file.text_attribute("parent_id").unwrap_or_default().to_string(),
        };

        Ok(Self {
            on_sphere,
            vertex_degree,
            cells,
            vertices,
            cells_on_vertex,
            mesh_density,
            meta,
        })
    }

    /// Inverse of `from_array_file`: absent slots are written as `0`.
    pub fn to_array_file(&self) -> ArrayFile {
        let mut file = ArrayFile::default();
        file.add_dimension("nCells", self.cells.len());
        file.add_dimension("nVertices", self.vertices.len());
        file.add_dimension("vertexDegree", self.vertex_degree);
        file.add_text("on_a_sphere", if self.on_sphere { "YES" } else { "NO" });
        if !self.meta.history.is_empty() {
            file.add_text("history", self.meta.history.clone());
        }
        if !self.meta.mesh_id.is_empty() {
            file.add_text("mesh_id", self.meta.mesh_id.clone());
        }
        if !self.meta.parent_id.is_empty() {
            file.add_text("parent_id", self.meta.parent_id.clone());
        }
        for (names, pts, dim) in [
            (["xCell", "yCell", "zCell"], &self.cells, "nCells"),
            (["xVertex", "yVertex", "zVertex"], &self.vertices, "nVertices"),
        ] {
            for (axis, name) in names.iter().enumerate() {
                let values = pts.iter().map(|p| p[axis]).collect();
                file.add_variable(name, &[dim], VarData::Double(values));
            }
        }
        let mut incidence = Vec::with_capacity(self.vertices.len() * self.vertex_degree);
        for row in &self.cells_on_vertex {
            for slot in 0..self.vertex_degree {
                let id = row.get(slot).copied().flatten();
                incidence.push(id.map_or(0, |c| c as i64 + 1));
            }
        }
        file.add_variable(
            "cellsOnVertex",
            &["nVertices", "vertexDegree"],
            VarData::Int(incidence),
        );
        file.add_variable(
            "meshDensity",
            &["nCells"],
            VarData::Double(self.mesh_density.clone()),
        );
        file
    }
}

fn dimension(file: &ArrayFile, name: &str) -> Result<usize, ConvertError> {
    file.dimension(name)
        .ok_or_else(|| ConvertError::MissingDimension(name.to_string()))
}

fn doubles<'a>(file: &'a ArrayFile, name: &str, expected: usize) -> Result<&'a [f64], ConvertError> {
    let var = file
        .variable(name)
        .ok_or_else(|| ConvertError::MissingVariable(name.to_string()))?;
    let VarData::Double(values) = &var.data else {
        return Err(ConvertError::WrongKind {
            name: name.to_string(),
            expected: "double",
            found: var.data.kind(),
        });
    };
    check_len(name, expected, values.len())?;
    Ok(values)
}

fn ints<'a>(file: &'a ArrayFile, name: &str, expected: usize) -> Result<&'a [i64], ConvertError> {
    let var = file
        .variable(name)
        .ok_or_else(|| ConvertError::MissingVariable(name.to_string()))?;
    let VarData::Int(values) = &var.data else {
        return Err(ConvertError::WrongKind {
            name: name.to_string(),
            expected: "int",
            found: var.data.kind(),
        });
    };
    check_len(name, expected, values.len())?;
    Ok(values)
}

fn check_len(name: &str, expected: usize, actual: usize) -> Result<(), ConvertError> {
    if expected != actual {
        return Err(ConvertError::LengthMismatch {
            name: name.to_string(),
            expected,
            actual,
        });
    }
    Ok(())
}

fn points(
    file: &ArrayFile,
    names: [&str; 3],
    expected: usize,
) -> Result<Vec<Vector3<f64>>, ConvertError> {
    let x = doubles(file, names[0], expected)?;
    let y = doubles(file, names[1], expected)?;
    let z = doubles(file, names[2], expected)?;
    Ok((0..expected)
        .map(|i| Vector3::new(x[i], y[i], z[i]))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::special::hex_patch;

    fn tiny() -> ArrayFile {
        let mut file = ArrayFile::default();
        file.add_dimension("nCells", 2);
        file.add_dimension("nVertices", 2);
        file.add_dimension("vertexDegree", 3);
        file.add_text("on_a_sphere", "YES ");
        file.add_text("mesh_id", "abc");
        for name in ["xCell", "yCell", "zCell", "xVertex", "yVertex", "zVertex"] {
            let dim = if name.ends_with("Cell") { "nCells" } else { "nVertices" };
            file.add_variable(name, &[dim], VarData::Double(vec![0.0, 1.0]));
        }
        file.add_variable(
            "cellsOnVertex",
            &["nVertices", "vertexDegree"],
            VarData::Int(vec![1, 2, -1, 2, 0, 1]),
        );
        file
    }

    #[test]
    fn parses_incidence_and_defaults() {
        let input = GridInput::from_array_file(&tiny()).unwrap();
        assert!(input.on_sphere);
        assert_eq!(input.vertex_degree, 3);
        assert_eq!(
            input.cells_on_vertex,
            vec![vec![Some(0), Some(1), None], vec![Some(1), None, Some(0)]]
        );
        assert_eq!(input.mesh_density, vec![1.0, 1.0]);
        assert_eq!(input.meta.mesh_id, "abc");
        assert_eq!(input.meta.history, "");
    }

    #[test]
    fn rejects_out_of_range_and_short_arrays() {
        let mut file = tiny();
        if let Some(var) = file.variables.iter_mut().find(|v| v.name == "cellsOnVertex") {
            var.data = VarData::Int(vec![1, 3, 0, 1, 1, 1]);
        }
        assert!(matches!(
            GridInput::from_array_file(&file),
            Err(ConvertError::CellIndexOutOfRange { vertex: 0, cell_id: 3, n_cells: 2 })
        ));

        let mut file = tiny();
        file.variables.retain(|v| v.name != "yVertex");
        assert!(matches!(
            GridInput::from_array_file(&file),
            Err(ConvertError::MissingVariable(name)) if name == "yVertex"
        ));

        let mut file = tiny();
        if let Some(var) = file.variables.iter_mut().find(|v| v.name == "xCell") {
            var.data = VarData::Double(vec![0.0]);
        }
        assert!(matches!(
            GridInput::from_array_file(&file),
            Err(ConvertError::LengthMismatch { expected: 2, actual: 1, .. })
        ));

        let mut file = tiny();
        file.dimensions.retain(|d| d.name != "vertexDegree");
        assert!(matches!(
            GridInput::from_array_file(&file),
            Err(ConvertError::MissingDimension(_))
        ));
    }

    #[test]
    fn document_round_trip_preserves_input() {
        let input = hex_patch(true);
        let back = GridInput::from_array_file(&input.to_array_file()).unwrap();
        assert_eq!(back, input);
    }
}
