//! Self-describing structured-array document (dimensions, attributes,
//! variables) serialized as JSON.
//!
//! The layout mirrors a classic netCDF file: named dimensions, global
//! attributes holding text or a double, and variables that name their
//! dimensions and carry flat row-major data.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConvertError;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Dimension {
    pub name: String,
    pub len: usize,
    /// Record dimension with no fixed length.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub unlimited: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
    Text(String),
    Double(f64),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    pub name: String,
    pub value: AttrValue,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "values", rename_all = "lowercase")]
pub enum VarData {
    Int(Vec<i64>),
    Double(Vec<f64>),
}

impl VarData {
    pub fn len(&self) -> usize {
        match self {
            VarData::Int(v) => v.len(),
            VarData::Double(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn kind(&self) -> &'static str {
        match self {
            VarData::Int(_) => "int",
            VarData::Double(_) => "double",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Variable {
    pub name: String,
    pub dims: Vec<String>,
    pub data: VarData,
}

/// An ordered collection of dimensions, attributes and variables.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ArrayFile {
    #[serde(default)]
    pub dimensions: Vec<Dimension>,
    #[serde(default)]
    pub attributes: Vec<Attribute>,
    #[serde(default)]
    pub variables: Vec<Variable>,
}

impl ArrayFile {
    pub fn dimension(&self, name: &str) -> Option<usize> {
        self.dimensions
            .iter()
            .find(|d| d.name == name)
            .map(|d| d.len)
    }

    pub fn attribute(&self, name: &str) -> Option<&AttrValue> {
        self.attributes
            .iter()
            .find(|a| a.name == name)
            .map(|a| &a.value)
    }

    /// Text attribute, or `None` when absent or numeric.
    pub fn text_attribute(&self, name: &str) -> Option<&str> {
        match self.attribute(name) {
            Some(AttrValue::Text(s)) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn variable(&self, name: &str) -> Option<&Variable> {
        self.variables.iter().find(|v| v.name == name)
    }

    pub fn add_dimension(&mut self, name: &str, len: usize) {
        self.dimensions.push(Dimension {
            name: name.to_string(),
            len,
            unlimited: false,
        });
    }

    pub fn add_unlimited_dimension(&mut self, name: &str) {
        self.dimensions.push(Dimension {
            name: name.to_string(),
            len: 0,
            unlimited: true,
        });
    }

    pub fn add_text(&mut self, name: &str, value: impl Into<String>) {
        self.attributes.push(Attribute {
            name: name.to_string(),
            value: AttrValue::Text(value.into()),
        });
    }

    pub fn add_double(&mut self, name: &str, value: f64) {
        self.attributes.push(Attribute {
            name: name.to_string(),
            value: AttrValue::Double(value),
        });
    }

    pub fn add_variable(&mut self, name: &str, dims: &[&str], data: VarData) {
        self.variables.push(Variable {
            name: name.to_string(),
            dims: dims.iter().map(|d| d.to_string()).collect(),
            data,
        });
    }

    pub fn read_json(path: &Path) -> Result<Self, ConvertError> {
        let file = File::open(path).map_err(|source| ConvertError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_reader(BufReader::new(file)).map_err(|source| ConvertError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn write_json(&self, path: &Path, pretty: bool) -> Result<(), ConvertError> {
        let io_err = |source| ConvertError::Io {
            path: path.to_path_buf(),
            source,
        };
        let file = File::create(path).map_err(io_err)?;
        let mut writer = BufWriter::new(file);
        let written = if pretty {
            serde_json::to_writer_pretty(&mut writer, self)
        } else {
            serde_json::to_writer(&mut writer, self)
        };
        written.map_err(|source| ConvertError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        writer.flush().map_err(io_err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn json_layout_is_tagged() {
        let mut doc = ArrayFile::default();
        doc.add_dimension("nCells", 2);
        doc.add_unlimited_dimension("Time");
        doc.add_text("on_a_sphere", "NO");
        doc.add_double("sphere_radius", 0.0);
        doc.add_variable("nEdgesOnCell", &["nCells"], VarData::Int(vec![6, 5]));
        let value = serde_json::to_value(&doc).unwrap();
        assert_eq!(value["dimensions"][0], json!({"name": "nCells", "len": 2}));
        assert_eq!(value["dimensions"][1]["unlimited"], json!(true));
        assert_eq!(value["attributes"][0]["value"], json!("NO"));
        assert_eq!(value["attributes"][1]["value"], json!(0.0));
        assert_eq!(
            value["variables"][0]["data"],
            json!({"type": "int", "values": [6, 5]})
        );
    }

    #[test]
    fn lookups_and_missing_sections() {
        let doc: ArrayFile = serde_json::from_value(json!({
            "dimensions": [{"name": "nVertices", "len": 3}],
            "attributes": [{"name": "mesh_spec", "value": 1.0}]
        }))
        .unwrap();
        assert_eq!(doc.dimension("nVertices"), Some(3));
        assert_eq!(doc.dimension("nCells"), None);
        assert_eq!(doc.attribute("mesh_spec"), Some(&AttrValue::Double(1.0)));
        assert_eq!(doc.text_attribute("mesh_spec"), None);
        assert!(doc.variables.is_empty());
    }

    #[test]
    fn read_reports_path_on_failure() {
        let err = ArrayFile::read_json(Path::new("/nonexistent/dir/grid.json")).unwrap_err();
        assert!(matches!(err, ConvertError::Io { .. }));
        assert!(err.to_string().contains("grid.json"));
    }
}
