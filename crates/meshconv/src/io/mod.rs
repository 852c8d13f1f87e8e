//! Array-document I/O: the JSON container, the raw grid reader and the mesh
//! writer.

pub mod array_file;
pub mod input;
pub mod output;

pub use array_file::{ArrayFile, AttrValue, VarData};
pub use input::{GridInput, InputMeta};
pub use output::{generate_mesh_id, write_mesh, GridAttributes};
