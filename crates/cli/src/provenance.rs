use meshconv::io::{generate_mesh_id, GridAttributes, InputMeta};
use rand::{rngs::StdRng, SeedableRng};
use std::path::Path;

/// Name written to the `source` attribute and the head of `history`.
pub const SOURCE: &str = "meshconv";

/// The invocation as recorded in `history`.
pub fn command_line(input: &Path, output: &Path) -> String {
    format!("{SOURCE} {} {}", input.display(), output.display())
}

/// Provenance for a grid written from `input` to `output`, with a fresh
/// entropy-seeded `mesh_id`.
pub fn grid_attributes(meta: &InputMeta, input: &Path, output: &Path) -> GridAttributes {
    let mut rng = StdRng::from_entropy();
    let mesh_id = generate_mesh_id(&mut rng);
    GridAttributes::new(meta, SOURCE, &command_line(input, output), mesh_id)
}
