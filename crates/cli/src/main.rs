mod provenance;

use anyhow::{bail, Context, Result};
use clap::Parser;
use meshconv::io::{write_mesh, ArrayFile, GridInput};
use meshconv::{convert, ConvertCfg};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::fmt::SubscriberBuilder;

// Conventional MPAS file names; the contents are the JSON array document.
const DEFAULT_INPUT: &str = "grid.nc";
const DEFAULT_OUTPUT: &str = "output.nc";

#[derive(Parser)]
#[command(name = "meshconv")]
#[command(about = "Convert a point set with vertex/cell incidence into an MPAS mesh")]
struct Cmd {
    /// Input grid (prompted for when omitted)
    input: Option<PathBuf>,
    /// Output mesh (defaults to output.nc when only the input is given)
    output: Option<PathBuf>,
    /// Pretty-print the output JSON
    #[arg(long)]
    pretty: bool,
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    let (input, output) = match (cmd.input, cmd.output) {
        (Some(input), Some(output)) => (input, output),
        (Some(input), None) => {
            tracing::info!(output = DEFAULT_OUTPUT, "no output file given, using default");
            (input, PathBuf::from(DEFAULT_OUTPUT))
        }
        (None, _) => {
            let stdin = std::io::stdin();
            let mut lines = stdin.lock();
            let input = prompt(&mut lines, "Input file name", DEFAULT_INPUT)?;
            let output = prompt(&mut lines, "Output file name", DEFAULT_OUTPUT)?;
            (input, output)
        }
    };
    run(&input, &output, cmd.pretty)
}

/// Ask for a path on stdout; an empty answer takes `default`.
fn prompt(lines: &mut impl BufRead, label: &str, default: &str) -> Result<PathBuf> {
    print!("{label} [{default}]: ");
    std::io::stdout().flush()?;
    let mut answer = String::new();
    lines.read_line(&mut answer).context("reading stdin")?;
    let answer = answer.trim();
    Ok(PathBuf::from(if answer.is_empty() { default } else { answer }))
}

fn run(input: &Path, output: &Path, pretty: bool) -> Result<()> {
    if input == output {
        bail!("input and output are the same file: {}", input.display());
    }
    tracing::info!(input = %input.display(), output = %output.display(), "convert");

    let doc = ArrayFile::read_json(input).with_context(|| format!("reading {}", input.display()))?;
    let grid = GridInput::from_array_file(&doc).context("parsing input grid")?;
    let attrs = provenance::grid_attributes(&grid.meta, input, output);
    let mesh = convert(grid, &ConvertCfg::default()).context("converting grid")?;
    let out = write_mesh(mesh, &attrs).context("laying out output")?;

    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating output dir {}", parent.display()))?;
        }
    }
    out.write_json(output, pretty)
        .with_context(|| format!("writing {}", output.display()))?;
    tracing::info!(mesh_id = %attrs.mesh_id, "wrote mesh");
    Ok(())
}
