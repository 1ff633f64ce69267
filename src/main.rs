//! Command-line interface for the retag-matrix binary.
//!
//! The CLI loads one or more retag configuration files, validates them, and
//! prints the generated matrix as a single JSON object on stdout so a CI
//! workflow can feed it straight into its matrix declaration. Diagnostics go
//! to stderr; stdout carries nothing but the payload.

use std::{
    io::{self, Write},
    path::PathBuf,
    process,
};

use clap::{ArgAction, Parser};
use retag_matrix::{
    DEFAULT_MIRROR_PREFIX, Error, Matrix, ParseOptions, generate_matrix, load_retags,
    output_error,
};
use tracing_subscriber::EnvFilter;

/// Command line interface for generating retag job matrices.
#[derive(Debug, Parser)]
#[command(name = "retag-matrix", version, about = "Generate a CI matrix for image retag jobs")]
struct Cli {
    /// Configuration file(s) mapping source repositories to destinations and
    /// the tags to import.
    #[arg(
        short = 'c',
        long = "config",
        value_name = "PATH",
        default_value = "retag.yml"
    )]
    config: Vec<PathBuf>,

    /// Prefix used to derive destinations for mirror entries without one.
    #[arg(long = "prefix", value_name = "PREFIX", default_value = DEFAULT_MIRROR_PREFIX)]
    prefix: String,

    /// Output formatted JSON for easier inspection.
    #[arg(long = "pretty", action = ArgAction::SetTrue)]
    pretty: bool
}

/// Entry point that reports errors and sets the appropriate exit status.
fn main() {
    init_tracing();
    if let Err(error) = run() {
        eprintln!("{}", error.to_display_string());
        process::exit(1);
    }
}

/// Initializes structured logging on stderr, keeping stdout clean for the
/// matrix payload.
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();
}

/// Executes the CLI using parsed arguments.
///
/// # Errors
///
/// Propagates errors originating from configuration loading, validation, and
/// matrix serialization.
fn run() -> Result<(), Error> {
    let cli = Cli::parse();
    let options = ParseOptions {
        mirror_prefix: cli.prefix,
        ..ParseOptions::default()
    };

    let entries = load_retags(&cli.config, &options)?;
    let matrix = generate_matrix(&entries);

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    write_matrix(&mut handle, &matrix, cli.pretty)
}

fn write_matrix<W: Write>(writer: &mut W, matrix: &Matrix, pretty: bool) -> Result<(), Error> {
    let payload = if pretty {
        serde_json::to_string_pretty(matrix)?
    } else {
        serde_json::to_string(matrix)?
    };

    writeln!(writer, "{payload}").map_err(output_error)
}
