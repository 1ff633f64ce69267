//! Utilities for generating CI matrix definitions for container image retag
//! jobs.
//!
//! The library exposes helpers that load YAML configuration files describing
//! retag (mirror) operations and transform them into a mapping of sanitized
//! job names to string-valued job parameters, suitable for driving a CI
//! workflow's matrix fan-out. Each run is a pure function of its input files:
//! load, validate, transform, print.

mod config;
mod error;
mod jobname;
mod matrix;
mod parser;

pub use config::{MirrorConfig, PublisherConfig, RegistryConfig, RepoEntry, RetagSpec};
pub use error::{Error, io_error, output_error};
pub use jobname::JobNameStrategy;
pub use matrix::{JobParameters, Matrix, generate_matrix};
pub use parser::{
    DEFAULT_MIRROR_PREFIX, DEFAULT_TOOL, ParseOptions, RetagEntry, load_retags, parse_retags,
};
