//! Loading and validation logic that converts raw configuration documents
//! into validated retag entries.
//!
//! Documents are decoded in one of two schema variants, selected by sniffing
//! the top-level key: `repos` for the registry variant, `images` for the flat
//! mirror variant. Both normalize into [`RetagEntry`] values with destination
//! defaulting applied, ready for matrix generation.

use std::{fs, path::PathBuf};

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, info};

use crate::{
    config::{MirrorConfig, RegistryConfig, RepoEntry, RetagSpec},
    error::{self, Error},
};

/// Prefix applied when deriving destinations in the mirror schema variant.
pub const DEFAULT_MIRROR_PREFIX: &str = "mirror";
/// Copy tool assigned to entries that do not declare one.
pub const DEFAULT_TOOL: &str = "az";

/// Explicit defaults passed into the parser.
///
/// Defaulting values travel with the call rather than living in statics so
/// callers can override them per invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    /// Prefix prepended to the source when a mirror entry omits its
    /// destination.
    pub mirror_prefix: String,
    /// Tool assigned to entries without an explicit one.
    pub default_tool:  String
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            mirror_prefix: DEFAULT_MIRROR_PREFIX.to_owned(),
            default_tool:  DEFAULT_TOOL.to_owned()
        }
    }
}

/// Validated retag entry consumed by the matrix generator.
///
/// Every instance satisfies the pipeline invariants: non-empty `source`,
/// non-empty `destination`, and at least one tag. Entries are immutable once
/// built.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct RetagEntry {
    /// Image reference to copy from.
    pub source:          String,
    /// Image reference to copy to.
    pub destination:     String,
    /// Tags to copy, in declaration order.
    pub tags:            Vec<String>,
    /// Calendar date the declaration was added, when recorded.
    pub date_added:      Option<NaiveDate>,
    /// Copy tool invoked by the downstream job.
    pub tool:            String,
    /// Opaque flag passed through to the downstream job.
    pub enable_timebomb: bool
}

/// Loads retag entries from the provided configuration file paths.
///
/// Entries are concatenated in file-argument order, then document order
/// within each file. The first failure anywhere aborts the whole load; no
/// partial aggregation occurs.
///
/// # Errors
///
/// Returns an [`Error`] when any file cannot be read, any document cannot be
/// decoded, or any entry violates invariants during validation.
pub fn load_retags(paths: &[PathBuf], options: &ParseOptions) -> Result<Vec<RetagEntry>, Error> {
    let mut entries = Vec::new();
    for path in paths {
        let contents =
            fs::read_to_string(path).map_err(|source| error::io_error(path, source))?;
        let parsed = parse_retags(&contents, options)?;
        debug!("loaded {} retag entries from {}", parsed.len(), path.display());
        entries.extend(parsed);
    }

    info!("collected {} retag entries from {} file(s)", entries.len(), paths.len());
    Ok(entries)
}

/// Parses retag entries from the provided YAML document string.
///
/// This function is suitable for unit tests and higher-level callers that
/// already obtained the configuration contents.
///
/// # Errors
///
/// Propagates [`Error::Parse`](Error::Parse) when the YAML cannot be decoded
/// and [`Error::Validation`](Error::Validation) when a declaration is missing
/// required fields or the document declares neither schema variant.
pub fn parse_retags(contents: &str, options: &ParseOptions) -> Result<Vec<RetagEntry>, Error> {
    let document: serde_yaml::Value = serde_yaml::from_str(contents)?;

    if document.get("repos").is_some() {
        let config: RegistryConfig = serde_yaml::from_value(document)?;
        config.repos.iter().map(|repo| validate_repo_entry(repo, options)).collect()
    } else if document.get("images").is_some() {
        let config: MirrorConfig = serde_yaml::from_value(document)?;
        config.images.iter().map(|spec| validate_mirror_entry(spec, options)).collect()
    } else {
        Err(Error::validation("configuration must declare either 'repos' or 'images'"))
    }
}

/// Validates a repository declaration from the registry schema variant.
///
/// The enclosing repository name becomes the destination when the nested
/// declaration leaves it empty.
///
/// # Errors
///
/// Returns [`Error::Validation`](Error::Validation) when the publisher block
/// is missing or the declaration violates entry invariants.
fn validate_repo_entry(repo: &RepoEntry, options: &ParseOptions) -> Result<RetagEntry, Error> {
    let spec = &repo
        .publisher_configuration
        .as_ref()
        .ok_or_else(|| {
            Error::validation(format!("missing retag config for '{}'", repo.name))
        })?
        .azcu;

    let source = spec.source.trim();
    if source.is_empty() {
        return Err(Error::validation(format!(
            "source is required for retagging into '{}'",
            repo.name
        )));
    }

    let destination = match spec.destination.trim() {
        "" => repo.name.trim(),
        declared => declared
    };

    build_entry(source, destination, spec, options)
}

/// Validates an image declaration from the flat mirror schema variant.
///
/// An empty destination is derived by prefixing the source with the mirror
/// prefix carried in the parse options.
///
/// # Errors
///
/// Returns [`Error::Validation`](Error::Validation) when the declaration
/// violates entry invariants.
fn validate_mirror_entry(spec: &RetagSpec, options: &ParseOptions) -> Result<RetagEntry, Error> {
    let source = spec.source.trim();
    if source.is_empty() {
        return Err(Error::validation(format!(
            "source is required for retagging into '{}'",
            spec.destination.trim()
        )));
    }

    let derived;
    let destination = match spec.destination.trim() {
        "" => {
            derived = format!("{}/{}", options.mirror_prefix, source);
            derived.as_str()
        }
        declared => declared
    };

    build_entry(source, destination, spec, options)
}

fn build_entry(
    source: &str,
    destination: &str,
    spec: &RetagSpec,
    options: &ParseOptions
) -> Result<RetagEntry, Error> {
    if destination.is_empty() {
        return Err(Error::validation(format!(
            "destination is required for retagging '{source}'"
        )));
    }

    if spec.tags.is_empty() {
        return Err(Error::validation(format!(
            "at least one tag is required for retagging '{source}'"
        )));
    }

    Ok(RetagEntry {
        source:          source.to_owned(),
        destination:     destination.to_owned(),
        tags:            spec.tags.clone(),
        date_added:      spec.date_added,
        tool:            spec.resolved_tool(&options.default_tool),
        enable_timebomb: spec.enable_timebomb.unwrap_or(false)
    })
}
