//! Matrix generation that converts validated retag entries into job
//! parameters keyed by sanitized job names.
//!
//! The resulting mapping serializes directly into the JSON object consumed by
//! the CI workflow's matrix declaration, one job per retag entry.

use std::collections::BTreeMap;

use tracing::debug;

use crate::{jobname::JobNameStrategy, parser::RetagEntry};

/// Flat string-valued parameters describing a single retag job.
pub type JobParameters = BTreeMap<String, String>;

/// Mapping from sanitized job names to job parameters.
pub type Matrix = BTreeMap<String, JobParameters>;

/// Generates the matrix mapping for the provided retag entries.
///
/// Each entry contributes one job keyed by its sanitized name. Tags are
/// joined with commas in declaration order, the timebomb flag is rendered as
/// a lowercase boolean literal, and `date_added` appears only when the entry
/// recorded one. Entries whose source and destination area coincide share a
/// job name; the later entry replaces the earlier one.
///
/// # Examples
///
/// ```
/// use retag_matrix::{RetagEntry, generate_matrix};
///
/// let entry = RetagEntry {
///     source:          "gcr.io/distroless/static".to_owned(),
///     destination:     "unlisted/mirror/gcr/distroless/static".to_owned(),
///     tags:            vec!["debug".to_owned(), "latest".to_owned()],
///     date_added:      None,
///     tool:            "az".to_owned(),
///     enable_timebomb: false
/// };
/// let matrix = generate_matrix(&[entry]);
/// let job = &matrix["gcr_io_distroless_static_unlisted"];
/// assert_eq!(job["tags"], "debug,latest");
/// ```
pub fn generate_matrix(entries: &[RetagEntry]) -> Matrix {
    let mut matrix = Matrix::new();
    for entry in entries {
        let mut parameters = JobParameters::new();
        parameters.insert("source".to_owned(), entry.source.clone());
        parameters.insert("destination".to_owned(), entry.destination.clone());
        parameters.insert("tags".to_owned(), entry.tags.join(","));
        parameters.insert("tool".to_owned(), entry.tool.clone());
        parameters.insert("enable_timebomb".to_owned(), entry.enable_timebomb.to_string());
        if let Some(date) = entry.date_added {
            parameters.insert("date_added".to_owned(), date.format("%Y-%m-%d").to_string());
        }

        let job_name = JobNameStrategy::builder(&entry.source, &entry.destination).build();
        matrix.insert(job_name, parameters);
    }

    debug!("generated matrix with {} job(s) from {} entries", matrix.len(), entries.len());
    matrix
}
