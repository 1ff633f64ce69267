//! Utilities for deriving deterministic job names from retag entries.
//!
//! Job names produced by this module are valid CI matrix job identifiers:
//! the separator characters that commonly appear in image references are
//! replaced with underscores, and the first path segment of the destination
//! is appended so the same source can be retagged into several repository
//! areas without clashing.

/// Separator characters replaced with underscores, applied in this order.
const SEPARATORS: [char; 3] = ['/', '-', '.'];

/// Builder for job name strings keyed by source and destination references.
#[derive(Debug, Clone, Copy)]
pub struct JobNameStrategy<'entry> {
    source:      &'entry str,
    destination: &'entry str
}

impl<'entry> JobNameStrategy<'entry> {
    /// Creates a new job name builder for the provided references.
    ///
    /// The builder retains borrowed views of both references to avoid
    /// allocations until [`build`](Self::build) is invoked.
    pub fn builder(source: &'entry str, destination: &'entry str) -> Self {
        Self {
            source,
            destination
        }
    }

    /// Builds the job name for this source and destination pair.
    ///
    /// Every `/`, `-`, and `.` in the source is replaced with `_`, each
    /// separator in turn. The first `/`-separated segment of the destination
    /// (the repository area, e.g. `unlisted` or `public`) is appended with a
    /// `_` so an image retagged into several areas yields distinct names.
    ///
    /// # Examples
    ///
    /// ```
    /// use retag_matrix::JobNameStrategy;
    ///
    /// let name = JobNameStrategy::builder(
    ///     "source/test_repo-hello.123",
    ///     "unlisted/destination/test_repo-hello.123"
    /// )
    /// .build();
    /// assert_eq!(name, "source_test_repo_hello_123_unlisted");
    /// ```
    pub fn build(self) -> String {
        let mut job_name = self.source.to_owned();
        for separator in SEPARATORS {
            job_name = job_name.replace(separator, "_");
        }

        let area = self.destination.split('/').next().unwrap_or_default();
        format!("{job_name}_{area}")
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::JobNameStrategy;

    proptest! {
        #[test]
        fn job_name_contains_no_separator_characters(
            source in "[a-z0-9./-]{1,48}",
            area in "[a-z0-9]{1,12}"
        ) {
            let destination = format!("{area}/rest");
            let name = JobNameStrategy::builder(&source, &destination).build();
            prop_assert!(name.chars().all(|ch| !matches!(ch, '/' | '-' | '.')));
        }

        #[test]
        fn sanitization_is_idempotent_on_clean_sources(source in "[a-z0-9_]{1,48}") {
            let first = JobNameStrategy::builder(&source, "public").build();
            let second = JobNameStrategy::builder(&first, "public").build();
            prop_assert_eq!(format!("{}_public", first), second);
        }
    }

    #[test]
    fn builder_replaces_each_separator_independently() {
        let name = JobNameStrategy::builder("a/b-c.d", "public/oss").build();
        assert_eq!(name, "a_b_c_d_public");
    }

    #[test]
    fn builder_appends_first_destination_segment() {
        let name = JobNameStrategy::builder(
            "source/test_repo-hello.123",
            "unlisted/destination/test_repo-hello.123"
        )
        .build();
        assert_eq!(name, "source_test_repo_hello_123_unlisted");
    }

    #[test]
    fn destination_areas_disambiguate_identical_sources() {
        let unlisted = JobNameStrategy::builder("repo/image", "unlisted/mirror/image").build();
        let public = JobNameStrategy::builder("repo/image", "public/mirror/image").build();
        assert_ne!(unlisted, public);
    }

    #[test]
    fn consecutive_separators_each_become_underscores() {
        let name = JobNameStrategy::builder("repo/-.image", "public").build();
        assert_eq!(name, "repo___image_public");
    }

    #[test]
    fn destination_without_slash_is_used_verbatim() {
        let name = JobNameStrategy::builder("image", "public").build();
        assert_eq!(name, "image_public");
    }
}
