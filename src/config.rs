//! Configuration document types describing retag declarations.
//!
//! The types in this module mirror the structure of the YAML documents
//! consumed by the CLI. Two schema variants exist in the wild: an older
//! registry-level document listing repositories with nested publisher
//! configuration, and a newer flat document listing mirror images directly.
//! Both decode into [`RetagSpec`] values that the parser normalizes into
//! validated entries.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Root document of the registry schema variant.
///
/// # Examples
///
/// ```
/// use retag_matrix::RegistryConfig;
///
/// let yaml = r#"
/// registry: example.azurecr.io
/// repos:
///   - name: mirror/library/alpine
///     publisherConfiguration:
///       azcu:
///         source: docker.io/library/alpine
///         tags:
///           - latest
/// "#;
/// let config: RegistryConfig = serde_yaml::from_str(yaml).expect("valid configuration");
/// assert_eq!(config.repos.len(), 1);
/// ```
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct RegistryConfig {
    /// Registry the repositories below belong to.
    #[serde(default)]
    pub registry: String,

    /// Repositories declared for the registry.
    #[serde(default)]
    pub repos: Vec<RepoEntry>
}

/// Repository declaration inside the registry schema variant.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct RepoEntry {
    /// Fully qualified repository name, used as the implicit destination.
    pub name: String,

    /// Human friendly name shown in catalog listings.
    #[serde(default, alias = "displayName")]
    pub display_name: String,

    /// Free-form description of the repository.
    #[serde(default)]
    pub description: String,

    /// Publisher block carrying the retag declaration.
    #[serde(default, alias = "publisherConfiguration")]
    pub publisher_configuration: Option<PublisherConfig>
}

/// Publisher configuration wrapper around the retag declaration.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct PublisherConfig {
    /// Retag declaration consumed by the copy tooling.
    pub azcu: RetagSpec
}

/// Root document of the flat mirror schema variant.
///
/// # Examples
///
/// ```
/// use retag_matrix::MirrorConfig;
///
/// let yaml = r#"
/// images:
///   - source: docker.io/library/alpine
///     tags:
///       - latest
///       - "3.20"
/// "#;
/// let config: MirrorConfig = serde_yaml::from_str(yaml).expect("valid configuration");
/// assert_eq!(config.images.len(), 1);
/// ```
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct MirrorConfig {
    /// Images declared for mirroring.
    #[serde(default)]
    pub images: Vec<RetagSpec>
}

/// Raw retag declaration shared by both schema variants.
///
/// Instances are created by deserializing YAML documents and carry no
/// defaulting; the parser applies defaults while building validated entries.
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct RetagSpec {
    /// Image reference to copy from.
    #[serde(default)]
    pub source: String,

    /// Image reference to copy to. Empty values are derived by the parser.
    #[serde(default)]
    pub destination: String,

    /// Calendar date the declaration was added, used for display only.
    #[serde(default, alias = "dateAdded")]
    pub date_added: Option<NaiveDate>,

    /// Tags to copy, in declaration order.
    #[serde(default)]
    pub tags: Vec<String>,

    /// Name of the copy utility invoked by the downstream job.
    #[serde(default)]
    pub tool: Option<String>,

    /// Opaque flag passed through to the downstream job verbatim.
    #[serde(default, alias = "enableTimebomb")]
    pub enable_timebomb: Option<bool>
}

impl RetagSpec {
    /// Returns the copy tool for this declaration, falling back to the
    /// provided default when the field is unset or blank.
    ///
    /// # Examples
    ///
    /// ```
    /// use retag_matrix::RetagSpec;
    ///
    /// let spec = RetagSpec::default();
    /// assert_eq!(spec.resolved_tool("az"), "az");
    /// ```
    pub fn resolved_tool(&self, fallback: &str) -> String {
        self.tool
            .as_deref()
            .map(str::trim)
            .filter(|tool| !tool.is_empty())
            .map_or_else(|| fallback.to_owned(), ToOwned::to_owned)
    }
}
