//! Configuration types

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration for Chronicle
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Version of the config schema
    #[serde(rename = "$schema", skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// Project name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Changeset record configuration
    pub changeset: ChangesetConfig,

    /// Changelog output configuration
    pub changelog: ChangelogConfig,

    /// Versioning configuration
    pub versioning: VersioningConfig,

    /// Git configuration
    pub git: GitConfig,
}

/// Changeset record configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChangesetConfig {
    /// Directory holding changeset records, relative to the repository root
    pub directory: PathBuf,

    /// Keep unclassifiable or unreadable records instead of failing
    pub ignore_errors: bool,
}

impl Default for ChangesetConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from(".changeset"),
            ignore_errors: false,
        }
    }
}

/// Changelog output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChangelogConfig {
    /// Directory the rendered changelog files are written to
    pub output_dir: PathBuf,

    /// Maximum number of entries in the version history
    pub max_versions: usize,

    /// Output format (markdown, json)
    pub format: String,

    /// Whether to print release dates in rendered entries
    pub include_dates: bool,
}

impl Default for ChangelogConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("changelog"),
            max_versions: 10,
            format: "markdown".to_string(),
            include_dates: true,
        }
    }
}

/// Versioning configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VersioningConfig {
    /// Tag format (e.g., "v{version}")
    pub tag_format: String,
}

impl Default for VersioningConfig {
    fn default() -> Self {
        Self {
            tag_format: "v{version}".to_string(),
        }
    }
}

/// Git configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GitConfig {
    /// Remote name
    pub remote: String,

    /// Whether to require clean working directory before tagging
    pub require_clean: bool,

    /// Whether to push the release tag after creating it
    pub push_tags: bool,
}

impl Default for GitConfig {
    fn default() -> Self {
        Self {
            remote: "origin".to_string(),
            require_clean: true,
            push_tags: false,
        }
    }
}
