//! Git types

use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Tags that name a release: optional `v`, then a full semantic version
static VERSION_TAG_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^v?(?P<version>\d+\.\d+\.\d+(?:-[0-9A-Za-z.-]+)?(?:\+[0-9A-Za-z.-]+)?)$")
        .expect("Invalid regex")
});

/// Information about a git tag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagInfo {
    /// Tag name as it appears under `refs/tags/`
    pub name: String,
    /// Commit hash the tag points to
    pub commit_hash: String,
    /// Tag message (for annotated tags)
    pub message: Option<String>,
    /// Tagger name (for annotated tags)
    pub tagger: Option<String>,
    /// Tag timestamp (tagger time, or commit time for lightweight tags)
    pub timestamp: Option<DateTime<Utc>>,
    /// Version extracted from the tag name, `v` prefix stripped
    pub version: Option<String>,
}

impl TagInfo {
    /// Create a new TagInfo
    pub fn new(name: impl Into<String>, commit_hash: impl Into<String>) -> Self {
        let name = name.into();
        let version = extract_version(&name);

        Self {
            name,
            commit_hash: commit_hash.into(),
            message: None,
            tagger: None,
            timestamp: None,
            version,
        }
    }

    /// Set the tag message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Set the tagger
    pub fn with_tagger(mut self, tagger: impl Into<String>) -> Self {
        self.tagger = Some(tagger.into());
        self
    }

    /// Set the timestamp
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Version if this is a release tag, otherwise the raw name
    pub fn version_or_name(&self) -> &str {
        self.version.as_deref().unwrap_or(&self.name)
    }

    /// The snapshot this tag names
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::Tag(self.name.clone())
    }
}

/// A point in history whose changeset records can be read
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Snapshot {
    /// The working tree, including uncommitted files
    Working,
    /// The tree a tag points at
    Tag(String),
}

impl Snapshot {
    /// Tag name, or `"working"` for the working tree
    pub fn label(&self) -> &str {
        match self {
            Self::Working => "working",
            Self::Tag(name) => name,
        }
    }
}

impl std::fmt::Display for Snapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Extract a semantic version from a release tag name
pub fn extract_version(tag: &str) -> Option<String> {
    let caps = VERSION_TAG_REGEX.captures(tag)?;
    let version = caps.name("version")?.as_str();
    semver::Version::parse(version).ok()?;
    Some(version.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_version() {
        assert_eq!(extract_version("v1.0.0"), Some("1.0.0".to_string()));
        assert_eq!(extract_version("1.0.0"), Some("1.0.0".to_string()));
        assert_eq!(
            extract_version("v2.0.0-beta.1"),
            Some("2.0.0-beta.1".to_string())
        );
        assert_eq!(
            extract_version("v1.0.0+build.5"),
            Some("1.0.0+build.5".to_string())
        );
    }

    #[test]
    fn test_extract_version_rejects_non_release_tags() {
        assert_eq!(extract_version("package@1.0.0"), None);
        assert_eq!(extract_version("v1.0"), None);
        assert_eq!(extract_version("release-1.0.0"), None);
        assert_eq!(extract_version("not-a-version"), None);
        assert_eq!(extract_version("v01.0.0"), None);
    }

    #[test]
    fn test_accepted_tag_formats_are_read_back_as_releases() {
        use chronicle_core::config::{Config, VALID_TAG_FORMATS};
        use chronicle_core::workflow::format_tag;

        for format in VALID_TAG_FORMATS {
            let mut config = Config::default();
            config.versioning.tag_format = format.to_string();
            for version in ["0.1.0", "1.2.3-rc.1", "2.0.0+build.7"] {
                let tag = TagInfo::new(format_tag(&config, version), "abc123");
                assert_eq!(tag.version.as_deref(), Some(version), "{}", tag.name);
            }
        }
    }

    #[test]
    fn test_snapshot_label() {
        assert_eq!(Snapshot::Working.label(), "working");
        assert_eq!(Snapshot::Tag("v1.0.0".to_string()).to_string(), "v1.0.0");
    }

    #[test]
    fn test_tag_info_snapshot() {
        let tag = TagInfo::new("v1.2.3", "abc123");
        assert_eq!(tag.version_or_name(), "1.2.3");
        assert_eq!(tag.snapshot(), Snapshot::Tag("v1.2.3".to_string()));
    }
}
