//! Changelog types

use chrono::{DateTime, Utc};
use chronicle_core::Severity;
use serde::{Deserialize, Serialize};

/// A single change note read from the records directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangesetRecord {
    /// File stem of the record, stable across snapshots
    pub id: String,
    /// Declared impact, absent when the record could not be classified
    pub severity: Option<Severity>,
    /// Free-text body, never empty
    pub summary: String,
}

impl ChangesetRecord {
    /// Create a new record
    pub fn new(id: impl Into<String>, severity: Option<Severity>, summary: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            severity,
            summary: summary.into(),
        }
    }

    /// First line of the summary
    pub fn headline(&self) -> &str {
        self.summary.lines().next().unwrap_or_default()
    }
}

/// Display category of a change, derived from its wording
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeCategory {
    Added,
    Fixed,
    Changed,
    Removed,
    Deprecated,
    Security,
}

impl ChangeCategory {
    /// Order in which groups appear in a rendered entry
    pub const DISPLAY_ORDER: [ChangeCategory; 6] = [
        Self::Added,
        Self::Fixed,
        Self::Changed,
        Self::Removed,
        Self::Deprecated,
        Self::Security,
    ];

    /// Section title for rendered output
    pub fn title(&self) -> &'static str {
        match self {
            Self::Added => "Added",
            Self::Fixed => "Fixed",
            Self::Changed => "Changed",
            Self::Removed => "Removed",
            Self::Deprecated => "Deprecated",
            Self::Security => "Security",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Added => "added",
            Self::Fixed => "fixed",
            Self::Changed => "changed",
            Self::Removed => "removed",
            Self::Deprecated => "deprecated",
            Self::Security => "security",
        }
    }
}

impl std::fmt::Display for ChangeCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One categorised change inside an entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Change {
    pub category: ChangeCategory,
    pub summary: String,
}

/// Changes under one category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Category of every change in this section
    pub category: ChangeCategory,
    /// Summaries in discovery order
    pub summaries: Vec<String>,
}

impl Section {
    /// Section title
    pub fn title(&self) -> &'static str {
        self.category.title()
    }

    /// Check if section is empty
    pub fn is_empty(&self) -> bool {
        self.summaries.is_empty()
    }
}

/// A changelog entry for a version
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangelogEntry {
    /// Version string
    pub version: String,
    /// Tag date, or generation time for the upcoming entry
    pub date: DateTime<Utc>,
    /// Changes in discovery order
    pub changes: Vec<Change>,
    /// Whether this entry previews the untagged working state
    pub is_upcoming: bool,
}

impl ChangelogEntry {
    /// Create a released entry
    pub fn new(version: impl Into<String>, date: DateTime<Utc>) -> Self {
        Self {
            version: version.into(),
            date,
            changes: Vec::new(),
            is_upcoming: false,
        }
    }

    /// Create the upcoming entry, dated now
    pub fn upcoming(version: impl Into<String>) -> Self {
        Self {
            is_upcoming: true,
            ..Self::new(version, Utc::now())
        }
    }

    /// Add a change
    pub fn add_change(&mut self, category: ChangeCategory, summary: impl Into<String>) {
        self.changes.push(Change {
            category,
            summary: summary.into(),
        });
    }

    /// Non-empty sections in display order
    pub fn sections(&self) -> Vec<Section> {
        ChangeCategory::DISPLAY_ORDER
            .iter()
            .map(|&category| Section {
                category,
                summaries: self
                    .changes
                    .iter()
                    .filter(|c| c.category == category)
                    .map(|c| c.summary.clone())
                    .collect(),
            })
            .filter(|s| !s.is_empty())
            .collect()
    }

    /// Check if entry has any content
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }
}

/// Assembled release history, newest entry first
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionHistory {
    pub entries: Vec<ChangelogEntry>,
    pub latest_version: String,
}

impl VersionHistory {
    /// Build a history; the latest version is the first entry's
    pub fn new(entries: Vec<ChangelogEntry>) -> Self {
        let latest_version = entries
            .first()
            .map(|e| e.version.clone())
            .unwrap_or_else(|| chronicle_strategies::ZERO_VERSION.to_string());
        Self {
            entries,
            latest_version,
        }
    }

    /// The upcoming entry, if one was derived
    pub fn upcoming(&self) -> Option<&ChangelogEntry> {
        self.entries.first().filter(|e| e.is_upcoming)
    }

    /// Entries for existing tags
    pub fn released(&self) -> impl Iterator<Item = &ChangelogEntry> {
        self.entries.iter().filter(|e| !e.is_upcoming)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
