//! Published changelog index and on-disk output

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use chronicle_core::config::ChangelogConfig;
use chronicle_core::error::Result;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::formatter::ChangelogFormatter;
use crate::types::{ChangelogEntry, VersionHistory};

/// File name of the index written next to the per-version files
pub const INDEX_FILE: &str = "index.json";

/// Summary used for an entry without changes
pub const NO_CHANGES: &str = "No changes";

/// One version in the index
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexEntry {
    pub version: String,
    pub date: DateTime<Utc>,
    pub file_url: String,
    pub summary: String,
}

/// Index of all published versions, in history order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangelogIndex {
    pub versions: Vec<IndexEntry>,
    pub latest_version: String,
}

/// Name of the file an entry is written to
pub fn entry_file_name(entry: &ChangelogEntry, extension: &str) -> String {
    format!("{}.{}", entry.version, extension)
}

/// First line of the first change, or [`NO_CHANGES`]
pub fn entry_summary(entry: &ChangelogEntry) -> String {
    entry
        .changes
        .first()
        .and_then(|c| c.summary.lines().next())
        .map(str::to_string)
        .unwrap_or_else(|| NO_CHANGES.to_string())
}

impl ChangelogIndex {
    /// Build the index for a history whose files use `extension`
    pub fn from_history(history: &VersionHistory, extension: &str) -> Self {
        Self {
            versions: history
                .entries
                .iter()
                .map(|entry| IndexEntry {
                    version: entry.version.clone(),
                    date: entry.date,
                    file_url: format!("./{}", entry_file_name(entry, extension)),
                    summary: entry_summary(entry),
                })
                .collect(),
            latest_version: history.latest_version.clone(),
        }
    }
}

/// Write one file per entry plus the index into `dir`
///
/// Returns the paths written. Existing files with the same names are
/// replaced; other files in `dir` are left alone.
#[instrument(skip(history, formatter, config), fields(dir = %dir.display(), entries = history.entries.len()))]
pub fn write_changelog(
    dir: &Path,
    history: &VersionHistory,
    formatter: &dyn ChangelogFormatter,
    config: &ChangelogConfig,
) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir)?;
    let mut written = Vec::new();

    for entry in &history.entries {
        let path = dir.join(entry_file_name(entry, formatter.extension()));
        std::fs::write(&path, formatter.format(entry, config)?)?;
        debug!(path = %path.display(), "wrote changelog entry");
        written.push(path);
    }

    let index = ChangelogIndex::from_history(history, formatter.extension());
    let index_path = dir.join(INDEX_FILE);
    std::fs::write(&index_path, serde_json::to_string_pretty(&index)?)?;
    written.push(index_path);

    info!(files = written.len(), "changelog written");
    Ok(written)
}
