//! In-memory snapshot source
//!
//! Lets history assembly run without a repository on disk. Tags are listed
//! in the order they were added, so add the newest tag first.

use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, TimeZone, Utc};

use crate::repository::Result;
use crate::source::SnapshotSource;
use crate::types::{Snapshot, TagInfo};
use chronicle_core::error::GitError;

type Files = BTreeMap<PathBuf, String>;

struct MemoryTag {
    info: TagInfo,
    files: Option<Files>,
    dated: bool,
}

/// A [`SnapshotSource`] backed by maps of file contents
pub struct MemorySource {
    directory: PathBuf,
    working: Option<Files>,
    tags: Vec<MemoryTag>,
    unreadable: HashSet<PathBuf>,
    clean: bool,
}

impl MemorySource {
    /// Empty source storing records under `.changeset`
    pub fn new() -> Self {
        Self::in_directory(".changeset")
    }

    /// Empty source storing records under `directory`
    pub fn in_directory(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            working: None,
            tags: Vec::new(),
            unreadable: HashSet::new(),
            clean: true,
        }
    }

    fn files(&self, entries: &[(&str, &str)]) -> Files {
        entries
            .iter()
            .map(|(name, content)| (self.directory.join(name), content.to_string()))
            .collect()
    }

    /// Records present in the working tree
    pub fn with_working(mut self, entries: &[(&str, &str)]) -> Self {
        self.working = Some(self.files(entries));
        self
    }

    /// Add the next-older tag with the records present at it
    ///
    /// Each tag is dated one day before the previous one.
    pub fn with_tag(mut self, name: &str, entries: &[(&str, &str)]) -> Self {
        let files = Some(self.files(entries));
        self.push_tag(name, files);
        self
    }

    /// Add the next-older tag, whose tree has no records directory
    pub fn with_bare_tag(mut self, name: &str) -> Self {
        self.push_tag(name, None);
        self
    }

    fn push_tag(&mut self, name: &str, files: Option<Files>) {
        let date = Utc
            .timestamp_opt(1_700_000_000, 0)
            .single()
            .unwrap_or_else(Utc::now)
            - Duration::days(self.tags.len() as i64);
        self.tags.push(MemoryTag {
            info: TagInfo::new(name, format!("{:040x}", self.tags.len()))
                .with_timestamp(date),
            files,
            dated: true,
        });
    }

    /// Reads of `path` fail at every snapshot
    pub fn with_unreadable(mut self, path: impl Into<PathBuf>) -> Self {
        self.unreadable.insert(path.into());
        self
    }

    /// Date lookups for `tag` fail
    pub fn with_undated(mut self, tag: &str) -> Self {
        if let Some(t) = self.tags.iter_mut().find(|t| t.info.name == tag) {
            t.dated = false;
        }
        self
    }

    /// Whether the working tree reports as clean
    pub fn with_clean(mut self, clean: bool) -> Self {
        self.clean = clean;
        self
    }

    fn tag(&self, name: &str) -> Result<&MemoryTag> {
        self.tags
            .iter()
            .find(|t| t.info.name == name)
            .ok_or_else(|| GitError::TagNotFound(name.to_string()))
    }

    fn snapshot_files(&self, snapshot: &Snapshot) -> Result<Option<&Files>> {
        match snapshot {
            Snapshot::Working => Ok(self.working.as_ref()),
            Snapshot::Tag(name) => Ok(self.tag(name)?.files.as_ref()),
        }
    }
}

impl Default for MemorySource {
    fn default() -> Self {
        Self::new()
    }
}

impl SnapshotSource for MemorySource {
    fn version_tags(&self) -> Result<Vec<TagInfo>> {
        Ok(self
            .tags
            .iter()
            .filter(|t| t.info.version.is_some())
            .map(|t| t.info.clone())
            .collect())
    }

    fn record_files(&self, snapshot: &Snapshot, dir: &Path) -> Result<Option<Vec<PathBuf>>> {
        if dir != self.directory {
            return Ok(None);
        }
        Ok(self
            .snapshot_files(snapshot)?
            .map(|files| files.keys().cloned().collect()))
    }

    fn read_file(&self, snapshot: &Snapshot, path: &Path) -> Result<Option<String>> {
        if self.unreadable.contains(path) {
            return Err(GitError::SnapshotRead {
                snapshot: snapshot.to_string(),
                path: path.display().to_string(),
                reason: "permission denied".to_string(),
            });
        }
        Ok(self
            .snapshot_files(snapshot)?
            .and_then(|files| files.get(path).cloned()))
    }

    fn tag_date(&self, tag: &str) -> Result<DateTime<Utc>> {
        let t = self.tag(tag)?;
        match (t.dated, t.info.timestamp) {
            (true, Some(ts)) => Ok(ts),
            _ => Err(GitError::SnapshotRead {
                snapshot: tag.to_string(),
                path: String::new(),
                reason: "tag has no date".to_string(),
            }),
        }
    }

    fn is_clean(&self) -> Result<bool> {
        Ok(self.clean)
    }
}
