//! The version-control queries history assembly depends on

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use crate::repository::{GitRepo, Result};
use crate::types::{Snapshot, TagInfo};

/// Read-only view of a repository's release tags and their file trees
///
/// History assembly only talks to this trait, so it can run against an
/// in-memory fake as easily as a real repository.
pub trait SnapshotSource {
    /// Release tags, most recent first
    fn version_tags(&self) -> Result<Vec<TagInfo>>;

    /// The most recent release tag, if any
    fn latest_tag(&self) -> Result<Option<TagInfo>> {
        Ok(self.version_tags()?.into_iter().next())
    }

    /// Files directly inside `dir` at a snapshot, `None` if the directory is absent
    fn record_files(&self, snapshot: &Snapshot, dir: &Path) -> Result<Option<Vec<PathBuf>>>;

    /// Content of a file at a snapshot, `None` if it is absent
    fn read_file(&self, snapshot: &Snapshot, path: &Path) -> Result<Option<String>>;

    /// When a tag was created
    fn tag_date(&self, tag: &str) -> Result<DateTime<Utc>>;

    /// Whether the working tree has no uncommitted changes
    fn is_clean(&self) -> Result<bool>;
}

impl SnapshotSource for GitRepo {
    fn version_tags(&self) -> Result<Vec<TagInfo>> {
        GitRepo::version_tags(self)
    }

    fn record_files(&self, snapshot: &Snapshot, dir: &Path) -> Result<Option<Vec<PathBuf>>> {
        self.files_in_dir(snapshot, dir)
    }

    fn read_file(&self, snapshot: &Snapshot, path: &Path) -> Result<Option<String>> {
        self.read_file_at(snapshot, path)
    }

    fn tag_date(&self, tag: &str) -> Result<DateTime<Utc>> {
        self.tag_timestamp(tag)
    }

    fn is_clean(&self) -> Result<bool> {
        GitRepo::is_clean(self)
    }
}
