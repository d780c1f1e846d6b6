//! Reading files as they exist at a snapshot

use std::path::{Path, PathBuf};

use tracing::{debug, instrument};

use crate::repository::{GitRepo, Result};
use crate::types::Snapshot;
use chronicle_core::error::GitError;

impl GitRepo {
    /// Tree of the commit a tag points at
    fn tag_tree(&self, tag: &str) -> Result<git2::Tree<'_>> {
        let tag_ref = format!("refs/tags/{}", tag);
        let reference = self.repo.find_reference(&tag_ref).map_err(|e| {
            if e.code() == git2::ErrorCode::NotFound {
                GitError::TagNotFound(tag.to_string())
            } else {
                GitError::Git2(e)
            }
        })?;
        Ok(reference.peel_to_tree()?)
    }

    /// Files directly inside `dir` at a snapshot, sorted by name
    ///
    /// Returns `None` when the directory does not exist at that snapshot.
    /// Paths are relative to the repository root.
    #[instrument(skip(self), fields(snapshot = %snapshot, dir = %dir.display()))]
    pub fn files_in_dir(&self, snapshot: &Snapshot, dir: &Path) -> Result<Option<Vec<PathBuf>>> {
        let files = match snapshot {
            Snapshot::Working => self.working_files(dir)?,
            Snapshot::Tag(tag) => self.tree_files(tag, dir)?,
        };

        debug!(count = files.as_ref().map(Vec::len), "listed snapshot files");
        Ok(files)
    }

    fn working_files(&self, dir: &Path) -> Result<Option<Vec<PathBuf>>> {
        let root = self.require_workdir()?;
        let abs = root.join(dir);
        if !abs.is_dir() {
            return Ok(None);
        }

        let read_err = |e: std::io::Error| GitError::SnapshotRead {
            snapshot: Snapshot::Working.to_string(),
            path: dir.display().to_string(),
            reason: e.to_string(),
        };

        let mut files = Vec::new();
        for entry in std::fs::read_dir(&abs).map_err(read_err)? {
            let entry = entry.map_err(read_err)?;
            if entry.file_type().map_err(read_err)?.is_file() {
                files.push(dir.join(entry.file_name()));
            }
        }
        files.sort();
        Ok(Some(files))
    }

    fn tree_files(&self, tag: &str, dir: &Path) -> Result<Option<Vec<PathBuf>>> {
        let tree = self.tag_tree(tag)?;
        let entry = match tree.get_path(dir) {
            Ok(entry) => entry,
            Err(e) if e.code() == git2::ErrorCode::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        if entry.kind() != Some(git2::ObjectType::Tree) {
            return Ok(None);
        }

        let subtree = self.repo.find_tree(entry.id())?;
        let files = subtree
            .iter()
            .filter(|e| e.kind() == Some(git2::ObjectType::Blob))
            .filter_map(|e| e.name().map(|name| dir.join(name)))
            .collect();
        Ok(Some(files))
    }

    /// Content of a file at a snapshot, `None` if it does not exist there
    #[instrument(skip(self), fields(snapshot = %snapshot, path = %path.display()))]
    pub fn read_file_at(&self, snapshot: &Snapshot, path: &Path) -> Result<Option<String>> {
        let read_err = |reason: String| GitError::SnapshotRead {
            snapshot: snapshot.to_string(),
            path: path.display().to_string(),
            reason,
        };

        match snapshot {
            Snapshot::Working => {
                let abs = self.require_workdir()?.join(path);
                match std::fs::read_to_string(&abs) {
                    Ok(content) => Ok(Some(content)),
                    Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
                    Err(e) => Err(read_err(e.to_string())),
                }
            }
            Snapshot::Tag(tag) => {
                let tree = self.tag_tree(tag)?;
                let entry = match tree.get_path(path) {
                    Ok(entry) => entry,
                    Err(e) if e.code() == git2::ErrorCode::NotFound => return Ok(None),
                    Err(e) => return Err(e.into()),
                };
                let blob = self
                    .repo
                    .find_blob(entry.id())
                    .map_err(|e| read_err(e.message().to_string()))?;
                let content = std::str::from_utf8(blob.content())
                    .map_err(|e| read_err(e.to_string()))?;
                Ok(Some(content.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::Fixture;

    fn setup() -> Fixture {
        let mut fx = Fixture::new();
        fx.write("README.md", "project");
        fx.commit("Initial commit");
        fx.tag_lightweight("v0.1.0");

        fx.write(".changeset/README.md", "readme");
        fx.write(".changeset/alpha.md", "---\ntype: minor\n---\n\nAlpha");
        fx.commit("Add alpha");
        fx.tag_lightweight("v0.2.0");

        fx.write(".changeset/beta.md", "---\ntype: patch\n---\n\nBeta");
        fx
    }

    #[test]
    fn test_files_in_dir_at_tag() {
        let fx = setup();
        let repo = fx.open();
        let files = repo
            .files_in_dir(&Snapshot::Tag("v0.2.0".into()), Path::new(".changeset"))
            .unwrap()
            .unwrap();
        assert_eq!(
            files,
            vec![
                PathBuf::from(".changeset/README.md"),
                PathBuf::from(".changeset/alpha.md"),
            ]
        );
    }

    #[test]
    fn test_files_in_dir_missing_at_older_tag() {
        let fx = setup();
        let files = fx
            .open()
            .files_in_dir(&Snapshot::Tag("v0.1.0".into()), Path::new(".changeset"))
            .unwrap();
        assert!(files.is_none());
    }

    #[test]
    fn test_files_in_dir_working_includes_uncommitted() {
        let fx = setup();
        let files = fx
            .open()
            .files_in_dir(&Snapshot::Working, Path::new(".changeset"))
            .unwrap()
            .unwrap();
        assert_eq!(files.len(), 3);
        assert!(files.contains(&PathBuf::from(".changeset/beta.md")));
    }

    #[test]
    fn test_read_file_at_tag() {
        let fx = setup();
        let content = fx
            .open()
            .read_file_at(
                &Snapshot::Tag("v0.2.0".into()),
                Path::new(".changeset/alpha.md"),
            )
            .unwrap();
        assert_eq!(content.as_deref(), Some("---\ntype: minor\n---\n\nAlpha"));
    }

    #[test]
    fn test_read_file_absent_at_tag() {
        let fx = setup();
        let content = fx
            .open()
            .read_file_at(
                &Snapshot::Tag("v0.2.0".into()),
                Path::new(".changeset/beta.md"),
            )
            .unwrap();
        assert!(content.is_none());
    }

    #[test]
    fn test_unknown_tag_is_an_error() {
        let fx = setup();
        let result = fx
            .open()
            .files_in_dir(&Snapshot::Tag("v9.0.0".into()), Path::new(".changeset"));
        assert!(matches!(result, Err(GitError::TagNotFound(_))));
    }
}
