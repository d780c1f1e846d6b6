//! Opening the repository whose history is read

use std::path::{Path, PathBuf};

use git2::{ErrorCode, Repository};
use tracing::{debug, instrument};

use chronicle_core::error::GitError;

/// Result type for git operations
pub type Result<T> = std::result::Result<T, GitError>;

/// A repository opened through libgit2
///
/// All snapshot queries and tag operations hang off this handle.
pub struct GitRepo {
    pub(crate) repo: Repository,
}

impl GitRepo {
    /// Open the repository rooted exactly at `path`
    #[instrument(fields(path = %path.display()))]
    pub fn open(path: &Path) -> Result<Self> {
        let repo = Repository::open(path)
            .map_err(|e| open_error(e, GitError::RepositoryNotFound(path.to_path_buf())))?;
        Ok(Self { repo })
    }

    /// Open the repository containing `start`, walking up parent directories
    #[instrument(fields(start = %start.display()))]
    pub fn discover(start: &Path) -> Result<Self> {
        let repo = Repository::discover(start)
            .map_err(|e| open_error(e, GitError::NotARepository(start.to_path_buf())))?;
        debug!(git_dir = %repo.path().display(), "found repository");
        Ok(Self { repo })
    }

    /// Working tree root, `None` for bare repositories
    pub fn workdir(&self) -> Option<&Path> {
        self.repo.workdir()
    }

    /// Working tree root; bare repositories have no working snapshot
    pub fn require_workdir(&self) -> Result<&Path> {
        self.workdir().ok_or(GitError::BareRepository)
    }

    /// Working tree root as an owned path
    pub fn root(&self) -> Result<PathBuf> {
        self.require_workdir().map(Path::to_path_buf)
    }

    pub(crate) fn head_commit(&self) -> Result<git2::Commit<'_>> {
        Ok(self.repo.head()?.peel_to_commit()?)
    }
}

fn open_error(err: git2::Error, not_found: GitError) -> GitError {
    match err.code() {
        ErrorCode::NotFound => not_found,
        _ => GitError::OpenFailed(err.message().to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_discover_from_nested_directory() {
        let temp = TempDir::new().unwrap();
        Repository::init(temp.path()).unwrap();
        let nested = temp.path().join(".changeset").join("drafts");
        std::fs::create_dir_all(&nested).unwrap();

        let repo = GitRepo::discover(&nested).unwrap();
        // macOS temp dirs sit behind a /private symlink
        assert_eq!(
            repo.root().unwrap().canonicalize().unwrap(),
            temp.path().canonicalize().unwrap()
        );
    }

    #[test]
    fn test_discover_outside_repository() {
        let temp = TempDir::new().unwrap();
        assert!(matches!(
            GitRepo::discover(temp.path()),
            Err(GitError::NotARepository(_))
        ));
        assert!(matches!(
            GitRepo::open(temp.path()),
            Err(GitError::RepositoryNotFound(_))
        ));
    }

    #[test]
    fn test_bare_repository_has_no_working_snapshot() {
        let temp = TempDir::new().unwrap();
        Repository::init_bare(temp.path()).unwrap();
        let repo = GitRepo::open(temp.path()).unwrap();
        assert!(repo.workdir().is_none());
        assert!(matches!(repo.require_workdir(), Err(GitError::BareRepository)));
    }

    #[test]
    fn test_head_commit_requires_a_commit() {
        let temp = TempDir::new().unwrap();
        Repository::init(temp.path()).unwrap();
        let repo = GitRepo::open(temp.path()).unwrap();
        assert!(repo.head_commit().is_err());
    }
}
