//! Remote operations

use std::path::Path;

use tracing::{info, instrument};

use crate::repository::{GitRepo, Result};

impl GitRepo {
    /// Get list of remote names
    pub fn remotes(&self) -> Result<Vec<String>> {
        let remotes = self.repo.remotes()?;
        Ok(remotes
            .iter()
            .filter_map(|r| r.map(|s| s.to_string()))
            .collect())
    }

    /// Check if a remote exists
    pub fn has_remote(&self, name: &str) -> Result<bool> {
        Ok(self.remotes()?.iter().any(|r| r == name))
    }
}

/// Push a tag using the git CLI, which picks up the user's credential helpers
#[instrument(fields(repo_dir = %repo_dir.display(), remote, tag))]
pub fn git_push_tag(
    repo_dir: &Path,
    remote: &str,
    tag: &str,
) -> std::io::Result<std::process::Output> {
    let start = std::time::Instant::now();
    let output = std::process::Command::new("git")
        .arg("-C")
        .arg(repo_dir)
        .args(["push", remote, tag])
        .output()?;
    info!(
        remote,
        tag,
        duration_ms = start.elapsed().as_millis(),
        success = output.status.success(),
        "git push tag (CLI)"
    );
    Ok(output)
}

#[cfg(test)]
mod tests {
    use crate::test_support::Fixture;

    #[test]
    fn test_remotes_empty() {
        let fx = Fixture::new();
        let repo = fx.open();
        assert!(repo.remotes().unwrap().is_empty());
        assert!(!repo.has_remote("origin").unwrap());
    }

    #[test]
    fn test_has_remote() {
        let fx = Fixture::new();
        fx.repo
            .remote("origin", "https://example.com/repo.git")
            .unwrap();
        assert!(fx.open().has_remote("origin").unwrap());
    }
}
