//! Repository status operations

use crate::repository::{GitRepo, Result};

impl GitRepo {
    /// Check if the working directory is clean (no uncommitted changes)
    pub fn is_clean(&self) -> Result<bool> {
        let statuses = self.repo.statuses(None)?;

        for entry in statuses.iter() {
            let status = entry.status();

            if status.is_index_new()
                || status.is_index_modified()
                || status.is_index_deleted()
                || status.is_index_renamed()
                || status.is_index_typechange()
                || status.is_wt_new()
                || status.is_wt_modified()
                || status.is_wt_deleted()
                || status.is_wt_renamed()
                || status.is_wt_typechange()
            {
                return Ok(false);
            }
        }

        Ok(true)
    }

    /// Get the current branch name
    pub fn current_branch(&self) -> Result<Option<String>> {
        let head = match self.repo.head() {
            Ok(head) => head,
            Err(e) if e.code() == git2::ErrorCode::UnbornBranch => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        if head.is_branch() {
            Ok(head.shorthand().map(|s| s.to_string()))
        } else {
            // Detached HEAD
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::test_support::Fixture;

    fn setup_repo() -> Fixture {
        let mut fx = Fixture::new();
        fx.write("file.txt", "content");
        fx.commit("Initial commit");
        fx
    }

    #[test]
    fn test_is_clean() {
        let fx = setup_repo();
        assert!(fx.open().is_clean().unwrap());
    }

    #[test]
    fn test_untracked_changeset_makes_tree_dirty() {
        let fx = setup_repo();
        fx.write(".changeset/new-record.md", "---\ntype: patch\n---\n\nFix it");
        assert!(!fx.open().is_clean().unwrap());
    }

    #[test]
    fn test_modified_file_makes_tree_dirty() {
        let fx = setup_repo();
        fx.write("file.txt", "modified");
        assert!(!fx.open().is_clean().unwrap());
    }

    #[test]
    fn test_current_branch() {
        let fx = setup_repo();
        let branch = fx.open().current_branch().unwrap();
        // Git might default to 'master' or 'main' depending on config
        assert!(branch.is_some());
    }
}
