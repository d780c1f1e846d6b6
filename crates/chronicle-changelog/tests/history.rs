//! History assembly scenarios against an in-memory source and a real repository

use chronicle_changelog::{
    ChangeCategory, ErrorMode, HistoryAssembler, HistoryOptions, SnapshotReader,
};
use chronicle_core::{ChangesetError, ChronicleError, Severity};
use chronicle_git::memory::MemorySource;
use chronicle_git::{GitRepo, Snapshot};

fn record(severity: &str, summary: &str) -> String {
    format!("---\ntype: {}\n---\n\n{}\n", severity, summary)
}

fn lenient() -> HistoryOptions {
    HistoryOptions {
        mode: ErrorMode::Lenient,
        ..HistoryOptions::default()
    }
}

#[test]
fn first_minor_record_without_tags() {
    let minor = record("minor", "Add new feature for users");
    let src = MemorySource::new().with_working(&[("brave-fox.md", minor.as_str())]);

    let history = HistoryAssembler::new(&src, HistoryOptions::default())
        .assemble()
        .unwrap();

    assert_eq!(history.entries.len(), 1);
    let entry = &history.entries[0];
    assert!(entry.is_upcoming);
    assert_eq!(entry.version, "0.1.0");
    assert_eq!(entry.changes[0].category, ChangeCategory::Added);
    assert_eq!(history.latest_version, "0.1.0");
}

#[test]
fn major_dominates_mixed_records() {
    let patch = record("patch", "Fix crash");
    let minor = record("minor", "Add export");
    let major = record("major", "Drop the legacy API");
    let src = MemorySource::new()
        .with_working(&[("a.md", patch.as_str()), ("b.md", minor.as_str()), ("c.md", major.as_str())])
        .with_tag("v1.0.0", &[]);

    let upcoming = HistoryAssembler::new(&src, HistoryOptions::default())
        .upcoming()
        .unwrap()
        .unwrap();

    assert_eq!(upcoming.severity, Severity::Major);
    assert_eq!(upcoming.version, "2.0.0");
    assert_eq!(upcoming.records.len(), 3);
}

#[test]
fn prerelease_base_is_moved_past() {
    let patch = record("patch", "Fix crash");
    let src = MemorySource::new()
        .with_working(&[("a.md", patch.as_str())])
        .with_bare_tag("v1.0.0-beta.1");

    let upcoming = HistoryAssembler::new(&src, HistoryOptions::default())
        .upcoming()
        .unwrap()
        .unwrap();

    assert_eq!(upcoming.base_version, "1.0.0-beta.1");
    assert_eq!(upcoming.version, "1.0.1");
}

#[test]
fn tag_contains_only_records_it_introduced() {
    let a = record("minor", "Add A");
    let b = record("patch", "Fix B");
    let src = MemorySource::new()
        .with_working(&[("a.md", a.as_str()), ("b.md", b.as_str())])
        .with_tag("v1.0.0", &[("a.md", a.as_str()), ("b.md", b.as_str())])
        .with_tag("v0.1.0", &[("a.md", a.as_str())]);

    let history = HistoryAssembler::new(&src, HistoryOptions::default())
        .assemble()
        .unwrap();

    // Everything in the working tree is already tagged
    assert_eq!(history.entries.len(), 2);
    let v1 = &history.entries[0];
    assert_eq!(v1.version, "1.0.0");
    assert!(!v1.is_upcoming);
    assert_eq!(v1.changes.len(), 1);
    assert_eq!(v1.changes[0].summary, "Fix B");

    let v0 = &history.entries[1];
    assert_eq!(v0.version, "0.1.0");
    assert_eq!(v0.changes[0].summary, "Add A");
}

#[test]
fn headerless_record_in_both_modes() {
    let src = MemorySource::new().with_working(&[("odd.md", "This is not a valid changeset")]);

    let lenient_reader = SnapshotReader::new(&src, ".changeset", ErrorMode::Lenient);
    let records = lenient_reader.read(&Snapshot::Working).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].severity, None);
    assert_eq!(records[0].summary, "This is not a valid changeset");

    let strict_reader = SnapshotReader::new(&src, ".changeset", ErrorMode::Strict);
    let err = strict_reader.read(&Snapshot::Working).unwrap_err();
    assert!(matches!(
        err,
        ChronicleError::Changeset(ChangesetError::MalformedRecord { .. })
    ));
    assert!(err.to_string().contains(".changeset/odd.md"));

    let strict = HistoryAssembler::new(&src, HistoryOptions::default());
    assert!(strict.assemble().is_err());
    let history = HistoryAssembler::new(&src, lenient()).assemble().unwrap();
    assert!(history.is_empty());
}

#[test]
fn max_versions_counts_upcoming_entry() {
    let r = |n: usize| record("patch", &format!("Fix issue {}", n));
    let (r1, r2, r3, r4, r5, r6) = (r(1), r(2), r(3), r(4), r(5), r(6));
    let src = MemorySource::new()
        .with_working(&[
            ("1.md", r1.as_str()),
            ("2.md", r2.as_str()),
            ("3.md", r3.as_str()),
            ("4.md", r4.as_str()),
            ("5.md", r5.as_str()),
            ("6.md", r6.as_str()),
        ])
        .with_tag("v1.4.0", &[("1.md", r1.as_str()), ("2.md", r2.as_str()), ("3.md", r3.as_str()), ("4.md", r4.as_str()), ("5.md", r5.as_str())])
        .with_tag("v1.3.0", &[("1.md", r1.as_str()), ("2.md", r2.as_str()), ("3.md", r3.as_str()), ("4.md", r4.as_str())])
        .with_tag("v1.2.0", &[("1.md", r1.as_str()), ("2.md", r2.as_str()), ("3.md", r3.as_str())])
        .with_tag("v1.1.0", &[("1.md", r1.as_str()), ("2.md", r2.as_str())])
        .with_tag("v1.0.0", &[("1.md", r1.as_str())]);

    let options = HistoryOptions {
        max_versions: 3,
        ..HistoryOptions::default()
    };
    let history = HistoryAssembler::new(&src, options).assemble().unwrap();

    let versions: Vec<_> = history.entries.iter().map(|e| e.version.as_str()).collect();
    assert_eq!(versions, vec!["1.4.1", "1.4.0", "1.3.0"]);
    assert!(history.entries[0].is_upcoming);
    assert_eq!(history.entries.iter().filter(|e| e.is_upcoming).count(), 1);
}

#[test]
fn source_order_is_trusted_over_version_order() {
    let a = record("patch", "Fix A");
    let src = MemorySource::new()
        .with_working(&[])
        .with_tag("v0.9.1", &[("a.md", a.as_str())])
        .with_tag("v1.0.0", &[]);

    let history = HistoryAssembler::new(&src, HistoryOptions::default())
        .assemble()
        .unwrap();
    let versions: Vec<_> = history.entries.iter().map(|e| e.version.as_str()).collect();
    assert_eq!(versions, vec!["0.9.1", "1.0.0"]);
    assert_eq!(history.latest_version, "0.9.1");
}

mod git {
    use super::*;
    use git2::{Repository, Signature, Time};
    use std::path::Path;
    use tempfile::TempDir;

    struct Repo {
        temp: TempDir,
        repo: Repository,
        clock: i64,
    }

    impl Repo {
        fn new() -> Self {
            let temp = TempDir::new().unwrap();
            let repo = Repository::init(temp.path()).unwrap();
            Self {
                temp,
                repo,
                clock: 1_700_000_000,
            }
        }

        fn write(&self, rel: &str, content: &str) {
            let path = self.temp.path().join(rel);
            std::fs::create_dir_all(path.parent().unwrap()).unwrap();
            std::fs::write(path, content).unwrap();
        }

        fn commit_and_tag(&mut self, tag: &str) {
            self.clock += 3600;
            let sig = Signature::new("Test", "test@example.com", &Time::new(self.clock, 0)).unwrap();
            let mut index = self.repo.index().unwrap();
            index
                .add_all(["*"].iter(), git2::IndexAddOption::DEFAULT, None)
                .unwrap();
            index.write().unwrap();
            let tree = self.repo.find_tree(index.write_tree().unwrap()).unwrap();
            let parents = match self.repo.head() {
                Ok(head) => vec![head.peel_to_commit().unwrap()],
                Err(_) => Vec::new(),
            };
            let parent_refs: Vec<_> = parents.iter().collect();
            let oid = self
                .repo
                .commit(Some("HEAD"), &sig, &sig, tag, &tree, &parent_refs)
                .unwrap();
            let commit = self.repo.find_commit(oid).unwrap();
            self.repo
                .tag_lightweight(tag, commit.as_object(), false)
                .unwrap();
        }

        fn path(&self) -> &Path {
            self.temp.path()
        }
    }

    #[test]
    fn history_from_real_repository() {
        let mut repo = Repo::new();
        repo.write("README.md", "demo");
        repo.commit_and_tag("v0.1.0");

        repo.write(".changeset/README.md", "# Changesets");
        repo.write(".changeset/add-export.md", &record("minor", "Add export"));
        repo.commit_and_tag("v0.2.0");

        repo.write(".changeset/fix-crash.md", &record("patch", "Fix crash"));
        repo.commit_and_tag("v0.2.1");

        // Uncommitted record
        repo.write(
            ".changeset/drop-flag.md",
            &record("major", "Remove the --legacy flag"),
        );

        let git = GitRepo::open(repo.path()).unwrap();
        let history = HistoryAssembler::new(&git, HistoryOptions::default())
            .assemble()
            .unwrap();

        let versions: Vec<_> = history.entries.iter().map(|e| e.version.as_str()).collect();
        assert_eq!(versions, vec!["1.0.0", "0.2.1", "0.2.0", "0.1.0"]);

        assert_eq!(history.entries[0].changes[0].category, ChangeCategory::Removed);
        assert_eq!(history.entries[1].changes[0].summary, "Fix crash");
        assert_eq!(history.entries[2].changes[0].summary, "Add export");
        // The oldest tag predates the records directory
        assert!(history.entries[3].changes.is_empty());
        assert_eq!(
            history.entries[1].date.timestamp(),
            1_700_000_000 + 3 * 3600
        );
    }
}
