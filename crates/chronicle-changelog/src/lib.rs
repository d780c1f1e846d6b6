//! Chronicle Changelog - Changeset records and version history
//!
//! This crate parses changeset records, works out which records each
//! version tag introduced, derives the upcoming version from the records
//! not yet tagged and renders the resulting history.

pub mod authoring;
pub mod categorize;
pub mod diff;
pub mod formatter;
pub mod history;
pub mod index;
pub mod parser;
pub mod reader;
pub mod types;

pub use categorize::categorize;
pub use diff::diff;
pub use formatter::{ChangelogFormatter, FormatterRegistry, JsonFormatter, MarkdownFormatter};
pub use history::{HistoryAssembler, HistoryOptions, UpcomingRelease};
pub use index::{write_changelog, ChangelogIndex};
pub use parser::{FrontmatterParser, RecordParser};
pub use reader::{ErrorMode, SnapshotReader};
pub use types::{Change, ChangeCategory, ChangelogEntry, ChangesetRecord, VersionHistory};
