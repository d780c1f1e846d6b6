//! Changeset record parsing

mod frontmatter;

pub use frontmatter::FrontmatterParser;

use std::path::Path;

use crate::types::ChangesetRecord;

/// Extension of record files
pub const RECORD_EXTENSION: &str = "md";

/// Reserved file in the records directory that is never a record
pub const README_STEM: &str = "README";

/// Trait for record parsers
///
/// Parsing never fails: a record that cannot be classified comes back
/// without a severity and the caller decides whether that is fatal.
pub trait RecordParser: Send + Sync {
    /// Parse raw record text
    fn parse(&self, raw: &str, id: &str) -> ChangesetRecord;

    /// Why a record parsed from `raw` carries no severity
    fn explain(&self, _raw: &str) -> String {
        "no recognizable severity".to_string()
    }
}

/// Record id for a file in the records directory
///
/// Only `.md` files are records, and `README.md` (any case) is reserved.
pub fn record_id(path: &Path) -> Option<String> {
    if path.extension().and_then(|e| e.to_str()) != Some(RECORD_EXTENSION) {
        return None;
    }

    let stem = path.file_stem()?.to_str()?;
    if stem.is_empty() || stem.eq_ignore_ascii_case(README_STEM) {
        return None;
    }

    Some(stem.to_string())
}
