//! Writing new changeset records

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use chronicle_core::error::{ChangesetError, ChronicleError, Result};
use chronicle_core::Severity;
use tracing::{info, instrument};

use crate::parser::RECORD_EXTENSION;

/// Longest slug taken from a summary
const MAX_SLUG_LEN: usize = 48;

/// Record file content for a severity and summary
pub fn render_record(severity: Severity, summary: &str) -> String {
    format!("---\ntype: {}\n---\n\n{}\n", severity, summary.trim())
}

/// File-name slug from the first line of a summary
///
/// Lowercase ASCII alphanumerics, runs of anything else collapsed to `-`.
pub fn slugify(summary: &str) -> String {
    let first_line = summary.lines().next().unwrap_or_default();
    let mut slug = String::new();
    for c in first_line.chars() {
        if c.is_ascii_alphanumeric() {
            if slug.len() >= MAX_SLUG_LEN {
                break;
            }
            slug.push(c.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    slug.trim_end_matches('-').to_string()
}

/// File stem for a record created at `now`: `{YYYYMMDD-HHMMSS}-{slug}`
pub fn record_stem(summary: &str, now: DateTime<Utc>) -> String {
    let stamp = now.format("%Y%m%d-%H%M%S");
    let slug = slugify(summary);
    if slug.is_empty() {
        format!("{}-change", stamp)
    } else {
        format!("{}-{}", stamp, slug)
    }
}

/// Write a new record into `dir`, returning its path
///
/// `dir` must already exist. A numeric suffix is appended when a record
/// with the same name is present.
#[instrument(skip(summary), fields(dir = %dir.display(), %severity))]
pub fn write_record(
    dir: &Path,
    severity: Severity,
    summary: &str,
    now: DateTime<Utc>,
) -> Result<PathBuf> {
    if !dir.is_dir() {
        return Err(ChangesetError::MissingRecordStore {
            path: dir.to_path_buf(),
            snapshot: "working".to_string(),
        }
        .into());
    }
    if summary.trim().is_empty() {
        return Err(ChronicleError::other("Changeset summary must not be empty"));
    }

    let stem = record_stem(summary, now);
    let mut path = dir.join(format!("{}.{}", stem, RECORD_EXTENSION));
    let mut suffix = 2;
    while path.exists() {
        path = dir.join(format!("{}-{}.{}", stem, suffix, RECORD_EXTENSION));
        suffix += 1;
    }

    std::fs::write(&path, render_record(severity, summary))?;
    info!(path = %path.display(), "created changeset");
    Ok(path)
}
