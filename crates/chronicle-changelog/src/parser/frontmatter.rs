//! Front-matter record parser
//!
//! Records look like:
//!
//! ```text
//! ---
//! type: minor
//! ---
//!
//! Add export to CSV
//! ```

use regex::Regex;
use std::sync::LazyLock;

use chronicle_core::Severity;
use tracing::{debug, warn};

use super::RecordParser;
use crate::types::ChangesetRecord;

/// Opening separator, at least one header line, closing separator, body
static RECORD_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^---[ \t]*\n(?P<header>(?:[^\n]*\n)+?)---[ \t]*(?:\n|$)(?P<body>[\s\S]*)$")
        .expect("Invalid regex")
});

/// A `key: value` header line
static HEADER_LINE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?P<key>[A-Za-z_][A-Za-z0-9_-]*)\s*:\s*(?P<value>.*?)\s*$")
        .expect("Invalid regex")
});

/// Header key carrying the severity
const TYPE_KEY: &str = "type";

/// Parser for `---` delimited records
#[derive(Debug, Default, Clone, Copy)]
pub struct FrontmatterParser;

struct Parts<'a> {
    header: &'a str,
    body: &'a str,
}

impl FrontmatterParser {
    /// Create a new parser
    pub fn new() -> Self {
        Self
    }

    fn normalize(raw: &str) -> String {
        raw.trim_start_matches('\u{feff}')
            .replace("\r\n", "\n")
            .trim_start()
            .to_string()
    }

    fn split(text: &str) -> Option<Parts<'_>> {
        let caps = RECORD_REGEX.captures(text)?;
        Some(Parts {
            header: caps.name("header")?.as_str(),
            body: caps.name("body")?.as_str(),
        })
    }

    /// Raw value of the `type` header, quotes removed
    fn type_value(header: &str) -> Option<&str> {
        header
            .lines()
            .filter_map(|line| HEADER_LINE_REGEX.captures(line))
            .find(|caps| &caps["key"] == TYPE_KEY)
            .and_then(|caps| caps.name("value"))
            .map(|m| unquote(m.as_str()))
    }

    fn fallback_summary(id: &str) -> String {
        format!("Changes from {}", id)
    }
}

fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }
    value
}

impl RecordParser for FrontmatterParser {
    fn parse(&self, raw: &str, id: &str) -> ChangesetRecord {
        let text = Self::normalize(raw);

        let Some(parts) = Self::split(&text) else {
            warn!(id, "changeset has no --- header block");
            let summary = text.trim();
            let summary = if summary.is_empty() {
                Self::fallback_summary(id)
            } else {
                summary.to_string()
            };
            return ChangesetRecord::new(id, None, summary);
        };

        let severity = Self::type_value(parts.header).and_then(|v| v.parse::<Severity>().ok());
        if severity.is_none() {
            debug!(id, "changeset has no recognizable type");
        }

        let body = parts.body.trim();
        let summary = if body.is_empty() {
            Self::fallback_summary(id)
        } else {
            body.to_string()
        };

        ChangesetRecord::new(id, severity, summary)
    }

    fn explain(&self, raw: &str) -> String {
        let text = Self::normalize(raw);
        match Self::split(&text) {
            None => "missing --- header block".to_string(),
            Some(parts) => match Self::type_value(parts.header) {
                None => "missing `type` header".to_string(),
                Some(value) => format!(
                    "unrecognized type '{}', expected one of major, minor, patch",
                    value
                ),
            },
        }
    }
}
