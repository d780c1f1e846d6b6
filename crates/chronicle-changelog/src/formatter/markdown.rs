//! Markdown changelog formatter

use chronicle_core::config::ChangelogConfig;
use chronicle_core::error::Result;
use tracing::{debug, instrument};

use super::ChangelogFormatter;
use crate::types::ChangelogEntry;

/// Line shown under the heading of an untagged entry
pub const PREVIEW_NOTICE: &str = "> Preview of the upcoming release";

/// Markdown changelog formatter
#[derive(Debug, Default, Clone, Copy)]
pub struct MarkdownFormatter;

impl MarkdownFormatter {
    /// Create a new markdown formatter
    pub fn new() -> Self {
        Self
    }

    /// A bullet, with continuation lines indented under it
    fn bullet(summary: &str) -> String {
        let mut lines = summary.lines();
        let mut out = format!("- {}\n", lines.next().unwrap_or_default());
        for line in lines {
            if line.trim().is_empty() {
                out.push('\n');
            } else {
                out.push_str(&format!("  {}\n", line));
            }
        }
        out
    }
}

impl ChangelogFormatter for MarkdownFormatter {
    #[instrument(skip(self, entry, config), fields(version = %entry.version, change_count = entry.changes.len()))]
    fn format(&self, entry: &ChangelogEntry, config: &ChangelogConfig) -> Result<String> {
        let mut output = format!("# {}\n\n", entry.version);

        if entry.is_upcoming {
            output.push_str(PREVIEW_NOTICE);
            output.push_str("\n\n");
        } else if config.include_dates {
            output.push_str(&format!("Released {}\n\n", entry.date.format("%Y-%m-%d")));
        }

        if entry.is_empty() {
            output.push_str("No changes recorded.\n");
        }

        for section in entry.sections() {
            output.push_str(&format!("## {}\n\n", section.title()));
            for summary in &section.summaries {
                output.push_str(&Self::bullet(summary));
            }
            output.push('\n');
        }

        debug!(output_len = output.len(), "markdown changelog formatted");
        Ok(output)
    }

    fn extension(&self) -> &'static str {
        "md"
    }
}
