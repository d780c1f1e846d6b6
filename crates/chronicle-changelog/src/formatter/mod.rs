//! Changelog formatters

mod json;
mod markdown;
mod registry;

pub use json::JsonFormatter;
pub use markdown::MarkdownFormatter;
pub use registry::FormatterRegistry;

use chronicle_core::config::ChangelogConfig;
use chronicle_core::error::Result;

use crate::types::{ChangelogEntry, VersionHistory};

/// Trait for changelog formatters
pub trait ChangelogFormatter: Send + Sync {
    /// Format a changelog entry to string
    fn format(&self, entry: &ChangelogEntry, config: &ChangelogConfig) -> Result<String>;

    /// Format a whole history as one document
    fn format_history(&self, history: &VersionHistory, config: &ChangelogConfig) -> Result<String> {
        let parts = history
            .entries
            .iter()
            .map(|entry| self.format(entry, config))
            .collect::<Result<Vec<_>>>()?;
        Ok(parts.join("\n"))
    }

    /// Get the file extension for this format
    fn extension(&self) -> &'static str;
}
