//! JSON changelog formatter

use chrono::{DateTime, Utc};
use chronicle_core::config::ChangelogConfig;
use chronicle_core::error::Result;
use serde::Serialize;

use super::ChangelogFormatter;
use crate::types::{ChangeCategory, ChangelogEntry, VersionHistory};

/// JSON changelog formatter
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonFormatter;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct EntryDocument<'a> {
    version: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    date: Option<DateTime<Utc>>,
    is_upcoming: bool,
    sections: Vec<SectionDocument>,
}

#[derive(Serialize)]
struct SectionDocument {
    category: ChangeCategory,
    title: &'static str,
    changes: Vec<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct HistoryDocument<'a> {
    latest_version: &'a str,
    versions: Vec<EntryDocument<'a>>,
}

impl JsonFormatter {
    /// Create a new JSON formatter
    pub fn new() -> Self {
        Self
    }

    fn document<'a>(entry: &'a ChangelogEntry, config: &ChangelogConfig) -> EntryDocument<'a> {
        EntryDocument {
            version: &entry.version,
            date: config.include_dates.then_some(entry.date),
            is_upcoming: entry.is_upcoming,
            sections: entry
                .sections()
                .into_iter()
                .map(|s| SectionDocument {
                    category: s.category,
                    title: s.title(),
                    changes: s.summaries,
                })
                .collect(),
        }
    }
}

impl ChangelogFormatter for JsonFormatter {
    fn format(&self, entry: &ChangelogEntry, config: &ChangelogConfig) -> Result<String> {
        Ok(serde_json::to_string_pretty(&Self::document(entry, config))?)
    }

    fn format_history(&self, history: &VersionHistory, config: &ChangelogConfig) -> Result<String> {
        let doc = HistoryDocument {
            latest_version: &history.latest_version,
            versions: history
                .entries
                .iter()
                .map(|e| Self::document(e, config))
                .collect(),
        };
        Ok(serde_json::to_string_pretty(&doc)?)
    }

    fn extension(&self) -> &'static str {
        "json"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_entry() {
        let mut entry = ChangelogEntry::upcoming("1.1.0");
        entry.add_change(ChangeCategory::Added, "Add export");
        entry.add_change(ChangeCategory::Added, "Add import");

        let output = JsonFormatter::new()
            .format(&entry, &ChangelogConfig::default())
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["version"], "1.1.0");
        assert_eq!(value["isUpcoming"], true);
        assert_eq!(value["sections"][0]["category"], "added");
        assert_eq!(value["sections"][0]["title"], "Added");
        assert_eq!(value["sections"][0]["changes"][1], "Add import");
    }

    #[test]
    fn test_format_history() {
        let history = VersionHistory::new(vec![ChangelogEntry::upcoming("0.1.0")]);
        let output = JsonFormatter::new()
            .format_history(&history, &ChangelogConfig::default())
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["latestVersion"], "0.1.0");
        assert_eq!(value["versions"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_dates_omitted_when_disabled() {
        let config = ChangelogConfig {
            include_dates: false,
            ..ChangelogConfig::default()
        };
        let output = JsonFormatter::new()
            .format(&ChangelogEntry::upcoming("0.1.0"), &config)
            .unwrap();
        assert!(!output.contains("\"date\""));
    }
}
