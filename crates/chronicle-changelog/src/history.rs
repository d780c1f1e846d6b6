//! Version history assembly
//!
//! The upcoming entry comes from records in the working tree that no tag
//! has consumed yet. Each historical entry holds the records a tag
//! introduced relative to the next-older tag. Entries are emitted newest
//! first, in the order the source lists tags.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use chronicle_core::config::Config;
use chronicle_core::error::Result;
use chronicle_core::Severity;
use chronicle_git::{Snapshot, SnapshotSource, TagInfo};
use chronicle_strategies::{
    resolve, BaseVersionChain, FixedVersion, ManifestVersionSource, SemVerStrategy,
    VersionStrategy,
};
use tracing::{debug, info, instrument, warn};

use crate::categorize::categorize;
use crate::diff::diff;
use crate::reader::{ErrorMode, SnapshotReader};
use crate::types::{ChangelogEntry, ChangesetRecord, VersionHistory};

/// Knobs for history assembly
#[derive(Debug, Clone)]
pub struct HistoryOptions {
    /// Records directory, relative to the repository root
    pub directory: PathBuf,
    /// Maximum number of entries, upcoming included
    pub max_versions: usize,
    /// Handling of bad records and failed enrichment queries
    pub mode: ErrorMode,
    /// Where to look for a manifest version when no tag exists
    pub manifest_root: Option<PathBuf>,
}

impl Default for HistoryOptions {
    fn default() -> Self {
        Self {
            directory: PathBuf::from(".changeset"),
            max_versions: 10,
            mode: ErrorMode::Strict,
            manifest_root: None,
        }
    }
}

impl HistoryOptions {
    /// Options from configuration
    pub fn from_config(config: &Config) -> Self {
        Self {
            directory: config.changeset.directory.clone(),
            max_versions: config.changelog.max_versions,
            mode: ErrorMode::from_ignore_errors(config.changeset.ignore_errors),
            manifest_root: None,
        }
    }

    pub fn with_manifest_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.manifest_root = Some(root.into());
        self
    }
}

/// The release the working tree would produce if tagged now
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpcomingRelease {
    /// Version the bump was applied to
    pub base_version: String,
    /// Next version
    pub version: String,
    /// Dominant severity of the new records
    pub severity: Severity,
    /// Records not yet consumed by a tag
    pub records: Vec<ChangesetRecord>,
}

impl UpcomingRelease {
    /// Changelog entry for this release, dated now
    pub fn entry(&self) -> ChangelogEntry {
        let mut entry = ChangelogEntry::upcoming(&self.version);
        for record in &self.records {
            entry.add_change(categorize(&record.summary), &record.summary);
        }
        entry
    }
}

/// Builds a [`VersionHistory`] from a snapshot source
pub struct HistoryAssembler<'a, S: SnapshotSource + ?Sized> {
    source: &'a S,
    reader: SnapshotReader<'a, S>,
    boundary: SnapshotReader<'a, S>,
    options: HistoryOptions,
    strategy: SemVerStrategy,
}

impl<'a, S: SnapshotSource + ?Sized> HistoryAssembler<'a, S> {
    /// Create an assembler
    pub fn new(source: &'a S, options: HistoryOptions) -> Self {
        Self {
            source,
            reader: SnapshotReader::new(source, options.directory.clone(), options.mode),
            boundary: SnapshotReader::new(source, options.directory.clone(), ErrorMode::Lenient),
            options,
            strategy: SemVerStrategy::new(),
        }
    }

    /// Version the next bump applies to: latest tag, then manifest, then `0.0.0`
    pub fn base_version(&self, latest: Option<&TagInfo>) -> String {
        let mut chain = BaseVersionChain::new();
        if let Some(tag) = latest {
            chain = chain.with_source(FixedVersion(tag.version_or_name().to_string()));
        }
        if let Some(root) = &self.options.manifest_root {
            chain = chain.with_source(ManifestVersionSource::new(root));
        }
        chain.resolve()
    }

    /// Release pending in the working tree, if any
    #[instrument(skip(self))]
    pub fn upcoming(&self) -> Result<Option<UpcomingRelease>> {
        let tags = self.source.version_tags()?;
        self.upcoming_from(&tags)
    }

    fn upcoming_from(&self, tags: &[TagInfo]) -> Result<Option<UpcomingRelease>> {
        let current = self.reader.read(&Snapshot::Working)?;
        if current.is_empty() {
            debug!("no changeset records in working tree");
            return Ok(None);
        }

        let latest = tags.first();
        let previous = match latest {
            Some(tag) => self.boundary.read(&tag.snapshot())?,
            None => Vec::new(),
        };
        let records = diff(&current, &previous);

        let Some(severity) = resolve(records.iter().map(|r| r.severity)) else {
            debug!(
                pending = records.len(),
                "no classifiable pending records, nothing to release"
            );
            return Ok(None);
        };

        let base_version = self.base_version(latest);
        let version = self.strategy.derive(&base_version, severity)?;
        info!(%base_version, %version, %severity, pending = records.len(), "derived upcoming version");

        Ok(Some(UpcomingRelease {
            base_version,
            version,
            severity,
            records,
        }))
    }

    /// Assemble the full history, newest first
    #[instrument(skip(self), fields(max_versions = self.options.max_versions))]
    pub fn assemble(&self) -> Result<VersionHistory> {
        let tags = self.source.version_tags()?;
        let mut entries = Vec::new();

        if let Some(upcoming) = self.upcoming_from(&tags)? {
            entries.push(upcoming.entry());
        }

        let historical = self.options.max_versions.saturating_sub(entries.len());
        for (index, tag) in tags.iter().take(historical).enumerate() {
            if let Some(entry) = self.historical_entry(tag, tags.get(index + 1))? {
                entries.push(entry);
            }
        }

        entries.truncate(self.options.max_versions);
        info!(
            entries = entries.len(),
            tags = tags.len(),
            "assembled version history"
        );
        Ok(VersionHistory::new(entries))
    }

    /// Entry for `tag`, holding the records it introduced since `older`
    ///
    /// A tag whose records cannot be read is skipped with a warning rather
    /// than attributed the wrong records. Committed history cannot be
    /// repaired, so this holds in both modes.
    fn historical_entry(
        &self,
        tag: &TagInfo,
        older: Option<&TagInfo>,
    ) -> Result<Option<ChangelogEntry>> {
        let records = match self.introduced_at(tag, older) {
            Ok(records) => records,
            Err(e) => {
                warn!(tag = %tag.name, error = %e, "skipping tag with unreadable changesets");
                return Ok(None);
            }
        };

        let mut entry = ChangelogEntry::new(tag.version_or_name(), self.tag_date(tag)?);
        for record in &records {
            entry.add_change(categorize(&record.summary), &record.summary);
        }
        debug!(tag = %tag.name, changes = entry.changes.len(), "built historical entry");
        Ok(Some(entry))
    }

    fn introduced_at(&self, tag: &TagInfo, older: Option<&TagInfo>) -> Result<Vec<ChangesetRecord>> {
        let current = self.reader.read(&tag.snapshot())?;
        // Only ids matter at the boundary, so a malformed older record still counts
        let previous = match older {
            Some(older) => self.boundary.read(&older.snapshot())?,
            None => Vec::new(),
        };
        Ok(diff(&current, &previous))
    }

    fn tag_date(&self, tag: &TagInfo) -> Result<DateTime<Utc>> {
        match self.source.tag_date(&tag.name) {
            Ok(date) => Ok(date),
            Err(e) if self.options.mode.is_lenient() => {
                warn!(tag = %tag.name, error = %e, "tag date unavailable, using now");
                Ok(Utc::now())
            }
            Err(e) => Err(e.into()),
        }
    }
}
