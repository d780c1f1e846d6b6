//! Reading the record set visible at a snapshot

use std::path::{Path, PathBuf};

use chronicle_core::error::{ChangesetError, Result};
use chronicle_git::{Snapshot, SnapshotSource};
use tracing::{debug, instrument, warn};

use crate::parser::{record_id, FrontmatterParser, RecordParser};
use crate::types::ChangesetRecord;

/// How bad records are handled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// A record without severity aborts the read of its snapshot
    #[default]
    Strict,
    /// Bad records are kept without severity and a warning is logged
    Lenient,
}

impl ErrorMode {
    /// Mode selected by the `ignore_errors` setting
    pub fn from_ignore_errors(ignore_errors: bool) -> Self {
        if ignore_errors {
            Self::Lenient
        } else {
            Self::Strict
        }
    }

    pub fn is_lenient(&self) -> bool {
        matches!(self, Self::Lenient)
    }
}

/// Reads and parses the records directory at any snapshot
pub struct SnapshotReader<'a, S: SnapshotSource + ?Sized> {
    source: &'a S,
    directory: PathBuf,
    parser: Box<dyn RecordParser>,
    mode: ErrorMode,
}

impl<'a, S: SnapshotSource + ?Sized> SnapshotReader<'a, S> {
    /// Create a reader for `directory`, relative to the repository root
    pub fn new(source: &'a S, directory: impl Into<PathBuf>, mode: ErrorMode) -> Self {
        Self {
            source,
            directory: directory.into(),
            parser: Box::new(FrontmatterParser::new()),
            mode,
        }
    }

    /// Use a custom parser
    pub fn with_parser<P: RecordParser + 'static>(mut self, parser: P) -> Self {
        self.parser = Box::new(parser);
        self
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn mode(&self) -> ErrorMode {
        self.mode
    }

    /// All records at a snapshot, in file name order
    ///
    /// A missing records directory is fatal for the working tree. At a tag
    /// it means the tag predates the directory, so the set is empty.
    #[instrument(skip(self), fields(snapshot = %snapshot, dir = %self.directory.display()))]
    pub fn read(&self, snapshot: &Snapshot) -> Result<Vec<ChangesetRecord>> {
        let Some(files) = self.source.record_files(snapshot, &self.directory)? else {
            return match snapshot {
                Snapshot::Working => Err(ChangesetError::MissingRecordStore {
                    path: self.directory.clone(),
                    snapshot: snapshot.to_string(),
                }
                .into()),
                Snapshot::Tag(_) => {
                    debug!("records directory absent at tag");
                    Ok(Vec::new())
                }
            };
        };

        let mut records = Vec::new();
        for path in files {
            let Some(id) = record_id(&path) else {
                continue;
            };
            if let Some(record) = self.read_record(snapshot, &path, &id)? {
                records.push(record);
            }
        }

        debug!(count = records.len(), "read changeset records");
        Ok(records)
    }

    fn read_record(
        &self,
        snapshot: &Snapshot,
        path: &Path,
        id: &str,
    ) -> Result<Option<ChangesetRecord>> {
        let raw = match self.source.read_file(snapshot, path) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!(path = %path.display(), "record vanished while reading");
                return Ok(None);
            }
            Err(e) if self.mode.is_lenient() => {
                warn!(
                    path = %path.display(),
                    %snapshot,
                    error = %e,
                    "unreadable changeset kept without a type"
                );
                return Ok(Some(ChangesetRecord::new(
                    id,
                    None,
                    format!("Changes from {}", id),
                )));
            }
            Err(e) => return Err(e.into()),
        };

        let record = self.parser.parse(&raw, id);
        if record.severity.is_none() {
            let reason = self.parser.explain(&raw);
            if self.mode.is_lenient() {
                warn!(
                    path = %path.display(),
                    %snapshot,
                    reason,
                    "malformed changeset kept without a type"
                );
            } else {
                return Err(ChangesetError::MalformedRecord {
                    path: path.display().to_string(),
                    snapshot: snapshot.to_string(),
                    reason,
                }
                .into());
            }
        }

        Ok(Some(record))
    }
}
