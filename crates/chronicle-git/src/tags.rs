//! Tag operations

use chrono::{DateTime, TimeZone, Utc};
use semver::Version;
use tracing::{debug, info, instrument};

use crate::repository::{GitRepo, Result};
use crate::types::TagInfo;
use chronicle_core::error::GitError;

fn to_utc(time: git2::Time) -> DateTime<Utc> {
    Utc.timestamp_opt(time.seconds(), 0)
        .single()
        .unwrap_or_else(Utc::now)
}

impl GitRepo {
    /// Get all tags
    #[instrument(skip(self))]
    pub fn tags(&self) -> Result<Vec<TagInfo>> {
        let mut tags = Vec::new();

        self.repo.tag_foreach(|oid, name| {
            let name = String::from_utf8_lossy(name)
                .trim_start_matches("refs/tags/")
                .to_string();

            if let Ok(commit) = self.repo.find_commit(oid) {
                // Lightweight tag: date it by the commit it points at
                tags.push(
                    TagInfo::new(&name, commit.id().to_string())
                        .with_timestamp(to_utc(commit.time())),
                );
            } else if let Ok(tag) = self.repo.find_tag(oid) {
                let target_id = tag.target_id();
                let mut tag_info = TagInfo::new(&name, target_id.to_string());

                if let Some(msg) = tag.message() {
                    tag_info = tag_info.with_message(msg.trim());
                }

                if let Some(tagger) = tag.tagger() {
                    if let Some(name) = tagger.name() {
                        tag_info = tag_info.with_tagger(name);
                    }
                    tag_info = tag_info.with_timestamp(to_utc(tagger.when()));
                } else if let Ok(commit) = self.repo.find_commit(target_id) {
                    tag_info = tag_info.with_timestamp(to_utc(commit.time()));
                }

                tags.push(tag_info);
            }

            true
        })?;

        debug!(count = tags.len(), "listed all tags");
        Ok(tags)
    }

    /// Release tags, most recent first
    ///
    /// Only tags whose name is an optionally `v`-prefixed semantic version
    /// are returned. Recency is the tag timestamp; tags created at the same
    /// instant fall back to descending version order.
    #[instrument(skip(self))]
    pub fn version_tags(&self) -> Result<Vec<TagInfo>> {
        let mut versioned: Vec<(TagInfo, Version)> = self
            .tags()?
            .into_iter()
            .filter_map(|t| {
                let version = t.version.as_deref().and_then(|v| Version::parse(v).ok())?;
                Some((t, version))
            })
            .collect();

        versioned.sort_by(|(a, va), (b, vb)| {
            b.timestamp
                .cmp(&a.timestamp)
                .then_with(|| vb.cmp(va))
                .then_with(|| b.name.cmp(&a.name))
        });

        let tags: Vec<TagInfo> = versioned.into_iter().map(|(t, _)| t).collect();
        debug!(
            count = tags.len(),
            latest = ?tags.first().map(|t| &t.name),
            "listed version tags"
        );
        Ok(tags)
    }

    /// Find a specific tag by name
    pub fn find_tag(&self, name: &str) -> Result<Option<TagInfo>> {
        let tag_ref = format!("refs/tags/{}", name);

        match self.repo.find_reference(&tag_ref) {
            Ok(reference) => {
                let target = reference.peel_to_commit()?;
                Ok(Some(TagInfo::new(name, target.id().to_string())))
            }
            Err(e) if e.code() == git2::ErrorCode::NotFound => Ok(None),
            Err(e) => Err(GitError::Git2(e)),
        }
    }

    /// Creation time of a tag: tagger time for annotated tags, commit time otherwise
    #[instrument(skip(self), fields(name))]
    pub fn tag_timestamp(&self, name: &str) -> Result<DateTime<Utc>> {
        let tag_ref = format!("refs/tags/{}", name);
        let reference = self.repo.find_reference(&tag_ref).map_err(|e| {
            if e.code() == git2::ErrorCode::NotFound {
                GitError::TagNotFound(name.to_string())
            } else {
                GitError::Git2(e)
            }
        })?;

        if let Ok(tag) = reference.peel_to_tag() {
            if let Some(tagger) = tag.tagger() {
                return Ok(to_utc(tagger.when()));
            }
        }

        let commit = reference.peel_to_commit()?;
        Ok(to_utc(commit.time()))
    }

    /// Create a tag at HEAD, annotated when a message is given
    #[instrument(skip(self), fields(name, annotated = message.is_some()))]
    pub fn create_tag(&self, name: &str, message: Option<&str>) -> Result<TagInfo> {
        if self.find_tag(name)?.is_some() {
            return Err(GitError::TagExists(name.to_string()));
        }

        let head = self.head_commit()?;

        if let Some(msg) = message {
            let sig = self
                .repo
                .signature()
                .or_else(|_| git2::Signature::now("chronicle", "chronicle@localhost"))?;
            self.repo.tag(name, head.as_object(), &sig, msg, false)?;
        } else {
            self.repo.tag_lightweight(name, head.as_object(), false)?;
        }

        info!(name, annotated = message.is_some(), "created tag");
        Ok(TagInfo::new(name, head.id().to_string()))
    }
}
