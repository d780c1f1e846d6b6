//! Chronicle Git - Git snapshot queries for release history
//!
//! This crate provides the read-only query surface the history engine
//! consumes (version tags, record files at a tag, file contents, working
//! tree status) plus tag creation and pushing for the release workflow.
//! With the `test-support` feature, `memory::MemorySource` implements the
//! same queries over in-memory maps.

#[cfg(any(test, feature = "test-support"))]
pub mod memory;
mod remote;
mod repository;
mod snapshot;
mod source;
mod status;
mod tags;
pub mod types;

#[cfg(test)]
pub(crate) mod test_support;

pub use remote::git_push_tag;
pub use repository::{GitRepo, Result};
pub use source::SnapshotSource;
pub use types::{Snapshot, TagInfo};
