//! Chronicle Core - Core library for changeset-driven release history
//!
//! This crate provides the foundational types, error handling, configuration,
//! and workflow helpers shared by the Chronicle crates.

pub mod config;
pub mod error;
pub mod types;
pub mod workflow;

pub use error::{ChangesetError, ChronicleError, Result};
pub use types::Severity;
