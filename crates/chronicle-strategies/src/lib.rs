//! Chronicle Strategies - Version derivation for release history
//!
//! This crate reduces a set of change severities to a single dominant one,
//! resolves the base version through an ordered chain of sources and applies
//! the semantic-versioning increment.

mod current;
mod resolver;
mod semver;
mod traits;
pub mod types;

pub use current::{BaseVersionChain, FixedVersion, ManifestVersionSource, VersionSource, ZERO_VERSION};
pub use resolver::resolve;
pub use semver::SemVerStrategy;
pub use traits::VersionStrategy;
pub use types::VersionComponents;
