//! Version strategy traits

use chronicle_core::error::Result;
use chronicle_core::Severity;

use crate::types::VersionComponents;

/// Trait for version strategies
pub trait VersionStrategy: Send + Sync {
    /// Get the name of this strategy
    fn name(&self) -> &'static str;

    /// Parse a version string into components
    fn parse(&self, version: &str) -> Result<VersionComponents>;

    /// Format version components into a string
    fn format(&self, components: &VersionComponents) -> String;

    /// Apply a severity to the current version
    fn bump(&self, current: &VersionComponents, severity: Severity) -> Result<VersionComponents>;

    /// Parse, bump and format in one step
    fn derive(&self, base: &str, severity: Severity) -> Result<String> {
        let current = self.parse(base)?;
        let next = self.bump(&current, severity)?;
        Ok(self.format(&next))
    }
}
