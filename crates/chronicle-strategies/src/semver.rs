//! SemVer version strategy

use chronicle_core::error::{Result, VersionError};
use chronicle_core::Severity;
use tracing::debug;

use crate::traits::VersionStrategy;
use crate::types::VersionComponents;

/// Semantic Versioning strategy
///
/// Follows the SemVer 2.0.0 specification: https://semver.org/
///
/// A pre-release base is treated as work in progress on that version:
/// new changes move past it, so the suffix is dropped before the
/// increment is applied (`1.0.0-beta.1` + patch is `1.0.1`).
#[derive(Debug, Default, Clone, Copy)]
pub struct SemVerStrategy;

impl SemVerStrategy {
    /// Create a new SemVer strategy
    pub fn new() -> Self {
        Self
    }

    fn parse_version(version: &str) -> Result<semver::Version> {
        let trimmed = version.trim();
        let trimmed = trimmed.strip_prefix('v').unwrap_or(trimmed);
        semver::Version::parse(trimmed)
            .map_err(|e| VersionError::ParseFailed(version.to_string(), e.to_string()).into())
    }
}

impl VersionStrategy for SemVerStrategy {
    fn name(&self) -> &'static str {
        "semver"
    }

    fn parse(&self, version: &str) -> Result<VersionComponents> {
        Self::parse_version(version).map(VersionComponents::from)
    }

    fn format(&self, components: &VersionComponents) -> String {
        components.to_version_string()
    }

    fn bump(&self, current: &VersionComponents, severity: Severity) -> Result<VersionComponents> {
        let mut result = current.release();
        let increment = |value: u64, component: &str| {
            value.checked_add(1).ok_or_else(|| VersionError::Overflow {
                version: current.to_version_string(),
                component: component.to_string(),
            })
        };

        match severity {
            Severity::Major => {
                result.major = increment(result.major, "major")?;
                result.minor = 0;
                result.patch = 0;
            }
            Severity::Minor => {
                result.minor = increment(result.minor, "minor")?;
                result.patch = 0;
            }
            Severity::Patch => {
                result.patch = increment(result.patch, "patch")?;
            }
        }

        debug!(from = %current, to = %result, %severity, "bumped version");
        Ok(result)
    }
}
