//! Core types for Chronicle

use serde::{Deserialize, Serialize};

/// Semantic-versioning impact of a single change
///
/// Variants are declared in ascending precedence, so the derived `Ord`
/// gives `Patch < Minor < Major`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Patch version bump (bug fixes)
    Patch,
    /// Minor version bump (new features)
    Minor,
    /// Major version bump (breaking changes)
    Major,
}

impl Severity {
    /// All severities, lowest precedence first
    pub const ALL: [Severity; 3] = [Severity::Patch, Severity::Minor, Severity::Major];

    /// Returns the string representation of the severity
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Major => "major",
            Self::Minor => "minor",
            Self::Patch => "patch",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Record headers are matched case-sensitively: `Major` is not a severity.
impl std::str::FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "major" => Ok(Self::Major),
            "minor" => Ok(Self::Minor),
            "patch" => Ok(Self::Patch),
            _ => Err(format!("Unknown severity: {}", s)),
        }
    }
}
