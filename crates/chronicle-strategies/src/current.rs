//! Base version resolution
//!
//! The version new changes are applied to comes from the first source in
//! an ordered chain that has one. The usual chain is the latest release tag,
//! then the project manifest, then `0.0.0`.

use std::path::{Path, PathBuf};

use chronicle_core::error::{Result, VersionError};
use tracing::{debug, warn};

/// Version used when no source has one
pub const ZERO_VERSION: &str = "0.0.0";

/// A place a current version may be read from
pub trait VersionSource {
    /// Short name used in diagnostics
    fn name(&self) -> &str;

    /// The version this source declares, if any
    fn current_version(&self) -> Result<Option<String>>;
}

/// A version known up front
#[derive(Debug, Clone)]
pub struct FixedVersion(pub String);

impl VersionSource for FixedVersion {
    fn name(&self) -> &str {
        "fixed"
    }

    fn current_version(&self) -> Result<Option<String>> {
        Ok(Some(self.0.clone()))
    }
}

/// Version declared in `Cargo.toml` or `package.json` at a project root
#[derive(Debug, Clone)]
pub struct ManifestVersionSource {
    root: PathBuf,
}

impl ManifestVersionSource {
    /// Read manifests from `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn cargo_version(&self) -> Result<Option<String>> {
        let path = self.root.join("Cargo.toml");
        let Some(content) = read_optional(&path)? else {
            return Ok(None);
        };

        let manifest: toml::Value = toml::from_str(&content).map_err(|e| VersionError::Manifest {
            path: path.clone(),
            reason: e.to_string(),
        })?;

        // `version.workspace = true` is a table, not a version
        Ok(manifest
            .get("package")
            .and_then(|p| p.get("version"))
            .and_then(|v| v.as_str())
            .map(str::to_string))
    }

    fn npm_version(&self) -> Result<Option<String>> {
        let path = self.root.join("package.json");
        let Some(content) = read_optional(&path)? else {
            return Ok(None);
        };

        let manifest: serde_json::Value =
            serde_json::from_str(&content).map_err(|e| VersionError::Manifest {
                path: path.clone(),
                reason: e.to_string(),
            })?;

        Ok(manifest
            .get("version")
            .and_then(|v| v.as_str())
            .map(str::to_string))
    }
}

fn read_optional(path: &Path) -> Result<Option<String>> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(VersionError::Manifest {
            path: path.to_path_buf(),
            reason: e.to_string(),
        }
        .into()),
    }
}

impl VersionSource for ManifestVersionSource {
    fn name(&self) -> &str {
        "manifest"
    }

    /// Manifests are tried in order; a broken one is skipped with a warning.
    /// The first failure is reported only when no manifest yields a version.
    fn current_version(&self) -> Result<Option<String>> {
        let mut failure = None;
        for (manifest, read) in [
            ("Cargo.toml", Self::cargo_version as fn(&Self) -> Result<Option<String>>),
            ("package.json", Self::npm_version),
        ] {
            match read(self) {
                Ok(Some(version)) => return Ok(Some(version)),
                Ok(None) => {}
                Err(e) => {
                    warn!(manifest, error = %e, "unreadable manifest, trying next");
                    failure.get_or_insert(e);
                }
            }
        }

        match failure {
            Some(e) => Err(e),
            None => Ok(None),
        }
    }
}

/// Ordered list of version sources, first present value wins
#[derive(Default)]
pub struct BaseVersionChain<'a> {
    sources: Vec<Box<dyn VersionSource + 'a>>,
}

impl<'a> BaseVersionChain<'a> {
    /// Create an empty chain
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a source to the end of the chain
    pub fn with_source(mut self, source: impl VersionSource + 'a) -> Self {
        self.sources.push(Box::new(source));
        self
    }

    /// Walk the chain, falling back to `0.0.0`
    ///
    /// A source that fails is skipped with a warning; its failure never
    /// hides a later source.
    pub fn resolve(&self) -> String {
        for source in &self.sources {
            match source.current_version() {
                Ok(Some(version)) => {
                    debug!(source = source.name(), %version, "resolved base version");
                    return version;
                }
                Ok(None) => continue,
                Err(e) => {
                    warn!(source = source.name(), error = %e, "version source failed, trying next");
                }
            }
        }

        debug!("no version source matched, using {}", ZERO_VERSION);
        ZERO_VERSION.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    struct Absent;

    impl VersionSource for Absent {
        fn name(&self) -> &str {
            "absent"
        }

        fn current_version(&self) -> Result<Option<String>> {
            Ok(None)
        }
    }

    #[test]
    fn test_empty_chain_is_zero() {
        assert_eq!(BaseVersionChain::new().resolve(), "0.0.0");
    }

    #[test]
    fn test_first_present_wins() {
        let chain = BaseVersionChain::new()
            .with_source(Absent)
            .with_source(FixedVersion("1.2.3".into()))
            .with_source(FixedVersion("9.9.9".into()));
        assert_eq!(chain.resolve(), "1.2.3");
    }

    #[test]
    fn test_cargo_manifest_version() {
        let temp = TempDir::new().unwrap();
        std::fs::write(
            temp.path().join("Cargo.toml"),
            "[package]\nname = \"demo\"\nversion = \"0.4.2\"\n",
        )
        .unwrap();

        let source = ManifestVersionSource::new(temp.path());
        assert_eq!(source.current_version().unwrap(), Some("0.4.2".into()));
    }

    #[test]
    fn test_workspace_inherited_version_is_absent() {
        let temp = TempDir::new().unwrap();
        std::fs::write(
            temp.path().join("Cargo.toml"),
            "[package]\nname = \"demo\"\nversion.workspace = true\n",
        )
        .unwrap();
        std::fs::write(temp.path().join("package.json"), r#"{"version": "3.0.0"}"#).unwrap();

        let source = ManifestVersionSource::new(temp.path());
        assert_eq!(source.current_version().unwrap(), Some("3.0.0".into()));
    }

    #[test]
    fn test_no_manifest() {
        let temp = TempDir::new().unwrap();
        let source = ManifestVersionSource::new(temp.path());
        assert_eq!(source.current_version().unwrap(), None);
    }

    #[test]
    fn test_broken_cargo_manifest_falls_back_to_package_json() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("Cargo.toml"), "[package\nversion = ").unwrap();
        std::fs::write(temp.path().join("package.json"), r#"{"version": "2.5.0"}"#).unwrap();

        let source = ManifestVersionSource::new(temp.path());
        assert_eq!(source.current_version().unwrap(), Some("2.5.0".into()));
    }

    #[test]
    fn test_broken_cargo_manifest_alone_is_reported() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("Cargo.toml"), "[package\nversion = ").unwrap();

        let err = ManifestVersionSource::new(temp.path())
            .current_version()
            .unwrap_err();
        assert!(err.to_string().contains("Cargo.toml"));
    }

    #[test]
    fn test_broken_manifest_falls_through() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("package.json"), "{ not json").unwrap();

        let source = ManifestVersionSource::new(temp.path());
        assert!(source.current_version().is_err());

        let chain = BaseVersionChain::new().with_source(source);
        assert_eq!(chain.resolve(), "0.0.0");
    }
}
