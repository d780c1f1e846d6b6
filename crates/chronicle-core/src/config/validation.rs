//! Configuration validation

use tracing::debug;

use crate::error::{ConfigError, Result};

use super::types::Config;

/// Output formats understood by the changelog renderer
pub const VALID_FORMATS: [&str; 3] = ["markdown", "md", "json"];

/// Tag formats whose output is recognized as a release tag when history is read back
pub const VALID_TAG_FORMATS: [&str; 2] = ["v{version}", "{version}"];

/// Validate configuration
pub fn validate_config(config: &Config) -> Result<()> {
    debug!("validating configuration");
    validate_changeset(config)?;
    validate_changelog(config)?;
    validate_versioning(config)?;
    validate_git(config)?;
    debug!("configuration validation passed");
    Ok(())
}

fn invalid(field: &str, message: impl Into<String>) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        message: message.into(),
    }
}

fn validate_changeset(config: &Config) -> Result<()> {
    if config.changeset.directory.as_os_str().is_empty() {
        return Err(invalid("changeset.directory", "directory cannot be empty").into());
    }
    Ok(())
}

fn validate_changelog(config: &Config) -> Result<()> {
    if config.changelog.max_versions == 0 {
        return Err(invalid("changelog.max_versions", "must be a positive integer").into());
    }

    if !VALID_FORMATS.contains(&config.changelog.format.as_str()) {
        return Err(invalid(
            "changelog.format",
            format!("must be one of: {}", VALID_FORMATS.join(", ")),
        )
        .into());
    }

    Ok(())
}

fn validate_versioning(config: &Config) -> Result<()> {
    if !VALID_TAG_FORMATS.contains(&config.versioning.tag_format.as_str()) {
        return Err(invalid(
            "versioning.tag_format",
            format!("must be one of: {}", VALID_TAG_FORMATS.join(", ")),
        )
        .into());
    }
    Ok(())
}

fn validate_git(config: &Config) -> Result<()> {
    if config.git.remote.is_empty() {
        return Err(invalid("git.remote", "remote cannot be empty").into());
    }
    Ok(())
}
