//! Pre-release validation

use crate::config::Config;
use crate::error::{Result, WorkflowError};

/// Validation result
#[derive(Debug, Clone)]
pub struct ValidationResult {
    /// Whether validation passed
    pub passed: bool,
    /// List of errors
    pub errors: Vec<String>,
    /// List of warnings
    pub warnings: Vec<String>,
}

impl ValidationResult {
    /// Create a passing result
    pub fn pass() -> Self {
        Self {
            passed: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Add an error
    pub fn add_error(&mut self, error: impl Into<String>) {
        self.passed = false;
        self.errors.push(error.into());
    }

    /// Add a warning
    pub fn add_warning(&mut self, warning: impl Into<String>) {
        self.warnings.push(warning.into());
    }
}

/// Validate that a release tag can be created
pub fn validate_release(
    config: &Config,
    is_clean: bool,
    tag_exists: bool,
) -> Result<ValidationResult> {
    let mut result = ValidationResult::pass();

    if !is_clean {
        if config.git.require_clean {
            result.add_error("Working directory has uncommitted changes");
        } else {
            result.add_warning("Working directory has uncommitted changes");
        }
    }

    if tag_exists {
        result.add_error("Release tag already exists");
    }

    if !result.passed {
        return Err(WorkflowError::ValidationFailed(result.errors.join("; ")).into());
    }

    Ok(result)
}
