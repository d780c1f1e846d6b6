//! Exit codes for the CLI

use chronicle_core::error::{
    ChangesetError, ChronicleError, ConfigError, GitError, VersionError, WorkflowError,
};

/// Success
pub const SUCCESS: i32 = 0;

/// General error
pub const ERROR: i32 = 1;

/// Configuration error
pub const CONFIG_ERROR: i32 = 2;

/// Git error
pub const GIT_ERROR: i32 = 3;

/// Version error
pub const VERSION_ERROR: i32 = 4;

/// Validation error
pub const VALIDATION_ERROR: i32 = 5;

/// Changeset record error
pub const CHANGESET_ERROR: i32 = 6;

/// User cancelled
pub const CANCELLED: i32 = 130;

/// Exit code for an error returned by a command
///
/// Library errors may arrive wrapped in [`ChronicleError`] or as one of
/// its member enums, depending on which crate raised them.
pub fn for_error(err: &anyhow::Error) -> i32 {
    if let Some(e) = err.downcast_ref::<ChronicleError>() {
        return for_chronicle_error(e);
    }
    if err.downcast_ref::<ConfigError>().is_some() {
        return CONFIG_ERROR;
    }
    if err.downcast_ref::<GitError>().is_some() {
        return GIT_ERROR;
    }
    if err.downcast_ref::<VersionError>().is_some() {
        return VERSION_ERROR;
    }
    if err.downcast_ref::<ChangesetError>().is_some() {
        return CHANGESET_ERROR;
    }
    if let Some(e) = err.downcast_ref::<WorkflowError>() {
        return for_workflow_error(e);
    }
    ERROR
}

fn for_chronicle_error(err: &ChronicleError) -> i32 {
    match err {
        ChronicleError::Config(_) | ChronicleError::Toml(_) => CONFIG_ERROR,
        ChronicleError::Git(_) => GIT_ERROR,
        ChronicleError::Version(_) => VERSION_ERROR,
        ChronicleError::Changeset(_) => CHANGESET_ERROR,
        ChronicleError::Workflow(e) => for_workflow_error(e),
        ChronicleError::Io(_) | ChronicleError::Json(_) | ChronicleError::Other(_) => ERROR,
    }
}

fn for_workflow_error(err: &WorkflowError) -> i32 {
    match err {
        WorkflowError::Cancelled => CANCELLED,
        WorkflowError::ValidationFailed(_) | WorkflowError::PreConditionFailed(_) => {
            VALIDATION_ERROR
        }
    }
}
