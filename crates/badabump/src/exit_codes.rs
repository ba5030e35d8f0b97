//! Exit codes for the CLI

use badabump_core::error::{BadabumpError, GitError};

/// Success
pub const SUCCESS: u8 = 0;

/// General error
pub const ERROR: u8 = 1;

/// Configuration error
pub const CONFIG_ERROR: u8 = 2;

/// Git error
pub const GIT_ERROR: u8 = 3;

/// Version error
pub const VERSION_ERROR: u8 = 4;

/// Commit parsing error
pub const CHANGELOG_ERROR: u8 = 5;

/// Exit code for an error returned by a command
pub fn for_error(error: &anyhow::Error) -> u8 {
    if let Some(error) = error.downcast_ref::<BadabumpError>() {
        return match error {
            BadabumpError::Config(_) | BadabumpError::Toml(_) => CONFIG_ERROR,
            BadabumpError::Git(_) => GIT_ERROR,
            BadabumpError::Version(_) => VERSION_ERROR,
            BadabumpError::Changelog(_) => CHANGELOG_ERROR,
            BadabumpError::Io(_) => ERROR,
        };
    }
    if error.downcast_ref::<GitError>().is_some() {
        return GIT_ERROR;
    }
    ERROR
}
