//! Error types for badabump

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using BadabumpError
pub type Result<T> = std::result::Result<T, BadabumpError>;

/// Main error type for badabump operations
#[derive(Debug, Error)]
pub enum BadabumpError {
    /// Configuration-related errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Git-related errors
    #[error(transparent)]
    Git(#[from] GitError),

    /// Version-related errors
    #[error(transparent)]
    Version(#[from] VersionError),

    /// Changelog-related errors
    #[error(transparent)]
    Changelog(#[from] ChangelogError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Project directory does not exist
    #[error("Project path does not exist: {0}")]
    ProjectNotFound(PathBuf),

    /// Invalid configuration value
    #[error("Invalid configuration: {field} - {message}")]
    InvalidValue { field: String, message: String },

    /// Lookup of an enum value that is not known
    #[error("Unknown {kind}: {value}")]
    UnknownValue { kind: &'static str, value: String },

    /// Version file points outside of the project directory
    #[error("Version file outside of project directory is forbidden: {0}")]
    VersionFileOutsideProject(String),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// IO error
    #[error("IO error reading config: {0}")]
    Io(#[from] std::io::Error),
}

impl ConfigError {
    /// Create an "unknown value" error for the given lookup kind
    pub fn unknown(kind: &'static str, value: impl Into<String>) -> Self {
        Self::UnknownValue {
            kind,
            value: value.into(),
        }
    }
}

/// Git-related errors
#[derive(Debug, Error)]
pub enum GitError {
    /// Not a git repository
    #[error("Not a git repository: {0}")]
    NotARepository(PathBuf),

    /// Failed to open repository
    #[error("Failed to open repository: {0}")]
    OpenFailed(String),

    /// No tags found
    #[error("No tags reachable from HEAD")]
    NoTags,

    /// Reference could not be resolved
    #[error("Unable to resolve reference: {0}")]
    ReferenceNotFound(String),

    /// Git2 library error
    #[error("Git error: {0}")]
    Git2(#[from] git2::Error),
}

/// Version-related errors
#[derive(Debug, Error)]
pub enum VersionError {
    /// Version does not match the schema
    #[error(
        "Unable to parse version using given schema & value. Expected schema: {schema}, value: {value}"
    )]
    ParseFailed { schema: String, value: String },

    /// CalVer value has neither a full nor a short year
    #[error("CalVer version should contain at least year")]
    MissingYear,

    /// Schema references a component the version does not carry
    #[error("Version component '{component}' required by schema '{schema}' is missing")]
    MissingComponent { component: String, schema: String },

    /// Pre-release suffix does not match any supported grammar
    #[error("Invalid pre-release value: {0}")]
    InvalidPreRelease(String),

    /// Schema could not be compiled into a pattern
    #[error("Invalid schema '{schema}': {reason}")]
    InvalidSchema { schema: String, reason: String },

    /// Tag does not match the configured tag format
    #[error("Tag value '{tag}' does not match tag format '{tag_format}'")]
    TagMismatch { tag: String, tag_format: String },

    /// Update config built with zero or several change categories
    #[error(
        "Update config allows exactly one breaking, minor, or micro change at a time"
    )]
    InvalidUpdateConfig,
}

/// Changelog-related errors
#[derive(Debug, Error)]
pub enum ChangelogError {
    /// Commit subject is not a conventional commit
    #[error("Unable to parse git commit as conventional commit: {0:?}")]
    CommitParse(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_failed_names_schema_and_value() {
        let err = VersionError::ParseFailed {
            schema: "YY.MINOR.MICRO".to_string(),
            value: "nope".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("YY.MINOR.MICRO"));
        assert!(msg.contains("nope"));
    }

    #[test]
    fn test_unknown_value_message() {
        let err = ConfigError::unknown("project type", "rust");
        assert_eq!(err.to_string(), "Unknown project type: rust");
    }

    #[test]
    fn test_transparent_wrapping() {
        let err: BadabumpError = VersionError::MissingYear.into();
        assert_eq!(err.to_string(), VersionError::MissingYear.to_string());
        assert!(matches!(err, BadabumpError::Version(VersionError::MissingYear)));
    }

    #[test]
    fn test_io_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: BadabumpError = io_err.into();
        assert!(err.to_string().starts_with("IO error"));
    }
}
