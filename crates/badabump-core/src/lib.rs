//! Badabump Core - shared foundation for the badabump release tool
//!
//! This crate provides the error taxonomy, the project configuration enums,
//! the [`UpdateConfig`] value that drives every version bump, and the
//! project configuration loader.

pub mod config;
pub mod error;
pub mod types;
pub mod update;

pub use config::{load_config, ProjectConfig};
pub use error::{
    BadabumpError, ChangelogError, ConfigError, GitError, Result, VersionError,
};
pub use types::{ChangelogTarget, FormatType, ProjectType, VersionType};
pub use update::UpdateConfig;
