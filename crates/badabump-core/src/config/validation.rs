//! Configuration validation

use tracing::debug;

use crate::error::{ConfigError, Result};

use super::types::ProjectConfig;

/// Validate configuration
pub fn validate_config(config: &ProjectConfig) -> Result<()> {
    debug!("validating configuration");
    validate_path(config)?;
    validate_formats(config)?;
    validate_version_files(config)?;
    debug!("configuration validation passed");
    Ok(())
}

fn validate_path(config: &ProjectConfig) -> Result<()> {
    if !config.path.is_dir() {
        return Err(ConfigError::ProjectNotFound(config.path.clone()).into());
    }
    Ok(())
}

fn validate_formats(config: &ProjectConfig) -> Result<()> {
    let formats = [
        ("tag_format", &config.tag_format),
        ("tag_subject_format", &config.tag_subject_format),
        ("pr_branch_format", &config.pr_branch_format),
        ("pr_title_format", &config.pr_title_format),
    ];

    for (field, value) in formats {
        if !value.contains("{version}") {
            return Err(ConfigError::InvalidValue {
                field: field.to_string(),
                message: "must contain {version} placeholder".to_string(),
            }
            .into());
        }
    }

    if config.version_schema.trim().is_empty() {
        return Err(ConfigError::InvalidValue {
            field: "version_schema".to_string(),
            message: "schema cannot be empty".to_string(),
        }
        .into());
    }

    Ok(())
}

fn validate_version_files(config: &ProjectConfig) -> Result<()> {
    for file in &config.version_files {
        validate_version_file(file)?;
    }
    Ok(())
}

/// Reject version file paths leaving the project directory
pub fn validate_version_file(file: &str) -> Result<()> {
    if file.starts_with("..") || file.starts_with('/') {
        return Err(ConfigError::VersionFileOutsideProject(file.to_string()).into());
    }
    Ok(())
}
