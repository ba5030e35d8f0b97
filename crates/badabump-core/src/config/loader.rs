//! Configuration loading

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::error::{ConfigError, Result};
use crate::types::{FormatType, ProjectType, VersionType};

use super::defaults::*;
use super::types::{ConfigDocument, FileConfig, ProjectConfig};
use super::validation::validate_config;

/// Find the configuration file in the project directory.
///
/// `.badabump.toml` is checked before `pyproject.toml`. Parent directories
/// are not searched.
pub fn find_config(dir: &Path) -> Option<PathBuf> {
    debug!(dir = %dir.display(), "searching for config file");
    for name in config_file_names() {
        let config_path = dir.join(name);
        if config_path.exists() {
            info!(path = %config_path.display(), "found config file");
            return Some(config_path);
        }
    }
    debug!("no config file found");
    None
}

/// Read the `[tool.badabump]` table from a TOML file.
///
/// A file without that table yields an empty [`FileConfig`].
pub fn load_file_config(path: &Path) -> Result<FileConfig> {
    info!(path = %path.display(), "loading config");
    let content = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
    let document: ConfigDocument = toml::from_str(&content).map_err(ConfigError::TomlError)?;
    Ok(document.tool.badabump.unwrap_or_default())
}

/// Load and resolve the project configuration for a directory
pub fn load_config(path: &Path) -> Result<ProjectConfig> {
    if !path.is_dir() {
        return Err(ConfigError::ProjectNotFound(path.to_path_buf()).into());
    }

    let file_config = match find_config(path) {
        Some(config_path) => load_file_config(&config_path)?,
        None => {
            warn!(dir = %path.display(), "no config found, using defaults");
            FileConfig::default()
        }
    };

    let config = resolve_config(path, file_config)?;
    validate_config(&config)?;
    debug!(
        project_type = %config.project_type,
        version_type = %config.version_type,
        schema = %config.version_schema,
        "config loaded and validated"
    );
    Ok(config)
}

/// Turn raw file values into a typed [`ProjectConfig`]
pub fn resolve_config(path: &Path, file: FileConfig) -> Result<ProjectConfig> {
    let project_type = guess_project_type(file.project_type.as_deref(), path)?;
    let version_type = match file.version_type.as_deref() {
        Some(value) => value.parse::<VersionType>()?,
        None => DEFAULT_VERSION_TYPE,
    };
    let changelog_format_type_file =
        guess_changelog_format_type_file(file.changelog_format_type_file.as_deref(), path)?;
    let changelog_format_type_git = match file.changelog_format_type_git.as_deref() {
        Some(value) => value.parse::<FormatType>()?,
        None => DEFAULT_CHANGELOG_FORMAT_TYPE_GIT,
    };

    let mut config = ProjectConfig {
        path: path.to_path_buf(),
        project_type,
        version_type: DEFAULT_VERSION_TYPE,
        version_schema: non_empty(file.version_schema, DEFAULT_CALVER_SCHEMA),
        version_files: file.version_files.unwrap_or_default(),
        tag_format: non_empty(file.tag_format, DEFAULT_TAG_FORMAT),
        tag_subject_format: non_empty(file.tag_subject_format, DEFAULT_TAG_SUBJECT_FORMAT),
        pr_branch_format: non_empty(file.pr_branch_format, DEFAULT_PR_BRANCH_FORMAT),
        pr_title_format: non_empty(file.pr_title_format, DEFAULT_PR_TITLE_FORMAT),
        changelog_format_type_file,
        changelog_format_type_git,
        changelog_file_include_date: file
            .changelog_file_include_date
            .unwrap_or(DEFAULT_CHANGELOG_FILE_INCLUDE_DATE),
        changelog_ignore_footer_urls: file
            .changelog_ignore_footer_urls
            .unwrap_or(DEFAULT_CHANGELOG_IGNORE_FOOTER_URLS),
        strict: file.strict.unwrap_or(DEFAULT_STRICT),
        post_bump_hook: file.post_bump_hook.filter(|hook| !hook.trim().is_empty()),
    };
    config = config.with_version_type(version_type);
    Ok(config)
}

fn non_empty(value: Option<String>, default: &str) -> String {
    value
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn guess_project_type(value: Option<&str>, path: &Path) -> Result<ProjectType> {
    if let Some(value) = value {
        return Ok(value.parse()?);
    }
    if path.join(PACKAGE_JSON).exists() {
        debug!("package.json found, assuming javascript project");
        return Ok(ProjectType::Javascript);
    }
    Ok(DEFAULT_PROJECT_TYPE)
}

fn guess_changelog_format_type_file(value: Option<&str>, path: &Path) -> Result<FormatType> {
    if let Some(value) = value {
        return Ok(value.parse()?);
    }
    for format in [FormatType::Markdown, FormatType::Rst] {
        if find_changelog_file(path, format).is_some() {
            return Ok(format);
        }
    }
    Ok(DEFAULT_CHANGELOG_FORMAT_TYPE_FILE)
}

/// Locate `CHANGELOG.<ext>` in the project directory, ignoring stem case
pub fn find_changelog_file(path: &Path, format: FormatType) -> Option<PathBuf> {
    let entries = std::fs::read_dir(path).ok()?;
    entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .find(|item| {
            item.is_file()
                && item.extension().is_some_and(|ext| ext == format.file_extension())
                && item
                    .file_stem()
                    .and_then(|stem| stem.to_str())
                    .is_some_and(|stem| stem.to_lowercase() == CHANGELOG_STEM)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_find_config_prefers_badabump_toml() {
        let temp = TempDir::new().unwrap();
        let local = temp.path().join(".badabump.toml");
        std::fs::write(&local, "[tool.badabump]\n").unwrap();
        std::fs::write(temp.path().join("pyproject.toml"), "[tool.badabump]\n").unwrap();

        assert_eq!(find_config(temp.path()).unwrap(), local);
    }

    #[test]
    fn test_load_config_without_file() {
        let temp = TempDir::new().unwrap();
        let config = load_config(temp.path()).unwrap();
        assert_eq!(config.path, temp.path());
        assert_eq!(config.version_type, VersionType::Calver);
        assert_eq!(config.project_type, ProjectType::Python);
    }

    #[test]
    fn test_load_config_from_pyproject() {
        let temp = TempDir::new().unwrap();
        std::fs::write(
            temp.path().join("pyproject.toml"),
            "[tool.poetry]\nname = \"demo\"\n\n[tool.badabump]\nversion_type = \"semver\"\nversion_schema = \"YYYY.MICRO\"\ntag_format = \"{version}\"\nchangelog_file_include_date = false\n",
        )
        .unwrap();

        let config = load_config(temp.path()).unwrap();
        assert_eq!(config.version_type, VersionType::Semver);
        assert_eq!(config.version_schema, "MAJOR.MINOR.PATCH");
        assert_eq!(config.tag_format, "{version}");
        assert!(!config.changelog_file_include_date);
    }

    #[test]
    fn test_load_config_guesses_javascript() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("package.json"), "{}").unwrap();

        let config = load_config(temp.path()).unwrap();
        assert_eq!(config.project_type, ProjectType::Javascript);
    }

    #[test]
    fn test_load_config_guesses_rst_changelog() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("CHANGELOG.rst"), "").unwrap();

        let config = load_config(temp.path()).unwrap();
        assert_eq!(config.changelog_format_type_file, FormatType::Rst);
    }

    #[test]
    fn test_load_config_unknown_version_type() {
        let temp = TempDir::new().unwrap();
        std::fs::write(
            temp.path().join(".badabump.toml"),
            "[tool.badabump]\nversion_type = \"buildnum\"\n",
        )
        .unwrap();

        let err = load_config(temp.path()).unwrap_err();
        assert!(err.to_string().contains("Unknown version type: buildnum"));
    }

    #[test]
    fn test_load_config_missing_dir() {
        let temp = TempDir::new().unwrap();
        assert!(load_config(&temp.path().join("nope")).is_err());
    }
}
