//! Configuration types

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::types::{FormatType, ProjectType, VersionType};

use super::defaults::*;

/// Raw `[tool.badabump]` table as written by the user.
///
/// Every field is optional; enum-valued fields stay strings so unknown
/// values can be reported with the field they came from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub project_type: Option<String>,
    pub version_type: Option<String>,
    pub version_schema: Option<String>,
    pub version_files: Option<Vec<String>>,
    pub tag_format: Option<String>,
    pub tag_subject_format: Option<String>,
    pub pr_branch_format: Option<String>,
    pub pr_title_format: Option<String>,
    pub changelog_format_type_file: Option<String>,
    pub changelog_format_type_git: Option<String>,
    pub changelog_file_include_date: Option<bool>,
    pub changelog_ignore_footer_urls: Option<bool>,
    pub strict: Option<bool>,
    pub post_bump_hook: Option<String>,
}

/// TOML document wrapper, only the `[tool.badabump]` table is read
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ConfigDocument {
    #[serde(default)]
    pub tool: ToolTable,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ToolTable {
    #[serde(default)]
    pub badabump: Option<FileConfig>,
}

/// Resolved project configuration
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectConfig {
    /// Project root directory
    pub path: PathBuf,

    pub project_type: ProjectType,

    pub version_type: VersionType,

    /// Schema of the base version, e.g. `YY.MINOR.MICRO`
    pub version_schema: String,

    /// Files to update with the next version; empty means guess
    pub version_files: Vec<String>,

    pub tag_format: String,
    pub tag_subject_format: String,
    pub pr_branch_format: String,
    pub pr_title_format: String,

    /// Markup of the on-disk changelog file
    pub changelog_format_type_file: FormatType,

    /// Markup of changelogs embedded into tags and commits
    pub changelog_format_type_git: FormatType,

    /// Append the release date to changelog file headers
    pub changelog_file_include_date: bool,

    /// Drop `Closes: https://...` style footers from rendered commits
    pub changelog_ignore_footer_urls: bool,

    /// Fail on commits that are not conventional commits
    pub strict: bool,

    /// Shell command to run after version files are updated
    pub post_bump_hook: Option<String>,
}

impl ProjectConfig {
    /// Default configuration rooted at the given directory
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    /// Switch the version type, forcing the SemVer schema for SemVer projects
    pub fn with_version_type(mut self, version_type: VersionType) -> Self {
        self.version_type = version_type;
        if version_type == VersionType::Semver {
            self.version_schema = DEFAULT_SEMVER_SCHEMA.to_string();
        }
        self
    }

    pub fn with_project_type(mut self, project_type: ProjectType) -> Self {
        self.project_type = project_type;
        self
    }

    pub fn with_version_schema(mut self, schema: impl Into<String>) -> Self {
        if self.version_type == VersionType::Calver {
            self.version_schema = schema.into();
        }
        self
    }
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("."),
            project_type: DEFAULT_PROJECT_TYPE,
            version_type: DEFAULT_VERSION_TYPE,
            version_schema: DEFAULT_CALVER_SCHEMA.to_string(),
            version_files: Vec::new(),
            tag_format: DEFAULT_TAG_FORMAT.to_string(),
            tag_subject_format: DEFAULT_TAG_SUBJECT_FORMAT.to_string(),
            pr_branch_format: DEFAULT_PR_BRANCH_FORMAT.to_string(),
            pr_title_format: DEFAULT_PR_TITLE_FORMAT.to_string(),
            changelog_format_type_file: DEFAULT_CHANGELOG_FORMAT_TYPE_FILE,
            changelog_format_type_git: DEFAULT_CHANGELOG_FORMAT_TYPE_GIT,
            changelog_file_include_date: DEFAULT_CHANGELOG_FILE_INCLUDE_DATE,
            changelog_ignore_footer_urls: DEFAULT_CHANGELOG_IGNORE_FOOTER_URLS,
            strict: DEFAULT_STRICT,
            post_bump_hook: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ProjectConfig::default();
        assert_eq!(config.project_type, ProjectType::Python);
        assert_eq!(config.version_type, VersionType::Calver);
        assert_eq!(config.version_schema, "YY.MINOR.MICRO");
        assert_eq!(config.tag_format, "v{version}");
        assert!(config.changelog_ignore_footer_urls);
        assert!(!config.strict);
    }

    #[test]
    fn test_semver_forces_schema() {
        let config = ProjectConfig::default()
            .with_version_schema("YYYY.MICRO")
            .with_version_type(VersionType::Semver)
            .with_version_schema("MAJOR.MINOR");
        assert_eq!(config.version_schema, "MAJOR.MINOR.PATCH");
    }

    #[test]
    fn test_file_config_parses_partial_table() {
        let doc: ConfigDocument =
            toml::from_str("[tool.badabump]\nversion_type = \"semver\"\nstrict = true\n").unwrap();
        let file = doc.tool.badabump.unwrap();
        assert_eq!(file.version_type.as_deref(), Some("semver"));
        assert_eq!(file.strict, Some(true));
        assert!(file.tag_format.is_none());
    }
}
