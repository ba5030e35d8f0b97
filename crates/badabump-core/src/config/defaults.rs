//! Default configuration values

use crate::types::{FormatType, ProjectType, VersionType};

/// Project-local configuration file
pub const CONFIG_FILE_TOML: &str = ".badabump.toml";

/// Python project metadata file, also searched for a `[tool.badabump]` table
pub const PYPROJECT_TOML: &str = "pyproject.toml";

/// JavaScript project metadata file
pub const PACKAGE_JSON: &str = "package.json";

/// npm lock file
pub const PACKAGE_LOCK_JSON: &str = "package-lock.json";

/// yarn lock file
pub const YARN_LOCK: &str = "yarn.lock";

/// Changelog file stem, compared case-insensitively
pub const CHANGELOG_STEM: &str = "changelog";

pub const DEFAULT_PROJECT_TYPE: ProjectType = ProjectType::Python;
pub const DEFAULT_VERSION_TYPE: VersionType = VersionType::Calver;

pub const DEFAULT_CALVER_SCHEMA: &str = "YY.MINOR.MICRO";
pub const DEFAULT_SEMVER_SCHEMA: &str = "MAJOR.MINOR.PATCH";

pub const DEFAULT_TAG_FORMAT: &str = "v{version}";
pub const DEFAULT_TAG_SUBJECT_FORMAT: &str = "{version} Release";
pub const DEFAULT_PR_BRANCH_FORMAT: &str = "chore/release-{version}";
pub const DEFAULT_PR_TITLE_FORMAT: &str = "chore: {version} Release";

pub const DEFAULT_CHANGELOG_FORMAT_TYPE_FILE: FormatType = FormatType::Markdown;
pub const DEFAULT_CHANGELOG_FORMAT_TYPE_GIT: FormatType = FormatType::Markdown;
pub const DEFAULT_CHANGELOG_FILE_INCLUDE_DATE: bool = true;
pub const DEFAULT_CHANGELOG_IGNORE_FOOTER_URLS: bool = true;
pub const DEFAULT_STRICT: bool = false;

/// Config files searched in the project directory, first match wins
pub fn config_file_names() -> [&'static str; 2] {
    [CONFIG_FILE_TOML, PYPROJECT_TOML]
}
