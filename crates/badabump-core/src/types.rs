//! Core types for badabump

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Kind of project whose version is being bumped
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectType {
    /// Python project (`pyproject.toml`, PEP 440 pre-release suffixes)
    #[default]
    Python,
    /// JavaScript project (`package.json`, npm pre-release suffixes)
    Javascript,
}

impl ProjectType {
    /// Returns the string representation of the project type
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Python => "python",
            Self::Javascript => "javascript",
        }
    }
}

impl std::fmt::Display for ProjectType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ProjectType {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "python" => Ok(Self::Python),
            "javascript" => Ok(Self::Javascript),
            _ => Err(ConfigError::unknown("project type", s)),
        }
    }
}

/// Versioning scheme family
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VersionType {
    /// Calendar versioning
    #[default]
    Calver,
    /// Semantic versioning
    Semver,
}

impl VersionType {
    /// Returns the string representation of the version type
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Calver => "calver",
            Self::Semver => "semver",
        }
    }
}

impl std::fmt::Display for VersionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for VersionType {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "calver" => Ok(Self::Calver),
            "semver" => Ok(Self::Semver),
            _ => Err(ConfigError::unknown("version type", s)),
        }
    }
}

/// Markup used when rendering changelogs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormatType {
    /// Markdown
    #[default]
    Markdown,
    /// reStructuredText
    Rst,
}

impl FormatType {
    /// Returns the string representation of the format type
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Markdown => "markdown",
            Self::Rst => "rst",
        }
    }

    /// File extension used by changelog files in this format
    pub fn file_extension(&self) -> &'static str {
        match self {
            Self::Markdown => "md",
            Self::Rst => "rst",
        }
    }
}

impl std::fmt::Display for FormatType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for FormatType {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "markdown" | "md" => Ok(Self::Markdown),
            "rst" => Ok(Self::Rst),
            _ => Err(ConfigError::unknown("format type", s)),
        }
    }
}

/// Surface a rendered changelog is written to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangelogTarget {
    /// Tag message or commit body
    GitCommit,
    /// On-disk `CHANGELOG.md` / `CHANGELOG.rst`
    ChangelogFile,
}

impl ChangelogTarget {
    /// Returns the string representation of the changelog target
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GitCommit => "git_commit",
            Self::ChangelogFile => "changelog_file",
        }
    }
}

impl std::fmt::Display for ChangelogTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ChangelogTarget {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "git_commit" | "git" => Ok(Self::GitCommit),
            "changelog_file" | "file" => Ok(Self::ChangelogFile),
            _ => Err(ConfigError::unknown("changelog target", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_type_from_str() {
        assert_eq!("python".parse::<ProjectType>().unwrap(), ProjectType::Python);
        assert_eq!(
            "JavaScript".parse::<ProjectType>().unwrap(),
            ProjectType::Javascript
        );
    }

    #[test]
    fn test_unknown_project_type() {
        let err = "rust".parse::<ProjectType>().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::UnknownValue { kind: "project type", .. }
        ));
    }

    #[test]
    fn test_version_type_roundtrip_display() {
        for vt in [VersionType::Calver, VersionType::Semver] {
            assert_eq!(vt.to_string().parse::<VersionType>().unwrap(), vt);
        }
        assert!("buildnum".parse::<VersionType>().is_err());
    }

    #[test]
    fn test_format_type_aliases() {
        assert_eq!("md".parse::<FormatType>().unwrap(), FormatType::Markdown);
        assert_eq!("rst".parse::<FormatType>().unwrap(), FormatType::Rst);
        assert_eq!(FormatType::Rst.file_extension(), "rst");
        assert!("asciidoc".parse::<FormatType>().is_err());
    }

    #[test]
    fn test_changelog_target_from_str() {
        assert_eq!(
            "git_commit".parse::<ChangelogTarget>().unwrap(),
            ChangelogTarget::GitCommit
        );
        assert_eq!(
            ChangelogTarget::ChangelogFile.to_string(),
            "changelog_file"
        );
    }

    #[test]
    fn test_defaults() {
        assert_eq!(ProjectType::default(), ProjectType::Python);
        assert_eq!(VersionType::default(), VersionType::Calver);
        assert_eq!(FormatType::default(), FormatType::Markdown);
    }
}
