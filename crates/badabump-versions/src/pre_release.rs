//! Pre-release ladder (alpha → beta → rc)

use serde::{Deserialize, Serialize};
use tracing::debug;

use badabump_core::error::{ConfigError, Result, VersionError};
use badabump_core::{ProjectType, UpdateConfig};

use crate::schema::{self, FormatContext, ParsedParts, SchemaParts};
use crate::traits::required_number;

/// Pre-release schema used by project types without their own entry
pub const DEFAULT_PRE_RELEASE_SCHEMA: &str = "-TYPE.NUMBER";

/// Pre-release schema per project type
const PRE_RELEASE_SCHEMAS: &[(ProjectType, &str)] = &[(ProjectType::Python, "TYPENUMBER")];

/// Short stage labels per project type; unlisted types use the full stage name
const PRE_RELEASE_LABELS: &[(ProjectType, [(PreReleaseType, &str); 3])] = &[(
    ProjectType::Python,
    [
        (PreReleaseType::Alpha, "a"),
        (PreReleaseType::Beta, "b"),
        (PreReleaseType::Rc, "rc"),
    ],
)];

const SCHEMA_PARTS_FORMATTING: &SchemaParts = &[("TYPE", "{type}"), ("NUMBER", "{number}")];

pub(crate) const SCHEMA_PARTS_PARSING: &SchemaParts =
    &[("TYPE", r"(?P<type>\D+)"), ("NUMBER", r"(?P<number>\d+)")];

/// Pre-release schema for the project type
pub fn pre_release_schema(project_type: ProjectType) -> &'static str {
    PRE_RELEASE_SCHEMAS
        .iter()
        .find(|(pt, _)| *pt == project_type)
        .map(|(_, schema)| *schema)
        .unwrap_or(DEFAULT_PRE_RELEASE_SCHEMA)
}

fn labels(project_type: ProjectType) -> Option<&'static [(PreReleaseType, &'static str); 3]> {
    PRE_RELEASE_LABELS
        .iter()
        .find(|(pt, _)| *pt == project_type)
        .map(|(_, labels)| labels)
}

/// Pre-release stage
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PreReleaseType {
    #[default]
    Alpha,
    Beta,
    Rc,
}

impl PreReleaseType {
    /// Returns the string representation of the stage
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Alpha => "alpha",
            Self::Beta => "beta",
            Self::Rc => "rc",
        }
    }

    /// Next stage of the ladder; `rc` stays `rc`
    pub fn next(&self) -> Self {
        match self {
            Self::Alpha => Self::Beta,
            Self::Beta => Self::Rc,
            Self::Rc => Self::Rc,
        }
    }

    /// Label used by the project type's pre-release suffix
    pub fn label(&self, project_type: ProjectType) -> &'static str {
        labels(project_type)
            .and_then(|labels| labels.iter().find(|(t, _)| t == self))
            .map(|(_, label)| *label)
            .unwrap_or_else(|| self.as_str())
    }

    /// Resolve a suffix label for the project type
    pub fn from_label(value: &str, project_type: ProjectType) -> Result<Self> {
        match labels(project_type) {
            Some(labels) => labels
                .iter()
                .find(|(_, label)| *label == value)
                .map(|(t, _)| *t)
                .ok_or_else(|| ConfigError::unknown("pre-release type", value).into()),
            None => Ok(value.parse()?),
        }
    }
}

impl std::fmt::Display for PreReleaseType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for PreReleaseType {
    type Err = ConfigError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "alpha" => Ok(Self::Alpha),
            "beta" => Ok(Self::Beta),
            "rc" => Ok(Self::Rc),
            _ => Err(ConfigError::unknown("pre-release type", s)),
        }
    }
}

/// Pre-release stage with its counter, e.g. `a1` or `-beta.0`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PreRelease {
    pub pre_release_type: PreReleaseType,
    pub number: u64,
}

impl PreRelease {
    pub fn new(pre_release_type: PreReleaseType, number: u64) -> Self {
        Self {
            pre_release_type,
            number,
        }
    }

    /// Render the suffix for the project type
    pub fn format(&self, project_type: ProjectType) -> Result<String> {
        let context = FormatContext::from([
            ("type", self.pre_release_type.label(project_type).to_string()),
            ("number", self.number.to_string()),
        ]);
        schema::format_version(pre_release_schema(project_type), SCHEMA_PARTS_FORMATTING, &context)
    }

    /// Build from `type` and `number` groups
    pub fn from_parsed(parsed: &ParsedParts, project_type: ProjectType) -> Result<Self> {
        let schema = pre_release_schema(project_type);
        let label = parsed.get("type").ok_or_else(|| VersionError::MissingComponent {
            component: "type".to_string(),
            schema: schema.to_string(),
        })?;
        Ok(Self {
            pre_release_type: PreReleaseType::from_label(label, project_type)?,
            number: required_number(parsed, "number", schema)?,
        })
    }

    /// Parse a bare suffix such as `rc2` or `-alpha.1`
    pub fn parse(value: &str, project_type: ProjectType) -> Result<Self> {
        let schema = pre_release_schema(project_type);
        schema::parse_version(schema, SCHEMA_PARTS_PARSING, value)?
            .and_then(|parsed| Self::from_parsed(&parsed, project_type).ok())
            .ok_or_else(|| VersionError::InvalidPreRelease(value.to_string()).into())
    }

    /// Advance the ladder.
    ///
    /// `None` when the update is a final release.
    pub fn update(&self, config: &UpdateConfig) -> Option<Self> {
        if !config.is_pre_release() {
            return None;
        }

        let next = if config.is_breaking_change() {
            let next_type = self.pre_release_type.next();
            if next_type != self.pre_release_type {
                Self::new(next_type, 0)
            } else {
                Self::new(next_type, self.number + 1)
            }
        } else {
            Self::new(self.pre_release_type, self.number + 1)
        };

        debug!(
            from = %self.pre_release_type,
            to = %next.pre_release_type,
            number = next.number,
            "pre-release updated"
        );
        Some(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_python() {
        let pre = PreRelease::new(PreReleaseType::Beta, 2);
        assert_eq!(pre.format(ProjectType::Python).unwrap(), "b2");
        assert_eq!(PreRelease::default().format(ProjectType::Python).unwrap(), "a0");
    }

    #[test]
    fn test_format_javascript() {
        let pre = PreRelease::new(PreReleaseType::Rc, 1);
        assert_eq!(pre.format(ProjectType::Javascript).unwrap(), "-rc.1");
        assert_eq!(
            PreRelease::default().format(ProjectType::Javascript).unwrap(),
            "-alpha.0"
        );
    }

    #[test]
    fn test_parse() {
        assert_eq!(
            PreRelease::parse("rc3", ProjectType::Python).unwrap(),
            PreRelease::new(PreReleaseType::Rc, 3)
        );
        assert_eq!(
            PreRelease::parse("-beta.4", ProjectType::Javascript).unwrap(),
            PreRelease::new(PreReleaseType::Beta, 4)
        );
    }

    #[test]
    fn test_parse_invalid() {
        assert!(matches!(
            PreRelease::parse("dev1", ProjectType::Python),
            Err(badabump_core::BadabumpError::Version(VersionError::InvalidPreRelease(_)))
        ));
        assert!(PreRelease::parse("beta1", ProjectType::Python).is_err());
        assert!(PreRelease::parse("a1", ProjectType::Javascript).is_err());
    }

    #[test]
    fn test_unknown_stage_name() {
        let err = "gamma".parse::<PreReleaseType>().unwrap_err();
        assert_eq!(err.to_string(), "Unknown pre-release type: gamma");
    }

    #[test]
    fn test_update_final_release() {
        assert_eq!(PreRelease::default().update(&UpdateConfig::micro()), None);
    }

    #[test]
    fn test_update_same_stage() {
        let config = UpdateConfig::minor().with_pre_release(true);
        assert_eq!(
            PreRelease::new(PreReleaseType::Beta, 1).update(&config),
            Some(PreRelease::new(PreReleaseType::Beta, 2))
        );
    }

    #[test]
    fn test_ladder() {
        let config = UpdateConfig::breaking().with_pre_release(true);
        let mut current = PreRelease::default();
        let mut visited = Vec::new();
        for _ in 0..4 {
            current = current.update(&config).unwrap();
            visited.push((current.pre_release_type, current.number));
        }
        assert_eq!(
            visited,
            vec![
                (PreReleaseType::Beta, 0),
                (PreReleaseType::Rc, 0),
                (PreReleaseType::Rc, 1),
                (PreReleaseType::Rc, 2),
            ]
        );
    }
}
