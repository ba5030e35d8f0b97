//! Version: base version plus optional pre-release

use tracing::{debug, instrument};

use badabump_core::error::{Result, VersionError};
use badabump_core::{ProjectConfig, UpdateConfig, VersionType};

use crate::calver::{self, CalVer};
use crate::pre_release::{self, pre_release_schema, PreRelease};
use crate::schema::{self, ParsedParts, SchemaParts};
use crate::semver::{self, SemVer};
use crate::traits::VersionScheme;

/// Base version, chosen once from the configured version type
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BaseVersion {
    CalVer(CalVer),
    SemVer(SemVer),
}

impl BaseVersion {
    /// Parse a bare base version for the configured version type
    pub fn parse(value: &str, config: &ProjectConfig) -> Result<Self> {
        let schema = &config.version_schema;
        Ok(match config.version_type {
            VersionType::Calver => Self::CalVer(CalVer::parse(value, schema)?),
            VersionType::Semver => Self::SemVer(SemVer::parse(value, schema)?),
        })
    }

    /// Build from named groups captured by a combined schema
    pub fn from_parsed(parsed: &ParsedParts, config: &ProjectConfig) -> Result<Self> {
        let schema = &config.version_schema;
        Ok(match config.version_type {
            VersionType::Calver => Self::CalVer(CalVer::from_parsed(parsed, schema)?),
            VersionType::Semver => Self::SemVer(SemVer::from_parsed(parsed, schema)?),
        })
    }

    pub fn initial(config: &ProjectConfig) -> Self {
        let schema = &config.version_schema;
        match config.version_type {
            VersionType::Calver => Self::CalVer(CalVer::initial(schema)),
            VersionType::Semver => Self::SemVer(SemVer::initial(schema)),
        }
    }

    pub fn format(&self) -> Result<String> {
        match self {
            Self::CalVer(v) => v.format(),
            Self::SemVer(v) => v.format(),
        }
    }

    pub fn update(&self, config: &UpdateConfig) -> Self {
        match self {
            Self::CalVer(v) => Self::CalVer(v.update(config)),
            Self::SemVer(v) => Self::SemVer(v.update(config)),
        }
    }

    /// Name of the underlying scheme
    pub fn name(&self) -> &'static str {
        match self {
            Self::CalVer(v) => v.name(),
            Self::SemVer(v) => v.name(),
        }
    }
}

impl From<CalVer> for BaseVersion {
    fn from(value: CalVer) -> Self {
        Self::CalVer(value)
    }
}

impl From<SemVer> for BaseVersion {
    fn from(value: SemVer) -> Self {
        Self::SemVer(value)
    }
}

fn parsing_parts(version_type: VersionType) -> &'static SchemaParts {
    match version_type {
        VersionType::Calver => calver::SCHEMA_PARTS_PARSING,
        VersionType::Semver => semver::SCHEMA_PARTS_PARSING,
    }
}

/// Project version
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Version {
    pub version: BaseVersion,
    pub pre_release: Option<PreRelease>,
}

impl Version {
    pub fn new(version: impl Into<BaseVersion>) -> Self {
        Self {
            version: version.into(),
            pre_release: None,
        }
    }

    pub fn with_pre_release(mut self, pre_release: PreRelease) -> Self {
        self.pre_release = Some(pre_release);
        self
    }

    pub fn is_pre_release(&self) -> bool {
        self.pre_release.is_some()
    }

    /// First version of a project without any release tag
    pub fn initial(config: &ProjectConfig, is_pre_release: bool) -> Self {
        Self {
            version: BaseVersion::initial(config),
            pre_release: is_pre_release.then(PreRelease::default),
        }
    }

    /// Extract the version from a tag following `config.tag_format`
    #[instrument(skip(config), fields(tag_format = %config.tag_format))]
    pub fn from_tag(tag: &str, config: &ProjectConfig) -> Result<Self> {
        let value = guess_version_from_tag(tag, &config.tag_format)?;
        Self::parse(&value, config)
    }

    /// Parse a version, with or without a pre-release suffix
    pub fn parse(value: &str, config: &ProjectConfig) -> Result<Self> {
        if let Ok(version) = BaseVersion::parse(value, config) {
            return Ok(Self::new(version));
        }

        let schema = format!(
            "{}{}",
            config.version_schema,
            pre_release_schema(config.project_type)
        );
        let parts: Vec<(&'static str, &'static str)> = parsing_parts(config.version_type)
            .iter()
            .chain(pre_release::SCHEMA_PARTS_PARSING)
            .copied()
            .collect();

        let parsed = schema::parse_version(&schema, &parts, value)?;
        let Some(parsed) = parsed else {
            return Err(VersionError::ParseFailed {
                schema: config.version_schema.clone(),
                value: value.to_string(),
            }
            .into());
        };

        debug!(value, schema = %schema, "parsed pre-release version");
        Ok(Self {
            version: BaseVersion::from_parsed(&parsed, config)?,
            pre_release: Some(PreRelease::from_parsed(&parsed, config.project_type)?),
        })
    }

    /// Render the version for the project type
    pub fn format(&self, config: &ProjectConfig) -> Result<String> {
        let base = self.version.format()?;
        match &self.pre_release {
            Some(pre_release) => Ok(format!("{base}{}", pre_release.format(config.project_type)?)),
            None => Ok(base),
        }
    }

    /// Compute the next version.
    ///
    /// While in pre-release, pre-release updates only advance the ladder and
    /// leave the base version as is. A final release bumps the base version
    /// and drops the pre-release. Starting a pre-release bumps the base
    /// version and attaches `alpha0`.
    pub fn update(&self, config: &UpdateConfig) -> Self {
        match (&self.pre_release, config.is_pre_release()) {
            (Some(pre_release), true) => Self {
                version: self.version.clone(),
                pre_release: pre_release.update(config),
            },
            (_, false) => Self::new(self.version.update(config)),
            (None, true) => Self {
                version: self.version.update(&config.with_pre_release(false)),
                pre_release: Some(PreRelease::default()),
            },
        }
    }
}

/// Extract the `{version}` part of a tag
pub fn guess_version_from_tag(tag: &str, tag_format: &str) -> Result<String> {
    let regexp = schema::to_regexp(tag_format)?;
    regexp
        .captures(tag)
        .and_then(|caps| caps.name("version"))
        .map(|m| m.as_str().to_string())
        .ok_or_else(|| {
            VersionError::TagMismatch {
                tag: tag.to_string(),
                tag_format: tag_format.to_string(),
            }
            .into()
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pre_release::PreReleaseType;
    use badabump_core::ProjectType;
    use chrono::{Datelike, Utc};

    fn semver_config() -> ProjectConfig {
        ProjectConfig::default().with_version_type(VersionType::Semver)
    }

    fn short_year() -> i32 {
        Utc::now().year() - calver::SHORT_YEAR_START
    }

    #[test]
    fn test_guess_version_from_tag() {
        let cases = [
            ("v1.2.3", "v{version}", "1.2.3"),
            ("v20.1.0a0", "v{version}", "20.1.0a0"),
            ("release/2020.10.20", "release/{version}", "2020.10.20"),
            ("v20.10.20", "{version}", "v20.10.20"),
        ];
        for (tag, tag_format, expected) in cases {
            assert_eq!(guess_version_from_tag(tag, tag_format).unwrap(), expected);
        }
    }

    #[test]
    fn test_guess_version_from_tag_invalid() {
        assert!(guess_version_from_tag("1.2.3", "v{version}").is_err());
        assert!(guess_version_from_tag("v20.10.20", "release/{version}").is_err());
    }

    #[test]
    fn test_from_tag_calver() {
        let config = ProjectConfig::default();
        let version = Version::from_tag("v20.1.0", &config).unwrap();
        assert_eq!(
            version,
            Version::new(CalVer::new(2020, "YY.MINOR.MICRO").with_minor(1).with_micro(0))
        );
    }

    #[test]
    fn test_from_tag_calver_pre_release() {
        let config = ProjectConfig::default();
        let version = Version::from_tag("v20.1.0b2", &config).unwrap();
        assert_eq!(
            version,
            Version::new(CalVer::new(2020, "YY.MINOR.MICRO").with_minor(1).with_micro(0))
                .with_pre_release(PreRelease::new(PreReleaseType::Beta, 2))
        );
    }

    #[test]
    fn test_from_tag_custom_format() {
        let mut config = ProjectConfig::default().with_version_schema("YY.MM.DD");
        config.tag_format = "release/{version}".to_string();
        let version = Version::from_tag("release/20.10.20", &config).unwrap();
        assert_eq!(
            version,
            Version::new(CalVer::new(2020, "YY.MM.DD").with_month(10).with_day(20))
        );
    }

    #[test]
    fn test_from_tag_javascript_semver() {
        let mut config = semver_config().with_project_type(ProjectType::Javascript);
        config.tag_format = "{version}".to_string();
        let version = Version::from_tag("1.2.3-alpha.4", &config).unwrap();
        assert_eq!(
            version,
            Version::new(SemVer::new(1, 2, 3)).with_pre_release(PreRelease::new(PreReleaseType::Alpha, 4))
        );
        assert_eq!(version.format(&config).unwrap(), "1.2.3-alpha.4");
    }

    #[test]
    fn test_parse_failure_names_schema() {
        let err = Version::parse("1.0", &semver_config()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Unable to parse version using given schema & value. Expected schema: MAJOR.MINOR.PATCH, value: 1.0"
        );
    }

    #[test]
    fn test_update_pre_release_keeps_base() {
        let config = semver_config();
        let version = Version::parse("1.0.0a0", &config).unwrap();
        let next = version.update(&UpdateConfig::micro().with_pre_release(true));
        assert_eq!(next.format(&config).unwrap(), "1.0.0a1");
        assert_eq!(next.version, version.version);
    }

    #[test]
    fn test_update_semver() {
        let config = semver_config();
        let cases = [
            ("1.0.0", UpdateConfig::micro(), "1.0.1"),
            ("1.0.0", UpdateConfig::micro().with_pre_release(true), "1.0.1a0"),
            ("1.0.0a0", UpdateConfig::micro(), "1.0.1"),
            ("1.0.0", UpdateConfig::minor(), "1.1.0"),
            ("1.0.0", UpdateConfig::minor().with_pre_release(true), "1.1.0a0"),
            ("1.0.0a0", UpdateConfig::minor(), "1.1.0"),
            ("1.0.0a0", UpdateConfig::minor().with_pre_release(true), "1.0.0a1"),
            ("1.0.0", UpdateConfig::breaking(), "2.0.0"),
            ("1.0.0", UpdateConfig::breaking().with_pre_release(true), "2.0.0a0"),
            ("1.0.0a0", UpdateConfig::breaking(), "2.0.0"),
            ("1.0.0a0", UpdateConfig::breaking().with_pre_release(true), "1.0.0b0"),
        ];
        for (current, update, expected) in cases {
            let next = Version::parse(current, &config).unwrap().update(&update);
            assert_eq!(next.format(&config).unwrap(), expected, "{current} -> {expected}");
        }
    }

    #[test]
    fn test_update_calver() {
        let config = ProjectConfig::default();
        let year = short_year();
        let cases = [
            ("1.0", UpdateConfig::micro(), "1.1"),
            ("1.0", UpdateConfig::micro().with_pre_release(true), "1.1a0"),
            ("1.0a0", UpdateConfig::micro(), "1.1"),
            ("1.0a0", UpdateConfig::micro().with_pre_release(true), "1.0a1"),
            ("1.1", UpdateConfig::minor(), "2.0"),
            ("1.1a0", UpdateConfig::minor().with_pre_release(true), "1.1a1"),
            ("1.1", UpdateConfig::breaking().with_pre_release(true), "2.0a0"),
            ("1.1a0", UpdateConfig::breaking().with_pre_release(true), "1.1b0"),
        ];
        for (current, update, expected) in cases {
            let current = format!("{year}.{current}");
            let expected = format!("{year}.{expected}");
            let next = Version::parse(&current, &config).unwrap().update(&update);
            assert_eq!(next.format(&config).unwrap(), expected);
        }
    }

    #[test]
    fn test_initial() {
        let config = semver_config();
        assert_eq!(Version::initial(&config, false).format(&config).unwrap(), "1.0.0");
        assert_eq!(Version::initial(&config, true).format(&config).unwrap(), "1.0.0a0");

        let config = semver_config().with_project_type(ProjectType::Javascript);
        assert_eq!(Version::initial(&config, true).format(&config).unwrap(), "1.0.0-alpha.0");
    }
}
