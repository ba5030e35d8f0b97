//! SemVer version scheme

use badabump_core::config::DEFAULT_SEMVER_SCHEMA;
use badabump_core::error::Result;
use badabump_core::UpdateConfig;

use crate::schema::{FormatContext, ParsedParts, SchemaParts};
use crate::traits::{required_number, VersionScheme};

const SCHEMA_PARTS_FORMATTING: &SchemaParts = &[
    ("MAJOR", "{major}"),
    ("MINOR", "{minor}"),
    ("PATCH", "{patch}"),
];

pub(crate) const SCHEMA_PARTS_PARSING: &SchemaParts = &[
    ("MAJOR", r"(?P<major>\d+)"),
    ("MINOR", r"(?P<minor>\d+)"),
    ("PATCH", r"(?P<patch>\d+)"),
];

/// Semantic version (`MAJOR.MINOR.PATCH`)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SemVer {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    pub schema: String,
}

impl SemVer {
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
            schema: DEFAULT_SEMVER_SCHEMA.to_string(),
        }
    }
}

impl Default for SemVer {
    fn default() -> Self {
        Self::new(1, 0, 0)
    }
}

impl VersionScheme for SemVer {
    fn name(&self) -> &'static str {
        "semver"
    }

    fn formatting_parts() -> &'static SchemaParts {
        SCHEMA_PARTS_FORMATTING
    }

    fn parsing_parts() -> &'static SchemaParts {
        SCHEMA_PARTS_PARSING
    }

    fn schema(&self) -> &str {
        &self.schema
    }

    fn format_context(&self) -> FormatContext {
        FormatContext::from([
            ("major", self.major.to_string()),
            ("minor", self.minor.to_string()),
            ("patch", self.patch.to_string()),
        ])
    }

    fn from_parsed(parsed: &ParsedParts, schema: &str) -> Result<Self> {
        Ok(Self {
            major: required_number(parsed, "major", schema)?,
            minor: required_number(parsed, "minor", schema)?,
            patch: required_number(parsed, "patch", schema)?,
            schema: schema.to_string(),
        })
    }

    fn initial(schema: &str) -> Self {
        Self {
            schema: schema.to_string(),
            ..Self::default()
        }
    }

    fn update(&self, config: &UpdateConfig) -> Self {
        if config.is_pre_release() {
            return self.clone();
        }

        let (major, minor, patch) = if config.is_breaking_change() {
            (self.major + 1, 0, 0)
        } else if config.is_minor_change() {
            (self.major, self.minor + 1, 0)
        } else {
            (self.major, self.minor, self.patch + 1)
        };

        Self {
            major,
            minor,
            patch,
            schema: self.schema.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        let v = SemVer::parse("1.2.3", DEFAULT_SEMVER_SCHEMA).unwrap();
        assert_eq!(v, SemVer::new(1, 2, 3));
    }

    #[test]
    fn test_parse_invalid() {
        assert!(SemVer::parse("1.2", DEFAULT_SEMVER_SCHEMA).is_err());
        assert!(SemVer::parse("v1.2.3", DEFAULT_SEMVER_SCHEMA).is_err());
        assert!(SemVer::parse("1.2.3-alpha.1", DEFAULT_SEMVER_SCHEMA).is_err());
    }

    #[test]
    fn test_parse_missing_component() {
        let err = SemVer::parse("1.2", "MAJOR.MINOR").unwrap_err();
        assert!(err.to_string().contains("'patch'"));
    }

    #[test]
    fn test_format_roundtrip() {
        let v = SemVer::new(1, 2, 3);
        assert_eq!(SemVer::parse(&v.format().unwrap(), DEFAULT_SEMVER_SCHEMA).unwrap(), v);
    }

    #[test]
    fn test_initial() {
        assert_eq!(SemVer::initial(DEFAULT_SEMVER_SCHEMA).format().unwrap(), "1.0.0");
    }

    #[test]
    fn test_update_minor() {
        let next = SemVer::new(1, 0, 0).update(&UpdateConfig::minor());
        assert_eq!(next, SemVer::new(1, 1, 0));
    }

    #[test]
    fn test_update_breaking() {
        let next = SemVer::new(1, 4, 2).update(&UpdateConfig::breaking());
        assert_eq!(next, SemVer::new(2, 0, 0));
    }

    #[test]
    fn test_update_micro() {
        let next = SemVer::new(1, 4, 2).update(&UpdateConfig::micro());
        assert_eq!(next, SemVer::new(1, 4, 3));
    }

    #[test]
    fn test_update_pre_release_is_noop() {
        let v = SemVer::new(1, 4, 2);
        let next = v.update(&UpdateConfig::breaking().with_pre_release(true));
        assert_eq!(next, v);
    }
}
