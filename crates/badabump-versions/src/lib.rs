//! Badabump Versions - CalVer, SemVer and pre-release versions
//!
//! Every version family is driven by a schema such as `YY.MINOR.MICRO`,
//! interpreted by the [`schema`] engine for both formatting and parsing.

mod calver;
mod pre_release;
pub mod schema;
mod semver;
mod traits;
mod version;

pub use calver::{guess_year, CalVer, SHORT_YEAR_START};
pub use pre_release::{pre_release_schema, PreRelease, PreReleaseType, DEFAULT_PRE_RELEASE_SCHEMA};
pub use schema::{format_version, parse_version, render_template, to_regexp};
pub use semver::SemVer;
pub use traits::VersionScheme;
pub use version::{guess_version_from_tag, BaseVersion, Version};
