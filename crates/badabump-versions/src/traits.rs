//! Version scheme traits

use badabump_core::error::{Result, VersionError};
use badabump_core::UpdateConfig;

use crate::schema::{self, FormatContext, ParsedParts, SchemaParts};

/// Shared contract of the base version families (CalVer and SemVer)
pub trait VersionScheme: Sized {
    /// Name of this scheme
    fn name(&self) -> &'static str;

    /// Token table used when formatting
    fn formatting_parts() -> &'static SchemaParts;

    /// Token table used when parsing
    fn parsing_parts() -> &'static SchemaParts;

    /// Schema this version was created with
    fn schema(&self) -> &str;

    /// Values available to the formatting schema
    fn format_context(&self) -> FormatContext;

    /// Build a version from named groups captured by the parsing schema
    fn from_parsed(parsed: &ParsedParts, schema: &str) -> Result<Self>;

    /// First version ever released for the given schema
    fn initial(schema: &str) -> Self;

    /// Compute the next version for the given update
    fn update(&self, config: &UpdateConfig) -> Self;

    /// Render the version using its schema
    fn format(&self) -> Result<String> {
        schema::format_version(self.schema(), Self::formatting_parts(), &self.format_context())
    }

    /// Parse a version string following the given schema
    fn parse(value: &str, schema: &str) -> Result<Self> {
        match schema::parse_version(schema, Self::parsing_parts(), value)? {
            Some(parsed) => Self::from_parsed(&parsed, schema),
            None => Err(VersionError::ParseFailed {
                schema: schema.to_string(),
                value: value.to_string(),
            }
            .into()),
        }
    }
}

/// Read an optional numeric group
pub(crate) fn parsed_number<T: std::str::FromStr>(
    parsed: &ParsedParts,
    name: &str,
    schema: &str,
) -> Result<Option<T>> {
    match parsed.get(name) {
        Some(value) => value
            .parse()
            .map(Some)
            .map_err(|_| {
                VersionError::ParseFailed {
                    schema: schema.to_string(),
                    value: value.clone(),
                }
                .into()
            }),
        None => Ok(None),
    }
}

/// Read a numeric group the schema must provide
pub(crate) fn required_number<T: std::str::FromStr>(
    parsed: &ParsedParts,
    name: &str,
    schema: &str,
) -> Result<T> {
    parsed_number(parsed, name, schema)?.ok_or_else(|| {
        VersionError::MissingComponent {
            component: name.to_string(),
            schema: schema.to_string(),
        }
        .into()
    })
}
