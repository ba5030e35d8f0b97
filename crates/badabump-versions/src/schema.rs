//! Schema-driven version formatting and parsing.
//!
//! A schema such as `YYYY.MINOR.MICRO` is a template made of tokens taken
//! from an ordered table plus literal text. Tokens are matched in a single
//! left-to-right pass where, at any position, the table entry listed first
//! wins; tables therefore list wider tokens (`YYYY`) before the narrower
//! ones sharing a prefix (`YY`).

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::{Captures, Regex};
use tracing::trace;

use badabump_core::error::{Result, VersionError};

/// Ordered `(token, replacement)` table
pub type SchemaParts = [(&'static str, &'static str)];

/// Values a formatted schema draws from, keyed by placeholder name
pub type FormatContext = HashMap<&'static str, String>;

/// Named groups captured while parsing a version
pub type ParsedParts = HashMap<String, String>;

/// `{name}` or `{name:0N}` placeholder
static PLACEHOLDER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{(?P<name>[a-z_]+)(?::0(?P<width>\d+))?\}").expect("Invalid regex")
});

/// `{name}` variable in tag, branch, and title templates
static TEMPLATE_VAR_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{(?P<name>[A-Za-z_][A-Za-z0-9_]*)\}").expect("Invalid regex"));

fn token_regex(schema: &str, parts: &SchemaParts) -> Result<Regex> {
    let alternation = parts
        .iter()
        .map(|(token, _)| regex::escape(token))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&alternation).map_err(|err| invalid_schema(schema, err).into())
}

fn invalid_schema(schema: &str, err: impl std::fmt::Display) -> VersionError {
    VersionError::InvalidSchema {
        schema: schema.to_string(),
        reason: err.to_string(),
    }
}

fn lookup<'a>(parts: &'a SchemaParts, token: &str) -> &'a str {
    parts
        .iter()
        .find(|(t, _)| *t == token)
        .map(|(_, replacement)| *replacement)
        .unwrap_or_default()
}

/// Split a schema into literal text and token replacements.
///
/// Literal text is passed through `literal`, each token is swapped for its
/// table entry.
fn substitute(
    schema: &str,
    parts: &SchemaParts,
    literal: impl Fn(&str) -> String,
) -> Result<String> {
    let tokens = token_regex(schema, parts)?;
    let mut result = String::with_capacity(schema.len() * 2);
    let mut last = 0;
    for found in tokens.find_iter(schema) {
        result.push_str(&literal(&schema[last..found.start()]));
        result.push_str(lookup(parts, found.as_str()));
        last = found.end();
    }
    result.push_str(&literal(&schema[last..]));
    Ok(result)
}

/// Render `schema`, taking component values from `context`.
///
/// Placeholders of the form `{name:0N}` are zero-padded to width `N`. A
/// placeholder with no value in `context` is an error.
pub fn format_version(
    schema: &str,
    parts: &SchemaParts,
    context: &FormatContext,
) -> Result<String> {
    let template = substitute(schema, parts, str::to_string)?;

    let mut missing: Option<String> = None;
    let rendered = PLACEHOLDER_REGEX.replace_all(&template, |caps: &Captures| {
        let name = &caps["name"];
        match context.get(name) {
            Some(value) => match caps.name("width").and_then(|w| w.as_str().parse::<usize>().ok()) {
                Some(width) => format!("{:0>width$}", value, width = width),
                None => value.clone(),
            },
            None => {
                missing.get_or_insert_with(|| name.to_string());
                String::new()
            }
        }
    });

    if let Some(component) = missing {
        return Err(VersionError::MissingComponent {
            component,
            schema: schema.to_string(),
        }
        .into());
    }

    Ok(rendered.into_owned())
}

/// Compile `schema` into an anchored regular expression
pub fn build_schema_regexp(schema: &str, parts: &SchemaParts) -> Result<Regex> {
    let pattern = substitute(schema, parts, regex::escape)?;
    trace!(schema, pattern = %pattern, "compiled schema");
    Regex::new(&format!("^{pattern}$")).map_err(|err| invalid_schema(schema, err).into())
}

/// Match `value` against `schema`, returning captured named groups.
///
/// `Ok(None)` means the value does not follow the schema.
pub fn parse_version(schema: &str, parts: &SchemaParts, value: &str) -> Result<Option<ParsedParts>> {
    let regexp = build_schema_regexp(schema, parts)?;
    let Some(caps) = regexp.captures(value) else {
        return Ok(None);
    };

    let parsed = regexp
        .capture_names()
        .flatten()
        .filter_map(|name| caps.name(name).map(|m| (name.to_string(), m.as_str().to_string())))
        .collect();
    Ok(Some(parsed))
}

/// Compile a `{name}` template (e.g. `v{version}`) into an anchored regular
/// expression with one `.+` group per variable
pub fn to_regexp(template: &str) -> Result<Regex> {
    let mut pattern = String::from("^");
    let mut last = 0;
    for caps in TEMPLATE_VAR_REGEX.captures_iter(template) {
        let Some(whole) = caps.get(0) else { continue };
        pattern.push_str(&regex::escape(&template[last..whole.start()]));
        pattern.push_str(&format!("(?P<{}>.+)", &caps["name"]));
        last = whole.end();
    }
    pattern.push_str(&regex::escape(&template[last..]));
    pattern.push('$');
    Regex::new(&pattern).map_err(|err| invalid_schema(template, err).into())
}

/// Substitute `{version}` in a tag, branch, or title template
pub fn render_template(template: &str, version: &str) -> String {
    template.replace("{version}", version)
}
