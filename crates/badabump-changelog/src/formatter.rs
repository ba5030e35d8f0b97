//! Markup helpers for changelog headers and items

use chrono::{NaiveDate, Utc};

use badabump_core::FormatType;

/// Bold text, same syntax for Markdown and reStructuredText
pub fn bold(value: &str) -> String {
    format!("**{value}**")
}

/// Bulleted list item
pub fn ul_li(value: &str) -> String {
    format!("- {value}")
}

pub fn markdown_header(value: &str, level: usize) -> String {
    format!("{} {value}", "#".repeat(level))
}

/// reStructuredText header: the value underlined with `symbol`
pub fn rst_header(value: &str, symbol: char) -> String {
    let underline: String = std::iter::repeat(symbol).take(value.chars().count()).collect();
    format!("{value}\n{underline}")
}

pub fn rst_h1(value: &str) -> String {
    rst_header(value, '=')
}

pub fn rst_h2(value: &str) -> String {
    rst_header(value, '-')
}

/// Level 1 header in the given markup
pub fn h1(value: &str, format_type: FormatType) -> String {
    match format_type {
        FormatType::Markdown => markdown_header(value, 1),
        FormatType::Rst => rst_h1(value),
    }
}

/// Level 2 header in the given markup
pub fn h2(value: &str, format_type: FormatType) -> String {
    match format_type {
        FormatType::Markdown => markdown_header(value, 2),
        FormatType::Rst => rst_h2(value),
    }
}

/// Header of a release section in the changelog file.
///
/// Final releases get a level 1 header, pre-releases level 2. `date`
/// is appended as ` (YYYY-MM-DD)`.
pub fn version_header_on(
    version: &str,
    format_type: FormatType,
    date: Option<NaiveDate>,
    is_pre_release: bool,
) -> String {
    let content = match date {
        Some(date) => format!("{version} ({})", date.format("%Y-%m-%d")),
        None => version.to_string(),
    };
    if is_pre_release {
        h2(&content, format_type)
    } else {
        h1(&content, format_type)
    }
}

/// [`version_header_on`] dated today (UTC) when `include_date` is set
pub fn version_header(
    version: &str,
    format_type: FormatType,
    include_date: bool,
    is_pre_release: bool,
) -> String {
    let date = include_date.then(|| Utc::now().date_naive());
    version_header_on(version, format_type, date, is_pre_release)
}

/// Header grouping pre-releases of a not yet released version
pub fn in_development_header(version: &str, format_type: FormatType) -> String {
    h1(&format!("{version} (In Development)"), format_type)
}
