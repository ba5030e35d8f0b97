//! CalVer (Calendar Versioning)
//!
//! Versions are built from a schema mixing date tokens with counters:
//! - `YYYY` / `YY` / `0Y` (full, short, zero-padded short year)
//! - `MM` / `0M`, `WW` / `0W`, `DD` / `0D` (month, ISO week, day)
//! - `MINOR` / `MICRO` (counters within a date period)
//!
//! Slots missing from the schema stay `None` through every update.

use chrono::{Datelike, NaiveDate, Utc};
use tracing::{debug, warn};

use badabump_core::error::{Result, VersionError};
use badabump_core::UpdateConfig;

use crate::schema::{FormatContext, ParsedParts, SchemaParts};
use crate::traits::{parsed_number, VersionScheme};

/// Years from this one on may be rendered with `YY` / `0Y`
pub const SHORT_YEAR_START: i32 = 2000;

const SCHEMA_PARTS_FORMATTING: &SchemaParts = &[
    ("YYYY", "{year}"),
    ("YY", "{short_year}"),
    ("0Y", "{short_year:02}"),
    ("MM", "{month}"),
    ("0M", "{month:02}"),
    ("WW", "{week}"),
    ("0W", "{week:02}"),
    ("DD", "{day}"),
    ("0D", "{day:02}"),
    ("MINOR", "{minor}"),
    ("MICRO", "{micro}"),
];

pub(crate) const SCHEMA_PARTS_PARSING: &SchemaParts = &[
    ("YYYY", r"(?P<year>\d{4})"),
    ("YY", r"(?P<short_year>\d{2})"),
    ("0Y", r"(?P<short_year>\d{2})"),
    ("MM", r"(?P<month>\d{1,2})"),
    ("0M", r"(?P<month>\d{2})"),
    ("WW", r"(?P<week>\d{1,2})"),
    ("0W", r"(?P<week>\d{2})"),
    ("DD", r"(?P<day>\d{1,2})"),
    ("0D", r"(?P<day>\d{2})"),
    ("MINOR", r"(?P<minor>\d+)"),
    ("MICRO", r"(?P<micro>\d+)"),
];

/// Calendar version
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CalVer {
    pub year: i32,
    pub month: Option<u32>,
    pub week: Option<u32>,
    pub day: Option<u32>,
    pub minor: Option<u64>,
    pub micro: Option<u64>,
    pub schema: String,
}

impl CalVer {
    /// Create a version carrying only a year
    pub fn new(year: i32, schema: impl Into<String>) -> Self {
        Self {
            year,
            month: None,
            week: None,
            day: None,
            minor: None,
            micro: None,
            schema: schema.into(),
        }
    }

    pub fn with_month(mut self, month: u32) -> Self {
        self.month = Some(month);
        self
    }

    pub fn with_week(mut self, week: u32) -> Self {
        self.week = Some(week);
        self
    }

    pub fn with_day(mut self, day: u32) -> Self {
        self.day = Some(day);
        self
    }

    pub fn with_minor(mut self, minor: u64) -> Self {
        self.minor = Some(minor);
        self
    }

    pub fn with_micro(mut self, micro: u64) -> Self {
        self.micro = Some(micro);
        self
    }

    /// Two-digit year, available from 2000 on
    pub fn short_year(&self) -> Option<i32> {
        (self.year >= SHORT_YEAR_START).then(|| self.year - SHORT_YEAR_START)
    }

    /// Initial version for `schema` as of `today`
    pub fn initial_at(schema: &str, today: NaiveDate) -> Self {
        let has = |token: &str| schema_has(schema, token);
        Self {
            year: today.year(),
            month: (has("MM") || has("0M")).then(|| today.month()),
            week: (has("WW") || has("0W")).then(|| today.iso_week().week()),
            day: (has("DD") || has("0D")).then(|| today.day()),
            minor: has("MINOR").then_some(1),
            micro: has("MICRO").then_some(0),
            schema: schema.to_string(),
        }
    }

    /// Compute the next version as of `today`.
    ///
    /// A change of any present date slot starts a new period: `minor` resets
    /// to 1 and `micro` to 0, whatever the requested change. Otherwise
    /// pre-release requests keep the counters, breaking and minor changes
    /// bump `minor`, micro changes bump `micro`.
    pub fn update_at(&self, config: &UpdateConfig, today: NaiveDate) -> Self {
        let year = today.year();
        let month = self.month.map(|_| today.month());
        let week = self.week.map(|_| today.iso_week().week());
        let day = self.day.map(|_| today.day());

        let date_changed =
            year != self.year || month != self.month || week != self.week || day != self.day;

        let (minor, micro) = if date_changed {
            debug!(from = self.year, to = year, "calver date period changed, resetting counters");
            (self.minor.map(|_| 1), self.micro.map(|_| 0))
        } else if config.is_pre_release() {
            (self.minor, self.micro)
        } else {
            self.bump_counters(config)
        };

        if date_changed || minor != self.minor || micro != self.micro {
            debug!(?minor, ?micro, "calver counters updated");
        } else if !config.is_pre_release() {
            warn!(schema = %self.schema, "calver schema has no counter to bump within the same period");
        }

        Self {
            year,
            month,
            week,
            day,
            minor,
            micro,
            schema: self.schema.clone(),
        }
    }

    fn bump_counters(&self, config: &UpdateConfig) -> (Option<u64>, Option<u64>) {
        let bump_minor = config.is_breaking_change() || config.is_minor_change();
        match (self.minor, self.micro) {
            (Some(minor), micro) if bump_minor => (Some(minor + 1), micro.map(|_| 0)),
            (minor, Some(micro)) => (minor, Some(micro + 1)),
            (Some(minor), None) => (Some(minor + 1), None),
            (None, None) => (None, None),
        }
    }
}

fn schema_has(schema: &str, token: &str) -> bool {
    // Only asked for tokens that never occur inside another token
    schema.contains(token)
}

/// Resolve the full year from `YYYY` or `YY` / `0Y` groups
pub fn guess_year(parsed: &ParsedParts, schema: &str) -> Result<i32> {
    if let Some(year) = parsed_number::<i32>(parsed, "year", schema)? {
        return Ok(year);
    }
    match parsed_number::<i32>(parsed, "short_year", schema)? {
        Some(short_year) => Ok(SHORT_YEAR_START + short_year),
        None => Err(VersionError::MissingYear.into()),
    }
}

impl VersionScheme for CalVer {
    fn name(&self) -> &'static str {
        "calver"
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
        let mut context = FormatContext::new();
        context.insert("year", self.year.to_string());
        if let Some(short_year) = self.short_year() {
            context.insert("short_year", short_year.to_string());
        }
        let optional = [
            ("month", self.month.map(u64::from)),
            ("week", self.week.map(u64::from)),
            ("day", self.day.map(u64::from)),
            ("minor", self.minor),
            ("micro", self.micro),
        ];
        for (name, value) in optional {
            if let Some(value) = value {
                context.insert(name, value.to_string());
            }
        }
        context
    }

    fn from_parsed(parsed: &ParsedParts, schema: &str) -> Result<Self> {
        Ok(Self {
            year: guess_year(parsed, schema)?,
            month: parsed_number(parsed, "month", schema)?,
            week: parsed_number(parsed, "week", schema)?,
            day: parsed_number(parsed, "day", schema)?,
            minor: parsed_number(parsed, "minor", schema)?,
            micro: parsed_number(parsed, "micro", schema)?,
            schema: schema.to_string(),
        })
    }

    fn initial(schema: &str) -> Self {
        Self::initial_at(schema, Utc::now().date_naive())
    }

    fn update(&self, config: &UpdateConfig) -> Self {
        self.update_at(config, Utc::now().date_naive())
    }
}
