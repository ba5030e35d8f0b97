//! Conventional Commits parser
//!
//! Parses commits following the Conventional Commits specification:
//! https://www.conventionalcommits.org/

use regex::Regex;
use std::sync::LazyLock;
use tracing::warn;

use badabump_core::error::{ChangelogError, Result};
use badabump_core::FormatType;

use crate::formatter::bold;

/// Marker in the commit body flagging a breaking change
pub const BREAKING_CHANGE_IN_BODY: &str = "BREAKING CHANGE:";

/// Suffix of the commit type flagging a breaking change
pub const BREAKING_CHANGE_IN_COMMIT_TYPE: char = '!';

pub const COMMIT_TYPE_FEATURE: &str = "feat";
pub const COMMIT_TYPE_FIX: &str = "fix";
pub const COMMIT_TYPE_REFACTOR: &str = "refactor";
pub const COMMIT_TYPE_UNKNOWN: &str = "unknown";

/// `<type>: <description>` subject line
static SUBJECT_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<commit_type>[^:]+): (?P<description>.+)$").expect("Invalid regex")
});

/// `<type>(<scope>)` commit type
static SCOPE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<commit_type>[^(]+)\((?P<scope>[^)]+)\)$").expect("Invalid regex")
});

/// Issue reference footers
static ISSUE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^(?:Closes|Fixes|Issue|Ref|Relates): (?P<issue>.+)$").expect("Invalid regex")
});

fn is_url(value: &str) -> bool {
    value.starts_with("http://") || value.starts_with("https://")
}

/// A single commit message following the conventional commit subject format
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConventionalCommit {
    /// Commit type as written, possibly with `(scope)` and a trailing `!`
    pub raw_commit_type: String,
    pub description: String,
    /// Lines after the subject and the blank separator line
    pub body: Option<String>,
}

impl ConventionalCommit {
    pub fn new(raw_commit_type: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            raw_commit_type: raw_commit_type.into(),
            description: description.into(),
            body: None,
        }
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Parse a raw commit message.
    ///
    /// With `strict` unset, a subject that is not a conventional commit is
    /// kept as an `unknown` commit and a warning is logged.
    pub fn from_git_commit(message: &str, strict: bool) -> Result<Self> {
        let mut lines = message.lines();
        let subject = lines.next().unwrap_or_default();
        let rest: Vec<&str> = lines.collect();
        let body = if rest.is_empty() {
            None
        } else {
            Some(rest.iter().skip(1).copied().collect::<Vec<_>>().join("\n"))
        };

        if let Some(caps) = SUBJECT_REGEX.captures(subject) {
            return Ok(Self {
                raw_commit_type: caps["commit_type"].to_string(),
                description: caps["description"].trim().to_string(),
                body,
            });
        }

        if strict {
            return Err(ChangelogError::CommitParse(subject.to_string()).into());
        }

        warn!(subject, "unable to parse git commit as conventional commit");
        Ok(Self {
            raw_commit_type: COMMIT_TYPE_UNKNOWN.to_string(),
            description: subject.to_string(),
            body,
        })
    }

    /// Commit type without the breaking change marker
    pub fn clean_commit_type(&self) -> &str {
        self.raw_commit_type
            .strip_suffix(BREAKING_CHANGE_IN_COMMIT_TYPE)
            .unwrap_or(&self.raw_commit_type)
    }

    /// Commit type without scope and breaking change marker
    pub fn commit_type(&self) -> &str {
        let clean = self.clean_commit_type();
        SCOPE_REGEX
            .captures(clean)
            .and_then(|caps| caps.name("commit_type"))
            .map_or(clean, |m| m.as_str())
    }

    pub fn scope(&self) -> Option<&str> {
        SCOPE_REGEX
            .captures(self.clean_commit_type())
            .and_then(|caps| caps.name("scope"))
            .map(|m| m.as_str())
    }

    pub fn is_breaking_change(&self) -> bool {
        self.raw_commit_type.ends_with(BREAKING_CHANGE_IN_COMMIT_TYPE)
            || self
                .body
                .as_deref()
                .is_some_and(|body| body.contains(BREAKING_CHANGE_IN_BODY))
    }

    /// Issue references from `Closes:`, `Fixes:`, `Issue:`, `Ref:` and
    /// `Relates:` footers, in order of appearance
    pub fn issues(&self) -> Vec<&str> {
        let Some(body) = self.body.as_deref() else {
            return Vec::new();
        };
        ISSUE_REGEX
            .captures_iter(body)
            .filter_map(|caps| caps.name("issue"))
            .map(|m| m.as_str().trim())
            .collect()
    }

    /// Render as a changelog item
    pub fn format(&self, _format_type: FormatType, ignore_footer_urls: bool) -> String {
        let mut parts: Vec<String> = Vec::with_capacity(4);

        if self.is_breaking_change() {
            parts.push(bold(BREAKING_CHANGE_IN_BODY));
        }

        let issues: Vec<&str> = self
            .issues()
            .into_iter()
            .filter(|issue| !(ignore_footer_urls && is_url(issue)))
            .collect();
        if !issues.is_empty() {
            parts.push(format!("[{}]", issues.join(", ")));
        }

        if let Some(scope) = self.scope().filter(|scope| !scope.is_empty()) {
            parts.push(format!("({})", bold(scope)));
        }

        parts.push(self.description.clone());
        parts.join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FEATURE_COMMIT: &str = "feat: Export necessary types from the package (#31)

- Export types, enums, utils, themes
- Update components to use styled-components ThemeProvider

Issue: IFXND-55
";

    #[test]
    fn test_feature_commit() {
        let commit = ConventionalCommit::from_git_commit(FEATURE_COMMIT, true).unwrap();
        assert_eq!(commit.commit_type(), COMMIT_TYPE_FEATURE);
        assert_eq!(commit.description, "Export necessary types from the package (#31)");
        assert!(!commit.is_breaking_change());
        assert_eq!(commit.issues(), vec!["IFXND-55"]);
        assert_eq!(
            commit.body.as_deref(),
            Some(
                "- Export types, enums, utils, themes\n- Update components to use styled-components ThemeProvider\n\nIssue: IFXND-55"
            )
        );
        assert_eq!(commit.scope(), None);
        assert_eq!(
            commit.format(FormatType::Markdown, true),
            "[IFXND-55] Export necessary types from the package (#31)"
        );
    }

    #[test]
    fn test_parse_with_scope() {
        let commit = ConventionalCommit::from_git_commit("fix(parser): handle edge case", true).unwrap();
        assert_eq!(commit.commit_type(), "fix");
        assert_eq!(commit.scope(), Some("parser"));
        assert_eq!(commit.body, None);
        assert_eq!(commit.format(FormatType::Markdown, true), "(**parser**) handle edge case");
    }

    #[test]
    fn test_breaking_marker_in_type() {
        let commit = ConventionalCommit::from_git_commit("refactor(core)!: drop py2", true).unwrap();
        assert_eq!(commit.clean_commit_type(), "refactor(core)");
        assert_eq!(commit.commit_type(), "refactor");
        assert!(commit.is_breaking_change());
        assert_eq!(
            commit.format(FormatType::Rst, true),
            "**BREAKING CHANGE:** (**core**) drop py2"
        );
    }

    #[test]
    fn test_breaking_marker_in_body() {
        let message = "feat: new config\n\nBREAKING CHANGE: old keys removed\n\nCloses: #12";
        let commit = ConventionalCommit::from_git_commit(message, true).unwrap();
        assert!(commit.is_breaking_change());
        assert_eq!(
            commit.format(FormatType::Markdown, true),
            "**BREAKING CHANGE:** [#12] new config"
        );
    }

    #[test]
    fn test_breaking_marker_needs_exact_text() {
        let commit =
            ConventionalCommit::from_git_commit("feat: x\n\nbreaking change: lowercase", true).unwrap();
        assert!(!commit.is_breaking_change());
    }

    #[test]
    fn test_issues_preserve_order_and_duplicates() {
        let message = "fix: y\n\nRelates: B-2\nCloses:  A-1 \nFixes: B-2\nSee: C-3\n  Ref: D-4";
        let commit = ConventionalCommit::from_git_commit(message, true).unwrap();
        assert_eq!(commit.issues(), vec!["B-2", "A-1", "B-2"]);
    }

    #[test]
    fn test_footer_urls() {
        let message = "fix: z\n\nCloses: https://github.com/org/repo/issues/1\nRef: #2";
        let commit = ConventionalCommit::from_git_commit(message, true).unwrap();
        assert_eq!(commit.format(FormatType::Markdown, true), "[#2] z");
        assert_eq!(
            commit.format(FormatType::Markdown, false),
            "[https://github.com/org/repo/issues/1, #2] z"
        );

        let message = "fix: z\n\nCloses: http://example.com/1";
        let commit = ConventionalCommit::from_git_commit(message, true).unwrap();
        assert_eq!(commit.format(FormatType::Markdown, true), "z");
    }

    #[test]
    fn test_strict_rejects_non_conventional() {
        let err = ConventionalCommit::from_git_commit("Just a regular commit", true).unwrap_err();
        assert!(matches!(
            err,
            badabump_core::BadabumpError::Changelog(ChangelogError::CommitParse(_))
        ));
    }

    #[test]
    fn test_lenient_accepts_non_conventional() {
        let commit = ConventionalCommit::from_git_commit("Just a regular commit", false).unwrap();
        assert_eq!(commit.commit_type(), COMMIT_TYPE_UNKNOWN);
        assert_eq!(commit.description, "Just a regular commit");
    }

    #[test]
    fn test_subject_only_with_blank_line() {
        let commit = ConventionalCommit::from_git_commit("chore: x\n", true).unwrap();
        assert_eq!(commit.body, None);

        let commit = ConventionalCommit::from_git_commit("chore: x\n\n", true).unwrap();
        assert_eq!(commit.body.as_deref(), Some(""));
    }
}
