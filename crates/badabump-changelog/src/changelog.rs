//! Changelog aggregation and rendering

use tracing::{debug, info, instrument};

use badabump_core::error::Result;
use badabump_core::{ChangelogTarget, FormatType};

use crate::formatter::{bold, markdown_header, rst_h2, ul_li};
use crate::parser::{
    ConventionalCommit, COMMIT_TYPE_FEATURE, COMMIT_TYPE_FIX, COMMIT_TYPE_REFACTOR,
};

/// Rendered in place of an empty changelog
pub const CHANGELOG_EMPTY: &str = "No changes since last pre-release";

/// Options for rendering a [`ChangeLog`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatOptions {
    pub target: ChangelogTarget,
    pub format_type: FormatType,
    pub is_pre_release: bool,
    pub ignore_footer_urls: bool,
}

impl FormatOptions {
    pub fn new(target: ChangelogTarget, format_type: FormatType) -> Self {
        Self {
            target,
            format_type,
            is_pre_release: false,
            ignore_footer_urls: true,
        }
    }

    pub fn with_pre_release(mut self, is_pre_release: bool) -> Self {
        self.is_pre_release = is_pre_release;
        self
    }

    pub fn with_ignore_footer_urls(mut self, ignore_footer_urls: bool) -> Self {
        self.ignore_footer_urls = ignore_footer_urls;
        self
    }

    fn block_header(&self, label: &str) -> String {
        match (self.format_type, self.target) {
            (FormatType::Rst, _) => bold(label),
            // Some git hosts strip `#` lines from tag and commit messages
            (FormatType::Markdown, ChangelogTarget::GitCommit) => rst_h2(label),
            (FormatType::Markdown, ChangelogTarget::ChangelogFile) if self.is_pre_release => {
                markdown_header(label, 3)
            }
            (FormatType::Markdown, ChangelogTarget::ChangelogFile) => markdown_header(label, 2),
        }
    }
}

/// Commits since the last release, grouped by type
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeLog {
    /// All commits, oldest first
    pub commits: Vec<ConventionalCommit>,
    pub feature_commits: Vec<ConventionalCommit>,
    pub fix_commits: Vec<ConventionalCommit>,
    pub refactor_commits: Vec<ConventionalCommit>,
    pub other_commits: Vec<ConventionalCommit>,
}

impl ChangeLog {
    /// Group commits, given oldest first
    pub fn new(commits: Vec<ConventionalCommit>) -> Self {
        let mut changelog = Self::default();
        for commit in &commits {
            let partition = match commit.commit_type() {
                COMMIT_TYPE_FEATURE => &mut changelog.feature_commits,
                COMMIT_TYPE_FIX => &mut changelog.fix_commits,
                COMMIT_TYPE_REFACTOR => &mut changelog.refactor_commits,
                _ => &mut changelog.other_commits,
            };
            partition.push(commit.clone());
        }
        debug!(
            features = changelog.feature_commits.len(),
            fixes = changelog.fix_commits.len(),
            refactors = changelog.refactor_commits.len(),
            others = changelog.other_commits.len(),
            "changelog partitioned"
        );
        changelog.commits = commits;
        changelog
    }

    /// Parse raw commit messages given newest first, as `git log` lists them
    #[instrument(skip(git_commits), fields(commit_count = git_commits.len()))]
    pub fn from_git_commits<S: AsRef<str>>(git_commits: &[S], strict: bool) -> Result<Self> {
        let commits = git_commits
            .iter()
            .rev()
            .map(|message| ConventionalCommit::from_git_commit(message.as_ref(), strict))
            .collect::<Result<Vec<_>>>()?;
        info!(commit_count = commits.len(), "changelog built from git commits");
        Ok(Self::new(commits))
    }

    pub fn is_empty(&self) -> bool {
        self.commits.is_empty()
    }

    pub fn has_breaking_change(&self) -> bool {
        self.commits.iter().any(ConventionalCommit::is_breaking_change)
    }

    pub fn has_minor_change(&self) -> bool {
        !self.feature_commits.is_empty()
    }

    /// Any commit besides features
    pub fn has_micro_change(&self) -> bool {
        self.feature_commits.len() != self.commits.len()
    }

    pub fn format(&self, options: &FormatOptions) -> String {
        if self.is_empty() {
            return CHANGELOG_EMPTY.to_string();
        }

        let blocks = [
            ("Features:", &self.feature_commits),
            ("Fixes:", &self.fix_commits),
            ("Refactoring:", &self.refactor_commits),
            ("Other:", &self.other_commits),
        ];

        blocks
            .into_iter()
            .filter(|(_, commits)| !commits.is_empty())
            .map(|(label, commits)| format_block(label, commits, options))
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

fn format_block(label: &str, commits: &[ConventionalCommit], options: &FormatOptions) -> String {
    let breaking = commits.iter().filter(|c| c.is_breaking_change());
    let regular = commits.iter().filter(|c| !c.is_breaking_change());
    let items = breaking
        .chain(regular)
        .map(|c| ul_li(&c.format(options.format_type, options.ignore_footer_urls)))
        .collect::<Vec<_>>()
        .join("\n");
    format!("{}\n\n{items}", options.block_header(label))
}
