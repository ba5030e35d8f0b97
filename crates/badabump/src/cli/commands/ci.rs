//! CI helpers for release commits and tags

use clap::{Args, Subcommand};
use tracing::info;

use badabump_changelog::{clean_body, clean_commit_subject, clean_tag_ref};
use badabump_core::{load_config, ProjectConfig};
use badabump_git::GitRepo;
use badabump_versions::{render_template, to_regexp, Version};

use crate::cli::output::github_actions_output;
use crate::cli::Cli;

/// Release commits & tags at CI
#[derive(Debug, Args)]
pub struct CiCommand {
    #[command(subcommand)]
    pub action: CiAction,
}

/// CI subcommands
#[derive(Debug, Subcommand)]
pub enum CiAction {
    /// Emit tag name and message for a merged release pull request
    PrepareTag,
    /// Emit release name and body for a pushed tag
    PrepareRelease(PrepareReleaseCommand),
}

/// Prepare a GitHub release from a tag
#[derive(Debug, Args)]
pub struct PrepareReleaseCommand {
    /// Tag reference
    #[arg(value_name = "REF", env = "GITHUB_REF")]
    pub tag_ref: Option<String>,
}

/// Tag name and message derived from a release commit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagOutputs {
    pub tag_name: String,
    pub tag_message: String,
}

/// GitHub release fields derived from a tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseOutputs {
    pub tag_name: String,
    pub is_pre_release: bool,
    pub release_name: String,
    pub release_body: String,
}

impl CiCommand {
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        let action_name = match &self.action {
            CiAction::PrepareTag => "prepare-tag",
            CiAction::PrepareRelease(_) => "prepare-release",
        };
        info!(action = action_name, "executing ci command");

        let config = load_config(&cli.path)?;
        let repo = GitRepo::discover(&config.path)?;

        match &self.action {
            CiAction::PrepareTag => {
                let outputs = prepare_tag(&config, &repo)?;
                github_actions_output("tag_name", &outputs.tag_name)?;
                github_actions_output("tag_message", &outputs.tag_message)?;
            }
            CiAction::PrepareRelease(cmd) => {
                let Some(tag_ref) = cmd.tag_ref.as_deref() else {
                    anyhow::bail!("Tag reference is required: pass REF or set GITHUB_REF");
                };
                let outputs = prepare_release(&config, &repo, tag_ref)?;
                github_actions_output("tag_name", &outputs.tag_name)?;
                github_actions_output("is_pre_release", &serde_json::to_string(&outputs.is_pre_release)?)?;
                github_actions_output("release_name", &outputs.release_name)?;
                github_actions_output("release_body", &outputs.release_body)?;
            }
        }
        Ok(())
    }
}

/// Read the last commit, expected to be a merged release pull request
pub fn prepare_tag(config: &ProjectConfig, repo: &GitRepo) -> anyhow::Result<TagOutputs> {
    let git_commit = repo.last_commit()?;
    let lines: Vec<&str> = git_commit.lines().collect();
    let [raw_subject, _, body @ ..] = lines.as_slice() else {
        anyhow::bail!("Last commit has empty body. Exit...");
    };

    let expected = to_regexp(&config.pr_title_format)?;
    let subject = clean_commit_subject(raw_subject);
    let Some(version) = expected
        .captures(&subject)
        .and_then(|caps| caps.name("version"))
        .map(|m| m.as_str().to_string())
    else {
        anyhow::bail!("Last commit has unexpected subject line. Exit...");
    };

    info!(version = %version, "release commit found");
    Ok(TagOutputs {
        tag_name: render_template(&config.tag_format, &version),
        tag_message: format!(
            "{}\n\n{}",
            render_template(&config.tag_subject_format, &version),
            clean_body(body)
        ),
    })
}

/// Describe the release for `tag_ref`, a tag name or `refs/tags/` reference
pub fn prepare_release(config: &ProjectConfig, repo: &GitRepo, tag_ref: &str) -> anyhow::Result<ReleaseOutputs> {
    let tag_name = clean_tag_ref(tag_ref);
    let version = Version::from_tag(tag_name, config)?;

    Ok(ReleaseOutputs {
        tag_name: tag_name.to_string(),
        is_pre_release: version.is_pre_release(),
        release_name: repo.tag_subject(tag_name)?,
        release_body: repo.tag_body(tag_name)?,
    })
}
