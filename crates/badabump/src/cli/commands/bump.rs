//! Version bump: the default command

use clap::Args;
use console::style;
use dialoguer::Confirm;
use tracing::{info, instrument};

use anyhow::Context;
use badabump_changelog::parser::COMMIT_TYPE_FEATURE;
use badabump_changelog::{ChangeLog, ConventionalCommit, FormatOptions};
use badabump_core::{load_config, ChangelogTarget, ProjectConfig, UpdateConfig};
use badabump_git::GitRepo;
use badabump_versions::{render_template, Version};

use super::files::{run_post_bump_hook, update_changelog_file, update_version_files};
use crate::cli::output::{echo_message, echo_value, github_actions_output, success, warning};
use crate::cli::Cli;

/// Bump options
#[derive(Debug, Args)]
pub struct BumpCommand {
    /// Only show updates, but do not apply them
    #[arg(short = 'd', long)]
    pub dry_run: bool,

    /// Run in CI mode: no prompts, values emitted as GitHub Actions outputs
    #[arg(long, env = "CI", value_parser = clap::builder::FalseyValueParser::new())]
    pub ci: bool,

    /// Pre-release change
    #[arg(long)]
    pub pre: bool,
}

/// Everything the bump computes before touching the project
#[derive(Debug)]
pub struct BumpPlan {
    pub current_tag: Option<String>,
    pub current_version: Option<Version>,
    pub changelog: ChangeLog,
    pub next_version: Version,
}

impl BumpPlan {
    /// Read the latest tag and the commits after it and compute the next version
    #[instrument(skip(config, repo), fields(path = %config.path.display()))]
    pub fn prepare(config: &ProjectConfig, repo: &GitRepo, is_pre_release: bool) -> anyhow::Result<Self> {
        let Some(current_tag) = repo.latest_tag_or_none() else {
            info!("no tags found, starting from the initial version");
            let description = if is_pre_release {
                "Initial pre-release"
            } else {
                "Initial release"
            };
            return Ok(Self {
                current_tag: None,
                current_version: None,
                changelog: ChangeLog::new(vec![ConventionalCommit::new(
                    COMMIT_TYPE_FEATURE,
                    description,
                )]),
                next_version: Version::initial(config, is_pre_release),
            });
        };

        let current_version = Version::from_tag(&current_tag, config)
            .with_context(|| format!("Unable to parse version from tag {current_tag:?}"))?;

        let git_commits = repo.list_commits(&current_tag)?;
        if git_commits.is_empty() {
            anyhow::bail!("No commits found after: {current_tag:?}. Exit...");
        }

        let changelog = ChangeLog::from_git_commits(&git_commits, config.strict)?;
        let update_config = create_update_config(&changelog, is_pre_release);
        let next_version = current_version.update(&update_config);

        Ok(Self {
            current_tag: Some(current_tag),
            current_version: Some(current_version),
            changelog,
            next_version,
        })
    }
}

/// Bump category from the changelog, breaking over minor over micro
pub fn create_update_config(changelog: &ChangeLog, is_pre_release: bool) -> UpdateConfig {
    UpdateConfig::from_flags(
        changelog.has_breaking_change(),
        changelog.has_minor_change(),
        changelog.has_micro_change(),
        is_pre_release,
    )
}

impl BumpCommand {
    /// Execute the bump
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(
            path = %cli.path.display(),
            dry_run = self.dry_run,
            ci = self.ci,
            pre = self.pre,
            "executing bump"
        );
        let config = load_config(&cli.path)?;
        let repo = GitRepo::discover(&config.path)?;

        let plan = BumpPlan::prepare(&config, &repo, self.pre)?;

        match (&plan.current_tag, &plan.current_version) {
            (Some(tag), Some(version)) => {
                echo_value("Current tag: ", tag, self.ci, "current_tag")?;
                echo_value("Current version: ", &version.format(&config)?, self.ci, "current_version")?;
            }
            _ => warning("No tags found, releasing the initial version"),
        }

        let git_changelog = plan.changelog.format(
            &FormatOptions::new(ChangelogTarget::GitCommit, config.changelog_format_type_git)
                .with_ignore_footer_urls(config.changelog_ignore_footer_urls),
        );
        echo_value("\nChangeLog\n\n", &git_changelog, self.ci, "changelog")?;

        let next_version = plan.next_version.format(&config)?;
        echo_value("\nNext version: ", &next_version, self.ci, "next_version")?;

        if !self.ci && !self.dry_run {
            let confirmed = Confirm::new()
                .with_prompt("Are you sure to update version files?")
                .default(false)
                .interact()?;

            if !confirmed {
                println!("{}", style("OK! OK! Exit...").yellow());
                return Ok(());
            }
        }

        update_version_files(
            &config,
            plan.current_version.as_ref(),
            &plan.next_version,
            self.dry_run,
        )?;
        run_post_bump_hook(&config, self.dry_run)?;
        update_changelog_file(&config, &plan.next_version, &plan.changelog, self.dry_run)?;

        if self.ci {
            emit_release_outputs(&config, &next_version, &git_changelog)?;
        }

        if self.dry_run {
            echo_message("All OK!", true);
        } else {
            success("All OK!");
        }
        Ok(())
    }
}

fn emit_release_outputs(config: &ProjectConfig, next_version: &str, git_changelog: &str) -> anyhow::Result<()> {
    let tag_subject = render_template(&config.tag_subject_format, next_version);
    github_actions_output("next_tag", &render_template(&config.tag_format, next_version))?;
    github_actions_output("next_tag_message", &format!("{tag_subject}\n\n{git_changelog}"))?;
    github_actions_output("pr_branch", &render_template(&config.pr_branch_format, next_version))?;
    github_actions_output("pr_title", &render_template(&config.pr_title_format, next_version))?;
    Ok(())
}
