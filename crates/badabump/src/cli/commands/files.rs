//! Project file updates: version files, changelog file, post-bump hook

use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::Context;
use tracing::{debug, info, instrument};

use badabump_changelog::{in_development_header, version_header, ChangeLog, FormatOptions};
use badabump_core::config::defaults::{PACKAGE_JSON, PACKAGE_LOCK_JSON, PYPROJECT_TOML, YARN_LOCK};
use badabump_core::config::find_changelog_file;
use badabump_core::config::validation::validate_version_file;
use badabump_core::{ChangelogTarget, ProjectConfig, ProjectType};
use badabump_versions::Version;

use crate::cli::output::{diff, echo_message};

const CHANGELOG_UPPER: &str = "CHANGELOG";

/// Directories searched for the python package
const PYTHON_PACKAGE_ROOTS: [&str; 2] = [".", "./src"];

/// Existing changelog file, or `CHANGELOG.<ext>` for the configured format
pub fn find_changelog_path(config: &ProjectConfig) -> PathBuf {
    let format = config.changelog_format_type_file;
    find_changelog_file(&config.path, format).unwrap_or_else(|| {
        config
            .path
            .join(format!("{CHANGELOG_UPPER}.{}", format.file_extension()))
    })
}

/// Text holding the version inside the given file
pub fn format_version_str(path: &Path, version: &str) -> String {
    match path.file_name().and_then(|name| name.to_str()) {
        Some(PYPROJECT_TOML) => format!("version = \"{version}\""),
        Some(PACKAGE_JSON) => format!("\"version\": \"{version}\""),
        _ => version.to_string(),
    }
}

/// Version files of a project without explicit `version_files`
pub fn guess_version_files(config: &ProjectConfig) -> anyhow::Result<Vec<String>> {
    if config.project_type == ProjectType::Javascript {
        return Ok(vec![PACKAGE_JSON.to_string()]);
    }

    let path = &config.path;
    let pyproject = path.join(PYPROJECT_TOML);
    if !pyproject.exists() {
        return Ok(Vec::new());
    }

    let mut version_files = vec![PYPROJECT_TOML.to_string()];
    let content = std::fs::read_to_string(&pyproject)
        .with_context(|| format!("Unable to read {}", pyproject.display()))?;
    let document: toml::Value = toml::from_str(&content)
        .with_context(|| format!("Unable to parse {}", pyproject.display()))?;
    let project_name = document
        .get("tool")
        .and_then(|tool| tool.get("poetry"))
        .and_then(|poetry| poetry.get("name"))
        .and_then(|name| name.as_str());

    if let Some(name) = project_name {
        for root in PYTHON_PACKAGE_ROOTS {
            let package = path.join(root);
            let candidates = [
                (package.join(name).join("__init__.py"), format!("{root}/{name}/__init__.py")),
                (package.join(name).join("__version__.py"), format!("{root}/{name}/__version__.py")),
                (package.join(format!("{name}.py")), format!("{root}/{name}.py")),
            ];
            version_files.extend(
                candidates
                    .into_iter()
                    .filter(|(file, _)| file.exists())
                    .map(|(_, relative)| relative),
            );
        }
    }

    debug!(?version_files, "guessed version files");
    Ok(version_files)
}

/// Replace `current` with `next` in the file.
///
/// Prints the changed lines before writing. Returns `false` when the file does
/// not exist or does not contain `current`.
pub fn update_file(path: &Path, current: &str, next: &str) -> anyhow::Result<bool> {
    if !path.exists() {
        return Ok(false);
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Unable to read {}", path.display()))?;
    if !content.contains(current) {
        debug!(path = %path.display(), "content to replace not found");
        return Ok(false);
    }

    let next_content = content.replace(current, next);
    echo_message(&diff(&content, &next_content), false);

    std::fs::write(path, next_content)
        .with_context(|| format!("Unable to write {}", path.display()))?;
    Ok(true)
}

/// Update the version in every configured or guessed version file.
///
/// Nothing happens without a current version.
#[instrument(skip_all, fields(path = %config.path.display(), dry_run = is_dry_run))]
pub fn update_version_files(
    config: &ProjectConfig,
    current_version: Option<&Version>,
    next_version: &Version,
    is_dry_run: bool,
) -> anyhow::Result<bool> {
    let Some(current_version) = current_version else {
        return Ok(false);
    };

    let version_files = if config.version_files.is_empty() {
        guess_version_files(config)?
    } else {
        config.version_files.clone()
    };

    let current = current_version.format(config)?;
    let next = next_version.format(config)?;

    let mut all_updated = !version_files.is_empty();
    for item in &version_files {
        validate_version_file(item)?;

        echo_message(&format!("Updating version in {item}: {current} -> {next}"), is_dry_run);
        if is_dry_run {
            continue;
        }

        let path = config.path.join(item);
        let updated = update_file(
            &path,
            &format_version_str(&path, &current),
            &format_version_str(&path, &next),
        )?;
        all_updated &= updated;
    }

    info!(files = version_files.len(), all_updated, "version files processed");
    Ok(all_updated && !is_dry_run)
}

/// Hook command: configured, or the package manager install for javascript
/// projects with a lock file
pub fn post_bump_hook(config: &ProjectConfig) -> Option<String> {
    if let Some(cmd) = &config.post_bump_hook {
        return Some(cmd.clone());
    }
    if config.project_type != ProjectType::Javascript {
        return None;
    }
    if config.path.join(PACKAGE_LOCK_JSON).exists() {
        Some("npm install".to_string())
    } else if config.path.join(YARN_LOCK).exists() {
        Some("yarn install".to_string())
    } else {
        None
    }
}

/// Run the post-bump hook in the project directory
pub fn run_post_bump_hook(config: &ProjectConfig, is_dry_run: bool) -> anyhow::Result<()> {
    let Some(cmd) = post_bump_hook(config) else {
        return Ok(());
    };

    echo_message(&format!("Running post-bump hook: {cmd}"), is_dry_run);
    if is_dry_run {
        return Ok(());
    }

    let status = Command::new("sh")
        .arg("-c")
        .arg(&cmd)
        .current_dir(&config.path)
        .status()
        .with_context(|| format!("Unable to run post-bump hook: {cmd}"))?;
    if !status.success() {
        anyhow::bail!("Post-bump hook failed ({status}): {cmd}");
    }
    Ok(())
}

/// Release notes block for the changelog file, with the in-development
/// header it belongs under for pre-releases
pub fn changelog_section(
    config: &ProjectConfig,
    next_version: &Version,
    changelog: &ChangeLog,
) -> anyhow::Result<(String, String)> {
    let format_type = config.changelog_format_type_file;
    let is_pre_release = next_version.is_pre_release();

    let dev_header = in_development_header(&next_version.version.format()?, format_type);
    let header = version_header(
        &next_version.format(config)?,
        format_type,
        config.changelog_file_include_date,
        is_pre_release,
    );
    let content = changelog.format(
        &FormatOptions::new(ChangelogTarget::ChangelogFile, format_type)
            .with_pre_release(is_pre_release)
            .with_ignore_footer_urls(config.changelog_ignore_footer_urls),
    );

    let section = if is_pre_release {
        format!("{dev_header}\n\n{header}\n\n{content}\n\n")
    } else {
        format!("{header}\n\n{content}\n\n")
    };
    Ok((dev_header, section))
}

/// Add the release notes of `next_version` to the changelog file.
///
/// Final releases are prepended. Pre-releases go under the in-development
/// header of their base version, which is added when missing.
#[instrument(skip_all, fields(path = %config.path.display(), dry_run = is_dry_run))]
pub fn update_changelog_file(
    config: &ProjectConfig,
    next_version: &Version,
    changelog: &ChangeLog,
    is_dry_run: bool,
) -> anyhow::Result<()> {
    let changelog_path = find_changelog_path(config);
    let file_name = changelog_path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    echo_message(
        &format!(
            "Adding {} release notes to {file_name} file",
            next_version.format(config)?
        ),
        is_dry_run,
    );
    if is_dry_run {
        return Ok(());
    }

    let (dev_header, section) = changelog_section(config, next_version, changelog)?;

    if !changelog_path.exists() {
        std::fs::write(&changelog_path, format!("{}\n", section.trim()))
            .with_context(|| format!("Unable to write {}", changelog_path.display()))?;
        info!(path = %changelog_path.display(), "changelog file created");
        return Ok(());
    }

    if update_file(&changelog_path, &format!("{dev_header}\n\n"), &section)? {
        info!(path = %changelog_path.display(), "changelog file updated under in-development header");
        return Ok(());
    }

    let existing = std::fs::read_to_string(&changelog_path)
        .with_context(|| format!("Unable to read {}", changelog_path.display()))?;
    std::fs::write(&changelog_path, format!("{section}{existing}"))
        .with_context(|| format!("Unable to write {}", changelog_path.display()))?;
    info!(path = %changelog_path.display(), "changelog file updated");
    Ok(())
}
