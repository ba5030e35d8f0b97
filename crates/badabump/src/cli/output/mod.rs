//! Output formatting utilities

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use console::style;
use similar::{ChangeTag, TextDiff};
use tracing::debug;

/// Environment variable pointing to the GitHub Actions outputs file
pub const GITHUB_OUTPUT_ENV: &str = "GITHUB_OUTPUT";

const DRY_RUN_PREFIX: &str = "[DRY-RUN] ";

const OUTPUT_DELIMITER: &str = "EOF";

const SET_OUTPUT_ESCAPES: [(&str, &str); 3] = [("%", "%25"), ("\n", "%0A"), ("\r", "%0D")];

/// Print a success message
pub fn success(message: &str) {
    println!("{} {}", style("✓").green().bold(), message);
}

/// Print an error message
pub fn error(message: &str) {
    eprintln!("{} {}", style("✗").red().bold(), message);
}

/// Print a warning message
pub fn warning(message: &str) {
    println!("{} {}", style("!").yellow().bold(), message);
}

/// Print an action message, prefixed in dry-run mode
pub fn echo_message(message: &str, is_dry_run: bool) {
    if is_dry_run {
        println!("{}{}", style(DRY_RUN_PREFIX).yellow().bold(), message);
    } else {
        println!("{} {}", style("→").blue(), message);
    }
}

/// Removed and added lines between two file contents, `- ` / `+ ` prefixed
pub fn diff(current: &str, next: &str) -> String {
    TextDiff::from_lines(current, next)
        .iter_all_changes()
        .filter_map(|change| match change.tag() {
            ChangeTag::Delete => Some(format!("- {}", change.value())),
            ChangeTag::Insert => Some(format!("+ {}", change.value())),
            ChangeTag::Equal => None,
        })
        .collect()
}

/// Print a labelled value, or emit it as a CI output named `ci_name`
pub fn echo_value(label: &str, value: &str, is_ci: bool, ci_name: &str) -> std::io::Result<()> {
    if is_ci {
        github_actions_output(ci_name, value)
    } else {
        println!("{}{}", style(label).bold(), value);
        Ok(())
    }
}

/// Emit a GitHub Actions step output.
///
/// Appended to the `$GITHUB_OUTPUT` file when set, otherwise printed as a
/// `::set-output` workflow command.
pub fn github_actions_output(name: &str, value: &str) -> std::io::Result<()> {
    match std::env::var_os(GITHUB_OUTPUT_ENV) {
        Some(path) => append_output(Path::new(&path), name, value),
        None => {
            println!("{}", set_output_command(name, value));
            Ok(())
        }
    }
}

fn append_output(path: &Path, name: &str, value: &str) -> std::io::Result<()> {
    debug!(name, path = %path.display(), "appending github output");
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    file.write_all(output_file_entry(name, value).as_bytes())
}

/// Multiline entry for the `$GITHUB_OUTPUT` file
pub fn output_file_entry(name: &str, value: &str) -> String {
    let delimiter = output_delimiter(value);
    format!("{name}<<{delimiter}\n{value}\n{delimiter}\n")
}

/// Heredoc delimiter that matches no line of `value`
fn output_delimiter(value: &str) -> String {
    let mut delimiter = OUTPUT_DELIMITER.to_string();
    let mut suffix = 0;
    while value.lines().any(|line| line == delimiter) {
        suffix += 1;
        delimiter = format!("{OUTPUT_DELIMITER}_{suffix}");
    }
    delimiter
}

/// Legacy `::set-output` command with the value escaped to a single line
pub fn set_output_command(name: &str, value: &str) -> String {
    let escaped = SET_OUTPUT_ESCAPES
        .iter()
        .fold(value.to_string(), |acc, (symbol, code)| acc.replace(symbol, code));
    format!("::set-output name={name}::{escaped}")
}
