//! Cleanup of commit and tag texts before they land in tags and releases

use regex::Regex;
use std::sync::LazyLock;

const CO_AUTHORED_BY: &str = "Co-authored-by: ";
const SIGNED_OFF_BY: &str = "Signed-off-by: ";
const TAG_REF_PREFIX: &str = "refs/tags/";

static COMMIT_SUBJECT_WITH_PR_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?P<subject>.+) \(#\d+\)$").expect("Invalid regex"));

/// Join body lines without trailer lines, ending with exactly one newline
pub fn clean_body<S: AsRef<str>>(lines: &[S]) -> String {
    let cleaned = lines
        .iter()
        .map(AsRef::as_ref)
        .filter(|line| !line.starts_with(CO_AUTHORED_BY) && !line.starts_with(SIGNED_OFF_BY))
        .collect::<Vec<_>>()
        .join("\n");

    if cleaned.ends_with('\n') {
        cleaned
    } else {
        format!("{cleaned}\n")
    }
}

/// Strip the ` (#123)` suffix squash merges add to the subject
pub fn clean_commit_subject(value: &str) -> String {
    COMMIT_SUBJECT_WITH_PR_REGEX
        .replace(value, "$subject")
        .into_owned()
}

pub fn clean_tag_ref(value: &str) -> &str {
    value.strip_prefix(TAG_REF_PREFIX).unwrap_or(value)
}
