//! Tag lookups

use git2::{DescribeFormatOptions, DescribeOptions};
use tracing::{debug, info, instrument};

use badabump_core::error::GitError;

use crate::repository::{GitRepo, Result};

impl GitRepo {
    /// Nearest tag reachable from HEAD, like `git describe --tags --abbrev=0`
    #[instrument(skip(self))]
    pub fn latest_tag(&self) -> Result<String> {
        let describe = self
            .repo
            .describe(DescribeOptions::new().describe_tags())
            .map_err(|e| match e.code() {
                git2::ErrorCode::NotFound => GitError::NoTags,
                _ => GitError::Git2(e),
            })?;
        let mut format_options = DescribeFormatOptions::new();
        format_options.abbreviated_size(0);
        let tag = describe.format(Some(&format_options))?;
        info!(tag = %tag, "found latest tag");
        Ok(tag)
    }

    /// [`GitRepo::latest_tag`], or `None` when no tag can be described
    pub fn latest_tag_or_none(&self) -> Option<String> {
        match self.latest_tag() {
            Ok(tag) => Some(tag),
            Err(error) => {
                debug!(%error, "no latest tag");
                None
            }
        }
    }

    /// Subject of the tag message: its first paragraph on one line
    pub fn tag_subject(&self, tag: &str) -> Result<String> {
        Ok(self
            .tag_message(tag)?
            .map(|message| split_message(&message).0)
            .unwrap_or_default())
    }

    /// Tag message after the subject paragraph
    pub fn tag_body(&self, tag: &str) -> Result<String> {
        Ok(self
            .tag_message(tag)?
            .map(|message| split_message(&message).1)
            .unwrap_or_default())
    }

    /// Message of an annotated tag, or of the commit a lightweight tag points to
    fn tag_message(&self, tag: &str) -> Result<Option<String>> {
        let reference = match self.repo.find_reference(&format!("refs/tags/{tag}")) {
            Ok(reference) => reference,
            Err(e) if e.code() == git2::ErrorCode::NotFound => {
                debug!(tag, "tag not found");
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };

        let target = reference
            .target()
            .ok_or_else(|| GitError::ReferenceNotFound(tag.to_string()))?;
        let object = self.repo.find_object(target, None)?;
        let message = match object.as_tag() {
            Some(annotated) => annotated
                .message_bytes()
                .map(|bytes| String::from_utf8_lossy(bytes).into_owned()),
            None => {
                let commit = object.peel_to_commit()?;
                Some(String::from_utf8_lossy(commit.message_bytes()).into_owned())
            }
        };
        Ok(message)
    }
}

/// Split a message into its subject and body the way git does
fn split_message(message: &str) -> (String, String) {
    let message = message.trim();
    let (subject, body) = message.split_once("\n\n").unwrap_or((message, ""));
    let subject = subject
        .lines()
        .map(str::trim)
        .collect::<Vec<_>>()
        .join(" ");
    (subject, body.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::fixtures;

    #[test]
    fn test_latest_tag() {
        let (temp, repo) = fixtures::init();
        let first = fixtures::commit(&repo, "feat: first");
        fixtures::lightweight_tag(&repo, "v1.0.0", first);
        let second = fixtures::commit(&repo, "fix: second");
        fixtures::annotated_tag(&repo, "v1.0.1", second, "1.0.1 Release");
        fixtures::commit(&repo, "chore: third");

        let repo = GitRepo::open(temp.path()).unwrap();
        assert_eq!(repo.latest_tag().unwrap(), "v1.0.1");
        assert_eq!(repo.latest_tag_or_none().as_deref(), Some("v1.0.1"));
    }

    #[test]
    fn test_latest_tag_on_tagged_head() {
        let (temp, repo) = fixtures::init();
        let oid = fixtures::commit(&repo, "feat: first");
        fixtures::lightweight_tag(&repo, "v21.1.0", oid);

        let repo = GitRepo::open(temp.path()).unwrap();
        assert_eq!(repo.latest_tag().unwrap(), "v21.1.0");
    }

    #[test]
    fn test_no_tags() {
        let (temp, repo) = fixtures::init();
        fixtures::commit(&repo, "feat: first");

        let repo = GitRepo::open(temp.path()).unwrap();
        assert!(matches!(repo.latest_tag(), Err(GitError::NoTags)));
        assert_eq!(repo.latest_tag_or_none(), None);
    }

    #[test]
    fn test_annotated_tag_subject_and_body() {
        let (temp, repo) = fixtures::init();
        let oid = fixtures::commit(&repo, "feat: first");
        fixtures::annotated_tag(
            &repo,
            "v1.0.0",
            oid,
            "1.0.0 Release\n\nFeatures:\n---------\n\n- first\n",
        );

        let repo = GitRepo::open(temp.path()).unwrap();
        assert_eq!(repo.tag_subject("v1.0.0").unwrap(), "1.0.0 Release");
        assert_eq!(
            repo.tag_body("v1.0.0").unwrap(),
            "Features:\n---------\n\n- first"
        );
    }

    #[test]
    fn test_lightweight_tag_uses_commit_message() {
        let (temp, repo) = fixtures::init();
        let oid = fixtures::commit(&repo, "chore: 1.0.0 Release\n\nBody line");
        fixtures::lightweight_tag(&repo, "v1.0.0", oid);

        let repo = GitRepo::open(temp.path()).unwrap();
        assert_eq!(repo.tag_subject("v1.0.0").unwrap(), "chore: 1.0.0 Release");
        assert_eq!(repo.tag_body("v1.0.0").unwrap(), "Body line");
    }

    #[test]
    fn test_missing_tag_is_empty() {
        let (temp, repo) = fixtures::init();
        fixtures::commit(&repo, "feat: first");

        let repo = GitRepo::open(temp.path()).unwrap();
        assert_eq!(repo.tag_subject("v9.9.9").unwrap(), "");
        assert_eq!(repo.tag_body("v9.9.9").unwrap(), "");
    }

    #[test]
    fn test_split_message() {
        assert_eq!(
            split_message("line one\nline two\n\nbody\n"),
            ("line one line two".to_string(), "body".to_string())
        );
        assert_eq!(split_message("only"), ("only".to_string(), String::new()));
    }
}
