//! Commit history

use git2::Sort;
use tracing::{debug, info, instrument};

use badabump_core::error::GitError;

use crate::repository::{GitRepo, Result};

impl GitRepo {
    /// Full messages of `from_ref..HEAD`, newest first
    #[instrument(skip(self))]
    pub fn list_commits(&self, from_ref: &str) -> Result<Vec<String>> {
        let since = self
            .repo
            .revparse_single(from_ref)
            .and_then(|object| object.peel_to_commit())
            .map_err(|_| GitError::ReferenceNotFound(from_ref.to_string()))?;
        let head = self.head_commit()?;

        let mut revwalk = self.repo.revwalk()?;
        revwalk.set_sorting(Sort::TOPOLOGICAL | Sort::TIME)?;
        revwalk.push(head.id())?;
        revwalk.hide(since.id())?;

        let mut messages = Vec::new();
        for oid in revwalk {
            let commit = self.repo.find_commit(oid?)?;
            debug!(commit = %commit.id(), "listed commit");
            messages.push(commit_message(&commit));
        }

        info!(from_ref, count = messages.len(), "listed commits");
        Ok(messages)
    }

    /// Full message of the HEAD commit
    pub fn last_commit(&self) -> Result<String> {
        Ok(commit_message(&self.head_commit()?))
    }
}

fn commit_message(commit: &git2::Commit<'_>) -> String {
    String::from_utf8_lossy(commit.message_bytes())
        .trim()
        .to_string()
}
