//! Git repository handle

use std::path::{Path, PathBuf};

use git2::Repository;
use tracing::{info, instrument};

use badabump_core::error::GitError;

/// Result type for git operations
pub type Result<T> = std::result::Result<T, GitError>;

/// Git repository wrapper
pub struct GitRepo {
    pub(crate) repo: Repository,
    path: PathBuf,
}

impl GitRepo {
    /// Open the repository rooted at `path`
    #[instrument(fields(path = %path.display()))]
    pub fn open(path: &Path) -> Result<Self> {
        let repo = Repository::open(path).map_err(|e| open_error(e, path))?;
        info!(path = %path.display(), "opened git repository");

        Ok(Self {
            path: path.to_path_buf(),
            repo,
        })
    }

    /// Open the repository containing `start_path`, searching parent directories
    #[instrument(fields(start_path = %start_path.display()))]
    pub fn discover(start_path: &Path) -> Result<Self> {
        let repo = Repository::discover(start_path).map_err(|e| open_error(e, start_path))?;
        let path = repo.workdir().unwrap_or_else(|| repo.path()).to_path_buf();
        info!(path = %path.display(), "discovered git repository");

        Ok(Self { repo, path })
    }

    /// Working directory of the repository
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn head_commit(&self) -> Result<git2::Commit<'_>> {
        Ok(self.repo.head()?.peel_to_commit()?)
    }
}

fn open_error(error: git2::Error, path: &Path) -> GitError {
    if error.code() == git2::ErrorCode::NotFound {
        GitError::NotARepository(path.to_path_buf())
    } else {
        GitError::OpenFailed(error.message().to_string())
    }
}

/// Repository fixtures shared by the crate's tests
#[cfg(test)]
pub(crate) mod fixtures {
    use std::path::Path;

    use git2::{Oid, Repository, Signature};
    use tempfile::TempDir;

    pub fn init() -> (TempDir, Repository) {
        let temp = TempDir::new().unwrap();
        let repo = Repository::init(temp.path()).unwrap();
        (temp, repo)
    }

    /// Commit a change to `file.txt` on HEAD
    pub fn commit(repo: &Repository, message: &str) -> Oid {
        let workdir = repo.workdir().unwrap();
        let file = workdir.join("file.txt");
        let previous = std::fs::read_to_string(&file).unwrap_or_default();
        std::fs::write(&file, format!("{previous}{message}\n")).unwrap();

        let mut index = repo.index().unwrap();
        index.add_path(Path::new("file.txt")).unwrap();
        index.write().unwrap();
        let tree = repo.find_tree(index.write_tree().unwrap()).unwrap();

        let sig = Signature::now("Test", "test@example.com").unwrap();
        let parent = repo.head().ok().and_then(|h| h.peel_to_commit().ok());
        let parents: Vec<&git2::Commit<'_>> = parent.iter().collect();
        repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
            .unwrap()
    }

    pub fn lightweight_tag(repo: &Repository, name: &str, oid: Oid) {
        let object = repo.find_object(oid, None).unwrap();
        repo.tag_lightweight(name, &object, false).unwrap();
    }

    pub fn annotated_tag(repo: &Repository, name: &str, oid: Oid, message: &str) {
        let object = repo.find_object(oid, None).unwrap();
        let sig = Signature::now("Test", "test@example.com").unwrap();
        repo.tag(name, &object, &sig, message, false).unwrap();
    }
}
