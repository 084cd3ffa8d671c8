//! Repository discovery and change detection.

use std::path::Path;

use git2::{ErrorCode, Repository, StatusOptions, Tree};
use tracing::debug;

use crate::error::{DiffError, InitError};

/// Open the repository containing `path` (the current directory by default).
///
/// Walks up parent directories like `git` does.
pub fn open_repository(path: Option<&Path>) -> Result<Repository, InitError> {
    let path = path.unwrap_or_else(|| Path::new("."));
    let repo = Repository::discover(path).map_err(|source| InitError::OpenRepository {
        path: path.display().to_string(),
        source,
    })?;
    debug!(git_dir = %repo.path().display(), "Opened repository");
    Ok(repo)
}

/// Resolve the HEAD tree, distinguishing empty-repo errors from real failures.
///
/// Returns `Ok(None)` for repos with no commits (unborn branch / not found),
/// `Ok(Some(tree))` for repos with a valid HEAD, or the underlying error for
/// real failures (corrupt HEAD, permission issues, missing objects).
pub(crate) fn resolve_head_tree(repo: &Repository) -> Result<Option<Tree<'_>>, git2::Error> {
    let head_ref = match repo.head() {
        Ok(r) => r,
        Err(e) if e.code() == ErrorCode::UnbornBranch || e.code() == ErrorCode::NotFound => {
            return Ok(None);
        }
        Err(e) => return Err(e),
    };

    head_ref.peel_to_tree().map(Some)
}

/// Number of files staged relative to HEAD.
pub(crate) fn staged_file_count(repo: &Repository) -> Result<usize, git2::Error> {
    let head_tree = resolve_head_tree(repo)?;
    let diff = repo.diff_tree_to_index(head_tree.as_ref(), None, None)?;
    Ok(diff.deltas().len())
}

/// Whether there is anything to describe.
///
/// With `cached`, only staged changes count. Otherwise any modification in
/// the working tree counts, untracked files included.
pub fn has_changes(repo: &Repository, cached: bool) -> Result<bool, DiffError> {
    if cached {
        return staged_file_count(repo)
            .map(|n| n > 0)
            .map_err(DiffError::DiffFailed);
    }

    let mut opts = StatusOptions::new();
    opts.include_untracked(true)
        .recurse_untracked_dirs(true)
        .include_ignored(false);
    let statuses = repo
        .statuses(Some(&mut opts))
        .map_err(DiffError::StatusFailed)?;
    Ok(!statuses.is_empty())
}
