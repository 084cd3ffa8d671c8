//! Commit creation and co-author trailers.

use git2::{Oid, Repository};
use tracing::info;

use crate::error::CommitError;
use crate::git::repository::{resolve_head_tree, staged_file_count};

/// Append a `Co-authored-by` trailer for `email`.
///
/// The local part of the address is used as the display name.
pub fn with_co_author(message: &str, email: &str) -> String {
    let name = email.split_once('@').map_or(email, |(local, _)| local);
    format!(
        "{}\n\nCo-authored-by: {} <{}>",
        message.trim_end(),
        name,
        email
    )
}

/// Commit the index on HEAD with `message`.
///
/// With `stage_tracked`, modifications to tracked files are staged first
/// (like `git commit -a`); untracked files are left alone. Fails with
/// [`CommitError::NoStagedChanges`] when the index matches HEAD.
pub fn commit_changes(
    repo: &Repository,
    message: &str,
    stage_tracked: bool,
) -> Result<Oid, CommitError> {
    let mut index = repo.index().map_err(CommitError::StagingFailed)?;

    if stage_tracked {
        index
            .update_all(["*"].iter(), None)
            .map_err(CommitError::StagingFailed)?;
        index.write().map_err(CommitError::StagingFailed)?;
    }

    let staged = staged_file_count(repo).map_err(CommitError::CommitFailed)?;
    if staged == 0 {
        return Err(CommitError::NoStagedChanges);
    }

    // Write the index as a tree
    let tree_id = index.write_tree().map_err(CommitError::CommitFailed)?;
    let tree = repo.find_tree(tree_id).map_err(CommitError::CommitFailed)?;

    // Get the signature from git config
    let sig = repo.signature().map_err(CommitError::ConfigError)?;

    // No parent on an unborn branch
    let parent = match resolve_head_tree(repo).map_err(CommitError::CommitFailed)? {
        Some(_) => Some(
            repo.head()
                .and_then(|h| h.peel_to_commit())
                .map_err(CommitError::CommitFailed)?,
        ),
        None => None,
    };
    let parents: Vec<&git2::Commit> = parent.iter().collect();

    let oid = repo
        .commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
        .map_err(CommitError::CommitFailed)?;

    info!(commit = %oid, files = staged, "Committed changes");
    Ok(oid)
}
