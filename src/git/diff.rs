//! Diff text for staged or working-tree changes using git2.

use git2::{Diff, DiffFormat, Repository};
use tracing::info;

use crate::error::DiffError;
use crate::git::repository::resolve_head_tree;

/// Unified diff text for the pending changes.
///
/// With `cached`, compares HEAD to the index (`git diff --cached`).
/// Otherwise compares HEAD to the working tree through the index
/// (`git diff HEAD`), so untracked files are not included. A repository
/// without commits is diffed against the empty tree.
pub fn get_diff(repo: &Repository, cached: bool) -> Result<String, DiffError> {
    let head_tree = resolve_head_tree(repo).map_err(DiffError::HeadFailed)?;

    let diff = if cached {
        repo.diff_tree_to_index(head_tree.as_ref(), None, None)
    } else {
        repo.diff_tree_to_workdir_with_index(head_tree.as_ref(), None)
    }
    .map_err(DiffError::DiffFailed)?;

    let text = patch_text(&diff)?;
    info!(
        files = diff.deltas().len(),
        bytes = text.len(),
        cached,
        "Successfully fetched git diff."
    );
    Ok(text)
}

/// Render a diff in patch format, origin characters included.
fn patch_text(diff: &Diff<'_>) -> Result<String, DiffError> {
    let mut text = String::new();

    diff.print(DiffFormat::Patch, |_delta, _hunk, line| {
        let origin = line.origin();
        if origin == '+' || origin == '-' || origin == ' ' {
            text.push(origin);
        }
        text.push_str(&String::from_utf8_lossy(line.content()));
        true
    })
    .map_err(DiffError::DiffFailed)?;

    Ok(text)
}
