//! Git operations: repository discovery, diffs and commits.

pub mod commit;
pub mod diff;
pub mod repository;

pub use commit::{commit_changes, with_co_author};
pub use diff::get_diff;
pub use repository::{has_changes, open_repository};
