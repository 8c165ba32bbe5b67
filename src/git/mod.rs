//! Git integration: restricting a run to changed files and reading modification years
//! from history.

mod diff;
mod history;

pub use diff::{ChangedFiles, GitDiff, retain_changed};
pub use history::GitHistory;

use crate::error::HeaderGuardError;

fn git_error(what: impl std::fmt::Display, e: impl std::fmt::Display) -> HeaderGuardError {
    HeaderGuardError::Git(format!("{what}: {e}"))
}

#[cfg(test)]
#[path = "diff_tests.rs"]
mod tests;
