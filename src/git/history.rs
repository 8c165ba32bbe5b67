use std::path::{Path, PathBuf};

use chrono::{DateTime, Datelike, FixedOffset, Local};
use gix::revision::walk::Sorting;
use gix::traverse::commit::simple::CommitTimeOrder;

use super::git_error;
use crate::error::{HeaderGuardError, Result};

/// Last-modification years taken from commit history.
///
/// A file counts as modified this year when its working copy differs from HEAD or it
/// was never committed. Otherwise its year is the author year of the newest commit
/// that changed it.
pub struct GitHistory {
    repo: gix::ThreadSafeRepository,
    workdir: PathBuf,
}

impl GitHistory {
    /// Open the repository containing `path`.
    ///
    /// # Errors
    /// Returns an error if no git repository is found or it has no working directory.
    pub fn discover(path: &Path) -> Result<Self> {
        let repo =
            gix::discover(path).map_err(|e| git_error("Failed to discover git repository", e))?;
        let workdir = repo
            .workdir()
            .ok_or_else(|| HeaderGuardError::Git("Repository has no working directory".into()))?;
        let workdir = dunce::canonicalize(workdir)?;

        Ok(Self {
            repo: repo.into_sync(),
            workdir,
        })
    }

    /// Author year of the HEAD commit, `None` while HEAD is unborn.
    #[must_use]
    pub fn head_year(&self) -> Option<i32> {
        let repo = self.repo.to_thread_local();
        let head = repo.head_commit().ok()?;
        author_year(&head)
            .inspect_err(|error| tracing::debug!(%error, "unreadable HEAD author"))
            .ok()
    }

    /// Year `path` was last modified, this year when it has uncommitted changes.
    #[must_use]
    pub fn modification_year(&self, path: &Path) -> i32 {
        match self.committed_year(path) {
            Ok(Some(year)) => year,
            Ok(None) => this_year(),
            Err(error) => {
                tracing::debug!(path = %path.display(), %error, "no commit year, using this year");
                this_year()
            }
        }
    }

    fn committed_year(&self, path: &Path) -> Result<Option<i32>> {
        let canonical = dunce::canonicalize(path)?;
        let Ok(relative) = canonical.strip_prefix(&self.workdir) else {
            return Ok(None);
        };
        let repo = self.repo.to_thread_local();
        let Ok(head) = repo.head_commit() else {
            return Ok(None);
        };

        let Some(committed) = blob_at(&head, relative)? else {
            return Ok(None);
        };
        let committed = repo
            .find_object(committed)
            .map_err(|e| git_error("Failed to read committed blob", e))?;
        if committed.data != std::fs::read(&canonical)? {
            return Ok(None);
        }

        let walk = repo
            .rev_walk([head.id])
            .sorting(Sorting::ByCommitTime(CommitTimeOrder::NewestFirst))
            .all()
            .map_err(|e| git_error("Failed to walk history", e))?;

        for info in walk {
            let info = info.map_err(|e| git_error("Failed to walk history", e))?;
            let commit = info
                .object()
                .map_err(|e| git_error("Failed to read commit", e))?;
            let blob = blob_at(&commit, relative)?;

            let mut same_as_a_parent = false;
            for parent in info.parent_ids() {
                let parent = parent
                    .object()
                    .map_err(|e| git_error("Failed to read parent commit", e))?
                    .try_into_commit()
                    .map_err(|e| git_error("Parent is not a commit", e))?;
                if blob_at(&parent, relative)? == blob {
                    same_as_a_parent = true;
                    break;
                }
            }

            if !same_as_a_parent && blob.is_some() {
                return author_year(&commit).map(Some);
            }
        }
        Ok(None)
    }
}

/// Id of the blob at `relative` in the tree of `commit`.
fn blob_at(commit: &gix::Commit<'_>, relative: &Path) -> Result<Option<gix::ObjectId>> {
    let tree = commit
        .tree()
        .map_err(|e| git_error("Failed to get commit tree", e))?;
    let entry = tree
        .lookup_entry_by_path(relative)
        .map_err(|e| git_error("Failed to look up tree entry", e))?;

    Ok(entry
        .filter(|entry| entry.mode().is_blob())
        .map(|entry| entry.object_id()))
}

/// Year of the author timestamp, in the author's own time zone.
fn author_year(commit: &gix::Commit<'_>) -> Result<i32> {
    let time = commit
        .author()
        .map_err(|e| git_error("Failed to decode commit", e))?
        .time()
        .map_err(|e| git_error("Invalid author time", e))?;
    let offset = FixedOffset::east_opt(time.offset)
        .ok_or_else(|| HeaderGuardError::Git(format!("Invalid time zone offset {}", time.offset)))?;
    let instant = DateTime::from_timestamp(time.seconds, 0)
        .ok_or_else(|| HeaderGuardError::Git(format!("Invalid commit time {}", time.seconds)))?;

    Ok(instant.with_timezone(&offset).year())
}

fn this_year() -> i32 {
    Local::now().year()
}

#[cfg(test)]
#[path = "history_tests.rs"]
mod tests;
