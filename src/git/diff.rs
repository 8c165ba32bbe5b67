use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use super::git_error;
use crate::error::{HeaderGuardError, Result};

/// Returns the set of files changed compared to a git reference.
pub trait ChangedFiles {
    /// Absolute paths of files that differ between `base_ref` and HEAD.
    ///
    /// # Errors
    /// Returns an error if the reference cannot be parsed or the repository cannot be accessed.
    fn get_changed_files(&self, base_ref: &str) -> Result<HashSet<PathBuf>>;
}

/// Committed-tree comparison backed by gix.
pub struct GitDiff {
    repo_path: PathBuf,
    workdir: PathBuf,
}

type TreePaths = HashMap<PathBuf, gix::ObjectId>;

impl GitDiff {
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

        tracing::debug!(workdir = %workdir.display(), "discovered git repository");
        Ok(Self {
            repo_path: repo.path().to_path_buf(),
            workdir,
        })
    }

    /// Canonical working directory of the repository.
    #[must_use]
    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    fn open_repo(&self) -> Result<gix::Repository> {
        gix::open(&self.repo_path).map_err(|e| git_error("Failed to open git repository", e))
    }

    fn tree_of<'repo>(repo: &'repo gix::Repository, reference: &str) -> Result<gix::Tree<'repo>> {
        repo.rev_parse_single(reference)
            .map_err(|e| git_error(format!("Failed to parse reference '{reference}'"), e))?
            .object()
            .map_err(|e| git_error(format!("Failed to get object for '{reference}'"), e))?
            .peel_to_commit()
            .map_err(|e| git_error(format!("Failed to peel to commit '{reference}'"), e))?
            .tree()
            .map_err(|e| git_error(format!("Failed to get tree for '{reference}'"), e))
    }

    fn collect_tree_paths(tree: &gix::Tree<'_>) -> Result<TreePaths> {
        let mut paths = HashMap::new();
        Self::collect_tree_paths_recursive(tree, Path::new(""), &mut paths)?;
        Ok(paths)
    }

    fn collect_tree_paths_recursive(
        tree: &gix::Tree<'_>,
        prefix: &Path,
        paths: &mut TreePaths,
    ) -> Result<()> {
        for entry in tree.iter() {
            let entry = entry.map_err(|e| git_error("Failed to read tree entry", e))?;
            let name = std::str::from_utf8(entry.filename())
                .map_err(|e| git_error("Invalid filename encoding", e))?;
            let path = prefix.join(name);

            match entry.mode().kind() {
                gix::object::tree::EntryKind::Blob
                | gix::object::tree::EntryKind::BlobExecutable => {
                    paths.insert(path, entry.oid().into());
                }
                gix::object::tree::EntryKind::Tree => {
                    let subtree = entry
                        .object()
                        .map_err(|e| git_error("Failed to get subtree object", e))?
                        .into_tree();
                    Self::collect_tree_paths_recursive(&subtree, &path, paths)?;
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Absolute paths of files added or modified between two references.
    ///
    /// Files deleted by `target_ref` are left out: there is nothing to check in them.
    ///
    /// # Errors
    /// Returns an error if either reference cannot be parsed or the repository cannot be accessed.
    pub fn get_changed_files_range(
        &self,
        base_ref: &str,
        target_ref: &str,
    ) -> Result<HashSet<PathBuf>> {
        let repo = self.open_repo()?;
        let base_paths = Self::collect_tree_paths(&Self::tree_of(&repo, base_ref)?)?;
        let target_paths = Self::collect_tree_paths(&Self::tree_of(&repo, target_ref)?)?;

        let changed: HashSet<PathBuf> = target_paths
            .iter()
            .filter(|(path, oid)| base_paths.get(*path) != Some(*oid))
            .map(|(path, _)| self.workdir.join(path))
            .collect();

        tracing::debug!(
            base = base_ref,
            target = target_ref,
            changed = changed.len(),
            "computed changed files"
        );
        Ok(changed)
    }
}

impl ChangedFiles for GitDiff {
    fn get_changed_files(&self, base_ref: &str) -> Result<HashSet<PathBuf>> {
        self.get_changed_files_range(base_ref, "HEAD")
    }
}

/// Keep the files whose canonical path is in `changed`.
#[must_use]
pub fn retain_changed(files: Vec<PathBuf>, changed: &HashSet<PathBuf>) -> Vec<PathBuf> {
    files
        .into_iter()
        .filter(|file| {
            dunce::canonicalize(file).is_ok_and(|canonical| changed.contains(&canonical))
        })
        .collect()
}
