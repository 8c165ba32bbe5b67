use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use super::{FileFilter, FileScanner};
use crate::error::{HeaderGuardError, Result};

const GIT_DIR: &str = ".git";

/// Walks directory trees, optionally honoring `.gitignore` files.
pub struct DirectoryScanner<F: FileFilter> {
    filter: F,
    use_gitignore: bool,
}

impl<F: FileFilter> DirectoryScanner<F> {
    #[must_use]
    pub const fn new(filter: F) -> Self {
        Self {
            filter,
            use_gitignore: false,
        }
    }

    #[must_use]
    pub const fn with_gitignore(filter: F, use_gitignore: bool) -> Self {
        Self {
            filter,
            use_gitignore,
        }
    }

    fn scan_without_gitignore(&self, root: &Path) -> Vec<PathBuf> {
        WalkDir::new(root)
            .into_iter()
            .filter_entry(|e| e.file_name() != GIT_DIR)
            .filter_map(std::result::Result::ok)
            .filter(|e| e.file_type().is_file() && self.filter.should_include(e.path()))
            .map(walkdir::DirEntry::into_path)
            .collect()
    }

    fn scan_with_gitignore(&self, root: &Path) -> Vec<PathBuf> {
        use ignore::WalkBuilder;

        WalkBuilder::new(root)
            .git_ignore(true)
            .git_global(true)
            .git_exclude(true)
            .require_git(false)
            .hidden(false)
            .parents(false)
            .filter_entry(|e| e.file_name() != GIT_DIR)
            .build()
            .filter_map(std::result::Result::ok)
            .filter(|e| e.file_type().is_some_and(|ft| ft.is_file()))
            .filter(|e| self.filter.should_include(e.path()))
            .map(ignore::DirEntry::into_path)
            .collect()
    }
}

impl<F: FileFilter> FileScanner for DirectoryScanner<F> {
    fn scan(&self, root: &Path) -> Result<Vec<PathBuf>> {
        let metadata = std::fs::metadata(root).map_err(|source| HeaderGuardError::FileRead {
            path: root.to_path_buf(),
            source,
        })?;

        // Explicitly named files bypass .gitignore but not the exclude patterns.
        if metadata.is_file() {
            return Ok(if self.filter.should_include(root) {
                vec![root.to_path_buf()]
            } else {
                Vec::new()
            });
        }

        let files = if self.use_gitignore {
            self.scan_with_gitignore(root)
        } else {
            self.scan_without_gitignore(root)
        };
        tracing::debug!(root = %root.display(), files = files.len(), "scanned directory");
        Ok(files)
    }
}

#[cfg(test)]
#[path = "directory_tests.rs"]
mod tests;
