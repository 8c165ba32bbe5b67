mod directory;
mod filter;

pub use directory::DirectoryScanner;
pub use filter::{ExcludeFilter, FileFilter};

use std::path::{Path, PathBuf};

use crate::error::Result;

/// Trait for discovering the files under a path.
pub trait FileScanner {
    /// Return every file under `root` the scanner accepts. A file `root` is returned
    /// as-is when accepted.
    ///
    /// # Errors
    /// Returns an error if `root` does not exist.
    fn scan(&self, root: &Path) -> Result<Vec<PathBuf>>;

    /// Scan every root, returning a sorted list without duplicates.
    ///
    /// # Errors
    /// Returns the first error of [`FileScanner::scan`].
    fn scan_all(&self, roots: &[PathBuf]) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        for root in roots {
            files.extend(self.scan(root)?);
        }
        files.sort();
        files.dedup();
        Ok(files)
    }
}
