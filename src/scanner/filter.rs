use std::path::Path;

use globset::{Glob, GlobSet, GlobSetBuilder};

use crate::error::{HeaderGuardError, Result};

pub trait FileFilter {
    fn should_include(&self, path: &Path) -> bool;
}

/// Rejects paths matching any of a set of glob patterns.
pub struct ExcludeFilter {
    exclude_patterns: GlobSet,
}

impl ExcludeFilter {
    /// Create a filter from exclude patterns.
    ///
    /// # Errors
    /// Returns an error if any exclude pattern is invalid.
    pub fn new(exclude_patterns: &[String]) -> Result<Self> {
        let mut builder = GlobSetBuilder::new();
        for pattern in exclude_patterns {
            let glob = Glob::new(pattern).map_err(|e| HeaderGuardError::InvalidPattern {
                pattern: pattern.clone(),
                source: e,
            })?;
            builder.add(glob);
        }
        let exclude_patterns = builder
            .build()
            .map_err(|e| HeaderGuardError::InvalidPattern {
                pattern: "combined patterns".to_string(),
                source: e,
            })?;

        Ok(Self { exclude_patterns })
    }
}

impl FileFilter for ExcludeFilter {
    fn should_include(&self, path: &Path) -> bool {
        !self.exclude_patterns.is_match(path)
    }
}

#[cfg(test)]
#[path = "filter_tests.rs"]
mod tests;
