use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::time::SystemTime;

use chrono::{DateTime, Datelike, Local};
use serde::{Deserialize, Serialize};

use crate::error::{HeaderGuardError, Result};

/// What placeholder values are computed from for one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderFileContext {
    pub file_name: String,
    pub creation_year: i32,
    pub last_modified_year: i32,
}

/// Where the years of a header come from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum YearSelectionMode {
    /// One creation year and one last-modification year for the whole project.
    #[default]
    Project,
    /// Each file's own creation and last-modification years.
    File,
}

/// Project-wide years used by [`YearSelectionMode::Project`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProjectYears {
    pub creation_year: i32,
    pub modified_year: i32,
}

impl ProjectYears {
    /// Years for a project created in `creation_year` and last changed in
    /// `modified_year`. An unknown modification year is this year; an unknown creation
    /// year is the modification year.
    #[must_use]
    pub fn new(creation_year: Option<i32>, modified_year: Option<i32>) -> Self {
        let modified_year = modified_year.unwrap_or_else(|| Local::now().year());
        Self {
            creation_year: creation_year.unwrap_or(modified_year),
            modified_year,
        }
    }
}

/// Filesystem facts about a file, gathered once before rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileFacts {
    pub file_name: String,
    pub created_year: Option<i32>,
    pub modified_year: i32,
}

impl FileFacts {
    /// Read the name and timestamps of `path`.
    ///
    /// # Errors
    /// Returns an error if the file metadata cannot be read.
    pub fn from_path(path: &Path) -> Result<Self> {
        let metadata = std::fs::metadata(path).map_err(|source| HeaderGuardError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;

        let modified = metadata.modified().ok();
        // Not every filesystem records a birth time.
        let created = metadata.created().ok();

        Ok(Self {
            file_name: path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default(),
            created_year: created.map(year_of),
            modified_year: modified.map_or_else(|| Local::now().year(), year_of),
        })
    }
}

impl YearSelectionMode {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Project => "project",
            Self::File => "file",
        }
    }

    /// Build the rendering context for a file.
    #[must_use]
    pub fn context(self, facts: &FileFacts, project: &ProjectYears) -> HeaderFileContext {
        let (creation_year, last_modified_year) = match self {
            Self::Project => (project.creation_year, project.modified_year),
            Self::File => (
                facts.created_year.unwrap_or(facts.modified_year),
                facts.modified_year,
            ),
        };

        HeaderFileContext {
            file_name: facts.file_name.clone(),
            creation_year,
            last_modified_year,
        }
    }
}

impl fmt::Display for YearSelectionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for YearSelectionMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "project" => Ok(Self::Project),
            "file" => Ok(Self::File),
            _ => Err(format!("Invalid year selection mode \"{s}\".")),
        }
    }
}

fn year_of(time: SystemTime) -> i32 {
    DateTime::<Local>::from(time).year()
}

#[cfg(test)]
#[path = "context_tests.rs"]
mod tests;
