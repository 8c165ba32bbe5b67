use std::path::PathBuf;

use serde::Serialize;

use crate::checker::{Assessment, Decision};

/// Whether a pass may rewrite files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Check,
    Apply,
}

/// What happened to one planned file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    /// The header already matches; nothing was written.
    Unchanged,
    /// Check mode found a header that needs work.
    Violation(Assessment),
    /// Apply mode added a header where there was none.
    Inserted,
    /// Apply mode rewrote an outdated header.
    Replaced,
    /// The file could not be processed.
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
    pub path: PathBuf,
    /// Name of the rule that governs the file.
    pub rule: String,
    pub outcome: FileOutcome,
}

impl FileReport {
    #[must_use]
    pub const fn decision(&self) -> Option<Decision> {
        match &self.outcome {
            FileOutcome::Violation(assessment) => Some(assessment.decision),
            _ => None,
        }
    }
}

/// Counts reported by `check`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CheckSummary {
    pub files: usize,
    pub matches: usize,
    pub missing: usize,
    pub stale: usize,
    pub unparseable: usize,
    pub errors: usize,
}

/// Counts reported by `apply`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ApplySummary {
    pub files: usize,
    pub unchanged: usize,
    pub inserted: usize,
    pub replaced: usize,
    pub failed: usize,
}

/// Per-file results of a pass, sorted by path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub mode: Mode,
    pub files: Vec<FileReport>,
}

impl RunReport {
    #[must_use]
    pub fn new(mode: Mode, mut files: Vec<FileReport>) -> Self {
        files.sort_by(|a, b| a.path.cmp(&b.path));
        Self { mode, files }
    }

    #[must_use]
    pub fn check_summary(&self) -> CheckSummary {
        let mut summary = CheckSummary {
            files: self.files.len(),
            ..CheckSummary::default()
        };
        for file in &self.files {
            match &file.outcome {
                FileOutcome::Unchanged => summary.matches += 1,
                FileOutcome::Violation(assessment) => match assessment.decision {
                    Decision::Matches => summary.matches += 1,
                    Decision::Missing => summary.missing += 1,
                    Decision::Stale => summary.stale += 1,
                    Decision::Unparseable => summary.unparseable += 1,
                },
                FileOutcome::Failed(_) => summary.errors += 1,
                FileOutcome::Inserted | FileOutcome::Replaced => {}
            }
        }
        summary
    }

    #[must_use]
    pub fn apply_summary(&self) -> ApplySummary {
        let mut summary = ApplySummary {
            files: self.files.len(),
            ..ApplySummary::default()
        };
        for file in &self.files {
            match &file.outcome {
                FileOutcome::Unchanged => summary.unchanged += 1,
                FileOutcome::Inserted => summary.inserted += 1,
                FileOutcome::Replaced => summary.replaced += 1,
                FileOutcome::Failed(_) | FileOutcome::Violation(_) => summary.failed += 1,
            }
        }
        summary
    }

    /// Files that need attention: violations in check mode, failures in either mode.
    pub fn problems(&self) -> impl Iterator<Item = &FileReport> {
        self.files.iter().filter(|file| {
            matches!(
                file.outcome,
                FileOutcome::Violation(_) | FileOutcome::Failed(_)
            )
        })
    }

    /// Whether the pass should exit with the violations code.
    #[must_use]
    pub fn has_problems(&self) -> bool {
        self.problems().next().is_some()
    }
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod tests;
