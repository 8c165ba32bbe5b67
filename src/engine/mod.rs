//! Check and apply passes over resolved files.
//!
//! Files are resolved up front so that a configuration problem such as two rules
//! claiming one file stops the run before anything is read. Each planned file is then
//! read, assessed and, in apply mode, rewritten independently of the others.

mod report;
mod splice;

pub use report::{ApplySummary, CheckSummary, FileOutcome, FileReport, Mode, RunReport};
pub use splice::{insert_header, replace_header, write_atomically};

use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::checker::{Assessment, Checker, Decision, HeaderChecker};
use crate::comment::HeaderReadResult;
use crate::error::{HeaderGuardError, Result};
use crate::git::GitHistory;
use crate::output::RunProgress;
use crate::resolver::{ResolvedRule, RuleResolver};
use crate::rule::{FileFacts, ProjectYears};

/// A file together with the rule that governs it.
#[derive(Debug, Clone)]
pub struct PlannedFile {
    pub path: PathBuf,
    pub rule: ResolvedRule,
}

/// Resolve every file, dropping the ones no rule governs.
///
/// # Errors
/// Returns the first resolver error, typically [`HeaderGuardError::AmbiguousRules`].
pub fn plan<R: RuleResolver + ?Sized>(files: &[PathBuf], resolver: &R) -> Result<Vec<PlannedFile>> {
    let mut planned = Vec::with_capacity(files.len());
    for path in files {
        match resolver.resolve(path)? {
            Some(rule) => planned.push(PlannedFile {
                path: path.clone(),
                rule,
            }),
            None => tracing::debug!(path = %path.display(), "no rule applies, skipping"),
        }
    }
    Ok(planned)
}

pub struct HeaderEngine<C: Checker = HeaderChecker> {
    checker: C,
    /// Source of per-file modification years; file timestamps are used without it.
    history: Option<GitHistory>,
}

impl HeaderEngine<HeaderChecker> {
    #[must_use]
    pub const fn new(project: ProjectYears) -> Self {
        Self {
            checker: HeaderChecker::new(project),
            history: None,
        }
    }
}

impl<C: Checker + Sync> HeaderEngine<C> {
    #[must_use]
    pub const fn with_checker(checker: C) -> Self {
        Self {
            checker,
            history: None,
        }
    }

    /// Take modification years of files from commit history.
    #[must_use]
    pub fn with_history(mut self, history: Option<GitHistory>) -> Self {
        self.history = history;
        self
    }

    /// Run `mode` over every planned file in parallel.
    #[must_use]
    pub fn run(&self, files: &[PlannedFile], mode: Mode, progress: &RunProgress) -> RunReport {
        let reports: Vec<FileReport> = files
            .par_iter()
            .map(|file| {
                let report = match mode {
                    Mode::Check => self.check_file(file),
                    Mode::Apply => self.apply_file(file),
                };
                progress.inc();
                report
            })
            .collect();
        progress.finish();

        RunReport::new(mode, reports)
    }

    /// Assess one file without touching it.
    #[must_use]
    pub fn check_file(&self, file: &PlannedFile) -> FileReport {
        let outcome = match self.assess(file) {
            Ok((_, _, assessment)) if assessment.decision == Decision::Matches => {
                FileOutcome::Unchanged
            }
            Ok((_, _, assessment)) => FileOutcome::Violation(assessment),
            Err(error) => failure(&error),
        };
        report(file, outcome)
    }

    /// Bring one file's header up to date, writing only when it changes.
    #[must_use]
    pub fn apply_file(&self, file: &PlannedFile) -> FileReport {
        let outcome = match self.assess(file) {
            Ok((source, read, assessment)) => rewrite(file, &source, &read, assessment),
            Err(error) => failure(&error),
        };
        report(file, outcome)
    }

    fn assess(&self, file: &PlannedFile) -> Result<(String, HeaderReadResult, Assessment)> {
        let source = read_source(&file.path)?;
        let mut facts = FileFacts::from_path(&file.path)?;
        if let Some(history) = &self.history
            && file.rule.header.uses_file_years()
        {
            facts.modified_year = history.modification_year(&file.path);
        }
        let read = file.rule.format.read_header_comment(&source);
        let assessment = self.checker.assess(&read, &file.rule.header, &facts);

        tracing::debug!(
            path = %file.path.display(),
            rule = %file.rule.name,
            decision = %assessment.decision,
            "visited file"
        );
        Ok((source, read, assessment))
    }
}

fn rewrite(
    file: &PlannedFile,
    source: &str,
    read: &HeaderReadResult,
    assessment: Assessment,
) -> FileOutcome {
    let format = file.rule.format;
    let (content, outcome) = match (assessment.decision, assessment.expected) {
        (Decision::Matches, _) => return FileOutcome::Unchanged,
        (Decision::Unparseable, _) | (_, None) => {
            return FileOutcome::Failed(assessment.reasons.join("; "));
        }
        (Decision::Missing, Some(expected)) => (
            insert_header(source, format, &expected),
            FileOutcome::Inserted,
        ),
        (Decision::Stale, Some(expected)) => (
            replace_header(source, read, format, &expected),
            FileOutcome::Replaced,
        ),
    };

    match write_atomically(&file.path, &content) {
        Ok(()) => outcome,
        Err(error) => failure(&error),
    }
}

fn read_source(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| HeaderGuardError::FileRead {
        path: path.to_path_buf(),
        source,
    })
}

fn failure(error: &HeaderGuardError) -> FileOutcome {
    let message = match std::error::Error::source(error) {
        Some(source) => format!("{error}: {source}"),
        None => error.to_string(),
    };
    FileOutcome::Failed(message)
}

fn report(file: &PlannedFile, outcome: FileOutcome) -> FileReport {
    FileReport {
        path: file.path.clone(),
        rule: file.rule.name.clone(),
        outcome,
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
