use serde::Serialize;

use crate::checker::Decision;
use crate::engine::{ApplySummary, CheckSummary, FileOutcome, FileReport, Mode, RunReport};
use crate::error::Result;

use super::{OutputFormatter, display_path};

pub struct JsonFormatter;

#[derive(Serialize)]
struct CheckOutput<'a> {
    summary: CheckSummary,
    violations: Vec<Violation<'a>>,
    errors: Vec<FileError<'a>>,
}

#[derive(Serialize)]
struct ApplyOutput<'a> {
    summary: ApplySummary,
    changes: Vec<Change<'a>>,
    errors: Vec<FileError<'a>>,
}

#[derive(Serialize)]
struct Violation<'a> {
    path: String,
    rule: &'a str,
    decision: Decision,
    #[serde(skip_serializing_if = "Option::is_none")]
    template: Option<&'a str>,
    reasons: &'a [String],
}

#[derive(Serialize)]
struct Change<'a> {
    path: String,
    rule: &'a str,
    action: &'static str,
}

#[derive(Serialize)]
struct FileError<'a> {
    path: String,
    message: &'a str,
}

impl OutputFormatter for JsonFormatter {
    fn format(&self, report: &RunReport) -> Result<String> {
        let errors = report.files.iter().filter_map(file_error).collect();

        let json = match report.mode {
            Mode::Check => serde_json::to_string_pretty(&CheckOutput {
                summary: report.check_summary(),
                violations: report.files.iter().filter_map(violation).collect(),
                errors,
            })?,
            Mode::Apply => serde_json::to_string_pretty(&ApplyOutput {
                summary: report.apply_summary(),
                changes: report.files.iter().filter_map(change).collect(),
                errors,
            })?,
        };
        Ok(json)
    }
}

fn violation(file: &FileReport) -> Option<Violation<'_>> {
    let FileOutcome::Violation(assessment) = &file.outcome else {
        return None;
    };
    Some(Violation {
        path: display_path(&file.path),
        rule: &file.rule,
        decision: assessment.decision,
        template: assessment.template.as_deref(),
        reasons: &assessment.reasons,
    })
}

fn change(file: &FileReport) -> Option<Change<'_>> {
    let action = match file.outcome {
        FileOutcome::Inserted => "inserted",
        FileOutcome::Replaced => "replaced",
        _ => return None,
    };
    Some(Change {
        path: display_path(&file.path),
        rule: &file.rule,
        action,
    })
}

fn file_error(file: &FileReport) -> Option<FileError<'_>> {
    let FileOutcome::Failed(message) = &file.outcome else {
        return None;
    };
    Some(FileError {
        path: display_path(&file.path),
        message,
    })
}

#[cfg(test)]
#[path = "json_tests.rs"]
mod tests;
