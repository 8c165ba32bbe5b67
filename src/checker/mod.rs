mod decision;

pub use decision::{Assessment, Decision};

use crate::comment::HeaderReadResult;
use crate::rule::{FileFacts, LicenseHeader, ProjectYears};

pub trait Checker {
    /// Decide how the header found in a file relates to the expected license header.
    fn assess(
        &self,
        read: &HeaderReadResult,
        header: &LicenseHeader,
        facts: &FileFacts,
    ) -> Assessment;
}

/// Compares header comments against license header templates.
#[derive(Debug, Clone, Copy)]
pub struct HeaderChecker {
    project: ProjectYears,
}

impl HeaderChecker {
    #[must_use]
    pub const fn new(project: ProjectYears) -> Self {
        Self { project }
    }
}

impl Checker for HeaderChecker {
    fn assess(
        &self,
        read: &HeaderReadResult,
        header: &LicenseHeader,
        facts: &FileFacts,
    ) -> Assessment {
        if read.unterminated {
            return Assessment {
                decision: Decision::Unparseable,
                template: None,
                expected: None,
                reasons: vec!["Header comment is never closed".to_string()],
            };
        }

        let rendered = header.render(read.existing.as_deref(), facts, &self.project);

        let (decision, reasons) = match &read.existing {
            None => (Decision::Missing, Vec::new()),
            Some(existing) if *existing == rendered.lines => (Decision::Matches, Vec::new()),
            Some(_) if rendered.matched_template() => (
                Decision::Stale,
                vec![format!(
                    "Outdated placeholder values for template '{}'",
                    rendered.template
                )],
            ),
            Some(_) => (
                Decision::Stale,
                rendered
                    .mismatches
                    .iter()
                    .map(|(template, error)| format!("{template}: {error}"))
                    .collect(),
            ),
        };

        tracing::debug!(
            template = %rendered.template,
            decision = %decision,
            "assessed header"
        );

        Assessment {
            decision,
            template: Some(rendered.template),
            expected: Some(rendered.lines),
            reasons,
        }
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
