use crate::error::{HeaderGuardError, Result};

use super::{FileFacts, HeaderParseError, HeaderRule, ParsedData, ProjectYears, YearSelectionMode};

/// The accepted headers for a set of files: an ordered list of templates.
///
/// The first template is the default, used to write new headers and to rewrite headers
/// that no template accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LicenseHeader {
    rules: Vec<HeaderRule>,
}

/// An up-to-date header for one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedHeader {
    /// Name of the template the lines were rendered from.
    pub template: String,
    pub lines: Vec<String>,
    /// Why each template rejected the existing header. Empty when one accepted it.
    pub mismatches: Vec<(String, HeaderParseError)>,
}

impl RenderedHeader {
    #[must_use]
    pub const fn matched_template(&self) -> bool {
        self.mismatches.is_empty()
    }
}

impl LicenseHeader {
    /// # Errors
    /// Returns an error if `rules` is empty.
    pub fn new(rules: Vec<HeaderRule>) -> Result<Self> {
        if rules.is_empty() {
            return Err(HeaderGuardError::Config(
                "A license header needs at least one template".to_string(),
            ));
        }
        Ok(Self { rules })
    }

    #[must_use]
    pub fn rules(&self) -> &[HeaderRule] {
        &self.rules
    }

    #[must_use]
    pub fn default_rule(&self) -> &HeaderRule {
        &self.rules[0]
    }

    /// Whether any template takes its years from the file itself.
    #[must_use]
    pub fn uses_file_years(&self) -> bool {
        self.rules
            .iter()
            .any(|rule| rule.year_selection() == YearSelectionMode::File)
    }

    /// Why each template rejects `header`, or nothing if one accepts it.
    #[must_use]
    pub fn validate(&self, header: &[String]) -> Vec<(String, HeaderParseError)> {
        let mut errors = Vec::new();

        for rule in &self.rules {
            match rule.parse_header(header).error {
                None => return Vec::new(),
                Some(error) => errors.push((rule.name().to_string(), error)),
            }
        }

        errors
    }

    /// Render the header `existing` should be replaced with.
    ///
    /// Without an existing header the default template is rendered from scratch. Otherwise
    /// the first template accepting it is rendered with the values it captured; when none
    /// does, the default template is rendered with what the first template captured.
    #[must_use]
    pub fn render(
        &self,
        existing: Option<&[String]>,
        facts: &FileFacts,
        project: &ProjectYears,
    ) -> RenderedHeader {
        let Some(existing) = existing else {
            return Self::render_with(
                self.default_rule(),
                &ParsedData::default(),
                facts,
                project,
                Vec::new(),
            );
        };

        let mut first_attempt: Option<ParsedData> = None;
        let mut mismatches = Vec::new();

        for rule in &self.rules {
            let data = rule.parse_header(existing);
            match &data.error {
                None => return Self::render_with(rule, &data, facts, project, Vec::new()),
                Some(error) => mismatches.push((rule.name().to_string(), error.clone())),
            }
            first_attempt.get_or_insert(data);
        }

        let data = first_attempt.unwrap_or_default();
        Self::render_with(self.default_rule(), &data, facts, project, mismatches)
    }

    fn render_with(
        rule: &HeaderRule,
        data: &ParsedData,
        facts: &FileFacts,
        project: &ProjectYears,
        mismatches: Vec<(String, HeaderParseError)>,
    ) -> RenderedHeader {
        let context = rule.year_selection().context(facts, project);
        RenderedHeader {
            template: rule.name().to_string(),
            lines: rule.apply(data, &context),
            mismatches,
        }
    }
}

#[cfg(test)]
#[path = "license_tests.rs"]
mod tests;
