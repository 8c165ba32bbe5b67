//! Configuration semantic validation.
//!
//! Checks the cross-field constraints serde cannot express: header sources, name
//! uniqueness, header references and glob syntax.

use std::collections::HashSet;

use crate::config::Config;
use crate::{HeaderGuardError, Result};

/// Validates semantic correctness of a configuration.
///
/// # Errors
/// Returns an error if a header has no or two sources, names are duplicated, a rule
/// references an undeclared header, or a glob pattern is invalid.
pub fn validate_config_semantics(config: &Config) -> Result<()> {
    validate_headers(config)?;
    validate_rules(config)?;
    validate_glob_patterns(config)?;
    Ok(())
}

fn validate_headers(config: &Config) -> Result<()> {
    let mut names = HashSet::new();

    for (i, header) in config.headers.iter().enumerate() {
        if header.name.trim().is_empty() {
            return Err(HeaderGuardError::Config(format!(
                "header[{i}].name must not be empty"
            )));
        }
        if !names.insert(header.name.as_str()) {
            return Err(HeaderGuardError::Config(format!(
                "Duplicate header name '{}'",
                header.name
            )));
        }
        match (&header.text, &header.file) {
            (Some(_), None) | (None, Some(_)) => {}
            (Some(_), Some(_)) => {
                return Err(HeaderGuardError::Config(format!(
                    "Header '{}' sets both 'text' and 'file'; use only one",
                    header.name
                )));
            }
            (None, None) => {
                return Err(HeaderGuardError::Config(format!(
                    "Header '{}' needs either 'text' or 'file'",
                    header.name
                )));
            }
        }
    }
    Ok(())
}

fn validate_rules(config: &Config) -> Result<()> {
    let declared: HashSet<&str> = config.headers.iter().map(|h| h.name.as_str()).collect();
    let mut names = HashSet::new();

    for (i, rule) in config.rules.iter().enumerate() {
        if rule.name.trim().is_empty() {
            return Err(HeaderGuardError::Config(format!(
                "rule[{i}].name must not be empty"
            )));
        }
        if !names.insert(rule.name.as_str()) {
            return Err(HeaderGuardError::Config(format!(
                "Duplicate rule name '{}'",
                rule.name
            )));
        }
        if rule.include.is_empty() {
            return Err(HeaderGuardError::Config(format!(
                "Rule '{}' must have at least one include pattern",
                rule.name
            )));
        }
        if let Some(unknown) = rule
            .headers
            .iter()
            .find(|name| !declared.contains(name.as_str()))
        {
            return Err(HeaderGuardError::Config(format!(
                "Rule '{}' references unknown header '{unknown}'",
                rule.name
            )));
        }
    }
    Ok(())
}

fn validate_glob_patterns(config: &Config) -> Result<()> {
    let patterns = config
        .scanner
        .exclude
        .iter()
        .chain(config.rules.iter().flat_map(|rule| &rule.include));

    for pattern in patterns {
        globset::Glob::new(pattern).map_err(|e| HeaderGuardError::InvalidPattern {
            pattern: pattern.clone(),
            source: e,
        })?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "validation_tests.rs"]
mod tests;
