use std::path::Path;

use indexmap::IndexMap;

use crate::config::{Config, FileSystem};
use crate::error::{HeaderGuardError, Result};
use crate::rule::HeaderRule;

/// Read and parse every declared header template, keyed by name in declaration order.
///
/// `file` sources are resolved against `base_dir`.
///
/// # Errors
/// Returns an error if a template file cannot be read, a template does not parse, or a
/// template is empty.
pub fn load_templates<F: FileSystem>(
    config: &Config,
    base_dir: &Path,
    fs: &F,
) -> Result<IndexMap<String, HeaderRule>> {
    let mut templates = IndexMap::new();

    for header in &config.headers {
        let text = match (&header.text, &header.file) {
            (Some(text), _) => text.clone(),
            (None, Some(file)) => {
                let path = base_dir.join(file);
                fs.read_to_string(&path)
                    .map_err(|source| HeaderGuardError::FileRead { path, source })?
            }
            (None, None) => {
                return Err(HeaderGuardError::Config(format!(
                    "Header '{}' needs either 'text' or 'file'",
                    header.name
                )));
            }
        };

        let lines: Vec<&str> = text.lines().collect();
        let rule =
            HeaderRule::parse(&header.name, &lines).map_err(|source| {
                HeaderGuardError::HeaderTemplate {
                    name: header.name.clone(),
                    source,
                }
            })?;

        if rule.lines().is_empty() {
            return Err(HeaderGuardError::Config(format!(
                "License header '{}' is empty",
                header.name
            )));
        }

        tracing::debug!(
            header = %header.name,
            lines = rule.lines().len(),
            "loaded license header template"
        );
        templates.insert(header.name.clone(), rule);
    }

    Ok(templates)
}

#[cfg(test)]
#[path = "templates_tests.rs"]
mod tests;
