//! Assigns a header format and license header to each file path.

use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use globset::{Glob, GlobSet, GlobSetBuilder};
use indexmap::IndexMap;

use crate::comment::{FormatRegistry, HeaderFormat};
use crate::config::LicenseRuleConfig;
use crate::error::{HeaderGuardError, Result};
use crate::rule::{HeaderRule, LicenseHeader};

/// The rule that governs one file.
#[derive(Debug, Clone)]
pub struct ResolvedRule {
    pub name: String,
    pub format: HeaderFormat,
    pub header: Arc<LicenseHeader>,
}

pub trait RuleResolver {
    /// Find the rule for `path`, or `None` when the file is not governed by any rule.
    ///
    /// # Errors
    /// Returns [`HeaderGuardError::AmbiguousRules`] when more than one rule matches.
    fn resolve(&self, path: &Path) -> Result<Option<ResolvedRule>>;
}

struct CompiledRule {
    name: String,
    matcher: GlobSet,
    format: Option<HeaderFormat>,
    header: Arc<LicenseHeader>,
}

/// Resolves rules by matching glob patterns against paths relative to a base directory.
pub struct GlobRuleResolver {
    rules: Vec<CompiledRule>,
    exclude: GlobSet,
    registry: FormatRegistry,
    base: PathBuf,
}

impl GlobRuleResolver {
    /// Compile `rules` against the declared `templates`.
    ///
    /// A rule without `headers` uses every template in declaration order. Without any
    /// rule, one rule per registry format group is synthesized.
    ///
    /// # Errors
    /// Returns an error for an invalid glob, an unknown header name, or when there is no
    /// template at all.
    pub fn new(
        rules: &[LicenseRuleConfig],
        templates: &IndexMap<String, HeaderRule>,
        exclude: &[String],
        registry: FormatRegistry,
        base: &Path,
    ) -> Result<Self> {
        let rules = if rules.is_empty() {
            implicit_rules(&registry)
        } else {
            rules.to_vec()
        };

        let compiled = rules
            .iter()
            .map(|rule| compile_rule(rule, templates))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            rules: compiled,
            exclude: build_glob_set(exclude)?,
            registry,
            base: base.to_path_buf(),
        })
    }

    /// Names of the compiled rules, in declaration order.
    #[must_use]
    pub fn rule_names(&self) -> Vec<&str> {
        self.rules.iter().map(|rule| rule.name.as_str()).collect()
    }

    /// `path` relative to the base directory, without `.` components.
    fn relative(&self, path: &Path) -> PathBuf {
        let normalized: PathBuf = path
            .components()
            .filter(|component| !matches!(component, Component::CurDir))
            .collect();
        match normalized.strip_prefix(&self.base) {
            Ok(relative) => relative.to_path_buf(),
            Err(_) => normalized,
        }
    }
}

impl RuleResolver for GlobRuleResolver {
    fn resolve(&self, path: &Path) -> Result<Option<ResolvedRule>> {
        let relative = self.relative(path);
        if self.exclude.is_match(&relative) {
            return Ok(None);
        }

        let matching: Vec<&CompiledRule> = self
            .rules
            .iter()
            .filter(|rule| rule.matcher.is_match(&relative))
            .collect();

        let rule = match matching.as_slice() {
            [] => return Ok(None),
            [rule] => *rule,
            _ => {
                return Err(HeaderGuardError::AmbiguousRules {
                    path: path.to_path_buf(),
                    rules: matching.iter().map(|rule| rule.name.clone()).collect(),
                });
            }
        };

        let format = rule.format.or_else(|| {
            relative
                .extension()
                .and_then(|ext| ext.to_str())
                .and_then(|ext| self.registry.get_by_extension(ext))
        });

        let Some(format) = format else {
            tracing::debug!(
                path = %path.display(),
                rule = %rule.name,
                "no header format known for file, skipping"
            );
            return Ok(None);
        };

        Ok(Some(ResolvedRule {
            name: rule.name.clone(),
            format,
            header: Arc::clone(&rule.header),
        }))
    }
}

fn compile_rule(
    rule: &LicenseRuleConfig,
    templates: &IndexMap<String, HeaderRule>,
) -> Result<CompiledRule> {
    let selected: Vec<HeaderRule> = if rule.headers.is_empty() {
        templates.values().cloned().collect()
    } else {
        rule.headers
            .iter()
            .map(|name| {
                templates.get(name).cloned().ok_or_else(|| {
                    HeaderGuardError::Config(format!(
                        "Rule '{}' references unknown header '{name}'",
                        rule.name
                    ))
                })
            })
            .collect::<Result<_>>()?
    };

    let header = LicenseHeader::new(selected).map_err(|_| {
        HeaderGuardError::Config(format!(
            "Rule '{}' has no license header to apply",
            rule.name
        ))
    })?;

    Ok(CompiledRule {
        name: rule.name.clone(),
        matcher: build_glob_set(&rule.include)?,
        format: rule.format,
        header: Arc::new(header),
    })
}

fn implicit_rules(registry: &FormatRegistry) -> Vec<LicenseRuleConfig> {
    registry
        .all()
        .iter()
        .map(|association| LicenseRuleConfig {
            name: association.name.clone(),
            include: association
                .extensions
                .iter()
                .map(|ext| format!("**/*.{ext}"))
                .collect(),
            format: Some(association.format),
            headers: Vec::new(),
        })
        .collect()
}

fn build_glob_set(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = Glob::new(pattern).map_err(|e| HeaderGuardError::InvalidPattern {
            pattern: pattern.clone(),
            source: e,
        })?;
        builder.add(glob);
    }
    builder
        .build()
        .map_err(|e| HeaderGuardError::InvalidPattern {
            pattern: "combined patterns".to_string(),
            source: e,
        })
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
