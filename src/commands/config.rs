use std::fmt::Write;
use std::path::Path;

use crate::cli::{Cli, ConfigAction, ConfigArgs};
use crate::comment::FormatRegistry;
use crate::config::{Config, RealFileSystem, load_templates};
use crate::output::OutputFormat;
use crate::resolver::GlobRuleResolver;
use crate::{EXIT_CONFIG_ERROR, EXIT_SUCCESS, HeaderGuardError, Result};

use super::context::{load_config, print_error, relative_to};

#[must_use]
pub fn run_config(args: &ConfigArgs, cli: &Cli) -> i32 {
    let result = match &args.action {
        ConfigAction::Validate { config } => run_config_validate_impl(config.as_deref(), cli),
        ConfigAction::Show { config, format } => {
            run_config_show_impl(config.as_deref(), *format, cli)
        }
    };

    match result {
        Ok(output) => {
            print!("{output}");
            EXIT_SUCCESS
        }
        Err(e) => {
            print_error(&e);
            EXIT_CONFIG_ERROR
        }
    }
}

/// Validates a configuration and everything it references: header templates are read
/// and parsed, and rules are compiled against them.
///
/// # Errors
/// Returns the first problem found.
pub(crate) fn run_config_validate_impl(config_path: Option<&Path>, cli: &Cli) -> Result<String> {
    if let Some(path) = config_path
        && !path.exists()
    {
        return Err(HeaderGuardError::Config(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let cwd = std::env::current_dir()?;
    let loaded = load_config(config_path, cli.no_config)?;
    let base = relative_to(&loaded.base_dir(&cwd), &cwd);

    let templates = load_templates(&loaded.config, &base, &RealFileSystem)?;
    if templates.is_empty() {
        return Err(HeaderGuardError::Config(
            "No license header configured".to_string(),
        ));
    }
    let resolver = GlobRuleResolver::new(
        &loaded.config.rules,
        &templates,
        &loaded.config.scanner.exclude,
        FormatRegistry::default(),
        &base,
    )?;

    let source = loaded
        .source
        .as_deref()
        .map_or_else(|| "built-in defaults".to_string(), |p| p.display().to_string());
    let mut output = format!("Configuration is valid: {source}\n");
    let _ = writeln!(
        output,
        "  headers: {}",
        templates.keys().cloned().collect::<Vec<_>>().join(", ")
    );
    let _ = writeln!(output, "  rules: {}", resolver.rule_names().join(", "));
    Ok(output)
}

/// Shows the effective configuration.
///
/// # Errors
/// Returns an error if the configuration file cannot be loaded or serialization fails.
pub(crate) fn run_config_show_impl(
    config_path: Option<&Path>,
    format: OutputFormat,
    cli: &Cli,
) -> Result<String> {
    let config = load_config(config_path, cli.no_config)?.config;

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&config)?;
            Ok(format!("{json}\n"))
        }
        OutputFormat::Text => Ok(format_config_text(&config)),
    }
}

#[must_use]
pub fn format_config_text(config: &Config) -> String {
    let mut output = String::new();

    output.push_str("=== Effective Configuration ===\n\n");

    if let Some(version) = &config.version {
        let _ = writeln!(output, "version = \"{version}\"");
    }
    if config.debug {
        output.push_str("debug = true\n");
    }

    output.push_str("[scanner]\n");
    let _ = writeln!(output, "  gitignore = {}", config.scanner.gitignore);
    if !config.scanner.exclude.is_empty() {
        let _ = writeln!(output, "  exclude = {:?}", config.scanner.exclude);
    }
    if !config.scanner.include_paths.is_empty() {
        let _ = writeln!(output, "  include_paths = {:?}", config.scanner.include_paths);
    }

    output.push_str("\n[project]\n");
    match config.project.creation_year {
        Some(year) => {
            let _ = writeln!(output, "  creation_year = {year}");
        }
        None => output.push_str("  creation_year = (current year)\n"),
    }

    for header in &config.headers {
        output.push_str("\n[[header]]\n");
        let _ = writeln!(output, "  name = \"{}\"", header.name);
        if let Some(file) = &header.file {
            let _ = writeln!(output, "  file = \"{}\"", file.display());
        }
        if let Some(text) = &header.text {
            let _ = writeln!(output, "  text = {} line(s)", text.lines().count());
        }
    }

    for rule in &config.rules {
        output.push_str("\n[[rule]]\n");
        let _ = writeln!(output, "  name = \"{}\"", rule.name);
        let _ = writeln!(output, "  include = {:?}", rule.include);
        if let Some(format) = rule.format {
            let _ = writeln!(output, "  format = \"{format}\"");
        }
        if !rule.headers.is_empty() {
            let _ = writeln!(output, "  headers = {:?}", rule.headers);
        }
    }

    output
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
