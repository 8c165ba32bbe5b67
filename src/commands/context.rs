//! Pipeline shared by `check` and `apply`: configuration, discovery, planning and the
//! parallel pass itself.

use std::fs;
use std::path::{Path, PathBuf};

use crate::cli::{Cli, ColorChoice, RunArgs};
use crate::comment::FormatRegistry;
use crate::config::{Config, ConfigLoader, FileConfigLoader, LoadResult, RealFileSystem, load_templates};
use crate::engine::{HeaderEngine, Mode, RunReport, plan};
use crate::error::{HeaderGuardError, Result};
use crate::git::{ChangedFiles, GitDiff, GitHistory, retain_changed};
use crate::output::{ColorMode, RunProgress};
use crate::resolver::GlobRuleResolver;
use crate::rule::ProjectYears;
use crate::scanner::{DirectoryScanner, ExcludeFilter, FileScanner};

pub(crate) const fn color_choice_to_mode(choice: ColorChoice) -> ColorMode {
    match choice {
        ColorChoice::Auto => ColorMode::Auto,
        ColorChoice::Always => ColorMode::Always,
        ColorChoice::Never => ColorMode::Never,
    }
}

/// Print an error and its causes to stderr.
pub fn print_error(error: &HeaderGuardError) {
    eprintln!("Error: {error}");
    let mut source = std::error::Error::source(error);
    while let Some(cause) = source {
        eprintln!("  caused by: {cause}");
        source = cause.source();
    }
}

/// Load the configuration named on the command line, or discover one.
///
/// # Errors
/// Returns an error if the configuration file cannot be loaded.
pub(crate) fn load_config(config_path: Option<&Path>, no_config: bool) -> Result<LoadResult> {
    if no_config {
        return Ok(LoadResult {
            config: Config::default(),
            source: None,
        });
    }

    let loader = FileConfigLoader::new();
    config_path.map_or_else(|| loader.load(), |path| loader.load_from_path(path))
}

/// `path` relative to `cwd` when it lies inside it, unchanged otherwise.
pub(crate) fn relative_to(path: &Path, cwd: &Path) -> PathBuf {
    path.strip_prefix(cwd)
        .map_or_else(|_| path.to_path_buf(), Path::to_path_buf)
}

/// Where to look for files: the command line paths, or the configured include paths
/// when none were given.
pub(crate) fn scan_roots(args: &RunArgs, config: &Config, base: &Path, cwd: &Path) -> Vec<PathBuf> {
    let default_paths = args.paths.len() == 1 && args.paths[0] == Path::new(".");
    if default_paths && !config.scanner.include_paths.is_empty() {
        return config
            .scanner
            .include_paths
            .iter()
            .map(|path| base.join(path))
            .collect();
    }

    args.paths.iter().map(|path| relative_to(path, cwd)).collect()
}

/// Write output to a file or stdout.
///
/// The `quiet` flag only affects stdout; file output is always written.
pub(crate) fn write_output(output_path: Option<&Path>, content: &str, quiet: bool) -> Result<()> {
    if let Some(path) = output_path {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, content).map_err(|source| HeaderGuardError::FileWrite {
            path: path.to_path_buf(),
            source,
        })?;
    } else if !quiet {
        print!("{content}");
    }
    Ok(())
}

/// Everything a pass needs, built from the configuration and the command line.
pub(crate) struct RunContext {
    pub scanner: DirectoryScanner<ExcludeFilter>,
    pub resolver: GlobRuleResolver,
    pub engine: HeaderEngine,
    pub roots: Vec<PathBuf>,
}

impl RunContext {
    /// # Errors
    /// Returns an error for invalid templates, rules or patterns, or when no license
    /// header is configured.
    pub(crate) fn from_config(loaded: &LoadResult, args: &RunArgs, cwd: &Path) -> Result<Self> {
        let config = &loaded.config;
        let base = relative_to(&loaded.base_dir(cwd), cwd);

        let templates = load_templates(config, &base, &RealFileSystem)?;
        if templates.is_empty() {
            return Err(HeaderGuardError::Config(
                "No license header configured. Declare one in a [[header]] section, \
                 or run `header-guard init`."
                    .to_string(),
            ));
        }

        let mut exclude = config.scanner.exclude.clone();
        exclude.extend(args.exclude.iter().cloned());

        let resolver = GlobRuleResolver::new(
            &config.rules,
            &templates,
            &exclude,
            FormatRegistry::default(),
            &base,
        )?;
        let use_gitignore = config.scanner.gitignore && !args.no_gitignore;
        let scanner = DirectoryScanner::with_gitignore(ExcludeFilter::new(&exclude)?, use_gitignore);

        let history = GitHistory::discover(&loaded.base_dir(cwd))
            .inspect_err(|error| tracing::debug!(%error, "no git history, using file timestamps"))
            .ok();
        let project = ProjectYears::new(
            config.project.creation_year,
            history.as_ref().and_then(GitHistory::head_year),
        );

        Ok(Self {
            scanner,
            resolver,
            engine: HeaderEngine::new(project).with_history(history),
            roots: scan_roots(args, config, &base, cwd),
        })
    }
}

/// Run a check or apply pass as configured by `args`.
///
/// # Errors
/// Returns an error for configuration problems, a failed git lookup, or rules that
/// claim the same file. Per-file problems are part of the report instead.
pub(crate) fn execute(args: &RunArgs, cli: &Cli, mode: Mode) -> Result<RunReport> {
    let cwd = std::env::current_dir()?;
    let loaded = load_config(args.config.as_deref(), cli.no_config)?;
    if loaded.config.debug {
        crate::logging::enable_debug();
    }

    let ctx = RunContext::from_config(&loaded, args, &cwd)?;
    let mut files = ctx.scanner.scan_all(&ctx.roots)?;

    if let Some(base_ref) = &args.diff {
        let changed = GitDiff::discover(&cwd)?.get_changed_files(base_ref)?;
        files = retain_changed(files, &changed);
    }

    let planned = plan(&files, &ctx.resolver)?;
    tracing::info!(
        discovered = files.len(),
        planned = planned.len(),
        "planned files"
    );

    let verb = match mode {
        Mode::Check => "Checking",
        Mode::Apply => "Applying",
    };
    let progress = RunProgress::new(planned.len() as u64, cli.quiet, verb);
    Ok(ctx.engine.run(&planned, mode, &progress))
}

/// Format `report` as requested and write it out.
///
/// # Errors
/// Returns an error if formatting or writing fails.
pub(crate) fn emit_report(report: &RunReport, args: &RunArgs, cli: &Cli) -> Result<()> {
    let formatter = args
        .format
        .formatter(color_choice_to_mode(cli.color), cli.verbose);
    let output = formatter.format(report)?;
    write_output(args.output.as_deref(), &output, cli.quiet)
}

#[cfg(test)]
#[path = "context_tests.rs"]
mod tests;
