use std::io::Write;

use crate::checker::Decision;
use crate::engine::{FileOutcome, FileReport, Mode, RunReport};
use crate::error::Result;

use super::{OutputFormatter, display_path};

/// Color output mode for terminal display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode {
    /// Auto-detect: use colors if stdout is a TTY and `NO_COLOR` is not set
    #[default]
    Auto,
    Always,
    Never,
}

mod ansi {
    pub const RED: &str = "\x1b[31m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const CYAN: &str = "\x1b[36m";
    pub const RESET: &str = "\x1b[0m";
}

pub struct TextFormatter {
    use_colors: bool,
    verbose: u8,
}

impl TextFormatter {
    #[must_use]
    pub fn new(mode: ColorMode) -> Self {
        Self::with_verbose(mode, 0)
    }

    #[must_use]
    pub fn with_verbose(mode: ColorMode, verbose: u8) -> Self {
        Self {
            use_colors: Self::should_use_colors(mode),
            verbose,
        }
    }

    fn should_use_colors(mode: ColorMode) -> bool {
        match mode {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => {
                if std::env::var_os("NO_COLOR").is_some() {
                    return false;
                }
                std::io::IsTerminal::is_terminal(&std::io::stdout())
            }
        }
    }

    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.use_colors {
            return text.to_string();
        }
        format!("{color}{text}{}", ansi::RESET)
    }

    /// Icon, label and color of a file line, or `None` when the file is not shown.
    fn status(&self, file: &FileReport) -> Option<(&'static str, &'static str, &'static str)> {
        match &file.outcome {
            FileOutcome::Violation(assessment) => Some(match assessment.decision {
                Decision::Missing => ("✗", "MISSING", ansi::RED),
                Decision::Stale => ("✗", "STALE", ansi::YELLOW),
                Decision::Unparseable => ("✗", "UNPARSEABLE", ansi::RED),
                Decision::Matches => ("✓", "MATCHES", ansi::GREEN),
            }),
            FileOutcome::Failed(_) => Some(("✗", "ERROR", ansi::RED)),
            FileOutcome::Inserted => Some(("✎", "INSERTED", ansi::CYAN)),
            FileOutcome::Replaced => Some(("✎", "REPLACED", ansi::CYAN)),
            FileOutcome::Unchanged if self.verbose >= 1 => Some(("✓", "OK", ansi::GREEN)),
            FileOutcome::Unchanged => None,
        }
    }

    fn format_file(&self, file: &FileReport, output: &mut Vec<u8>) {
        let Some((icon, label, color)) = self.status(file) else {
            return;
        };
        writeln!(
            output,
            "{icon} {}: {}",
            self.colorize(label, color),
            display_path(&file.path)
        )
        .ok();

        match &file.outcome {
            FileOutcome::Violation(assessment) => {
                for reason in &assessment.reasons {
                    writeln!(output, "   {reason}").ok();
                }
                if self.verbose >= 2
                    && let Some(expected) = &assessment.expected
                {
                    writeln!(output, "   Expected header:").ok();
                    for line in expected {
                        writeln!(output, "     | {line}").ok();
                    }
                }
            }
            FileOutcome::Failed(message) => {
                writeln!(output, "   {message}").ok();
            }
            _ => {}
        }
    }

    fn check_summary(&self, report: &RunReport) -> String {
        let summary = report.check_summary();
        format!(
            "Summary: {} files checked, {} matching, {} missing, {} stale, {} unparseable, {} errors",
            summary.files,
            self.colorize(&summary.matches.to_string(), ansi::GREEN),
            self.colorize(&summary.missing.to_string(), ansi::RED),
            self.colorize(&summary.stale.to_string(), ansi::YELLOW),
            self.colorize(&summary.unparseable.to_string(), ansi::RED),
            self.colorize(&summary.errors.to_string(), ansi::RED),
        )
    }

    fn apply_summary(&self, report: &RunReport) -> String {
        let summary = report.apply_summary();
        format!(
            "Summary: {} files, {} unchanged, {} inserted, {} replaced, {} failed",
            summary.files,
            self.colorize(&summary.unchanged.to_string(), ansi::GREEN),
            self.colorize(&summary.inserted.to_string(), ansi::CYAN),
            self.colorize(&summary.replaced.to_string(), ansi::CYAN),
            self.colorize(&summary.failed.to_string(), ansi::RED),
        )
    }
}

impl Default for TextFormatter {
    fn default() -> Self {
        Self::new(ColorMode::Auto)
    }
}

impl OutputFormatter for TextFormatter {
    fn format(&self, report: &RunReport) -> Result<String> {
        let mut output = Vec::new();

        for file in &report.files {
            self.format_file(file, &mut output);
        }
        if !output.is_empty() {
            writeln!(output).ok();
        }

        let summary = match report.mode {
            Mode::Check => self.check_summary(report),
            Mode::Apply => self.apply_summary(report),
        };
        writeln!(output, "{summary}").ok();

        Ok(String::from_utf8_lossy(&output).into_owned())
    }
}

#[cfg(test)]
#[path = "text_tests.rs"]
mod tests;
