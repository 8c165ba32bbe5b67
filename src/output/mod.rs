mod json;
mod progress;
mod text;

pub use json::JsonFormatter;
pub use progress::RunProgress;
pub use text::{ColorMode, TextFormatter};

use std::path::{Component, Path};

use crate::engine::RunReport;
use crate::error::Result;

/// Trait for rendering the report of a check or apply pass.
pub trait OutputFormatter {
    /// Format the report into a string.
    ///
    /// # Errors
    /// Returns an error if the formatting fails.
    fn format(&self, report: &RunReport) -> Result<String>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl OutputFormat {
    #[must_use]
    pub fn formatter(self, color: ColorMode, verbose: u8) -> Box<dyn OutputFormatter> {
        match self {
            Self::Text => Box::new(TextFormatter::with_verbose(color, verbose)),
            Self::Json => Box::new(JsonFormatter),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(format!("Unknown output format: {s}")),
        }
    }
}

/// Path as shown in reports: no leading `./`, forward slashes.
#[must_use]
pub fn display_path(path: &Path) -> String {
    let shown: std::path::PathBuf = path
        .components()
        .skip_while(|component| matches!(component, Component::CurDir))
        .collect();
    let shown = shown.to_string_lossy().replace('\\', "/");
    if shown.is_empty() {
        ".".to_string()
    } else {
        shown
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
