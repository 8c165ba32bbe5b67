use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::comment::HeaderFormat;

/// Supported config version.
pub const CONFIG_VERSION: &str = "1";

/// Scanner configuration for file discovery.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScannerConfig {
    /// Respect .gitignore rules (default: true)
    #[serde(default = "default_true")]
    pub gitignore: bool,

    /// Paths never visited nor rewritten.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exclude: Vec<String>,

    /// Directories scanned when no path is given on the command line.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub include_paths: Vec<String>,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            gitignore: true,
            exclude: Vec::new(),
            include_paths: Vec::new(),
        }
    }
}

/// Project-wide settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProjectConfig {
    /// Year the project was created; defaults to the current year.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creation_year: Option<i32>,
}

/// A named license header template [[header]].
///
/// Exactly one of `text` and `file` must be set.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HeaderConfig {
    pub name: String,

    /// Inline template text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// Template file, relative to the directory of the config file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

/// Assignment of license headers to files [[rule]].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LicenseRuleConfig {
    pub name: String,

    /// Glob patterns selecting the files of this rule.
    pub include: Vec<String>,

    /// Comment syntax; inferred from the file extension when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<HeaderFormat>,

    /// Accepted header names, the first being the default. All headers when empty.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub headers: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    /// Config schema version.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// Enable debug logging.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub debug: bool,

    #[serde(default)]
    pub scanner: ScannerConfig,

    #[serde(default)]
    pub project: ProjectConfig,

    #[serde(default, rename = "header", skip_serializing_if = "Vec::is_empty")]
    pub headers: Vec<HeaderConfig>,

    #[serde(default, rename = "rule", skip_serializing_if = "Vec::is_empty")]
    pub rules: Vec<LicenseRuleConfig>,
}

const fn default_true() -> bool {
    true
}

#[cfg(test)]
#[path = "model_tests.rs"]
mod tests;
