use std::path::PathBuf;

use thiserror::Error;

use crate::rule::HeaderParseError;

#[derive(Error, Debug)]
pub enum HeaderGuardError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to read file: {path}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file: {path}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid glob pattern: {pattern}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("Invalid license header template '{name}': {source}")]
    HeaderTemplate {
        name: String,
        #[source]
        source: HeaderParseError,
    },

    #[error("Multiple rules match {path}: {}", rules.join(", "))]
    AmbiguousRules { path: PathBuf, rules: Vec<String> },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("JSON serialization error: {0}")]
    JsonSerialize(#[from] serde_json::Error),

    #[error("Git error: {0}")]
    Git(String),
}

impl HeaderGuardError {
    /// Short category name, used in structured output.
    #[must_use]
    pub const fn error_type(&self) -> &'static str {
        match self {
            Self::Config(_) | Self::AmbiguousRules { .. } => "Config",
            Self::FileRead { .. } => "FileRead",
            Self::FileWrite { .. } => "FileWrite",
            Self::InvalidPattern { .. } => "InvalidPattern",
            Self::HeaderTemplate { .. } => "HeaderTemplate",
            Self::Io(_) => "IO",
            Self::TomlParse(_) | Self::TomlSerialize(_) => "TOML",
            Self::JsonSerialize(_) => "JSON",
            Self::Git(_) => "Git",
        }
    }
}

pub type Result<T> = std::result::Result<T, HeaderGuardError>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
