//! License header templates.
//!
//! A template is plain text with `${NAME}` placeholders and `#` instruction lines. It is
//! parsed once into a [`HeaderRule`], matched against the lines of an existing header
//! comment with [`HeaderRule::parse_header`], and rendered back with up-to-date values
//! with [`HeaderRule::apply`].

mod context;
mod license;
mod template;
mod variable;

pub use context::{FileFacts, HeaderFileContext, ProjectYears, YearSelectionMode};
pub use license::{LicenseHeader, RenderedHeader};
pub use template::{HeaderLine, HeaderRule, ParsedData, RuleToken};
pub use variable::{VarValue, VariableType};

use thiserror::Error;

/// A template or header line that does not fit the expected shape.
///
/// `line` is zero-based; the display form is one-based.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {}: {}", .line + 1, .message)]
pub struct HeaderParseError {
    pub line: usize,
    pub message: String,
}

impl HeaderParseError {
    #[must_use]
    pub fn new(line: usize, message: impl Into<String>) -> Self {
        Self {
            line,
            message: message.into(),
        }
    }
}
