//! Header comment formats.
//!
//! A [`HeaderFormat`] knows how to locate a license header comment at the top of a
//! source buffer, extract its lines, and emit a fresh header in the same syntax. Formats
//! never fail on arbitrary input: an absent or malformed header is a normal
//! [`HeaderReadResult`].

mod block;
mod prefixed;
mod registry;
mod xml;

pub use registry::{FormatAssociation, FormatRegistry};

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Separator used when a buffer contains no line feed at all.
pub const DEFAULT_LINE_SEPARATOR: &str = "\n";

/// Comment syntax used to wrap a license header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum HeaderFormat {
    /// `/*` ... ` */` with a ` * ` prefix on every line.
    Block,
    /// `// ...` on every line.
    Line,
    /// `<!--` ... `-->` with tab-indented lines.
    Xml,
    /// `# ...` on every line.
    Hash,
}

impl HeaderFormat {
    pub const ALL: [Self; 4] = [Self::Block, Self::Line, Self::Xml, Self::Hash];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Block => "block",
            Self::Line => "line",
            Self::Xml => "xml",
            Self::Hash => "hash",
        }
    }

    /// Locate and extract the header comment of `source`.
    #[must_use]
    pub fn read_header_comment(self, source: &str) -> HeaderReadResult {
        let separator = detect_line_separator(source);
        let from = self.insertion_point(source);

        match self {
            Self::Block => block::read(source, from, separator),
            Self::Xml => xml::read(source, from, separator),
            Self::Line => prefixed::read(source, from, separator, prefixed::LINE),
            Self::Hash => prefixed::read(source, from, separator, prefixed::HASH),
        }
    }

    /// Render `lines` as a header comment.
    ///
    /// The output never ends with a separator; the caller decides what follows.
    #[must_use]
    pub fn write_header_comment(self, lines: &[String], separator: &str) -> String {
        match self {
            Self::Block => block::write(lines, separator),
            Self::Xml => xml::write(lines, separator),
            Self::Line => prefixed::write(lines, separator, prefixed::LINE),
            Self::Hash => prefixed::write(lines, separator, prefixed::HASH),
        }
    }

    /// Byte offset where a missing header gets inserted.
    ///
    /// This is the end of the format's prologue: a shebang line and an encoding
    /// declaration for [`Self::Hash`], an `<?xml ... ?>` declaration for [`Self::Xml`],
    /// a `<?php` opening line for [`Self::Block`], and nothing for [`Self::Line`].
    #[must_use]
    pub fn insertion_point(self, source: &str) -> usize {
        match self {
            Self::Hash => prefixed::hash_prologue_end(source),
            Self::Xml => xml::declaration_end(source),
            Self::Block => block::php_open_end(source),
            Self::Line => 0,
        }
    }
}

impl fmt::Display for HeaderFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HeaderFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "block" | "c" | "cstyle" => Ok(Self::Block),
            "line" | "slash" => Ok(Self::Line),
            "xml" | "html" => Ok(Self::Xml),
            "hash" | "shell" => Ok(Self::Hash),
            _ => Err(format!("Unknown header format: {s}")),
        }
    }
}

impl TryFrom<String> for HeaderFormat {
    type Error = String;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        value.parse()
    }
}

/// Outcome of looking for a header comment in a buffer.
///
/// When no header is found, `start == end == 0` and `existing` is `None`. The offsets are
/// a sentinel in that case, not a header at position 0: `existing` is the authoritative
/// absence signal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderReadResult {
    /// Byte offset of the opening marker.
    pub start: usize,
    /// Byte offset just past the closing marker.
    pub end: usize,
    /// Header lines, without separators and with one level of indentation removed.
    pub existing: Option<Vec<String>>,
    /// Line separator of the buffer.
    pub separator: &'static str,
    /// An opening marker starts the buffer but is never closed.
    pub unterminated: bool,
}

impl HeaderReadResult {
    #[must_use]
    pub const fn absent(separator: &'static str) -> Self {
        Self {
            start: 0,
            end: 0,
            existing: None,
            separator,
            unterminated: false,
        }
    }

    #[must_use]
    pub const fn unterminated(separator: &'static str) -> Self {
        Self {
            start: 0,
            end: 0,
            existing: None,
            separator,
            unterminated: true,
        }
    }

    #[must_use]
    pub const fn found(
        start: usize,
        end: usize,
        lines: Vec<String>,
        separator: &'static str,
    ) -> Self {
        Self {
            start,
            end,
            existing: Some(lines),
            separator,
            unterminated: false,
        }
    }

    #[must_use]
    pub const fn is_present(&self) -> bool {
        self.existing.is_some()
    }
}

/// Detect the line separator from the first line feed of `source`.
#[must_use]
pub fn detect_line_separator(source: &str) -> &'static str {
    match source.find('\n') {
        None => DEFAULT_LINE_SEPARATOR,
        Some(idx) if idx > 0 && source.as_bytes()[idx - 1] == b'\r' => "\r\n",
        Some(_) => "\n",
    }
}

/// Index of the first non-whitespace character at or after `from`, or `source.len()`.
pub(crate) fn first_non_whitespace(source: &str, from: usize) -> usize {
    source[from..]
        .char_indices()
        .find(|(_, c)| !c.is_whitespace())
        .map_or(source.len(), |(idx, _)| from + idx)
}

/// Split on line feeds, dropping a trailing carriage return from every line.
pub(crate) fn split_lines(text: &str) -> Vec<&str> {
    text.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect()
}

/// Where a delimited comment sits in a buffer.
pub(crate) enum Delimited<'a> {
    Absent,
    Unterminated,
    Found {
        start: usize,
        end: usize,
        body: &'a str,
    },
}

/// Find a comment opened by `open` as the first token at or after `from`.
pub(crate) fn locate_delimited<'a>(
    source: &'a str,
    from: usize,
    open: &str,
    close: &str,
) -> Delimited<'a> {
    let start = first_non_whitespace(source, from);
    if !source[start..].starts_with(open) {
        return Delimited::Absent;
    }

    let body_start = start + open.len();
    source[body_start..]
        .find(close)
        .map_or(Delimited::Unterminated, |offset| {
            let body_end = body_start + offset;
            Delimited::Found {
                start,
                end: body_end + close.len(),
                body: &source[body_start..body_end],
            }
        })
}

/// Split a comment body into its opening remainder, interior lines and closing remainder.
///
/// The opening remainder is the trimmed text sharing a line with the opening marker,
/// returned only when non-blank. The closing remainder is returned raw, so the format can
/// strip its own line prefix from it.
pub(crate) fn split_body(body: &str) -> (Option<&str>, Vec<&str>, Option<&str>) {
    fn non_blank(s: &str) -> Option<&str> {
        let trimmed = s.trim();
        (!trimmed.is_empty()).then_some(trimmed)
    }

    let segments = split_lines(body);

    match segments.as_slice() {
        [] => (None, Vec::new(), None),
        [only] => (non_blank(only), Vec::new(), None),
        [first, interior @ .., last] => (non_blank(first), interior.to_vec(), Some(*last)),
    }
}

/// Remove one level of indentation from `lines`.
///
/// If every non-empty line starts with `unit`, exactly one `unit` is removed from each.
/// Otherwise falls back to [`dedent_common`].
pub(crate) fn dedent(lines: &[&str], unit: &str) -> Vec<String> {
    if lines
        .iter()
        .filter(|line| !line.is_empty())
        .all(|line| line.starts_with(unit))
    {
        return lines
            .iter()
            .map(|line| line.strip_prefix(unit).unwrap_or(line).to_string())
            .collect();
    }

    dedent_common(lines)
}

/// Remove the leading whitespace common to all non-blank lines.
///
/// Whitespace-only lines become empty.
pub(crate) fn dedent_common(lines: &[&str]) -> Vec<String> {
    let common = lines
        .iter()
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.len() - line.trim_start().len())
        .min()
        .unwrap_or(0);

    lines
        .iter()
        .map(|line| {
            if line.trim().is_empty() {
                String::new()
            } else {
                line.get(common..)
                    .unwrap_or_else(|| line.trim_start())
                    .to_string()
            }
        })
        .collect()
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
