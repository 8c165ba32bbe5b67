use super::HeaderReadResult;

/// A comment syntax where every header line carries the same prefix.
#[derive(Debug, Clone, Copy)]
pub(super) struct Prefix {
    marker: &'static str,
    /// Comments starting with the marker that are not header text: documentation
    /// comments and tool directives.
    is_special: fn(&str) -> bool,
}

pub(super) const LINE: Prefix = Prefix {
    marker: "//",
    is_special: is_slash_special,
};

pub(super) const HASH: Prefix = Prefix {
    marker: "#",
    is_special: is_coding_declaration,
};

/// `///` and `//!` are documentation comments; `////` banners are not. `//go:` and
/// `//+build` are Go compiler directives.
fn is_slash_special(text: &str) -> bool {
    (text.starts_with("///") && !text.starts_with("////"))
        || text.starts_with("//!")
        || text.starts_with("//go:")
        || text.starts_with("//+build")
}

/// A Python source encoding declaration (PEP 263), e.g. `# -*- coding: utf-8 -*-`.
pub(super) fn is_coding_declaration(text: &str) -> bool {
    let Some(comment) = text.trim_start().strip_prefix('#') else {
        return false;
    };
    comment.match_indices("coding").any(|(idx, keyword)| {
        let after = &comment[idx + keyword.len()..];
        let Some(value) = after.strip_prefix([':', '=']) else {
            return false;
        };
        value
            .trim_start_matches([' ', '\t'])
            .starts_with(|c: char| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
    })
}

impl Prefix {
    fn opens(self, text: &str) -> bool {
        text.starts_with(self.marker) && !(self.is_special)(text)
    }
}

pub(super) fn read(
    source: &str,
    from: usize,
    separator: &'static str,
    prefix: Prefix,
) -> HeaderReadResult {
    let start = super::first_non_whitespace(source, from);
    if !prefix.opens(&source[start..]) {
        return HeaderReadResult::absent(separator);
    }

    let mut lines = Vec::new();
    let mut end = start;
    let mut pos = start;

    while pos < source.len() {
        let line_end = source[pos..].find('\n').map_or(source.len(), |idx| pos + idx);
        let raw = &source[pos..line_end];
        let content = raw.strip_suffix('\r').unwrap_or(raw);
        let trimmed = content.trim_start();

        if !prefix.opens(trimmed) {
            break;
        }

        let text = &trimmed[prefix.marker.len()..];
        lines.push(text.strip_prefix(' ').unwrap_or(text).to_string());
        end = pos + content.len();
        pos = line_end + 1;
    }

    HeaderReadResult::found(start, end, lines, separator)
}

pub(super) fn write(lines: &[String], separator: &str, prefix: Prefix) -> String {
    lines
        .iter()
        .map(|line| {
            if line.is_empty() {
                prefix.marker.to_string()
            } else {
                format!("{} {line}", prefix.marker)
            }
        })
        .collect::<Vec<_>>()
        .join(separator)
}

/// End of a leading `#!` line including its line feed, or 0.
fn shebang_end(source: &str) -> usize {
    if !source.starts_with("#!") {
        return 0;
    }
    line_end(source, 0)
}

/// End of the Hash prologue: an optional shebang line, then an optional encoding
/// declaration, which must stay on the first or second line.
pub(super) fn hash_prologue_end(source: &str) -> usize {
    let after_shebang = shebang_end(source);
    let next = line_end(source, after_shebang);
    if is_coding_declaration(&source[after_shebang..next]) {
        next
    } else {
        after_shebang
    }
}

/// Offset just past the line feed of the line starting at `from`, or `source.len()`.
fn line_end(source: &str, from: usize) -> usize {
    source[from..]
        .find('\n')
        .map_or(source.len(), |idx| from + idx + 1)
}

#[cfg(test)]
#[path = "prefixed_tests.rs"]
mod tests;
