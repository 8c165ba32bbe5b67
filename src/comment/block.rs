use super::{Delimited, HeaderReadResult, dedent_common, locate_delimited, split_body};

const OPEN: &str = "/*";
const CLOSE: &str = "*/";
const DOC_OPEN: &str = "/**";
const PHP_OPEN: &str = "<?php";

pub(super) fn read(source: &str, from: usize, separator: &'static str) -> HeaderReadResult {
    let first = super::first_non_whitespace(source, from);
    let rest = &source[first..];
    // `/**` opens a documentation comment, which is never a license header.
    if rest.starts_with(DOC_OPEN) && !rest.starts_with("/**/") {
        return HeaderReadResult::absent(separator);
    }

    match locate_delimited(source, from, OPEN, CLOSE) {
        Delimited::Absent => HeaderReadResult::absent(separator),
        Delimited::Unterminated => HeaderReadResult::unterminated(separator),
        Delimited::Found { start, end, body } => {
            let (opening, interior, closing) = split_body(body);

            let mut lines: Vec<String> = opening.map(String::from).into_iter().collect();
            lines.extend(strip_interior(&interior));

            if let Some(closing) = closing {
                let text = strip_star(closing).unwrap_or(closing).trim();
                if !text.is_empty() {
                    lines.push(text.to_string());
                }
            }

            HeaderReadResult::found(start, end, lines, separator)
        }
    }
}

pub(super) fn write(lines: &[String], separator: &str) -> String {
    let mut out = String::from(OPEN);
    out.push_str(separator);

    for line in lines {
        if line.is_empty() {
            out.push_str(" *");
        } else {
            out.push_str(" * ");
            out.push_str(line);
        }
        out.push_str(separator);
    }

    out.push(' ');
    out.push_str(CLOSE);
    out
}

/// Strip the ` * ` gutter of a comment line, if it has one.
fn strip_star(line: &str) -> Option<&str> {
    line.trim_start()
        .strip_prefix('*')
        .map(|rest| rest.strip_prefix(' ').unwrap_or(rest))
}

/// Lines with a `*` gutter lose it; the remaining lines are de-indented together.
fn strip_interior(lines: &[&str]) -> Vec<String> {
    let plain: Vec<&str> = lines
        .iter()
        .copied()
        .filter(|line| strip_star(line).is_none())
        .collect();
    let mut dedented = dedent_common(&plain).into_iter();

    lines
        .iter()
        .map(|line| {
            strip_star(line).map_or_else(|| dedented.next().unwrap_or_default(), String::from)
        })
        .collect()
}

/// End of a leading `<?php` line including its line feed, or 0.
///
/// Text before the open tag is page output, so a PHP header goes right after it.
pub(super) fn php_open_end(source: &str) -> usize {
    if !source.starts_with(PHP_OPEN) {
        return 0;
    }
    source.find('\n').map_or(source.len(), |idx| idx + 1)
}

#[cfg(test)]
#[path = "block_tests.rs"]
mod tests;
