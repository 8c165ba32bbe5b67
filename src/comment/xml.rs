use super::{Delimited, HeaderReadResult, dedent, locate_delimited, split_body};

const OPEN: &str = "<!--";
const CLOSE: &str = "-->";
const INDENT: &str = "\t";
const DECLARATION_OPEN: &str = "<?xml";
const DECLARATION_CLOSE: &str = "?>";

pub(super) fn read(source: &str, from: usize, separator: &'static str) -> HeaderReadResult {
    match locate_delimited(source, from, OPEN, CLOSE) {
        Delimited::Absent => HeaderReadResult::absent(separator),
        Delimited::Unterminated => HeaderReadResult::unterminated(separator),
        Delimited::Found { start, end, body } => {
            let (opening, interior, closing) = split_body(body);

            let mut lines: Vec<String> = opening.map(String::from).into_iter().collect();
            lines.extend(dedent(&interior, INDENT));

            if let Some(text) = closing.map(str::trim).filter(|text| !text.is_empty()) {
                lines.push(text.to_string());
            }

            HeaderReadResult::found(start, end, lines, separator)
        }
    }
}

pub(super) fn write(lines: &[String], separator: &str) -> String {
    let mut out = String::from(OPEN);
    out.push_str(separator);

    for line in lines {
        out.push_str(INDENT);
        out.push_str(line);
        out.push_str(separator);
    }

    out.push_str(CLOSE);
    out
}

/// End of a leading `<?xml ... ?>` declaration and the line break after it, or 0.
pub(super) fn declaration_end(source: &str) -> usize {
    let start = super::first_non_whitespace(source, 0);
    if !source[start..].starts_with(DECLARATION_OPEN) {
        return 0;
    }

    let Some(offset) = source[start..].find(DECLARATION_CLOSE) else {
        return 0;
    };
    let end = start + offset + DECLARATION_CLOSE.len();

    let rest = &source[end..];
    if rest.starts_with("\r\n") {
        end + 2
    } else if rest.starts_with('\n') {
        end + 1
    } else {
        end
    }
}

#[cfg(test)]
#[path = "xml_tests.rs"]
mod tests;
