use std::collections::{BTreeSet, HashMap, HashSet};

use super::{HeaderFileContext, HeaderParseError, VarValue, VariableType, YearSelectionMode};

/// A piece of a template line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleToken {
    Text(String),
    Var(String),
}

/// One line of a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderLine {
    pub tokens: Vec<RuleToken>,
    pub optional: bool,
}

impl HeaderLine {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self.tokens.as_slice() {
            [] => true,
            [RuleToken::Text(text)] => text.trim().is_empty(),
            _ => false,
        }
    }
}

/// What matching a header against a template produced.
///
/// Variables captured before a failure are kept so a fallback render can reuse them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedData {
    pub variables: HashMap<String, VarValue>,
    pub present_optional_lines: HashSet<usize>,
    pub error: Option<HeaderParseError>,
}

impl ParsedData {
    #[must_use]
    pub const fn is_match(&self) -> bool {
        self.error.is_none()
    }
}

/// A parsed license header template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderRule {
    name: String,
    lines: Vec<HeaderLine>,
    variables: HashMap<String, VariableType>,
    year_selection: YearSelectionMode,
}

impl HeaderRule {
    /// Parse a template from its raw lines.
    ///
    /// # Errors
    /// Returns an error for a malformed or unknown instruction, an unknown variable type,
    /// or a placeholder whose variable is never declared.
    pub fn parse(name: &str, raw: &[&str]) -> Result<Self, HeaderParseError> {
        let mut lines = Vec::new();
        let mut variables: HashMap<String, VariableType> = HashMap::new();
        let mut year_selection = YearSelectionMode::default();
        let mut optional = false;

        for (idx, line) in raw.iter().enumerate() {
            let Some(instruction) = line.strip_prefix('#') else {
                lines.push(HeaderLine {
                    tokens: tokenize(line),
                    optional,
                });
                continue;
            };

            let words: Vec<&str> = instruction.split_whitespace().collect();
            match words.as_slice() {
                [] => {
                    return Err(HeaderParseError::new(
                        idx,
                        "No valid instructions could be found.",
                    ));
                }
                ["optional", ..] => optional = true,
                ["end", ..] => optional = false,
                ["type", variable, kind] => {
                    let kind = kind.parse::<VariableType>().map_err(|_| {
                        HeaderParseError::new(
                            idx,
                            format!("Invalid variable type \"{kind}\" for variable \"{variable}\"."),
                        )
                    })?;
                    variables.insert((*variable).to_string(), kind);
                }
                ["type", ..] => {
                    return Err(HeaderParseError::new(
                        idx,
                        "Invalid type instruction. Expected variable name and type.",
                    ));
                }
                ["year_selection", mode] => {
                    year_selection = mode
                        .parse()
                        .map_err(|message: String| HeaderParseError::new(idx, message))?;
                }
                ["year_selection", ..] => {
                    return Err(HeaderParseError::new(
                        idx,
                        "Invalid year selection instruction. Expected selection mode (project or file).",
                    ));
                }
                [other, ..] => {
                    return Err(HeaderParseError::new(
                        idx,
                        format!("Unknown instruction: \"{other}\"."),
                    ));
                }
            }
        }

        trim_lines(&mut lines, HeaderLine::is_empty);

        for (variable, kind) in VariableType::DEFAULTS {
            variables.insert(variable.to_string(), kind);
        }

        let undeclared: BTreeSet<&str> = lines
            .iter()
            .flat_map(|line| &line.tokens)
            .filter_map(|token| match token {
                RuleToken::Var(variable) if !variables.contains_key(variable) => {
                    Some(variable.as_str())
                }
                _ => None,
            })
            .collect();

        if !undeclared.is_empty() {
            let names: Vec<&str> = undeclared.into_iter().collect();
            return Err(HeaderParseError::new(
                0,
                format!("Undeclared variables found: {}.", names.join(", ")),
            ));
        }

        Ok(Self {
            name: name.to_string(),
            lines,
            variables,
            year_selection,
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn lines(&self) -> &[HeaderLine] {
        &self.lines
    }

    #[must_use]
    pub const fn year_selection(&self) -> YearSelectionMode {
        self.year_selection
    }

    /// Match the lines of an existing header comment against this template.
    ///
    /// Optional lines that do not match are skipped. The returned data carries an error
    /// when a line matches no template line, when lines are left over, or when required
    /// template lines are never reached.
    #[must_use]
    pub fn parse_header(&self, header: &[String]) -> ParsedData {
        let mut data = ParsedData::default();
        let mut rule_idx = 0;

        for (line_idx, line) in header.iter().enumerate() {
            loop {
                let Some(rule_line) = self.lines.get(rule_idx) else {
                    data.error = Some(HeaderParseError::new(
                        line_idx,
                        "There are unexpected extra header lines.",
                    ));
                    return data;
                };

                match self.match_line(line, rule_line, &data.variables) {
                    Ok(captured) => {
                        data.variables.extend(captured);
                        if rule_line.optional {
                            data.present_optional_lines.insert(rule_idx);
                        }
                        rule_idx += 1;
                        break;
                    }
                    Err(_) if rule_line.optional => rule_idx += 1,
                    Err(message) => {
                        data.error = Some(HeaderParseError::new(line_idx, message));
                        return data;
                    }
                }
            }
        }

        let missing = self.lines[rule_idx..]
            .iter()
            .filter(|line| !line.optional)
            .count();
        if missing > 0 {
            data.error = Some(HeaderParseError::new(
                header.len(),
                format!("Header is missing {missing} expected line(s)."),
            ));
        }

        data
    }

    fn match_line(
        &self,
        line: &str,
        rule_line: &HeaderLine,
        known: &HashMap<String, VarValue>,
    ) -> Result<Vec<(String, VarValue)>, String> {
        let mut idx = 0;
        let mut captured: Vec<(String, VarValue)> = Vec::new();

        for token in &rule_line.tokens {
            match token {
                RuleToken::Text(text) => {
                    let end = idx + text.len();
                    if end > line.len() {
                        return Err(format!(
                            "Header is cut short, stopped at {} instead of {end}.",
                            line.len()
                        ));
                    }
                    let found = line.get(idx..end).unwrap_or_default();
                    if found != text {
                        return Err(format!(
                            "Text differs at {idx}, got \"{found}\", expected \"{text}\"."
                        ));
                    }
                    idx = end;
                }
                RuleToken::Var(variable) => {
                    let kind = self
                        .variables
                        .get(variable)
                        .ok_or_else(|| format!("Unknown variable \"{variable}\"."))?;
                    let (value, end) = kind.parse_value(line, idx).ok_or_else(|| {
                        format!("Failed to parse variable \"{variable}\" at {idx}.")
                    })?;

                    let previous = captured
                        .iter()
                        .find(|(name, _)| name == variable)
                        .map(|(_, value)| value)
                        .or_else(|| known.get(variable));
                    if previous.is_some_and(|previous| *previous != value) {
                        return Err(format!("Diverging variable values for \"{variable}\"."));
                    }

                    captured.push((variable.clone(), value));
                    idx = end;
                }
            }
        }

        if idx < line.len() {
            return Err(format!(
                "Unexpected trailing text at {idx}: \"{}\".",
                &line[idx..]
            ));
        }

        Ok(captured)
    }

    /// Render this template for a file, refreshing values found in `data`.
    #[must_use]
    pub fn apply(&self, data: &ParsedData, context: &HeaderFileContext) -> Vec<String> {
        let mut rendered: Vec<String> = self
            .lines
            .iter()
            .enumerate()
            .filter(|(idx, line)| !line.optional || data.present_optional_lines.contains(idx))
            .map(|(_, line)| {
                line.tokens
                    .iter()
                    .map(|token| match token {
                        RuleToken::Text(text) => text.clone(),
                        RuleToken::Var(variable) => {
                            self.variables.get(variable).map_or_else(String::new, |kind| {
                                let value = kind.up_to_date(context, data.variables.get(variable));
                                kind.render(&value)
                            })
                        }
                    })
                    .collect::<String>()
            })
            .collect();

        trim_lines(&mut rendered, String::is_empty);
        rendered
    }
}

/// Split a template line into text and `${NAME}` tokens. A `${` right after an unpaired
/// backslash stays text, backslash included.
fn tokenize(line: &str) -> Vec<RuleToken> {
    let mut tokens = Vec::new();
    let mut text = String::new();
    let mut backslash = false;
    let mut idx = 0;

    while idx < line.len() {
        let rest = &line[idx..];

        if rest.starts_with("${") && !backslash {
            if let Some(variable) = read_variable_name(&rest[2..]) {
                if !text.is_empty() {
                    tokens.push(RuleToken::Text(std::mem::take(&mut text)));
                }
                tokens.push(RuleToken::Var(variable.to_string()));
                idx += variable.len() + 3;
                continue;
            }
        }

        let Some(c) = rest.chars().next() else {
            break;
        };
        backslash = c == '\\' && !backslash;
        text.push(c);
        idx += c.len_utf8();
    }

    if !text.is_empty() {
        tokens.push(RuleToken::Text(text));
    }

    tokens
}

/// The `NAME` of `NAME}` at the start of `input`.
fn read_variable_name(input: &str) -> Option<&str> {
    let len = input
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .unwrap_or(input.len());
    (len > 0 && input[len..].starts_with('}')).then(|| &input[..len])
}

/// Drop leading and trailing lines matching `is_empty`.
fn trim_lines<T>(lines: &mut Vec<T>, is_empty: impl Fn(&T) -> bool) {
    let trailing = lines.iter().rev().take_while(|&line| is_empty(line)).count();
    lines.truncate(lines.len() - trailing);
    let leading = lines.iter().take_while(|&line| is_empty(line)).count();
    lines.drain(..leading);
}

#[cfg(test)]
#[path = "template_tests.rs"]
mod tests;
