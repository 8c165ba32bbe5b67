use std::fmt;
use std::str::FromStr;

use super::HeaderFileContext;

pub const CREATION_YEAR: &str = "CREATION_YEAR";
pub const FILE_NAME: &str = "FILE_NAME";

/// Kind of a template placeholder, deciding how its value is read and refreshed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VariableType {
    /// A single year, kept once written.
    CreationYear,
    /// A run of non-blank characters, always the current file name.
    FileName,
    /// `YYYY` or `YYYY-YYYY`, extended up to the last modification year.
    YearLenientRange,
    /// `YYYY, YYYY, ...`, completed up to the last modification year.
    YearList,
}

/// Value captured for a placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VarValue {
    Year(i32),
    Text(String),
    Years(Vec<i32>),
}

impl VariableType {
    /// Variables every template may use without declaring them.
    pub const DEFAULTS: [(&'static str, Self); 2] =
        [(CREATION_YEAR, Self::CreationYear), (FILE_NAME, Self::FileName)];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::CreationYear => CREATION_YEAR,
            Self::FileName => FILE_NAME,
            Self::YearLenientRange => "YEAR_LENIENT_RANGE",
            Self::YearList => "YEAR_LIST",
        }
    }

    /// Read a value of this type at byte offset `start` of `input`.
    ///
    /// Returns the value and the offset just past it.
    #[must_use]
    pub fn parse_value(self, input: &str, start: usize) -> Option<(VarValue, usize)> {
        match self {
            Self::CreationYear => {
                let (year, end) = read_year(input, start)?;
                Some((VarValue::Year(year), end))
            }
            Self::FileName => {
                let rest = input.get(start..)?;
                let len = rest.find([' ', '\t']).unwrap_or(rest.len());
                (len > 0).then(|| (VarValue::Text(rest[..len].to_string()), start + len))
            }
            Self::YearLenientRange => {
                let (first, first_end) = read_year(input, start)?;
                let second = input[first_end..]
                    .strip_prefix('-')
                    .and_then(|_| read_year(input, first_end + 1));

                Some(match second {
                    Some((last, end)) => (VarValue::Years(vec![first, last]), end),
                    None => (VarValue::Years(vec![first]), first_end),
                })
            }
            Self::YearList => {
                let (first, mut end) = read_year(input, start)?;
                let mut years = vec![first];

                while input[end..].starts_with(", ") {
                    let Some((year, next_end)) = read_year(input, end + 2) else {
                        break;
                    };
                    years.push(year);
                    end = next_end;
                }

                years.sort_unstable();
                Some((VarValue::Years(years), end))
            }
        }
    }

    /// Text written into the header for `value`.
    #[must_use]
    pub fn render(self, value: &VarValue) -> String {
        match (self, value) {
            (Self::YearLenientRange, VarValue::Years(years)) => years
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("-"),
            (_, VarValue::Years(years)) => years
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", "),
            (_, VarValue::Year(year)) => year.to_string(),
            (_, VarValue::Text(text)) => text.clone(),
        }
    }

    /// The value the header should carry now, given what it carried before.
    ///
    /// A previous value of the wrong shape counts as no previous value.
    #[must_use]
    pub fn up_to_date(self, context: &HeaderFileContext, previous: Option<&VarValue>) -> VarValue {
        let modified = context.last_modified_year;

        match (self, previous) {
            (Self::CreationYear, Some(VarValue::Year(year))) => VarValue::Year(*year),
            (Self::CreationYear, _) => VarValue::Year(context.creation_year),
            (Self::FileName, _) => VarValue::Text(context.file_name.clone()),
            (Self::YearLenientRange, Some(VarValue::Years(years))) if !years.is_empty() => {
                let first = years[0];
                let last = years.last().copied().unwrap_or(first).max(modified);
                if last > first {
                    VarValue::Years(vec![first, last])
                } else {
                    VarValue::Years(years.clone())
                }
            }
            (Self::YearLenientRange, _) => {
                if context.creation_year == modified {
                    VarValue::Years(vec![modified])
                } else {
                    VarValue::Years(vec![context.creation_year, modified])
                }
            }
            (Self::YearList, Some(VarValue::Years(years))) if !years.is_empty() => {
                let mut years = years.clone();
                let last_known = years.last().copied().unwrap_or(modified);
                years.extend(last_known.saturating_add(1)..=modified);
                years.sort_unstable();
                years.dedup();
                VarValue::Years(years)
            }
            (Self::YearList, _) => VarValue::Years((context.creation_year..=modified).collect()),
        }
    }
}

impl fmt::Display for VariableType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for VariableType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            CREATION_YEAR => Ok(Self::CreationYear),
            FILE_NAME => Ok(Self::FileName),
            "YEAR_LENIENT_RANGE" => Ok(Self::YearLenientRange),
            "YEAR_LIST" => Ok(Self::YearList),
            _ => Err(format!("Unknown variable type: {s}")),
        }
    }
}

/// Years have at most this many digits.
const MAX_YEAR_DIGITS: usize = 4;

/// Read a run of ASCII digits starting at `start`. Runs longer than a year are rejected.
fn read_year(input: &str, start: usize) -> Option<(i32, usize)> {
    let rest = input.get(start..)?;
    let len = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    if len == 0 || len > MAX_YEAR_DIGITS {
        return None;
    }
    rest[..len].parse().ok().map(|year| (year, start + len))
}

#[cfg(test)]
#[path = "variable_tests.rs"]
mod tests;
