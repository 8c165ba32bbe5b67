use std::fmt;

use serde::Serialize;

/// How a file's header relates to the expected one. Computed once per file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Decision {
    Matches,
    Missing,
    Stale,
    Unparseable,
}

impl Decision {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Matches => "matches",
            Self::Missing => "missing",
            Self::Stale => "stale",
            Self::Unparseable => "unparseable",
        }
    }

    #[must_use]
    pub const fn is_violation(self) -> bool {
        !matches!(self, Self::Matches)
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A decision with what led to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assessment {
    pub decision: Decision,
    /// Template the expected header was rendered from.
    pub template: Option<String>,
    /// Header lines the file should carry; `None` when the header cannot be parsed.
    pub expected: Option<Vec<String>>,
    /// Human-readable explanation for violations.
    pub reasons: Vec<String>,
}
