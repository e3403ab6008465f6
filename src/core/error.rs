//! Error types for rule parsing.
//!
//! Parsing is the only fallible engine operation. Everything else
//! (no rule matching, stepping a terminated machine) is an observable
//! machine state, not an error.

/// Errors raised while turning rule text into rules.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// The line contains a colon but is neither `left::right` nor `left:right`.
    #[error("Syntax error in line {line}")]
    Syntax {
        /// The offending line, verbatim.
        line: String,
        /// 1-based position of the line in the parsed text, if known.
        line_number: Option<usize>,
    },
}

impl ParseError {
    /// Build a syntax error for a line whose position is unknown.
    pub(crate) fn syntax(line: impl Into<String>) -> Self {
        ParseError::Syntax {
            line: line.into(),
            line_number: None,
        }
    }

    /// Attach the 1-based line number of the offending line.
    #[must_use]
    pub(crate) fn at_line(self, number: usize) -> Self {
        match self {
            ParseError::Syntax { line, .. } => ParseError::Syntax {
                line,
                line_number: Some(number),
            },
        }
    }

    /// The offending line.
    #[must_use]
    pub fn line(&self) -> &str {
        match self {
            ParseError::Syntax { line, .. } => line,
        }
    }

    /// 1-based line number, when parsing a multi-line program.
    #[must_use]
    pub fn line_number(&self) -> Option<usize> {
        match self {
            ParseError::Syntax { line_number, .. } => *line_number,
        }
    }
}

/// Result alias for parsing operations.
pub type Result<T> = std::result::Result<T, ParseError>;
