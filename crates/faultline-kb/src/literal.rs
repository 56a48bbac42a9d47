//! Boolean literals of test cases.
//!
//! A literal is a variable name with a polarity, written `F1` (true) or
//! `~F1` (false), where `~` denotes negation.

use std::str::FromStr;

/// Errors for malformed literal or test-case syntax.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("empty literal")]
    EmptyLiteral,

    #[error("invalid literal token '{0}'")]
    InvalidLiteral(String),

    #[error("empty test case")]
    EmptyTestCase,
}

/// A named boolean variable with a polarity.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Literal {
    name: String,
    positive: bool,
}

impl Literal {
    /// Name of the underlying variable, without the negation marker.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// `true` for `F1`, `false` for `~F1`.
    pub fn is_positive(&self) -> bool {
        self.positive
    }
}

impl FromStr for Literal {
    type Err = ParseError;

    fn from_str(token: &str) -> Result<Self, ParseError> {
        if token.is_empty() {
            return Err(ParseError::EmptyLiteral);
        }
        let (name, positive) = match token.strip_prefix('~') {
            Some(rest) => (rest, false),
            None => (token, true),
        };
        if name.is_empty()
            || name.contains(['~', '&'])
            || name.chars().any(char::is_whitespace)
        {
            return Err(ParseError::InvalidLiteral(token.to_string()));
        }
        Ok(Self {
            name: name.to_string(),
            positive,
        })
    }
}

impl std::fmt::Display for Literal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.positive {
            write!(f, "{}", self.name)
        } else {
            write!(f, "~{}", self.name)
        }
    }
}
