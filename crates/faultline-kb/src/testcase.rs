//! Test cases: ordered conjunctions of literals.
//!
//! A test case is written `~F1 & F2 & F5`. Its canonical textual form is its
//! identity: two test cases are the same iff their texts are equal. The
//! `violated` flag records the outcome of classification against a knowledge
//! base and is not part of the identity.

use std::hash::{Hash, Hasher};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::literal::{Literal, ParseError};

#[derive(Debug, Clone)]
pub struct TestCase {
    text: String,
    literals: Vec<Literal>,
    violated: bool,
}

impl TestCase {
    /// Canonical textual form, the identity key of this test case.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Literals in conjunction order.
    pub fn literals(&self) -> &[Literal] {
        &self.literals
    }

    pub fn is_violated(&self) -> bool {
        self.violated
    }

    pub fn set_violated(&mut self, violated: bool) {
        self.violated = violated;
    }
}

impl FromStr for TestCase {
    type Err = ParseError;

    fn from_str(text: &str) -> Result<Self, ParseError> {
        if text.is_empty() {
            return Err(ParseError::EmptyTestCase);
        }
        let literals = text
            .split(" & ")
            .map(str::parse)
            .collect::<Result<Vec<Literal>, _>>()?;
        Ok(Self {
            text: text.to_string(),
            literals,
            violated: false,
        })
    }
}

impl PartialEq for TestCase {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text
    }
}

impl Eq for TestCase {}

impl Hash for TestCase {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.text.hash(state);
    }
}

impl std::fmt::Display for TestCase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.text)
    }
}

impl Serialize for TestCase {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.text)
    }
}

impl<'de> Deserialize<'de> for TestCase {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}
