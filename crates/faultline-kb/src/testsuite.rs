//! Test suites: ordered collections of test cases.
//!
//! Persisted format: the first line is the decimal count of test cases,
//! followed by one test case per line in insertion order. The order only
//! matters for reproducibility, not for correctness.

use std::io::{BufRead, Write};
use std::str::FromStr;

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::literal::ParseError;
use crate::testcase::TestCase;

/// Errors while reading a test-suite file.
#[derive(Debug, thiserror::Error)]
pub enum SuiteError {
    #[error("invalid test-suite header '{0}'")]
    InvalidHeader(String),

    #[error("test suite declares {expected} test cases but only {found} were found")]
    MissingTestCases { expected: usize, found: usize },

    #[error("test case parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TestSuite {
    cases: Vec<TestCase>,
}

impl TestSuite {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads a suite from the count-header format.
    ///
    /// Lines beyond the declared count are ignored, matching the original
    /// reader behavior.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self, SuiteError> {
        let mut lines = reader.lines();
        let header = lines.next().transpose()?.unwrap_or_default();
        let expected: usize = header
            .trim()
            .parse()
            .map_err(|_| SuiteError::InvalidHeader(header.clone()))?;

        let mut cases = Vec::with_capacity(expected);
        for _ in 0..expected {
            match lines.next().transpose()? {
                Some(line) => cases.push(line.parse::<TestCase>()?),
                None => {
                    return Err(SuiteError::MissingTestCases {
                        expected,
                        found: cases.len(),
                    })
                }
            }
        }
        Ok(Self { cases })
    }

    /// Writes the suite in the count-header format.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        writeln!(writer, "{}", self.cases.len())?;
        for case in &self.cases {
            writeln!(writer, "{case}")?;
        }
        Ok(())
    }

    pub fn push(&mut self, case: TestCase) {
        self.cases.push(case);
    }

    pub fn len(&self) -> usize {
        self.cases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&TestCase> {
        self.cases.get(index)
    }

    pub fn cases(&self) -> &[TestCase] {
        &self.cases
    }

    pub fn cases_mut(&mut self) -> &mut [TestCase] {
        &mut self.cases
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TestCase> {
        self.cases.iter()
    }

    /// Test-case texts in insertion order.
    pub fn names(&self) -> IndexSet<String> {
        self.cases.iter().map(|tc| tc.text().to_string()).collect()
    }
}

impl FromStr for TestSuite {
    type Err = SuiteError;

    fn from_str(s: &str) -> Result<Self, SuiteError> {
        Self::from_reader(s.as_bytes())
    }
}

impl std::fmt::Display for TestSuite {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}", self.cases.len())?;
        for case in &self.cases {
            writeln!(f, "{case}")?;
        }
        Ok(())
    }
}
