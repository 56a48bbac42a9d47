//! The knowledge-base aggregate.
//!
//! Holds the variable names and the two constraint partitions: background
//! knowledge B (`correct_constraints`, assumed always valid) and the
//! candidate-faulty set C (`possibly_faulty_constraints`), together with the
//! test cases exercised against B ∪ C. Constraints are atoms here: their
//! canonical textual form is their identity, and all sets preserve insertion
//! order so a diagnosis over them is reproducible. The diagnosis engine
//! treats a knowledge base as read-only.

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::testcase::TestCase;
use crate::testsuite::TestSuite;

#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("constraint '{0}' cannot be both correct and possibly faulty")]
    OverlappingPartitions(String),

    #[error("unknown test case '{0}'")]
    UnknownTestCase(String),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KnowledgeBase {
    name: String,
    variables: IndexSet<String>,
    correct_constraints: IndexSet<String>,
    possibly_faulty_constraints: IndexSet<String>,
    test_suite: TestSuite,
}

impl KnowledgeBase {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_variables<I, S>(&mut self, variables: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.variables = variables.into_iter().map(Into::into).collect();
    }

    pub fn variables(&self) -> &IndexSet<String> {
        &self.variables
    }

    /// Replaces the background knowledge B. Rejects constraints already in C.
    pub fn set_correct_constraints<I, S>(&mut self, constraints: I) -> Result<(), ModelError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let correct: IndexSet<String> = constraints.into_iter().map(Into::into).collect();
        if let Some(shared) = correct
            .iter()
            .find(|c| self.possibly_faulty_constraints.contains(*c))
        {
            return Err(ModelError::OverlappingPartitions(shared.clone()));
        }
        self.correct_constraints = correct;
        Ok(())
    }

    pub fn correct_constraints(&self) -> &IndexSet<String> {
        &self.correct_constraints
    }

    /// Replaces the candidate-faulty set C. Rejects constraints already in B.
    pub fn set_possibly_faulty_constraints<I, S>(&mut self, constraints: I) -> Result<(), ModelError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let faulty: IndexSet<String> = constraints.into_iter().map(Into::into).collect();
        if let Some(shared) = faulty
            .iter()
            .find(|c| self.correct_constraints.contains(*c))
        {
            return Err(ModelError::OverlappingPartitions(shared.clone()));
        }
        self.possibly_faulty_constraints = faulty;
        Ok(())
    }

    pub fn possibly_faulty_constraints(&self) -> &IndexSet<String> {
        &self.possibly_faulty_constraints
    }

    /// The full constraint universe B ∪ C, B first, no duplicates.
    pub fn all_constraints(&self) -> IndexSet<String> {
        &self.correct_constraints | &self.possibly_faulty_constraints
    }

    pub fn set_test_suite(&mut self, suite: TestSuite) {
        self.test_suite = suite;
    }

    pub fn test_suite(&self) -> &TestSuite {
        &self.test_suite
    }

    pub fn test_suite_mut(&mut self) -> &mut TestSuite {
        &mut self.test_suite
    }

    /// Test-case texts in insertion order.
    pub fn testcases(&self) -> IndexSet<String> {
        self.test_suite.names()
    }

    /// Looks up a test case by its canonical text.
    pub fn test_case(&self, text: &str) -> Result<&TestCase, ModelError> {
        self.test_suite
            .iter()
            .find(|tc| tc.text() == text)
            .ok_or_else(|| ModelError::UnknownTestCase(text.to_string()))
    }
}

impl std::fmt::Display for KnowledgeBase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "KnowledgeBase '{}'", self.name)?;
        writeln!(f, "  {} variables", self.variables.len())?;
        writeln!(f, "  {} correct constraints", self.correct_constraints.len())?;
        writeln!(
            f,
            "  {} possibly faulty constraints",
            self.possibly_faulty_constraints.len()
        )?;
        write!(f, "  {} test cases", self.test_suite.len())
    }
}
