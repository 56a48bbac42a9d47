//! Solver model: the bridge from textual constraint identifiers to SAT.
//!
//! The diagnosis core treats constraints as atoms identified by their text;
//! the solver needs their semantic content. A `SolverModel` maps every
//! variable name to a SAT variable, every constraint identifier to its CNF
//! clauses, and every knowledge-base test case to the assumption literals
//! derived from its conjuncts. Translation from a feature model into clauses
//! happens outside this crate; the builder only records the result.

use indexmap::IndexMap;
use varisat::{Lit, Var};

use faultline_kb::kb::KnowledgeBase;

/// Conjunction of disjunctive clauses (AND of ORs).
pub type CnfClauses = Vec<Vec<Lit>>;

/// Errors while assembling a solver model.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("constraint '{0}' was added twice")]
    DuplicateConstraint(String),

    #[error("constraint '{0}' references a variable not registered in the model")]
    UnregisteredClauseVariable(String),

    #[error("knowledge-base constraint '{0}' has no clauses in the model")]
    MissingConstraint(String),

    #[error("test case '{test_case}' references unknown variable '{variable}'")]
    UnknownVariable { test_case: String, variable: String },
}

#[derive(Debug, Clone)]
pub struct SolverModel {
    vars: IndexMap<String, Var>,
    constraints: IndexMap<String, CnfClauses>,
    test_cases: IndexMap<String, Vec<Lit>>,
}

impl SolverModel {
    pub fn variables(&self) -> &IndexMap<String, Var> {
        &self.vars
    }

    pub fn constraints(&self) -> &IndexMap<String, CnfClauses> {
        &self.constraints
    }

    pub fn constraint_clauses(&self, id: &str) -> Option<&CnfClauses> {
        self.constraints.get(id)
    }

    /// Assumption literals derived from a test case's conjuncts.
    pub fn test_case_assumptions(&self, text: &str) -> Option<&[Lit]> {
        self.test_cases.get(text).map(Vec::as_slice)
    }

    /// All translated test cases, keyed by canonical text.
    pub fn test_cases(&self) -> &IndexMap<String, Vec<Lit>> {
        &self.test_cases
    }
}

#[derive(Debug, Default)]
pub struct SolverModelBuilder {
    vars: IndexMap<String, Var>,
    constraints: IndexMap<String, CnfClauses>,
}

impl SolverModelBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a variable, returning its SAT variable. Idempotent.
    pub fn variable(&mut self, name: &str) -> Var {
        if let Some(var) = self.vars.get(name) {
            return *var;
        }
        let var = Var::from_index(self.vars.len());
        self.vars.insert(name.to_string(), var);
        var
    }

    /// Positive or negated literal for a registered-or-new variable.
    pub fn lit(&mut self, name: &str, positive: bool) -> Lit {
        let var = self.variable(name);
        if positive {
            var.positive()
        } else {
            var.negative()
        }
    }

    /// Records the CNF clauses of one named constraint.
    pub fn constraint(&mut self, id: &str, clauses: CnfClauses) -> Result<&mut Self, BuildError> {
        if self.constraints.contains_key(id) {
            return Err(BuildError::DuplicateConstraint(id.to_string()));
        }
        let known = self.vars.len();
        for clause in &clauses {
            if clause.iter().any(|lit| lit.var().index() >= known) {
                return Err(BuildError::UnregisteredClauseVariable(id.to_string()));
            }
        }
        self.constraints.insert(id.to_string(), clauses);
        Ok(self)
    }

    /// Finishes the model against a knowledge base: every constraint of
    /// B ∪ C must have clauses, and every test-case literal must name a
    /// registered variable.
    pub fn build(self, kb: &KnowledgeBase) -> Result<SolverModel, BuildError> {
        for id in kb.all_constraints() {
            if !self.constraints.contains_key(&id) {
                return Err(BuildError::MissingConstraint(id));
            }
        }

        let mut test_cases = IndexMap::new();
        for case in kb.test_suite().iter() {
            let mut assumptions = Vec::with_capacity(case.literals().len());
            for literal in case.literals() {
                let var = self.vars.get(literal.name()).ok_or_else(|| {
                    BuildError::UnknownVariable {
                        test_case: case.text().to_string(),
                        variable: literal.name().to_string(),
                    }
                })?;
                assumptions.push(if literal.is_positive() {
                    var.positive()
                } else {
                    var.negative()
                });
            }
            test_cases.insert(case.text().to_string(), assumptions);
        }

        Ok(SolverModel {
            vars: self.vars,
            constraints: self.constraints,
            test_cases,
        })
    }
}
