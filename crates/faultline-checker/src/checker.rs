//! The consistency oracle.
//!
//! `ConsistencyChecker` is the engine-facing contract: a yes/no answer to
//! "is this constraint set consistent with this test case?". The reference
//! implementation wraps a single varisat solver. Every constraint's clauses
//! are guarded by a selector variable; a check assumes the selectors of
//! exactly the active constraints plus the test-case literals, solves, and
//! clears the assumptions again, so the solver always returns to its
//! baseline and repeated calls are independent and order-insensitive.
//!
//! A test case counts as non-violated iff the solver finds a satisfying
//! assignment. Solver failures are absorbed: the check reports "not
//! consistent" and the oracle stays usable (fail-closed, logged at warn).

use indexmap::{IndexMap, IndexSet};
use varisat::{solver::Solver, ExtendFormula, Lit, Var};

use faultline_measure::{Measurement, SharedMeasurement};

use crate::model::SolverModel;

pub const COUNTER_CONSISTENCY_CHECKS: &str = "consistency.checks";
pub const COUNTER_SIZE_CONSISTENCY_CHECKS: &str = "consistency.checks.size";
pub const COUNTER_FEASIBLE: &str = "feasible";
pub const COUNTER_INFEASIBLE: &str = "infeasible";

/// Lookup failures at the oracle boundary. Solver failures are never
/// surfaced here; they are absorbed as "not consistent".
#[derive(Debug, thiserror::Error)]
pub enum CheckerError {
    #[error("unknown constraint '{0}'")]
    UnknownConstraint(String),

    #[error("unknown test case '{0}'")]
    UnknownTestCase(String),
}

/// Contract for consistency checkers. Implementations must not modify any
/// of the input sets, and must restore their internal state before
/// returning from a check.
pub trait ConsistencyChecker {
    /// Checks whether `constraints` plus the literals of `test_case` are
    /// jointly satisfiable.
    fn is_consistent(
        &mut self,
        constraints: &IndexSet<String>,
        test_case: &str,
    ) -> Result<bool, CheckerError>;

    /// Checks every test case against `constraints`, without short-circuit.
    /// Each violated test case is appended to `violated` (pre-existing
    /// entries are kept). Returns the AND across all test cases.
    fn is_consistent_all(
        &mut self,
        constraints: &IndexSet<String>,
        test_cases: &IndexSet<String>,
        violated: &mut IndexSet<String>,
    ) -> Result<bool, CheckerError> {
        let mut consistent = true;
        for test_case in test_cases {
            if !self.is_consistent(constraints, test_case)? {
                violated.insert(test_case.clone());
                consistent = false;
            }
        }
        Ok(consistent)
    }

    /// Restores the baseline state. Idempotent, callable at any time.
    fn reset(&mut self);
}

/// Reference oracle backed by one owned varisat solver.
///
/// The solver instance is shared across all checks of this oracle; only one
/// check may be in flight at a time, which `&mut self` enforces. For
/// parallel search the oracle must be replicated, not shared.
pub struct SatChecker {
    solver: Solver<'static>,
    selectors: IndexMap<String, Lit>,
    test_cases: IndexMap<String, Vec<Lit>>,
    measurement: SharedMeasurement,
}

impl SatChecker {
    pub fn new(model: &SolverModel) -> Self {
        Self::with_measurement(model, Measurement::shared())
    }

    /// Builds the oracle on a shared measurement context, so its check
    /// counters land next to the engine's.
    pub fn with_measurement(model: &SolverModel, measurement: SharedMeasurement) -> Self {
        let mut solver = Solver::new();

        // Register every model variable with a tautological clause so the
        // solver tracks it even when no active clause mentions it.
        for var in model.variables().values() {
            solver.add_clause(&[var.positive(), var.negative()]);
        }

        // One selector per constraint, guarding all of its clauses.
        // Assuming the selector activates the constraint; leaving it free
        // lets the solver satisfy the guarded clauses trivially.
        let mut selectors = IndexMap::new();
        let mut next_index = model.variables().len();
        for (id, clauses) in model.constraints() {
            let selector = Var::from_index(next_index);
            next_index += 1;
            for clause in clauses {
                let mut guarded = clause.clone();
                guarded.push(selector.negative());
                solver.add_clause(&guarded);
            }
            selectors.insert(id.clone(), selector.positive());
        }

        Self {
            solver,
            selectors,
            test_cases: model.test_cases().clone(),
            measurement,
        }
    }

    pub fn measurement(&self) -> &SharedMeasurement {
        &self.measurement
    }
}

impl ConsistencyChecker for SatChecker {
    fn is_consistent(
        &mut self,
        constraints: &IndexSet<String>,
        test_case: &str,
    ) -> Result<bool, CheckerError> {
        let mut assumptions = Vec::with_capacity(constraints.len());
        for id in constraints {
            let selector = self
                .selectors
                .get(id)
                .ok_or_else(|| CheckerError::UnknownConstraint(id.clone()))?;
            assumptions.push(*selector);
        }
        let literals = self
            .test_cases
            .get(test_case)
            .ok_or_else(|| CheckerError::UnknownTestCase(test_case.to_string()))?;
        assumptions.extend_from_slice(literals);

        {
            let mut m = self.measurement.borrow_mut();
            m.increment(COUNTER_CONSISTENCY_CHECKS);
            m.increment_by(COUNTER_SIZE_CONSISTENCY_CHECKS, assumptions.len() as u64);
        }

        self.solver.assume(&assumptions);
        let feasible = match self.solver.solve() {
            Ok(feasible) => feasible,
            Err(e) => {
                // Fail closed: an unknown outcome must never pass as "fine".
                tracing::warn!(test_case, error = %e, "solver failure absorbed as inconsistent");
                false
            }
        };
        self.reset();

        self.measurement.borrow_mut().increment(if feasible {
            COUNTER_FEASIBLE
        } else {
            COUNTER_INFEASIBLE
        });
        Ok(feasible)
    }

    fn reset(&mut self) {
        self.solver.assume(&[]);
    }
}
