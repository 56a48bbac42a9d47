//! DirectDebug: divide-and-conquer fault localization.
//!
//! Given a candidate-faulty constraint set C, background knowledge B and a
//! set of test cases, the engine computes a maximal satisfiable subset Γ of
//! C through recursive bisection and returns the preferred diagnosis
//! Δ = C \ Γ. Constraints earlier in the iteration order of C are preferred,
//! i.e. kept out of the diagnosis when possible.
//!
//! Two search variants exist. The baseline runs a consistency check at every
//! recursion node. The skip-redundant variant threads a δ set through the
//! recursion, the constraints activated since the last confirmed check, and
//! only consults the oracle when δ is non-empty; both variants return the
//! same diagnosis, the skip-redundant one with fewer oracle calls.

use indexmap::IndexSet;

use faultline_checker::checker::{CheckerError, ConsistencyChecker};
use faultline_kb::kb::KnowledgeBase;
use faultline_measure::{MeasureError, SharedMeasurement};

pub const COUNTER_DIRECTDEBUG_CALLS: &str = "directdebug.calls";
pub const COUNTER_LEFT_BRANCH_CALLS: &str = "left.branch.calls";
pub const COUNTER_RIGHT_BRANCH_CALLS: &str = "right.branch.calls";
pub const COUNTER_UNION_OPERATOR: &str = "union.operator";
pub const COUNTER_DIFFERENCE_OPERATOR: &str = "difference.operator";
pub const COUNTER_SPLIT_SET: &str = "split.set";
pub const TIMER_FIRST_DIAGNOSIS: &str = "diagnosis.first";

/// Search strategy of the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Variant {
    /// Consistency check at every recursion node.
    Baseline,
    /// Check only when constraints were activated since the last confirmed
    /// check (the δ set). Same diagnosis, fewer oracle calls.
    #[default]
    SkipRedundant,
}

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error(transparent)]
    Checker(#[from] CheckerError),

    #[error(transparent)]
    Measure(#[from] MeasureError),
}

/// The diagnosis engine. Owns its consistency checker for the duration of
/// a search; the measurement context is shared with the checker so oracle
/// counters and engine counters land in one report.
pub struct DirectDebug<C> {
    checker: C,
    variant: Variant,
    measurement: SharedMeasurement,
}

impl<C: ConsistencyChecker> DirectDebug<C> {
    pub fn new(checker: C, measurement: SharedMeasurement) -> Self {
        Self::with_variant(checker, measurement, Variant::default())
    }

    pub fn with_variant(checker: C, measurement: SharedMeasurement, variant: Variant) -> Self {
        Self {
            checker,
            variant,
            measurement,
        }
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn measurement(&self) -> &SharedMeasurement {
        &self.measurement
    }

    pub fn checker(&self) -> &C {
        &self.checker
    }

    /// Diagnoses a knowledge base: C is its possibly-faulty partition, B its
    /// correct partition, the test cases its suite.
    pub fn debug_knowledge_base(
        &mut self,
        kb: &KnowledgeBase,
    ) -> Result<IndexSet<String>, EngineError> {
        self.debug(
            kb.possibly_faulty_constraints(),
            kb.correct_constraints(),
            &kb.testcases(),
        )
    }

    /// Computes the preferred diagnosis Δ ⊆ C, empty iff B ∪ C is already
    /// consistent with every test case (or C is empty).
    ///
    /// Resets the shared measurement context first, so counters and timers
    /// always describe the most recent search.
    pub fn debug(
        &mut self,
        c: &IndexSet<String>,
        b: &IndexSet<String>,
        test_cases: &IndexSet<String>,
    ) -> Result<IndexSet<String>, EngineError> {
        self.measurement.borrow_mut().reset();

        let b_with_c = self.union(b, c);
        let mut violated = IndexSet::new();
        if c.is_empty() || self.checker.is_consistent_all(&b_with_c, test_cases, &mut violated)? {
            return Ok(IndexSet::new());
        }

        tracing::debug!(
            candidates = c.len(),
            background = b.len(),
            violated = violated.len(),
            variant = ?self.variant,
            "starting diagnosis"
        );

        // From here on only the violated test cases matter: every candidate
        // set checked below is a subset of B ∪ C, so a test case consistent
        // with B ∪ C stays consistent throughout the search.
        self.measurement.borrow_mut().increment(COUNTER_DIRECTDEBUG_CALLS);
        self.measurement.borrow_mut().start(TIMER_FIRST_DIAGNOSIS)?;
        let gamma = match self.variant {
            Variant::Baseline => self.direct_debug(c, b, &violated),
            Variant::SkipRedundant => self.direct_debug_skip(&IndexSet::new(), c, b, &violated),
        }?;
        self.measurement.borrow_mut().stop(TIMER_FIRST_DIAGNOSIS)?;

        Ok(self.difference(c, &gamma))
    }

    /// Baseline search for a maximal satisfiable subset of C: one check per
    /// node, no skipping.
    fn direct_debug(
        &mut self,
        c: &IndexSet<String>,
        b: &IndexSet<String>,
        test_cases: &IndexSet<String>,
    ) -> Result<IndexSet<String>, EngineError> {
        let b_with_c = self.union(b, c);
        let mut violated = IndexSet::new();
        if self.checker.is_consistent_all(&b_with_c, test_cases, &mut violated)? {
            return Ok(c.clone());
        }
        if c.len() == 1 {
            return Ok(IndexSet::new());
        }

        let (c1, c2) = self.split(c);

        {
            let mut m = self.measurement.borrow_mut();
            m.increment(COUNTER_LEFT_BRANCH_CALLS);
            m.increment(COUNTER_DIRECTDEBUG_CALLS);
        }
        let gamma2 = self.direct_debug(&c1, b, &violated)?;

        let b_with_gamma2 = self.union(&gamma2, b);
        {
            let mut m = self.measurement.borrow_mut();
            m.increment(COUNTER_RIGHT_BRANCH_CALLS);
            m.increment(COUNTER_DIRECTDEBUG_CALLS);
        }
        let gamma1 = self.direct_debug(&c2, &b_with_gamma2, &violated)?;

        Ok(self.union(&gamma1, &gamma2))
    }

    /// Skip-redundant search. δ holds the constraints activated since the
    /// last confirmed consistency check; an empty δ means the inconsistency
    /// of B ∪ C with the test cases is already known and the check at this
    /// node would be redundant.
    fn direct_debug_skip(
        &mut self,
        delta: &IndexSet<String>,
        c: &IndexSet<String>,
        b: &IndexSet<String>,
        test_cases: &IndexSet<String>,
    ) -> Result<IndexSet<String>, EngineError> {
        let mut active = test_cases.clone();
        if !delta.is_empty() {
            let b_with_c = self.union(b, c);
            let mut violated = IndexSet::new();
            if self.checker.is_consistent_all(&b_with_c, test_cases, &mut violated)? {
                return Ok(c.clone());
            }
            active = violated;
        }

        if c.len() == 1 {
            return Ok(IndexSet::new());
        }

        let (c1, c2) = self.split(c);

        // Left branch activates C1 on top of B, so δ = C1.
        {
            let mut m = self.measurement.borrow_mut();
            m.increment(COUNTER_LEFT_BRANCH_CALLS);
            m.increment(COUNTER_DIRECTDEBUG_CALLS);
        }
        let gamma2 = self.direct_debug_skip(&c1, &c1, b, &active)?;

        // Right branch keeps Γ2 of C1 active; only C1 \ Γ2 left the set, so
        // that difference is the δ deciding whether a check is needed.
        let b_with_gamma2 = self.union(&gamma2, b);
        let delta_right = self.difference(&c1, &gamma2);
        {
            let mut m = self.measurement.borrow_mut();
            m.increment(COUNTER_RIGHT_BRANCH_CALLS);
            m.increment(COUNTER_DIRECTDEBUG_CALLS);
        }
        let gamma1 = self.direct_debug_skip(&delta_right, &c2, &b_with_gamma2, &active)?;

        Ok(self.union(&gamma1, &gamma2))
    }

    fn union(&self, a: &IndexSet<String>, b: &IndexSet<String>) -> IndexSet<String> {
        self.measurement.borrow_mut().increment(COUNTER_UNION_OPERATOR);
        a | b
    }

    fn difference(&self, a: &IndexSet<String>, b: &IndexSet<String>) -> IndexSet<String> {
        self.measurement
            .borrow_mut()
            .increment(COUNTER_DIFFERENCE_OPERATOR);
        a - b
    }

    /// Splits C at ⌊|C|/2⌋ in iteration order.
    fn split(&self, c: &IndexSet<String>) -> (IndexSet<String>, IndexSet<String>) {
        self.measurement.borrow_mut().increment(COUNTER_SPLIT_SET);
        let k = c.len() / 2;
        let c1 = c.iter().take(k).cloned().collect();
        let c2 = c.iter().skip(k).cloned().collect();
        (c1, c2)
    }
}
