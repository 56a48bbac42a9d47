pub mod checker;
pub mod model;

pub use checker::{CheckerError, ConsistencyChecker, SatChecker};
pub use model::{BuildError, CnfClauses, SolverModel, SolverModelBuilder};
