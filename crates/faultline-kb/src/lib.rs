pub mod kb;
pub mod literal;
pub mod testcase;
pub mod testsuite;

pub use kb::{KnowledgeBase, ModelError};
pub use literal::{Literal, ParseError};
pub use testcase::TestCase;
pub use testsuite::{SuiteError, TestSuite};
