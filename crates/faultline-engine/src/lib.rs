pub mod directdebug;

pub use directdebug::{DirectDebug, EngineError, Variant};
