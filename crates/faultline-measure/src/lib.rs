pub mod counter;
pub mod measurement;
pub mod timer;

pub use counter::Counter;
pub use measurement::{Measurement, SharedMeasurement};
pub use timer::{MeasureError, Timer};
