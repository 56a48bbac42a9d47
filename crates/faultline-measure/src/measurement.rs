//! Registry of named counters and timers.
//!
//! Reframed from process-wide static state into an injectable context:
//! the diagnosis engine and the consistency oracle share one `Measurement`
//! through a `SharedMeasurement` handle, and the engine resets it at the
//! start of each top-level diagnosis. Measurement never influences
//! algorithm outcomes, it only reports on them.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use indexmap::IndexMap;

use crate::counter::Counter;
use crate::timer::{MeasureError, Timer};

/// Single-threaded shared handle to a measurement context.
pub type SharedMeasurement = Rc<RefCell<Measurement>>;

#[derive(Debug, Default)]
pub struct Measurement {
    counters: IndexMap<String, Counter>,
    timers: IndexMap<String, Timer>,
}

impl Measurement {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a fresh context behind a shared handle.
    pub fn shared() -> SharedMeasurement {
        Rc::new(RefCell::new(Self::new()))
    }

    /// Returns the counter with the given name, creating it on first use.
    pub fn counter(&mut self, name: &str) -> &mut Counter {
        self.counters
            .entry(name.to_string())
            .or_insert_with(|| Counter::new(name))
    }

    /// Returns the timer with the given name, creating it on first use.
    pub fn timer(&mut self, name: &str) -> &mut Timer {
        self.timers
            .entry(name.to_string())
            .or_insert_with(|| Timer::new(name))
    }

    /// Increments a counter by one and returns its new value.
    pub fn increment(&mut self, name: &str) -> u64 {
        self.increment_by(name, 1)
    }

    /// Increments a counter by `step` and returns its new value.
    pub fn increment_by(&mut self, name: &str, step: u64) -> u64 {
        self.counter(name).increment(step)
    }

    /// Current value of a counter, zero if it was never touched.
    pub fn counter_value(&self, name: &str) -> u64 {
        self.counters.get(name).map_or(0, Counter::value)
    }

    pub fn start(&mut self, name: &str) -> Result<(), MeasureError> {
        self.timer(name).start()
    }

    pub fn stop(&mut self, name: &str) -> Result<Duration, MeasureError> {
        self.timer(name).stop()
    }

    /// Total recorded time of a timer, zero if it was never touched.
    pub fn total(&self, name: &str) -> Duration {
        self.timers.get(name).map_or(Duration::ZERO, Timer::total)
    }

    pub fn counters(&self) -> impl Iterator<Item = &Counter> {
        self.counters.values()
    }

    pub fn timers(&self) -> impl Iterator<Item = &Timer> {
        self.timers.values()
    }

    /// Drops all counters and timers.
    pub fn reset(&mut self) {
        self.counters.clear();
        self.timers.clear();
    }

    /// Renders all counters and timers as one line each, in creation order.
    pub fn summary(&self) -> String {
        let mut out = String::new();
        for counter in self.counters.values() {
            out.push_str(&format!("{}: {}\n", counter.name(), counter.value()));
        }
        for timer in self.timers.values() {
            out.push_str(&format!(
                "{}: {:.9}s over {} runs\n",
                timer.name(),
                timer.total().as_secs_f64(),
                timer.timings().len()
            ));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_created_on_first_use() {
        let mut m = Measurement::new();
        assert_eq!(m.counter_value("union.operator"), 0);
        assert_eq!(m.increment("union.operator"), 1);
        assert_eq!(m.increment_by("union.operator", 2), 3);
        assert_eq!(m.counter_value("union.operator"), 3);
    }

    #[test]
    fn test_timer_lifecycle_through_registry() {
        let mut m = Measurement::new();
        m.start("diagnosis.first").unwrap();
        let elapsed = m.stop("diagnosis.first").unwrap();
        assert!(m.total("diagnosis.first") >= elapsed);

        // Stopping again without a start is an illegal state.
        assert!(m.stop("diagnosis.first").is_err());
    }

    #[test]
    fn test_reset_drops_everything() {
        let mut m = Measurement::new();
        m.increment("checks");
        m.start("t").unwrap();
        m.stop("t").unwrap();
        m.reset();
        assert_eq!(m.counter_value("checks"), 0);
        assert_eq!(m.total("t"), Duration::ZERO);
        assert_eq!(m.counters().count(), 0);
    }

    #[test]
    fn test_summary_lists_counters_in_creation_order() {
        let mut m = Measurement::new();
        m.increment("b.counter");
        m.increment("a.counter");
        let summary = m.summary();
        let b = summary.find("b.counter").unwrap();
        let a = summary.find("a.counter").unwrap();
        assert!(b < a);
    }

    #[test]
    fn test_shared_handle_sees_same_context() {
        let shared = Measurement::shared();
        let clone = Rc::clone(&shared);
        clone.borrow_mut().increment("checks");
        assert_eq!(shared.borrow().counter_value("checks"), 1);
    }
}
