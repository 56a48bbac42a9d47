/// A named, monotonically increasing counter used for evaluations.
#[derive(Debug, Clone)]
pub struct Counter {
    name: String,
    value: u64,
}

impl Counter {
    pub(crate) fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            value: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> u64 {
        self.value
    }

    /// Increments the counter by `step` and returns the new value.
    pub fn increment(&mut self, step: u64) -> u64 {
        self.value += step;
        self.value
    }
}

impl std::fmt::Display for Counter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counter_starts_at_zero() {
        let counter = Counter::new("checks");
        assert_eq!(counter.value(), 0);
        assert_eq!(counter.name(), "checks");
    }

    #[test]
    fn test_counter_increments_by_step() {
        let mut counter = Counter::new("checks");
        assert_eq!(counter.increment(1), 1);
        assert_eq!(counter.increment(4), 5);
        assert_eq!(counter.value(), 5);
    }
}
