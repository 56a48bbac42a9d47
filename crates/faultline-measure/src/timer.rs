use std::time::{Duration, Instant};

/// Errors for invalid counter/timer usage. These are programming errors:
/// fatal to the calling operation, not to the process.
#[derive(Debug, thiserror::Error)]
pub enum MeasureError {
    #[error("timer '{0}' is already running")]
    TimerAlreadyRunning(String),

    #[error("timer '{0}' is not running")]
    TimerNotRunning(String),
}

/// A named timer recording one elapsed duration per start/stop cycle.
#[derive(Debug, Clone)]
pub struct Timer {
    name: String,
    timings: Vec<Duration>,
    started: Option<Instant>,
}

impl Timer {
    pub(crate) fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            timings: Vec::new(),
            started: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Starts the timer. Starting a running timer is an illegal state.
    pub fn start(&mut self) -> Result<(), MeasureError> {
        if self.started.is_some() {
            return Err(MeasureError::TimerAlreadyRunning(self.name.clone()));
        }
        self.started = Some(Instant::now());
        Ok(())
    }

    /// Stops the timer, records the cycle and returns its elapsed time.
    pub fn stop(&mut self) -> Result<Duration, MeasureError> {
        let started = self
            .started
            .take()
            .ok_or_else(|| MeasureError::TimerNotRunning(self.name.clone()))?;
        let elapsed = started.elapsed();
        self.timings.push(elapsed);
        Ok(elapsed)
    }

    /// Elapsed time of the cycle currently in flight.
    pub fn elapsed(&self) -> Result<Duration, MeasureError> {
        match self.started {
            Some(started) => Ok(started.elapsed()),
            None => Err(MeasureError::TimerNotRunning(self.name.clone())),
        }
    }

    /// Recorded timings, one per completed start/stop cycle.
    pub fn timings(&self) -> &[Duration] {
        &self.timings
    }

    /// Total time across all completed cycles.
    pub fn total(&self) -> Duration {
        self.timings.iter().sum()
    }
}

impl std::fmt::Display for Timer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.9}", self.total().as_secs_f64())
    }
}
