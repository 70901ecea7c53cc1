//! Per-task execution statistics
//!
//! Every task carries one [`TaskStats`]: a call counter, duration aggregates
//! for the whole `exec()` call, and a table of named sub-phase timers
//! (typically "load", "compute"/"decode", "store") that codelets feed through
//! [`Task::update_timer`](crate::Task::update_timer).
//!
//! Updates are monotonic accumulations except min/max, which track extremes.
//! Timer names are registered once, at task construction, and never renamed.
//! Statistics are race-free by construction: a task instance is never
//! executed reentrantly, and module clones own independent recorders.

use std::time::Duration;

/// Aggregates for one named sub-phase timer.
#[derive(Debug, Clone)]
pub struct TimerStats {
    name: String,
    n_calls: u64,
    total: Duration,
    min: Duration,
    max: Duration,
}

impl TimerStats {
    fn new(name: String) -> Self {
        Self {
            name,
            n_calls: 0,
            total: Duration::ZERO,
            min: Duration::ZERO,
            max: Duration::ZERO,
        }
    }

    /// Timer key, e.g. `"load"`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of recorded phase durations.
    pub fn n_calls(&self) -> u64 {
        self.n_calls
    }

    /// Accumulated phase duration.
    pub fn total(&self) -> Duration {
        self.total
    }

    /// Shortest recorded phase duration (zero before the first record).
    pub fn min(&self) -> Duration {
        self.min
    }

    /// Longest recorded phase duration.
    pub fn max(&self) -> Duration {
        self.max
    }

    fn record(&mut self, duration: Duration) {
        if self.n_calls == 0 || duration < self.min {
            self.min = duration;
        }
        if duration > self.max {
            self.max = duration;
        }
        self.n_calls += 1;
        self.total += duration;
    }

    fn reset(&mut self) {
        self.n_calls = 0;
        self.total = Duration::ZERO;
        self.min = Duration::ZERO;
        self.max = Duration::ZERO;
    }
}

/// Execution statistics of one task instance.
#[derive(Debug, Clone, Default)]
pub struct TaskStats {
    n_calls: u64,
    /// Calls that contributed to the duration aggregates (timing can be
    /// disabled per task without losing the call count).
    timed_calls: u64,
    duration_total: Duration,
    duration_min: Duration,
    duration_max: Duration,
    timers: Vec<TimerStats>,
}

impl TaskStats {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Total number of successful `exec()` calls.
    pub fn n_calls(&self) -> u64 {
        self.n_calls
    }

    /// Accumulated `exec()` duration across timed calls.
    pub fn duration_total(&self) -> Duration {
        self.duration_total
    }

    /// Shortest timed `exec()` duration (zero before the first timed call).
    pub fn duration_min(&self) -> Duration {
        self.duration_min
    }

    /// Longest timed `exec()` duration.
    pub fn duration_max(&self) -> Duration {
        self.duration_max
    }

    /// Mean timed `exec()` duration (zero before the first timed call).
    pub fn duration_avg(&self) -> Duration {
        if self.timed_calls == 0 {
            Duration::ZERO
        } else {
            self.duration_total / self.timed_calls as u32
        }
    }

    /// The named sub-phase timer table, in registration order.
    pub fn timers(&self) -> &[TimerStats] {
        &self.timers
    }

    pub(crate) fn register_timer(&mut self, name: String) -> Option<usize> {
        if self.timers.iter().any(|t| t.name == name) {
            return None;
        }
        self.timers.push(TimerStats::new(name));
        Some(self.timers.len() - 1)
    }

    pub(crate) fn update_timer(&mut self, id: usize, duration: Duration) -> bool {
        match self.timers.get_mut(id) {
            Some(timer) => {
                timer.record(duration);
                true
            }
            None => false,
        }
    }

    pub(crate) fn record(&mut self, duration: Duration) {
        if self.timed_calls == 0 || duration < self.duration_min {
            self.duration_min = duration;
        }
        if duration > self.duration_max {
            self.duration_max = duration;
        }
        self.n_calls += 1;
        self.timed_calls += 1;
        self.duration_total += duration;
    }

    pub(crate) fn record_untimed(&mut self) {
        self.n_calls += 1;
    }

    /// Zero every counter and aggregate; registered timer names survive.
    pub fn reset(&mut self) {
        self.n_calls = 0;
        self.timed_calls = 0;
        self.duration_total = Duration::ZERO;
        self.duration_min = Duration::ZERO;
        self.duration_max = Duration::ZERO;
        for timer in &mut self.timers {
            timer.reset();
        }
    }

    /// Structural copy for module cloning: same timer table, all zeroed.
    pub(crate) fn fresh(&self) -> Self {
        Self {
            timers: self
                .timers
                .iter()
                .map(|t| TimerStats::new(t.name.clone()))
                .collect(),
            ..Self::default()
        }
    }
}
