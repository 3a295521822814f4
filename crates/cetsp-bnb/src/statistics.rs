//! Per-worker counters merged on read: each worker mutates its own atomics lock-free,
//! `snapshot` aggregates them into a read-only view for callers of `optimize`.

use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Why the engine stopped: reached a certified gap, ran out of time, or was cancelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationReason {
    Optimal,
    Timelimit,
    Cancelled,
}

impl TerminationReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            TerminationReason::Optimal => "optimal",
            TerminationReason::Timelimit => "timelimit",
            TerminationReason::Cancelled => "cancelled",
        }
    }
}

/// One sample of the lower/upper bound history, timestamped relative to search start.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundSample {
    pub elapsed: Duration,
    pub lower_bound: f64,
    pub upper_bound: f64,
}

/// Live, lock-cheap counters updated from any worker. See [`StatisticsSnapshot`] for the
/// read-only view returned to callers of `optimize`.
#[derive(Debug)]
pub struct Statistics {
    start: Instant,
    pub(crate) nodes_explored: AtomicU64,
    pub(crate) branches_created: AtomicU64,
    pub(crate) pruned_by_bound: AtomicU64,
    pub(crate) pruned_by_rule: AtomicU64,
    pub(crate) socp_calls: AtomicU64,
    pub(crate) numeric_warnings: AtomicU64,
    bound_history: Mutex<Vec<BoundSample>>,
}

impl Default for Statistics {
    fn default() -> Self {
        Self {
            start: Instant::now(),
            nodes_explored: AtomicU64::new(0),
            branches_created: AtomicU64::new(0),
            pruned_by_bound: AtomicU64::new(0),
            pruned_by_rule: AtomicU64::new(0),
            socp_calls: AtomicU64::new(0),
            numeric_warnings: AtomicU64::new(0),
            bound_history: Mutex::new(Vec::new()),
        }
    }
}

impl Statistics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_bounds(&self, lower_bound: f64, upper_bound: f64) {
        let mut history = self.bound_history.lock().unwrap();
        history.push(BoundSample {
            elapsed: self.start.elapsed(),
            lower_bound,
            upper_bound,
        });
    }

    pub fn snapshot(&self, reason: TerminationReason) -> StatisticsSnapshot {
        StatisticsSnapshot {
            nodes_explored: self.nodes_explored.load(Ordering::Relaxed),
            branches_created: self.branches_created.load(Ordering::Relaxed),
            pruned_by_bound: self.pruned_by_bound.load(Ordering::Relaxed),
            pruned_by_rule: self.pruned_by_rule.load(Ordering::Relaxed),
            socp_calls: self.socp_calls.load(Ordering::Relaxed),
            numeric_warnings: self.numeric_warnings.load(Ordering::Relaxed),
            elapsed: self.start.elapsed(),
            bound_history: self.bound_history.lock().unwrap().clone(),
            reason,
        }
    }
}

/// Read-only statistics returned from `optimize`.
#[derive(Debug, Clone, PartialEq)]
pub struct StatisticsSnapshot {
    pub nodes_explored: u64,
    pub branches_created: u64,
    pub pruned_by_bound: u64,
    pub pruned_by_rule: u64,
    pub socp_calls: u64,
    pub numeric_warnings: u64,
    pub elapsed: Duration,
    pub bound_history: Vec<BoundSample>,
    pub reason: TerminationReason,
}
