//! The incumbent: best feasible trajectory found so far, guarded by a single-writer
//! discipline so concurrent workers can race to improve it without external locking.

use std::sync::Mutex;

use cetsp_core::{DiskIndex, Trajectory};

/// A feasible tour or path, with the disk order that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    pub order: Vec<DiskIndex>,
    pub trajectory: Trajectory,
    pub length: f64,
}

/// Minimum length improvement required for a candidate to count as "strictly better",
/// per the numeric policy in the design notes (distinguishes real improvement from noise).
const STRICTLY_BETTER_EPS: f64 = 1e-9;

/// The solution pool: a single `Mutex`-guarded slot so `offer` is linearizable — the
/// compare-and-replace happens while holding the lock, which is also what makes
/// `Context::add_solution` thread-safe without the caller doing anything special.
#[derive(Debug, Default)]
pub struct Incumbent {
    inner: Mutex<Option<Solution>>,
}

impl Incumbent {
    pub fn new() -> Self {
        Self::default()
    }

    /// The current incumbent's length, or `+∞` if none has been found yet.
    pub fn upper_bound(&self) -> f64 {
        self.inner
            .lock()
            .unwrap()
            .as_ref()
            .map_or(f64::INFINITY, |s| s.length)
    }

    /// Replaces the incumbent with `candidate` if it is strictly shorter. Returns whether
    /// the replacement happened.
    pub fn offer(&self, candidate: Solution) -> bool {
        let mut guard = self.inner.lock().unwrap();
        let better = guard
            .as_ref()
            .is_none_or(|current| candidate.length < current.length - STRICTLY_BETTER_EPS);
        if better {
            *guard = Some(candidate);
        }
        better
    }

    pub fn snapshot(&self) -> Option<Solution> {
        self.inner.lock().unwrap().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cetsp_core::{Point, TourMode};

    fn solution(length: f64) -> Solution {
        Solution {
            order: vec![DiskIndex(0)],
            trajectory: Trajectory::new(vec![Point::ORIGIN], TourMode::Tour),
            length,
        }
    }

    #[test]
    fn upper_bound_is_infinite_before_any_offer() {
        let incumbent = Incumbent::new();
        assert_eq!(incumbent.upper_bound(), f64::INFINITY);
    }

    #[test]
    fn offer_only_accepts_strict_improvements() {
        let incumbent = Incumbent::new();
        assert!(incumbent.offer(solution(10.0)));
        assert!(!incumbent.offer(solution(10.0)));
        assert!(!incumbent.offer(solution(10.0 + 1e-12)));
        assert!(incumbent.offer(solution(9.0)));
        assert_eq!(incumbent.upper_bound(), 9.0);
    }
}
