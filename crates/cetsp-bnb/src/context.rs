//! The callback capability object: a by-reference handle passed to the user callback on
//! every popped node, rather than closure-captured global state.

use std::sync::Arc;

use cetsp_core::{DiskIndex, Trajectory};

use crate::node::Node;
use crate::solution::{Incumbent, Solution};
use crate::statistics::Statistics;

/// Observation and mutation hooks for one popped node, invoked synchronously on the
/// worker that popped it. Thread-safe across concurrent workers: `add_solution` only ever
/// touches the incumbent's own mutex, so callbacks never need to synchronize themselves.
pub struct Context<'a> {
    node: &'a Arc<Node>,
    incumbent: &'a Incumbent,
    stats: &'a Statistics,
}

impl<'a> Context<'a> {
    pub(crate) fn new(node: &'a Arc<Node>, incumbent: &'a Incumbent, stats: &'a Statistics) -> Self {
        Self {
            node,
            incumbent,
            stats,
        }
    }

    pub fn node(&self) -> &Arc<Node> {
        self.node
    }

    pub fn partial_sequence(&self) -> &[DiskIndex] {
        self.node.partial.order()
    }

    pub fn trajectory(&self) -> Trajectory {
        self.node.partial.trajectory()
    }

    pub fn lower_bound(&self) -> f64 {
        self.node.lower_bound
    }

    pub fn upper_bound(&self) -> f64 {
        self.incumbent.upper_bound()
    }

    pub fn nodes_explored(&self) -> u64 {
        self.stats
            .nodes_explored
            .load(std::sync::atomic::Ordering::Relaxed)
    }

    /// Offers `trajectory` (paired with the disk order that produced it) as a new
    /// incumbent; accepted only if strictly shorter than the current one. Returns whether
    /// it was accepted.
    pub fn add_solution(&self, order: Vec<DiskIndex>, trajectory: Trajectory) -> bool {
        let length = trajectory.length();
        self.incumbent.offer(Solution {
            order,
            trajectory,
            length,
        })
    }

    /// Marks the current node `PRUNED_BY_RULE`, stopping it from being branched.
    pub fn prune(&self) {
        self.node.prune();
    }
}

/// The callback's required bound: thread-safe, invoked with a read-only capability object.
pub type NodeCallback = dyn Fn(&Context) + Send + Sync;
