//! Search strategies: define how the frontier orders and yields live nodes.

/// Which queue discipline governs node selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchStrategy {
    /// Two queues: a per-worker DFS stack for local descent, and a shared best-first
    /// priority queue keyed on lower bound. Workers drain their DFS stack first, falling
    /// back to the global best-bounded node once it empties.
    DfsBfs,
    /// Always descend into the cheapest child; backtrack (via the shared queue) on a
    /// dead end.
    CheapestChildDepthFirst,
    /// A single global priority queue ordered purely by lower bound.
    CheapestBreadthFirst,
    /// Uniform random pop from the live frontier, using the per-worker seeded RNG.
    Random,
}

impl SearchStrategy {
    /// Whether this strategy pushes newly created children to the worker's local DFS
    /// stack (for cheap, lock-free local descent) rather than solely to the shared queue.
    pub fn uses_local_stack(&self) -> bool {
        matches!(
            self,
            SearchStrategy::DfsBfs | SearchStrategy::CheapestChildDepthFirst
        )
    }
}
