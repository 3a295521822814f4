//! The shared frontier: a best-first priority queue plus one DFS stack per worker,
//! coordinated through a `Condvar` exactly as the concurrency model in the design notes
//! specifies for "frontier pop when empty".

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering as AtomicOrdering};
use std::sync::{Arc, Condvar, Mutex};

use rand::Rng;

use crate::node::Node;
use crate::strategy::SearchStrategy;

/// A frontier entry ordered by lower bound (min-heap via reversed `Ord`), tie-broken by a
/// monotonically increasing push-time sequence number so `BinaryHeap`'s total order never
/// depends on pointer identity.
struct HeapEntry {
    lb: f64,
    seq: u64,
    node: Arc<Node>,
}

impl PartialEq for HeapEntry {
    fn eq(&self, other: &Self) -> bool {
        self.lb == other.lb && self.seq == other.seq
    }
}
impl Eq for HeapEntry {}

impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HeapEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed so `BinaryHeap` (a max-heap) pops the smallest lower bound first,
        // tie-broken by the smaller (earlier-pushed) sequence number.
        other
            .lb
            .total_cmp(&self.lb)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Live frontier: a shared best-first heap every node is registered into, plus one local
/// DFS stack per worker for `DfsBfs`/`CheapestChildDepthFirst`'s cheap local descent.
/// Nodes reachable from both sides use [`Node::try_claim`] for lazy-deletion: whichever
/// side pops a node first wins, the other's stale reference is simply discarded.
pub struct Frontier {
    heap: Mutex<BinaryHeap<HeapEntry>>,
    dfs_stacks: Vec<Mutex<Vec<Arc<Node>>>>,
    condvar: Condvar,
    busy: AtomicUsize,
    seq: AtomicU64,
}

impl Frontier {
    pub fn new(num_workers: usize) -> Self {
        Self {
            heap: Mutex::new(BinaryHeap::new()),
            dfs_stacks: (0..num_workers).map(|_| Mutex::new(Vec::new())).collect(),
            condvar: Condvar::new(),
            busy: AtomicUsize::new(0),
            seq: AtomicU64::new(0),
        }
    }

    fn next_seq(&self) -> u64 {
        self.seq.fetch_add(1, AtomicOrdering::Relaxed)
    }

    fn register(&self, node: &Arc<Node>) {
        let seq = self.next_seq();
        self.heap.lock().unwrap().push(HeapEntry {
            lb: node.lower_bound,
            seq,
            node: node.clone(),
        });
    }

    /// Registers the search's root node.
    pub fn seed(&self, root: Arc<Node>) {
        self.register(&root);
        self.condvar.notify_all();
    }

    /// Pushes freshly branched children: registered into the shared heap always, and
    /// additionally onto the issuing worker's local DFS stack for strategies that favor
    /// local descent. `DfsBfs` pushes every child, walking the whole local subtree before
    /// falling back to the shared queue; `CheapestChildDepthFirst` pushes only the
    /// smallest-lower-bound child, so a worker always descends greedily into it and only
    /// backtracks (via the shared heap, where every sibling is still registered) on a
    /// dead end.
    pub fn push_children(&self, worker: usize, strategy: SearchStrategy, children: &[Arc<Node>]) {
        for child in children {
            self.register(child);
        }
        match strategy {
            SearchStrategy::DfsBfs => {
                let mut stack = self.dfs_stacks[worker].lock().unwrap();
                stack.extend(children.iter().cloned());
            }
            SearchStrategy::CheapestChildDepthFirst => {
                if let Some(cheapest) = children
                    .iter()
                    .min_by(|a, b| a.lower_bound.total_cmp(&b.lower_bound))
                {
                    let mut stack = self.dfs_stacks[worker].lock().unwrap();
                    stack.push(cheapest.clone());
                }
            }
            SearchStrategy::CheapestBreadthFirst | SearchStrategy::Random => {}
        }
        self.condvar.notify_all();
    }

    /// Blocks until a node is available or the frontier is permanently exhausted (no live
    /// node anywhere and no worker currently processing one), in which case `None` is
    /// returned and every other blocked worker is woken to observe the same thing.
    pub fn pop_blocking(
        &self,
        worker: usize,
        strategy: SearchStrategy,
        rng: &mut impl Rng,
    ) -> Option<Arc<Node>> {
        loop {
            if let Some(node) = self.try_pop(worker, strategy, rng) {
                self.busy.fetch_add(1, AtomicOrdering::AcqRel);
                return Some(node);
            }
            if self.is_exhausted() {
                self.condvar.notify_all();
                return None;
            }
            // A dummy mutex just to park on the condvar; the heap/stack mutexes are
            // taken and released inside `try_pop`/`is_exhausted` rather than held here.
            let guard = self.heap.lock().unwrap();
            let _ = self
                .condvar
                .wait_timeout(guard, std::time::Duration::from_millis(20))
                .unwrap();
        }
    }

    /// Call once a worker is done processing the node `pop_blocking` returned, whether it
    /// branched, pruned, or accepted it as feasible.
    pub fn mark_done(&self) {
        self.busy.fetch_sub(1, AtomicOrdering::AcqRel);
        self.condvar.notify_all();
    }

    fn is_exhausted(&self) -> bool {
        if self.busy.load(AtomicOrdering::Acquire) > 0 {
            return false;
        }
        if !self.heap.lock().unwrap().is_empty() {
            return false;
        }
        self.dfs_stacks
            .iter()
            .all(|stack| stack.lock().unwrap().is_empty())
    }

    fn try_pop(&self, worker: usize, strategy: SearchStrategy, rng: &mut impl Rng) -> Option<Arc<Node>> {
        match strategy {
            SearchStrategy::DfsBfs | SearchStrategy::CheapestChildDepthFirst => {
                if let Some(node) = self.pop_local(worker) {
                    return Some(node);
                }
                self.pop_cheapest()
            }
            SearchStrategy::CheapestBreadthFirst => self.pop_cheapest(),
            SearchStrategy::Random => self.pop_random(rng),
        }
    }

    fn pop_local(&self, worker: usize) -> Option<Arc<Node>> {
        let mut stack = self.dfs_stacks[worker].lock().unwrap();
        while let Some(node) = stack.pop() {
            if node.try_claim() {
                return Some(node);
            }
        }
        None
    }

    fn pop_cheapest(&self) -> Option<Arc<Node>> {
        let mut heap = self.heap.lock().unwrap();
        while let Some(entry) = heap.pop() {
            if entry.node.try_claim() {
                return Some(entry.node);
            }
        }
        None
    }

    fn pop_random(&self, rng: &mut impl Rng) -> Option<Arc<Node>> {
        let mut heap = self.heap.lock().unwrap();
        if heap.is_empty() {
            return None;
        }
        let mut items: Vec<HeapEntry> = heap.drain().collect();
        drop(heap);

        loop {
            if items.is_empty() {
                let mut heap = self.heap.lock().unwrap();
                heap.extend(items);
                return None;
            }
            let i = rng.gen_range(0..items.len());
            let entry = items.swap_remove(i);
            if entry.node.try_claim() {
                let mut heap = self.heap.lock().unwrap();
                heap.extend(items);
                return Some(entry.node);
            }
        }
    }

    /// The minimum lower bound among currently-live frontier nodes, approximated: it may
    /// lag by at most one batch of push/pop operations, per the concurrency model's
    /// "global LB reads are monotone but may lag" guarantee.
    pub fn current_lower_bound(&self) -> f64 {
        let mut best = self
            .heap
            .lock()
            .unwrap()
            .peek()
            .map_or(f64::INFINITY, |e| e.lb);
        for stack in &self.dfs_stacks {
            for node in stack.lock().unwrap().iter() {
                best = best.min(node.lower_bound);
            }
        }
        best
    }
}
