//! A branch-and-bound tree node: one partial solution, its lower bound, and bookkeeping
//! for the frontier and the parent/child tree.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, Weak};

use crate::partial_solution::PartialSolution;

/// `NEW → EVALUATED → {FEASIBLE | BRANCHED | PRUNED_BY_BOUND | PRUNED_BY_RULE | TIMED_OUT}`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeState {
    New,
    Evaluated,
    Feasible,
    Branched,
    PrunedByBound,
    PrunedByRule,
    TimedOut,
}

/// One node of the branch-and-bound tree.
///
/// The parent link is a `Weak` reference (diagnostics/ancestry only, never ownership — the
/// parent owns its children via `Vec<Arc<Node>>`) to avoid a reference cycle. `taken` backs
/// the frontier's lazy-deletion scheme: a node may be reachable from both a worker's local
/// DFS stack and the shared best-first heap, and whichever side pops it first claims it.
#[derive(Debug)]
pub struct Node {
    pub partial: PartialSolution,
    pub lower_bound: f64,
    pub depth: usize,
    pub sequence_id: u64,
    parent: Option<Weak<Node>>,
    children: Mutex<Vec<Arc<Node>>>,
    pruned: AtomicBool,
    taken: AtomicBool,
    state: Mutex<NodeState>,
}

impl Node {
    pub fn root(partial: PartialSolution, sequence_id: u64) -> Arc<Node> {
        Arc::new(Node {
            lower_bound: partial.value(),
            partial,
            depth: 0,
            sequence_id,
            parent: None,
            children: Mutex::new(Vec::new()),
            pruned: AtomicBool::new(false),
            taken: AtomicBool::new(false),
            state: Mutex::new(NodeState::New),
        })
    }

    pub fn child(parent: &Arc<Node>, partial: PartialSolution, sequence_id: u64) -> Arc<Node> {
        Arc::new(Node {
            lower_bound: partial.value(),
            partial,
            depth: parent.depth + 1,
            sequence_id,
            parent: Some(Arc::downgrade(parent)),
            children: Mutex::new(Vec::new()),
            pruned: AtomicBool::new(false),
            taken: AtomicBool::new(false),
            state: Mutex::new(NodeState::New),
        })
    }

    pub fn parent(&self) -> Option<Arc<Node>> {
        self.parent.as_ref().and_then(Weak::upgrade)
    }

    pub fn set_children(&self, children: Vec<Arc<Node>>) {
        *self.children.lock().unwrap() = children;
        self.set_state(NodeState::Branched);
    }

    pub fn children(&self) -> Vec<Arc<Node>> {
        self.children.lock().unwrap().clone()
    }

    pub fn is_pruned(&self) -> bool {
        self.pruned.load(Ordering::Acquire)
    }

    /// Sets the prune flag from the user callback's `Context::prune()`; may race with the
    /// owning worker, hence `AtomicBool` rather than plain `bool`.
    pub fn prune(&self) {
        self.pruned.store(true, Ordering::Release);
    }

    pub fn state(&self) -> NodeState {
        *self.state.lock().unwrap()
    }

    pub fn set_state(&self, state: NodeState) {
        *self.state.lock().unwrap() = state;
    }

    /// Attempts to claim this node for processing, returning `false` if another frontier
    /// path already claimed it first.
    pub fn try_claim(&self) -> bool {
        self.taken
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }
}
