//! The branch-and-bound engine: wires the frontier, incumbent, statistics, and strategies
//! into the `optimize` entry point, and drives the parallel worker pool.
//!
//! The per-worker control loop is an iterative, queue-driven bound → callback → branch
//! cycle suitable for a shared frontier, rather than a recursive per-thread descent.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Instant;

use cetsp_core::{CetspError, DiskIndex, Instance};
use cetsp_heuristic::AdaptiveTspHeuristic;
use cetsp_oracle::{ProjectionSocpSolver, SocpOracle, TspOracle, TwoOptTspSolver};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::context::{Context, NodeCallback};
use crate::frontier::Frontier;
use crate::hull::{convex_hull_order, onion_peel};
use crate::node::Node;
use crate::options::SolverOptions;
use crate::partial_solution::PartialSolution;
use crate::solution::{Incumbent, Solution};
use crate::statistics::{Statistics, StatisticsSnapshot, TerminationReason};

/// Bundles the final incumbent, lower bound, and statistics returned by [`optimize`].
#[derive(Debug, Clone)]
pub struct OptimizeOutcome {
    pub upper_bound_solution: Option<Solution>,
    pub lower_bound: f64,
    pub stats: StatisticsSnapshot,
}

/// Shared, `Arc`-wrapped state every worker thread reads and mutates through synchronized
/// primitives; the instance itself is read-only after construction.
struct SharedState {
    instance: Arc<Instance>,
    options: SolverOptions,
    socp: Arc<dyn SocpOracle>,
    incumbent: Incumbent,
    stats: Statistics,
    stop: AtomicBool,
    frontier: Frontier,
    hull_order: Vec<DiskIndex>,
    layers: Vec<Vec<DiskIndex>>,
    callback: Option<Arc<NodeCallback>>,
    fatal: Mutex<Option<CetspError>>,
}

impl SharedState {
    fn should_stop(&self) -> bool {
        self.stop.load(Ordering::Acquire)
            || self
                .options
                .cancellation
                .as_ref()
                .is_some_and(|flag| flag.load(Ordering::Acquire))
    }

    fn fail(&self, error: CetspError) {
        let mut slot = self.fatal.lock().unwrap();
        if slot.is_none() {
            *slot = Some(error);
        }
        self.stop.store(true, Ordering::Release);
    }
}

fn resolve_tsp_oracle(options: &SolverOptions) -> Result<Arc<dyn TspOracle>, CetspError> {
    #[cfg(feature = "concorde")]
    {
        return Ok(Arc::new(cetsp_oracle::ConcordeTspSolver::new()));
    }
    #[cfg(not(feature = "concorde"))]
    {
        if !options.fallback_if_no_concorde {
            return Err(CetspError::BackendUnavailable(
                "no concorde_rs backend linked (enable the `concorde` feature)".to_string(),
            ));
        }
        Ok(Arc::new(TwoOptTspSolver::new()))
    }
}

/// Runs the adaptive TSP heuristic to produce the first incumbent.
fn seed_incumbent(
    instance: &Instance,
    options: &SolverOptions,
    tsp: Arc<dyn TspOracle>,
    socp: Arc<dyn SocpOracle>,
) -> Result<Solution, CetspError> {
    let tol = options.tolerance();
    let mut heuristic =
        AdaptiveTspHeuristic::new(instance.disks().to_vec(), instance.mode(), tol, tsp, socp);
    let result = heuristic.optimize(10)?;
    let order = result.order.into_iter().map(DiskIndex).collect();
    let trajectory = cetsp_core::Trajectory::new(result.hitting_points, instance.mode());
    Ok(Solution {
        order,
        trajectory,
        length: result.length,
    })
}

/// Programmatic entry point: solves `instance` under `options`, returning the best tour
/// or path found, a certified lower bound, and search statistics.
pub fn optimize(instance: &Instance, options: &SolverOptions) -> Result<OptimizeOutcome, CetspError> {
    run(instance, options, None)
}

/// As [`optimize`] but additionally invokes `callback` once per popped node, before
/// feasibility/branching decisions are made — the capability object described in the
/// design notes.
pub fn optimize_with_callback(
    instance: &Instance,
    options: &SolverOptions,
    callback: Arc<NodeCallback>,
) -> Result<OptimizeOutcome, CetspError> {
    run(instance, options, Some(callback))
}

fn run(
    instance: &Instance,
    options: &SolverOptions,
    callback: Option<Arc<NodeCallback>>,
) -> Result<OptimizeOutcome, CetspError> {
    let instance = Arc::new(instance.clone());
    let socp: Arc<dyn SocpOracle> = Arc::new(ProjectionSocpSolver::new());
    let tsp = resolve_tsp_oracle(options)?;

    let incumbent = Incumbent::new();
    match seed_incumbent(&instance, options, tsp, socp.clone()) {
        Ok(solution) => {
            incumbent.offer(solution);
        }
        Err(err) => {
            log::warn!("primal heuristic failed to seed an incumbent: {err}");
        }
    }

    let hull_order = convex_hull_order(&instance);
    let layers = onion_peel(&instance);

    let root_order = options.root_strategy.select(&instance, options.seed);
    let root_partial =
        PartialSolution::from_order(instance.clone(), socp.clone(), options.tolerance(), root_order)?;
    let root = Node::root(root_partial, 0);

    let shared = Arc::new(SharedState {
        instance,
        options: options.clone(),
        socp,
        incumbent,
        stats: Statistics::new(),
        stop: AtomicBool::new(false),
        frontier: Frontier::new(options.num_threads),
        hull_order,
        layers,
        callback,
        fatal: Mutex::new(None),
    });
    shared.frontier.seed(root);

    run_workers(&shared);

    if let Some(err) = shared.fatal.lock().unwrap().clone() {
        return Err(err);
    }

    let reason = determine_reason(&shared);
    let lower_bound = final_lower_bound(&shared);
    shared.stats.record_bounds(lower_bound, shared.incumbent.upper_bound());

    Ok(OptimizeOutcome {
        upper_bound_solution: shared.incumbent.snapshot(),
        lower_bound,
        stats: shared.stats.snapshot(reason),
    })
}

fn final_lower_bound(shared: &SharedState) -> f64 {
    let lb = shared.frontier.current_lower_bound();
    if lb.is_finite() {
        lb
    } else {
        // Frontier exhausted: the search proved optimality, so the incumbent itself is
        // the certified bound.
        shared.incumbent.upper_bound()
    }
}

fn determine_reason(shared: &SharedState) -> TerminationReason {
    if shared
        .options
        .cancellation
        .as_ref()
        .is_some_and(|flag| flag.load(Ordering::Acquire))
    {
        TerminationReason::Cancelled
    } else if shared.stop.load(Ordering::Acquire) && shared.frontier.current_lower_bound().is_finite()
    {
        TerminationReason::Timelimit
    } else {
        TerminationReason::Optimal
    }
}

fn run_workers(shared: &Arc<SharedState>) {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(shared.options.num_threads)
        .build();
    let pool = match pool {
        Ok(pool) => pool,
        Err(err) => {
            shared.fail(CetspError::InternalInvariant(format!(
                "failed to build worker pool: {err}"
            )));
            return;
        }
    };

    let deadline = Instant::now() + shared.options.timelimit;

    pool.scope(|scope| {
        {
            let shared = shared.clone();
            scope.spawn(move |_| watchdog(&shared, deadline));
        }
        for worker in 0..shared.options.num_threads {
            let shared = shared.clone();
            scope.spawn(move |_| worker_loop(&shared, worker));
        }
    });
}

/// Sleeps in short increments, checking whether the timelimit has elapsed or the search
/// finished naturally, so it never outlives the scope it was spawned into.
fn watchdog(shared: &SharedState, deadline: Instant) {
    loop {
        if shared.should_stop() {
            return;
        }
        if Instant::now() >= deadline {
            log::info!("timelimit reached, signalling workers to stop");
            shared.stop.store(true, Ordering::Release);
            return;
        }
        std::thread::sleep(std::time::Duration::from_millis(25));
    }
}

fn worker_loop(shared: &SharedState, worker: usize) {
    let mut rng = StdRng::seed_from_u64(shared.options.seed ^ (worker as u64).wrapping_mul(0x9E37_79B9));
    loop {
        if shared.should_stop() {
            return;
        }
        let Some(node) = shared
            .frontier
            .pop_blocking(worker, shared.options.search_strategy, &mut rng)
        else {
            return;
        };
        process_node(shared, &node, worker, &mut rng);
        shared.frontier.mark_done();
    }
}

fn process_node(shared: &SharedState, node: &Arc<Node>, worker: usize, rng: &mut StdRng) {
    shared.stats.nodes_explored.fetch_add(1, Ordering::Relaxed);

    let ub = shared.incumbent.upper_bound();
    if shared.should_stop() {
        node.set_state(crate::node::NodeState::TimedOut);
        return;
    }
    if node.lower_bound >= (1.0 - shared.options.optimality_gap) * ub {
        node.set_state(crate::node::NodeState::PrunedByBound);
        shared.stats.pruned_by_bound.fetch_add(1, Ordering::Relaxed);
        log::trace!(
            "node depth={} lb={} pruned by bound (ub={})",
            node.depth,
            node.lower_bound,
            ub
        );
        return;
    }

    if let Some(callback) = &shared.callback {
        let ctx = Context::new(node, &shared.incumbent, &shared.stats);
        callback(&ctx);
        if node.is_pruned() {
            node.set_state(crate::node::NodeState::PrunedByRule);
            shared.stats.pruned_by_rule.fetch_add(1, Ordering::Relaxed);
            return;
        }
    }

    node.set_state(crate::node::NodeState::Evaluated);

    if node.partial.is_feasible() {
        node.set_state(crate::node::NodeState::Feasible);
        let solution = Solution {
            order: node.partial.order().to_vec(),
            trajectory: node.partial.trajectory(),
            length: node.partial.value(),
        };
        let length = solution.length;
        if shared.incumbent.offer(solution) {
            log::info!("new incumbent length={length}");
        }
        return;
    }

    branch(shared, node, worker, rng);
}

fn branch(shared: &SharedState, node: &Arc<Node>, worker: usize, rng: &mut StdRng) {
    let Some(disk) = shared.options.branching_strategy.choose(&node.partial, rng) else {
        // Infeasible yet nothing left to branch on: every disk is already covered within
        // tolerance but the SOCP result was marked infeasible by a stricter check: leave
        // the node as evaluated-but-not-branched rather than looping forever.
        return;
    };

    // For a closed tour the sequence is cyclic, so appending after the last disk and
    // inserting before the first produce the same rotation of the same tour: positions
    // `0..len` already cover every distinct child. For a path, the slot after the last
    // disk is the one adjacent to the fixed `end` point (see `extend_sequence_for_mode`),
    // which is a genuinely distinct insertion point that must stay reachable, so paths
    // also branch on `position == len`.
    let len = node.partial.len();
    let positions: std::ops::Range<usize> = match shared.instance.mode() {
        cetsp_core::TourMode::Tour => 0..len.max(1),
        cetsp_core::TourMode::Path { .. } => 0..(len + 1),
    };
    let mut children = Vec::with_capacity(positions.len());
    for position in positions {
        if !shared.options.rules.check(
            &shared.hull_order,
            &shared.layers,
            node.partial.order(),
            position,
            disk,
        ) {
            shared.stats.pruned_by_rule.fetch_add(1, Ordering::Relaxed);
            continue;
        }

        shared.stats.socp_calls.fetch_add(1, Ordering::Relaxed);
        match node.partial.insert(position, disk) {
            Ok(mut partial) => {
                if shared.options.simplify && shared.options.branching_strategy.simplifies() {
                    match partial.simplify() {
                        Ok(simplified) => partial = simplified,
                        Err(err) => log::warn!("simplify failed, keeping unsimplified child: {err}"),
                    }
                }
                let seq = node.sequence_id.wrapping_add((position as u64) + 1);
                children.push(Node::child(node, partial, seq));
            }
            Err(CetspError::Numeric(msg)) => {
                shared.stats.numeric_warnings.fetch_add(1, Ordering::Relaxed);
                log::warn!("SOCP failed to converge for a candidate child: {msg}");
            }
            Err(err) if err.is_fatal() => {
                shared.fail(err);
                return;
            }
            Err(err) => log::warn!("dropping candidate child: {err}"),
        }
    }

    shared
        .stats
        .branches_created
        .fetch_add(children.len() as u64, Ordering::Relaxed);
    node.set_children(children.clone());
    shared
        .frontier
        .push_children(worker, shared.options.search_strategy, &children);
}
