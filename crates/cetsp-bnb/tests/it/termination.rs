use cetsp_bnb::{SolverOptions, TerminationReason, optimize};
use cetsp_core::{Disk, Instance, Point};

#[test]
fn termination_gap_is_honored_or_search_hits_its_timelimit() {
    let instance = Instance::tour(vec![
        Disk::point(Point::new(0.0, 0.0)),
        Disk::point(Point::new(10.0, 0.0)),
        Disk::point(Point::new(10.0, 10.0)),
        Disk::point(Point::new(0.0, 10.0)),
    ])
    .unwrap();
    let options = SolverOptions::builder()
        .num_threads(1)
        .timelimit(10.0)
        .optimality_gap(0.01)
        .build()
        .unwrap();
    let outcome = optimize(&instance, &options).unwrap();
    let ub = outcome.upper_bound_solution.as_ref().unwrap().length;
    let lb = outcome.lower_bound;
    let gap_satisfied = ub - lb <= 0.01 * ub + 1e-6;
    let timed_out = outcome.stats.reason != TerminationReason::Optimal;
    assert!(gap_satisfied || timed_out);
}
