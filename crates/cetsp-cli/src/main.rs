use cetsp_bnb::{SolverOptions, optimize};
use cetsp_core::{Disk, Instance, Point};

/// A small, hardcoded CETSP instance: the unit square's corners plus its centre, each a
/// point disk. Swap in a programmatically generated `Instance` to try other shapes; this
/// binary does not parse any on-disk instance format (see the crate's Non-goals).
fn demo_instance() -> Instance {
    Instance::tour(vec![
        Disk::point(Point::new(0.0, 0.0)),
        Disk::point(Point::new(10.0, 0.0)),
        Disk::point(Point::new(10.0, 10.0)),
        Disk::point(Point::new(0.0, 10.0)),
        Disk::point(Point::new(5.0, 5.0)),
    ])
    .unwrap()
}

fn main() {
    env_logger::init();

    let instance = demo_instance();
    let options = SolverOptions::builder()
        .timelimit(10.0)
        .num_threads(4)
        .build()
        .expect("hardcoded options are valid");

    log::info!("solving a {}-disk instance with {} workers", instance.len(), options.num_threads);
    let outcome = optimize(&instance, &options).expect("solver encountered a fatal error");

    match outcome.upper_bound_solution {
        Some(solution) => println!("best tour length: {:.6}", solution.length),
        None => println!("no feasible tour found within the timelimit"),
    }
    println!("lower bound: {:.6}", outcome.lower_bound);
    println!(
        "nodes explored: {} (reason: {})",
        outcome.stats.nodes_explored,
        outcome.stats.reason.as_str()
    );
}
