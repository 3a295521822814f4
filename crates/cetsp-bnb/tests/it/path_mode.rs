use cetsp_bnb::optimize;
use cetsp_core::{Disk, Instance, Point};

use crate::common::fast_options;

#[test]
fn path_mode_does_not_deduct_fixed_endpoint_radius() {
    let instance = Instance::path(
        vec![
            Disk::new(Point::new(0.0, 0.0), 1.0),
            Disk::new(Point::new(10.0, 0.0), 1.0),
        ],
        Point::new(0.0, 0.0),
        Point::new(0.0, 0.0),
    )
    .unwrap();
    let outcome = optimize(&instance, &fast_options()).unwrap();
    let length = outcome.upper_bound_solution.unwrap().length;
    assert!((length - 18.0).abs() < 1e-1, "got {length}");
}

/// Regression test for a branching bug: `branch()` used to only ever insert a new disk at
/// positions `0..node.partial.len()`, so in `Path` mode the disk adjacent to the fixed `end`
/// point was whatever the root strategy happened to seed as its last disk, permanently, for
/// the rest of that subtree — no later branch could ever make a different disk end-adjacent.
///
/// Here the root strategy seeds the corners nearest the fixed `start` (so the square's corner
/// closest to `end` is the one left to a later `branch()` call). `start` sits just outside the
/// corner diagonally opposite `end`, so the true optimum threads the perimeter with that
/// opposite corner last. Under the bug, whichever corner the root pinned last stays last, which
/// is the wrong one here, and the best reachable tour is far longer than the true optimum.
#[test]
fn path_mode_can_place_any_disk_adjacent_to_the_fixed_end() {
    let instance = Instance::path(
        vec![
            Disk::point(Point::new(0.0, 0.0)),
            Disk::point(Point::new(10.0, 0.0)),
            Disk::point(Point::new(10.0, 10.0)),
            Disk::point(Point::new(0.0, 10.0)),
        ],
        Point::new(0.0, 11.0),
        Point::new(10.0, -1.0),
    )
    .unwrap();
    let outcome = optimize(&instance, &fast_options()).unwrap();
    let length = outcome.upper_bound_solution.unwrap().length;
    let optimum = 1.0 + 10.0 + 200f64.sqrt() + 10.0 + 1.0;
    assert!((length - optimum).abs() < 2.0, "got {length}, expected near {optimum}");
}
