use cetsp_bnb::{SolverOptions, optimize};
use cetsp_core::{Disk, Instance, Point};

use crate::common::fast_options;

#[test]
fn two_disks_ten_apart_with_radius_one() {
    let instance = Instance::tour(vec![
        Disk::new(Point::new(0.0, 0.0), 1.0),
        Disk::new(Point::new(10.0, 0.0), 1.0),
    ])
    .unwrap();
    let outcome = optimize(&instance, &fast_options()).unwrap();
    let length = outcome.upper_bound_solution.unwrap().length;
    assert!((length - 16.0).abs() < 1e-2, "got {length}");
}

#[test]
fn collinear_triple_absorbs_the_middle_point_disk() {
    let instance = Instance::tour(vec![
        Disk::new(Point::new(0.0, 0.0), 1.0),
        Disk::new(Point::new(10.0, 0.0), 1.0),
        Disk::point(Point::new(5.0, 0.0)),
    ])
    .unwrap();
    let outcome = optimize(&instance, &fast_options()).unwrap();
    let length = outcome.upper_bound_solution.unwrap().length;
    assert!((length - 16.0).abs() < 1e-2, "got {length}");
}

#[test]
fn square_of_point_disks_is_its_own_perimeter() {
    let instance = Instance::tour(vec![
        Disk::point(Point::new(0.0, 0.0)),
        Disk::point(Point::new(10.0, 0.0)),
        Disk::point(Point::new(0.0, 10.0)),
        Disk::point(Point::new(10.0, 10.0)),
    ])
    .unwrap();
    let outcome = optimize(&instance, &fast_options()).unwrap();
    let length = outcome.upper_bound_solution.unwrap().length;
    assert!((length - 40.0).abs() < 1e-1, "got {length}");
}

#[test]
fn square_plus_centre_point_disk() {
    let instance = Instance::tour(vec![
        Disk::point(Point::new(0.0, 0.0)),
        Disk::point(Point::new(10.0, 0.0)),
        Disk::point(Point::new(0.0, 10.0)),
        Disk::point(Point::new(10.0, 10.0)),
        Disk::point(Point::new(5.0, 5.0)),
    ])
    .unwrap();
    let outcome = optimize(&instance, &fast_options()).unwrap();
    let length = outcome.upper_bound_solution.unwrap().length;
    assert!((length - 44.142_130_934_741_19).abs() < 5e-2, "got {length}");
}

#[test]
fn four_by_four_grid_of_point_disks() {
    let mut disks = Vec::new();
    for x in 0..4 {
        for y in 0..4 {
            disks.push(Disk::point(Point::new(x as f64, y as f64)));
        }
    }
    let instance = Instance::tour(disks).unwrap();
    let options = SolverOptions::builder()
        .num_threads(1)
        .timelimit(15.0)
        .build()
        .unwrap();
    let outcome = optimize(&instance, &options).unwrap();
    let length = outcome.upper_bound_solution.unwrap().length;
    assert!((length - 16.0).abs() / 16.0 < 1e-2, "got {length}");
}

#[test]
fn four_by_five_grid_of_point_disks() {
    let mut disks = Vec::new();
    for x in 0..4 {
        for y in 0..5 {
            disks.push(Disk::point(Point::new(x as f64, y as f64)));
        }
    }
    let instance = Instance::tour(disks).unwrap();
    let options = SolverOptions::builder()
        .num_threads(1)
        .timelimit(15.0)
        .build()
        .unwrap();
    let outcome = optimize(&instance, &options).unwrap();
    let length = outcome.upper_bound_solution.unwrap().length;
    assert!((length - 20.0).abs() / 20.0 < 1e-2, "got {length}");
}
