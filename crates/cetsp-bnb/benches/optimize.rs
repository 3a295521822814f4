use cetsp_bnb::{SolverOptions, optimize};
use cetsp_core::{Disk, Instance, Point};
use criterion::{Criterion, criterion_group, criterion_main};

fn grid(width: usize, height: usize) -> Instance {
    let mut disks = Vec::with_capacity(width * height);
    for x in 0..width {
        for y in 0..height {
            disks.push(Disk::point(Point::new(x as f64, y as f64)));
        }
    }
    Instance::tour(disks).unwrap()
}

fn optimize_4x4_grid(c: &mut Criterion) {
    let instance = grid(4, 4);
    let options = SolverOptions::builder()
        .num_threads(1)
        .timelimit(5.0)
        .build()
        .unwrap();
    c.bench_function("optimize: 4x4 grid of point disks, one worker", |b| {
        b.iter(|| optimize(&instance, &options).unwrap())
    });
}

fn optimize_4x4_grid_parallel(c: &mut Criterion) {
    let instance = grid(4, 4);
    let options = SolverOptions::builder()
        .num_threads(4)
        .timelimit(5.0)
        .build()
        .unwrap();
    c.bench_function("optimize: 4x4 grid of point disks, four workers", |b| {
        b.iter(|| optimize(&instance, &options).unwrap())
    });
}

criterion_group!(
    name = optimize_bench;
    config = Criterion::default().sample_size(10);
    targets = optimize_4x4_grid, optimize_4x4_grid_parallel
);
criterion_main!(optimize_bench);
