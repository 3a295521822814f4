use cetsp_core::{Disk, Point, Tolerance, TourMode};
use cetsp_oracle::{ProjectionSocpSolver, SocpOracle};
use criterion::{Criterion, criterion_group, criterion_main};

fn square_sequence(n: usize) -> Vec<Disk> {
    (0..n)
        .map(|i| {
            let angle = std::f64::consts::TAU * (i as f64) / (n as f64);
            Disk::new(Point::new(10.0 * angle.cos(), 10.0 * angle.sin()), 0.5)
        })
        .collect()
}

fn solve_ring_of_8(c: &mut Criterion) {
    let solver = ProjectionSocpSolver::default();
    let sequence = square_sequence(8);
    c.bench_function("projection SOCP solver: ring of 8 disks, closed tour", |b| {
        b.iter(|| solver.solve(&sequence, TourMode::Tour, Tolerance::DEFAULT).unwrap())
    });
}

fn solve_ring_of_24(c: &mut Criterion) {
    let solver = ProjectionSocpSolver::default();
    let sequence = square_sequence(24);
    c.bench_function("projection SOCP solver: ring of 24 disks, closed tour", |b| {
        b.iter(|| solver.solve(&sequence, TourMode::Tour, Tolerance::DEFAULT).unwrap())
    });
}

criterion_group!(projection_socp_bench, solve_ring_of_8, solve_ring_of_24);
criterion_main!(projection_socp_bench);
