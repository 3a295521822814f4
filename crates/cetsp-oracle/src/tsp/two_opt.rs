use cetsp_core::{CetspError, Point};

use crate::tsp::TspOracle;

/// Nearest-neighbor construction followed by 2-opt local search: build a tour greedily,
/// then repeatedly reverse segments whenever doing so shortens the tour, until no
/// reversal helps. This is the dependency-free fallback `TspOracle`; it never needs an
/// external solver license, at the cost of optimality on larger instances.
#[derive(Debug, Clone, Copy, Default)]
pub struct TwoOptTspSolver;

impl TwoOptTspSolver {
    pub fn new() -> Self {
        Self
    }
}

impl TspOracle for TwoOptTspSolver {
    fn solve(&self, points: &[Point]) -> Result<Vec<usize>, CetspError> {
        let n = points.len();
        if n == 0 {
            return Ok(vec![]);
        }
        if n <= 3 {
            return Ok((0..n).collect());
        }

        let mut order = nearest_neighbor_order(points);
        two_opt_improve(points, &mut order);
        Ok(order)
    }
}

fn nearest_neighbor_order(points: &[Point]) -> Vec<usize> {
    let n = points.len();
    let mut visited = vec![false; n];
    let mut order = Vec::with_capacity(n);

    let mut current = 0usize;
    visited[current] = true;
    order.push(current);

    for _ in 1..n {
        let next = (0..n)
            .filter(|&i| !visited[i])
            .min_by(|&a, &b| {
                let da = points[current].squared_distance_to(&points[a]);
                let db = points[current].squared_distance_to(&points[b]);
                da.total_cmp(&db)
            })
            .expect("at least one unvisited point remains");
        visited[next] = true;
        order.push(next);
        current = next;
    }

    order
}

/// Repeatedly applies the best-improving edge-pair swap until a full pass finds none.
fn two_opt_improve(points: &[Point], order: &mut [usize]) {
    let n = order.len();
    if n < 4 {
        return;
    }

    loop {
        let mut improved = false;
        for i in 0..n - 1 {
            for j in i + 2..n {
                if i == 0 && j == n - 1 {
                    // Swapping the wrap-around edge with itself is a no-op.
                    continue;
                }
                let a = points[order[i]];
                let b = points[order[i + 1]];
                let c = points[order[j]];
                let d = points[order[(j + 1) % n]];

                let before = a.distance_to(&b) + c.distance_to(&d);
                let after = a.distance_to(&c) + b.distance_to(&d);
                if after + 1e-9 < before {
                    order[i + 1..=j].reverse();
                    improved = true;
                }
            }
        }
        if !improved {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tour_length(points: &[Point], order: &[usize]) -> f64 {
        let n = order.len();
        (0..n)
            .map(|i| points[order[i]].distance_to(&points[order[(i + 1) % n]]))
            .sum()
    }

    #[test]
    fn square_is_solved_optimally() {
        let points = vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(10.0, 0.0),
            Point::new(0.0, 10.0),
        ];
        let solver = TwoOptTspSolver::new();
        let order = solver.solve(&points).unwrap();
        assert_eq!(order.len(), 4);
        assert!((tour_length(&points, &order) - 40.0).abs() < 1e-9);
    }

    #[test]
    fn empty_input_yields_empty_order() {
        let solver = TwoOptTspSolver::new();
        assert_eq!(solver.solve(&[]).unwrap(), Vec::<usize>::new());
    }

    #[test]
    fn two_opt_removes_crossing_edges() {
        // A "bowtie" ordering that nearest-neighbor from a bad start could produce;
        // 2-opt must uncross it back down to the convex-hull perimeter.
        let points = vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(10.0, 0.0),
            Point::new(0.0, 10.0),
        ];
        let mut crossed = vec![0, 1, 2, 3];
        two_opt_improve(&points, &mut crossed);
        assert!((tour_length(&points, &crossed) - 40.0).abs() < 1e-9);
    }
}
