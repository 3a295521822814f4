/*!
Adaptive primal heuristic for the Close-Enough TSP: alternates between solving the
classical Euclidean TSP on the current hitting points and refining those hitting points
with the SOCP oracle, given the TSP's resulting visitation order. In practice this
converges to a near-optimal tour within a handful of iterations and is used to seed the
branch-and-bound search with a tight initial incumbent.
*/

use std::sync::Arc;

use cetsp_core::{CetspError, Disk, Point, Tolerance, TourMode};
use cetsp_oracle::{SocpOracle, TspOracle};
use rand::Rng;

/// The tour order, realized hitting points, and certified length of one heuristic run.
#[derive(Debug, Clone, PartialEq)]
pub struct AdaptiveTspSolution {
    /// Permutation of `0..disks.len()` giving the visitation order.
    pub order: Vec<usize>,
    /// One hitting point per disk, indexed by disk (not by tour position).
    pub hitting_points: Vec<Point>,
    pub length: f64,
}

/// Iteratively re-sequences and re-places hitting points to shrink a CETSP tour.
pub struct AdaptiveTspHeuristic {
    disks: Vec<Disk>,
    mode: TourMode,
    tol: Tolerance,
    tsp_oracle: Arc<dyn TspOracle>,
    socp_oracle: Arc<dyn SocpOracle>,
    hitting_points: Vec<Point>,
    order: Vec<usize>,
    length: f64,
}

impl AdaptiveTspHeuristic {
    pub fn new(
        disks: Vec<Disk>,
        mode: TourMode,
        tol: Tolerance,
        tsp_oracle: Arc<dyn TspOracle>,
        socp_oracle: Arc<dyn SocpOracle>,
    ) -> Self {
        let hitting_points = disks.iter().map(|d| d.center).collect();
        let order = (0..disks.len()).collect();
        Self {
            disks,
            mode,
            tol,
            tsp_oracle,
            socp_oracle,
            hitting_points,
            order,
            length: f64::INFINITY,
        }
    }

    /// Moves a random subset of hitting points to a uniformly random point within their
    /// own disk, to give a subsequent [`Self::optimize`] call a chance to escape a local
    /// optimum. `ratio` is the per-point probability of being moved.
    pub fn randomize_hitting_points(&mut self, ratio: f64, rng: &mut impl Rng) {
        for (point, disk) in self.hitting_points.iter_mut().zip(self.disks.iter()) {
            if rng.gen_bool(ratio.clamp(0.0, 1.0)) {
                *point = random_point_in_disk(disk, rng);
            }
        }
    }

    fn recompute_tour(&mut self) -> Result<(), CetspError> {
        if distinct_center_count(&self.disks) <= 2 {
            // All disks are centered on the same point or a single line: any order is
            // already optimal, and some TSP oracles do not tolerate degenerate input.
            return Ok(());
        }
        self.order = self.tsp_oracle.solve(&self.hitting_points)?;
        Ok(())
    }

    fn recompute_hitting_points(&mut self) -> Result<f64, CetspError> {
        let sequence: Vec<Disk> = self.order.iter().map(|&i| self.disks[i]).collect();
        let solution = self.socp_oracle.solve(&sequence, self.mode, self.tol)?;
        for (position, &disk_index) in self.order.iter().enumerate() {
            self.hitting_points[disk_index] = solution.hit_points[position];
        }
        Ok(solution.length)
    }

    /// Runs up to `iterations` rounds of re-sequence/re-place, stopping early once a
    /// round fails to improve the tour length by more than `1e-6`.
    pub fn optimize(&mut self, iterations: usize) -> Result<AdaptiveTspSolution, CetspError> {
        for i in 0..iterations {
            self.recompute_tour()?;
            let length = self.recompute_hitting_points()?;
            let improved = (length - self.length).abs();
            self.length = length;
            log::trace!("adaptive TSP heuristic iteration {i}: length={length}");
            if improved < 1e-6 {
                break;
            }
        }
        Ok(AdaptiveTspSolution {
            order: self.order.clone(),
            hitting_points: self.hitting_points.clone(),
            length: self.length,
        })
    }
}

/// Number of geometrically distinct disk centers, capped at 3 since the caller only
/// needs to distinguish "collinear or fewer" from "a genuine 2D instance".
fn distinct_center_count(disks: &[Disk]) -> usize {
    let mut distinct: Vec<Point> = Vec::new();
    for disk in disks {
        if !distinct.iter().any(|p| *p == disk.center) {
            distinct.push(disk.center);
            if distinct.len() > 2 {
                return distinct.len();
            }
        }
    }
    distinct.len()
}

fn random_point_in_disk(disk: &Disk, rng: &mut impl Rng) -> Point {
    let angle = rng.gen_range(0.0..std::f64::consts::TAU);
    let radius = rng.gen_range(0.0..=disk.radius);
    Point::new(
        disk.center.x + radius * angle.cos(),
        disk.center.y + radius * angle.sin(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use cetsp_oracle::{ProjectionSocpSolver, TwoOptTspSolver};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn disks_square() -> Vec<Disk> {
        vec![
            Disk::point(Point::new(0.0, 0.0)),
            Disk::point(Point::new(10.0, 0.0)),
            Disk::point(Point::new(10.0, 10.0)),
            Disk::point(Point::new(0.0, 10.0)),
        ]
    }

    #[test]
    fn converges_to_square_perimeter() {
        let mut heuristic = AdaptiveTspHeuristic::new(
            disks_square(),
            TourMode::Tour,
            Tolerance::DEFAULT,
            Arc::new(TwoOptTspSolver::new()),
            Arc::new(ProjectionSocpSolver::new()),
        );
        let solution = heuristic.optimize(10).unwrap();
        assert!((solution.length - 40.0).abs() < 1e-3, "got {}", solution.length);
        assert_eq!(solution.hitting_points.len(), 4);
    }

    #[test]
    fn collinear_disks_skip_tsp_recomputation() {
        let disks = vec![
            Disk::new(Point::new(0.0, 0.0), 1.0),
            Disk::new(Point::new(10.0, 0.0), 1.0),
        ];
        let mut heuristic = AdaptiveTspHeuristic::new(
            disks,
            TourMode::Tour,
            Tolerance::DEFAULT,
            Arc::new(TwoOptTspSolver::new()),
            Arc::new(ProjectionSocpSolver::new()),
        );
        let solution = heuristic.optimize(5).unwrap();
        assert_eq!(solution.order, vec![0, 1]);
        assert!((solution.length - 16.0).abs() < 1e-3, "got {}", solution.length);
    }

    #[test]
    fn randomize_hitting_points_keeps_points_inside_their_disk() {
        let disks = disks_square()
            .into_iter()
            .map(|d| Disk::new(d.center, 2.0))
            .collect::<Vec<_>>();
        let mut heuristic = AdaptiveTspHeuristic::new(
            disks.clone(),
            TourMode::Tour,
            Tolerance::DEFAULT,
            Arc::new(TwoOptTspSolver::new()),
            Arc::new(ProjectionSocpSolver::new()),
        );
        let mut rng = StdRng::seed_from_u64(42);
        heuristic.randomize_hitting_points(1.0, &mut rng);
        for (point, disk) in heuristic.hitting_points.iter().zip(disks.iter()) {
            assert!(disk.contains(point, 1e-9));
        }
    }
}
