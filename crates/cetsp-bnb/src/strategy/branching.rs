//! Branching strategies: pick which uncovered disk to insert next at a node.

use cetsp_core::DiskIndex;
use rand::Rng;

use crate::hull::convex_hull;
use crate::partial_solution::PartialSolution;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BranchingStrategy {
    /// The uncovered disk with maximum distance from the current trajectory.
    FarthestCircle,
    /// Restrict to the convex hull of still-uncovered disk centers, then pick farthest;
    /// falls back to `FarthestCircle` when the hull is degenerate.
    ChFarthestCircle,
    /// Same selection as `ChFarthestCircle`, but the engine additionally invokes
    /// `PartialSolution::simplify` on each created child — the only place `simplify` runs.
    ChFarthestCircleSimplifying,
    /// Uniform random choice among uncovered disks.
    Random,
}

impl BranchingStrategy {
    /// Whether children created while branching with this strategy should be simplified.
    pub fn simplifies(&self) -> bool {
        matches!(self, BranchingStrategy::ChFarthestCircleSimplifying)
    }

    pub fn choose(&self, partial: &PartialSolution, rng: &mut impl Rng) -> Option<DiskIndex> {
        let uncovered = partial.uncovered();
        if uncovered.is_empty() {
            return None;
        }
        match self {
            BranchingStrategy::FarthestCircle => farthest(partial, &uncovered),
            BranchingStrategy::ChFarthestCircle | BranchingStrategy::ChFarthestCircleSimplifying => {
                ch_farthest(partial, &uncovered)
            }
            BranchingStrategy::Random => {
                let i = rng.gen_range(0..uncovered.len());
                Some(uncovered[i])
            }
        }
    }
}

fn farthest(partial: &PartialSolution, uncovered: &[DiskIndex]) -> Option<DiskIndex> {
    uncovered
        .iter()
        .copied()
        .max_by(|&a, &b| {
            let da = partial.distance(&disk_of(partial, a));
            let db = partial.distance(&disk_of(partial, b));
            da.total_cmp(&db)
        })
}

fn ch_farthest(partial: &PartialSolution, uncovered: &[DiskIndex]) -> Option<DiskIndex> {
    let points: Vec<(DiskIndex, cetsp_core::Point)> = uncovered
        .iter()
        .map(|&idx| (idx, disk_of(partial, idx).center))
        .collect();
    let hull = convex_hull(&points);
    if hull.is_empty() {
        return farthest(partial, uncovered);
    }
    farthest(partial, &hull)
}

/// `PartialSolution` doesn't carry a by-index disk lookup of its own; this reaches through
/// to the trajectory-distance computation via a fresh disk fetched from the instance the
/// partial solution was built over. Branching strategies only ever see disk indices that
/// belong to that instance, so this never panics.
fn disk_of(partial: &PartialSolution, idx: DiskIndex) -> cetsp_core::Disk {
    partial
        .instance_disk(idx)
        .expect("branching candidate must belong to the partial solution's instance")
}

#[cfg(test)]
mod tests {
    use super::*;
    use cetsp_core::{Disk, Instance, Point, Tolerance};
    use cetsp_oracle::{ProjectionSocpSolver, SocpOracle};
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::sync::Arc;

    fn partial_over_square() -> PartialSolution {
        let instance = Arc::new(
            Instance::tour(vec![
                Disk::point(Point::new(0.0, 0.0)),
                Disk::point(Point::new(10.0, 0.0)),
                Disk::point(Point::new(10.0, 10.0)),
                Disk::point(Point::new(0.0, 10.0)),
            ])
            .unwrap(),
        );
        let socp: Arc<dyn SocpOracle> = Arc::new(ProjectionSocpSolver::new());
        PartialSolution::from_order(
            instance,
            socp,
            Tolerance::DEFAULT,
            vec![DiskIndex(0), DiskIndex(1)],
        )
        .unwrap()
    }

    #[test]
    fn farthest_circle_picks_an_uncovered_disk() {
        let partial = partial_over_square();
        let mut rng = StdRng::seed_from_u64(0);
        let chosen = BranchingStrategy::FarthestCircle
            .choose(&partial, &mut rng)
            .unwrap();
        assert!(partial.uncovered().contains(&chosen));
    }

    #[test]
    fn simplifying_variant_reports_it_simplifies() {
        assert!(BranchingStrategy::ChFarthestCircleSimplifying.simplifies());
        assert!(!BranchingStrategy::ChFarthestCircle.simplifies());
        assert!(!BranchingStrategy::FarthestCircle.simplifies());
    }

    #[test]
    fn nothing_to_branch_on_once_feasible() {
        let instance = Arc::new(
            Instance::tour(vec![
                Disk::point(Point::new(0.0, 0.0)),
                Disk::point(Point::new(10.0, 0.0)),
            ])
            .unwrap(),
        );
        let socp: Arc<dyn SocpOracle> = Arc::new(ProjectionSocpSolver::new());
        let partial = PartialSolution::from_order(
            instance,
            socp,
            Tolerance::DEFAULT,
            vec![DiskIndex(0), DiskIndex(1)],
        )
        .unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        assert!(BranchingStrategy::FarthestCircle.choose(&partial, &mut rng).is_none());
    }
}
