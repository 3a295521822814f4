use cetsp_core::{CetspError, Disk, Point, Tolerance, TourMode};

mod projection;
pub use projection::ProjectionSocpSolver;

/// Result of solving the SOCP for one fixed disk sequence: its optimal length and the
/// corresponding hit point for each disk in the sequence, in order.
#[derive(Debug, Clone, PartialEq)]
pub struct SocpSolution {
    pub length: f64,
    pub hit_points: Vec<Point>,
}

/// Given an ordered sequence of disks, compute the shortest tour or path that visits
/// them in that order. This is convex (second-order cone program) and must be solved
/// deterministically to the caller-provided tolerance.
///
/// Implementations are the replaceable-service boundary named in the crate-level docs:
/// the core only ever talks to `dyn SocpOracle`, never to a concrete solver.
pub trait SocpOracle: Send + Sync {
    fn solve(
        &self,
        sequence: &[Disk],
        mode: TourMode,
        tol: Tolerance,
    ) -> Result<SocpSolution, CetspError>;
}

/// Builds the extended, possibly-fixed-endpoint sequence an oracle actually optimizes
/// over: for path mode, the fixed start/end points are appended as zero-radius point
/// disks so the same block-coordinate solver handles both modes without special-casing.
pub(crate) fn extend_sequence_for_mode(sequence: &[Disk], mode: TourMode) -> (Vec<Disk>, bool) {
    match mode {
        TourMode::Tour => (sequence.to_vec(), true),
        TourMode::Path { start, end } => {
            let mut extended = Vec::with_capacity(sequence.len() + 2);
            extended.push(Disk::point(start));
            extended.extend_from_slice(sequence);
            extended.push(Disk::point(end));
            (extended, false)
        }
    }
}
