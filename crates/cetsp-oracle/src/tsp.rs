use cetsp_core::{CetspError, Point};

mod two_opt;
pub use two_opt::TwoOptTspSolver;

#[cfg(feature = "concorde")]
mod concorde;
#[cfg(feature = "concorde")]
pub use concorde::ConcordeTspSolver;

/// Given a set of points, return the order that visits all of them on a short closed
/// tour. Used by the adaptive primal heuristic to re-sequence hit points between SOCP
/// refinements; the returned order is a permutation of `0..points.len()`.
///
/// Unlike [`crate::socp::SocpOracle`], this oracle is not required to be exact: it feeds
/// a heuristic that only needs a good starting sequence for the branch-and-bound search,
/// not a certified lower bound.
pub trait TspOracle: Send + Sync {
    fn solve(&self, points: &[Point]) -> Result<Vec<usize>, CetspError>;
}
