use cetsp_core::{CetspError, Point};
use concorde_rs::LowerDistanceMatrix;
use concorde_rs::solver::tsp_hk;

use crate::tsp::TspOracle;

/// Distances are scaled by this factor and rounded to the nearest integer before being
/// handed to Concorde, which works over `u32` edge weights. Euclidean CETSP coordinates
/// are not pre-quantized, so a scale factor is needed to keep sub-unit distances from
/// collapsing to zero.
const DISTANCE_SCALE: f64 = 1_000.0;

/// Concorde-backed exact Euclidean TSP oracle. Gated behind the `concorde` feature since
/// it links an external solver the rest of the crate does not require.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConcordeTspSolver;

impl ConcordeTspSolver {
    pub fn new() -> Self {
        Self
    }
}

impl TspOracle for ConcordeTspSolver {
    fn solve(&self, points: &[Point]) -> Result<Vec<usize>, CetspError> {
        let n = points.len();
        if n == 0 {
            return Ok(vec![]);
        }
        if n <= 3 {
            return Ok((0..n).collect());
        }

        let mut values = Vec::with_capacity(n * (n - 1) / 2);
        for i in 0..n {
            for j in (i + 1)..n {
                let d = points[i].distance_to(&points[j]) * DISTANCE_SCALE;
                values.push(d.round() as u32);
            }
        }

        let matrix = LowerDistanceMatrix {
            num_nodes: n as u32,
            values,
        };

        tsp_hk(&matrix)
            .map(|tour| tour.into_iter().map(|node| node as usize).collect())
            .map_err(|err| CetspError::BackendUnavailable(format!("concorde_rs: {err}")))
    }
}
