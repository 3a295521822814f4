/*!
Replaceable-service boundary for the two external solvers the CETSP branch-and-bound
engine depends on: a second-order cone program (SOCP) oracle that turns a fixed disk
visitation order into an optimal tour, and a Euclidean TSP oracle used by the adaptive
primal heuristic to pick that order in the first place.

Both are exposed as traits (`SocpOracle`, `TspOracle`) so a commercial or GPL-licensed
backend can be substituted without touching the branch-and-bound core. This crate ships
only in-process reference implementations: [`socp::ProjectionSocpSolver`] and
[`tsp::TwoOptTspSolver`].
*/

pub mod socp;
pub mod tsp;

pub use socp::{ProjectionSocpSolver, SocpOracle, SocpSolution};
pub use tsp::{TspOracle, TwoOptTspSolver};
