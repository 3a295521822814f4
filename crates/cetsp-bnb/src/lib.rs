/*!
Parallel branch-and-bound solver for the Close-Enough Traveling Salesman Problem.

Given an [`cetsp_core::Instance`] of disks (and optionally fixed start/end points), [`optimize`]
searches disk visitation orders for the shortest tour or path whose polyline intersects every
disk, using the [`cetsp_oracle`] SOCP oracle to turn a fixed order into an exact length and the
[`cetsp_heuristic`] adaptive TSP loop to seed the first incumbent.

Module layout follows the leaves-first dependency order of the design: geometry and the SOCP
oracle live in their own crates; this crate builds [`partial_solution`] and [`node`] on top of
them, [`strategy`] on top of those, and [`engine`] (with its [`frontier`]-backed parallel
executor) on top of everything else.
*/

pub mod context;
pub mod engine;
pub mod frontier;
pub mod hull;
pub mod node;
pub mod options;
pub mod partial_solution;
pub mod solution;
pub mod statistics;
pub mod strategy;

pub use context::{Context, NodeCallback};
pub use engine::{OptimizeOutcome, optimize, optimize_with_callback};
pub use node::{Node, NodeState};
pub use options::{SolverOptions, SolverOptionsBuilder};
pub use partial_solution::PartialSolution;
pub use solution::{Incumbent, Solution};
pub use statistics::{BoundSample, Statistics, StatisticsSnapshot, TerminationReason};
pub use strategy::{BranchingStrategy, PruningRules, RootStrategy, SearchStrategy};
