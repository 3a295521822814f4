//! Pluggable root, branching, search, and pruning-rule strategies.
//!
//! Each capability is a small closed enum dispatched by `match` rather than a `dyn` trait
//! object stored per-node, so the hot branching/search path stays monomorphized; selection
//! itself happens once, by name, at `SolverOptions` construction.

mod branching;
mod rules;
mod root;
mod search;

pub use branching::BranchingStrategy;
pub use rules::PruningRules;
pub use root::RootStrategy;
pub use search::SearchStrategy;
