//! Validated solver configuration: a builder whose `build()` rejects
//! mutually-inconsistent settings as a construction error rather than a panic.

use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use std::time::Duration;

use cetsp_core::{CetspError, Tolerance};

use crate::strategy::{BranchingStrategy, PruningRules, RootStrategy, SearchStrategy};

/// A fixed seed so `num_threads = 1` runs are reproducible without the caller having to
/// think about it.
const DEFAULT_SEED: u64 = 0xC3_7E_5F_00;

#[derive(Debug, Clone)]
pub struct SolverOptions {
    pub timelimit: Duration,
    pub root_strategy: RootStrategy,
    pub branching_strategy: BranchingStrategy,
    pub search_strategy: SearchStrategy,
    pub rules: PruningRules,
    pub num_threads: usize,
    pub simplify: bool,
    pub feasibility_tol: f64,
    pub optimality_gap: f64,
    pub seed: u64,
    pub fallback_if_no_concorde: bool,
    pub(crate) cancellation: Option<Arc<AtomicBool>>,
}

impl SolverOptions {
    pub fn builder() -> SolverOptionsBuilder {
        SolverOptionsBuilder::default()
    }

    pub fn tolerance(&self) -> Tolerance {
        Tolerance {
            length: Tolerance::DEFAULT.length,
            feasibility: self.feasibility_tol,
        }
    }
}

impl Default for SolverOptions {
    fn default() -> Self {
        SolverOptionsBuilder::default()
            .build()
            .expect("default options are always valid")
    }
}

#[derive(Debug, Clone)]
pub struct SolverOptionsBuilder {
    timelimit_secs: f64,
    root_strategy: RootStrategy,
    branching_strategy: BranchingStrategy,
    search_strategy: SearchStrategy,
    rules: PruningRules,
    num_threads: usize,
    simplify: bool,
    feasibility_tol: f64,
    optimality_gap: f64,
    seed: u64,
    fallback_if_no_concorde: bool,
    cancellation: Option<Arc<AtomicBool>>,
}

impl Default for SolverOptionsBuilder {
    fn default() -> Self {
        Self {
            timelimit_secs: 60.0,
            root_strategy: RootStrategy::ConvexHull,
            branching_strategy: BranchingStrategy::ChFarthestCircle,
            search_strategy: SearchStrategy::DfsBfs,
            rules: PruningRules::none(),
            num_threads: 8,
            simplify: true,
            feasibility_tol: 0.001,
            optimality_gap: 0.01,
            seed: DEFAULT_SEED,
            fallback_if_no_concorde: true,
            cancellation: None,
        }
    }
}

impl SolverOptionsBuilder {
    pub fn timelimit(mut self, seconds: f64) -> Self {
        self.timelimit_secs = seconds;
        self
    }

    pub fn root_strategy(mut self, strategy: RootStrategy) -> Self {
        self.root_strategy = strategy;
        self
    }

    pub fn branching_strategy(mut self, strategy: BranchingStrategy) -> Self {
        self.branching_strategy = strategy;
        self
    }

    pub fn search_strategy(mut self, strategy: SearchStrategy) -> Self {
        self.search_strategy = strategy;
        self
    }

    pub fn rules(mut self, rules: PruningRules) -> Self {
        self.rules = rules;
        self
    }

    pub fn num_threads(mut self, num_threads: usize) -> Self {
        self.num_threads = num_threads;
        self
    }

    pub fn simplify(mut self, simplify: bool) -> Self {
        self.simplify = simplify;
        self
    }

    pub fn feasibility_tol(mut self, tol: f64) -> Self {
        self.feasibility_tol = tol;
        self
    }

    pub fn optimality_gap(mut self, gap: f64) -> Self {
        self.optimality_gap = gap;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn fallback_if_no_concorde(mut self, fallback: bool) -> Self {
        self.fallback_if_no_concorde = fallback;
        self
    }

    /// Wires an external cancellation flag: the engine checks it alongside its own
    /// internal `stop` flag at the same points (loop top, before each SOCP call).
    pub fn cancellation(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancellation = Some(flag);
        self
    }

    pub fn build(self) -> Result<SolverOptions, CetspError> {
        if self.num_threads == 0 {
            return Err(CetspError::InvalidInstance(
                "num_threads must be at least 1".to_string(),
            ));
        }
        if self.timelimit_secs <= 0.0 {
            return Err(CetspError::InvalidInstance(
                "timelimit must be positive".to_string(),
            ));
        }
        if !(0.0..1.0).contains(&self.optimality_gap) {
            return Err(CetspError::InvalidInstance(
                "optimality_gap must be in [0, 1)".to_string(),
            ));
        }
        if self.feasibility_tol < 0.0 {
            return Err(CetspError::InvalidInstance(
                "feasibility_tol must be non-negative".to_string(),
            ));
        }

        Ok(SolverOptions {
            timelimit: Duration::from_secs_f64(self.timelimit_secs),
            root_strategy: self.root_strategy,
            branching_strategy: self.branching_strategy,
            search_strategy: self.search_strategy,
            rules: self.rules,
            num_threads: self.num_threads,
            simplify: self.simplify,
            feasibility_tol: self.feasibility_tol,
            optimality_gap: self.optimality_gap,
            seed: self.seed,
            fallback_if_no_concorde: self.fallback_if_no_concorde,
            cancellation: self.cancellation,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_options_are_valid() {
        let options = SolverOptions::default();
        assert_eq!(options.num_threads, 8);
        assert_eq!(options.root_strategy, RootStrategy::ConvexHull);
    }

    #[test]
    fn zero_threads_is_rejected() {
        let result = SolverOptions::builder().num_threads(0).build();
        assert!(matches!(result, Err(CetspError::InvalidInstance(_))));
    }

    #[test]
    fn optimality_gap_out_of_range_is_rejected() {
        let result = SolverOptions::builder().optimality_gap(1.5).build();
        assert!(matches!(result, Err(CetspError::InvalidInstance(_))));
    }
}
