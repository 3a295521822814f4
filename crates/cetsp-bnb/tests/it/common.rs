use cetsp_bnb::SolverOptions;

/// A single-threaded, ten-second budget: generous enough for every small instance below to
/// reach its optimum, tight enough that a hung search fails the test suite instead of the CI job.
pub fn fast_options() -> SolverOptions {
    SolverOptions::builder()
        .num_threads(1)
        .timelimit(10.0)
        .build()
        .unwrap()
}
