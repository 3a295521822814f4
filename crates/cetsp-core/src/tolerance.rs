/// Numeric tolerances threaded through the SOCP oracle and feasibility checks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerance {
    /// Acceptable slack in tour length between consecutive SOCP refinement iterations.
    pub length: f64,
    /// Acceptable slack for a disk to be considered hit by the trajectory.
    pub feasibility: f64,
}

impl Tolerance {
    pub const DEFAULT: Tolerance = Tolerance {
        length: 1e-4,
        feasibility: 1e-3,
    };
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::DEFAULT
    }
}
