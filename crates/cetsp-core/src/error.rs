use thiserror::Error;

/// Errors surfaced by the CETSP solver stack.
///
/// `Timeout` and `Cancelled` are not propagated as `Result::Err` from `optimize`; they are
/// recorded in `Statistics::reason` instead, since hitting the timelimit or being cancelled
/// is expected, successful termination rather than failure. They remain variants of this
/// type because `Numeric` failures at the node level are reported through the same channel
/// as warnings before being downgraded to a prune, and sharing one enum keeps that
/// downgrade a simple match arm.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CetspError {
    #[error("invalid instance: {0}")]
    InvalidInstance(String),

    #[error("backend unavailable: {0}")]
    BackendUnavailable(String),

    #[error("numeric failure: {0}")]
    Numeric(String),

    #[error("timelimit reached")]
    Timeout,

    #[error("cancelled")]
    Cancelled,

    #[error("internal invariant violated: {0}")]
    InternalInvariant(String),
}

impl CetspError {
    pub fn is_fatal(&self) -> bool {
        matches!(self, CetspError::InternalInvariant(_))
    }
}
