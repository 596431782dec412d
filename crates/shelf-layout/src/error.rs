use thiserror::Error;

pub type Result<T> = std::result::Result<T, PlanError>;

/// Caller contract violations rejected by the planner.
///
/// The planner never produces a partial layout: the first violation found
/// aborts the whole call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlanError {
    #[error("theme at index {index} has negative item count {count}")]
    NegativeItemCount { index: usize, count: i64 },

    #[error("full-width threshold must be positive (got {threshold})")]
    NonPositiveThreshold { threshold: i64 },
}
