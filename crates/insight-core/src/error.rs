//! Error types for insight-rs
//!
//! Only selection-time structural problems are surfaced as hard errors.
//! Individual task failures and timeouts are recovered inside the scheduler
//! and recorded on the corresponding [`TaskOutcome`](crate::TaskOutcome).

use crate::profile::Category;
use crate::task::TaskKind;
use thiserror::Error;

/// Result type alias for insight operations
pub type Result<T> = std::result::Result<T, InsightError>;

/// Error type for the analysis engine
#[derive(Debug, Error)]
pub enum InsightError {
    /// Task selection produced zero applicable tasks for the subject
    #[error("no applicable analysis tasks for {symbol} (category: {category})")]
    NoApplicableTasks { symbol: String, category: Category },

    /// A selected task kind has no registered executor
    #[error("no executor registered for task kind: {0}")]
    MissingExecutor(TaskKind),

    /// An analysis task executor reported a failure
    #[error("task failed: {0}")]
    TaskFailed(String),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Generic error message
    #[error("{0}")]
    Other(String),
}
