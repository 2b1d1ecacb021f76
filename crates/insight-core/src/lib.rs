//! Core abstractions for insight-rs
//!
//! This crate defines the domain types shared across the insight-rs workspace:
//!
//! - [`SubjectProfile`] and [`Category`]: the subject under analysis and its
//!   classification, which determines which analysis tasks apply
//! - [`TaskKind`] and [`TaskSpec`]: the closed set of analysis task kinds with
//!   their declared weights and per-task budgets
//! - [`TaskOutcome`] and [`TaskReport`]: the terminal result of one task,
//!   produced exactly once per request irrespective of success or failure
//! - [`ConsensusReport`] and [`AnalysisReport`]: the aggregated verdict
//! - [`TaskExecutor`]: the trait every analysis method implements
//!
//! The orchestration engine that ties these together lives in `insight-engine`;
//! built-in executors live in `insight-analyzers`.

pub mod error;
pub mod executor;
pub mod outcome;
pub mod profile;
pub mod report;
pub mod task;
pub mod verdict;

pub use error::{InsightError, Result};
pub use executor::TaskExecutor;
pub use outcome::{OutcomeStatus, TaskOutcome, TaskReport};
pub use profile::{Category, SubjectProfile};
pub use report::{AnalysisReport, ConsensusReport};
pub use task::{TaskKind, TaskSpec};
pub use verdict::{Confidence, Recommendation, RiskLevel, Verdict};
