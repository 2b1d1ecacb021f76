//! Orchestration and aggregation engine for insight-rs
//!
//! This crate derives a single investment recommendation for a subject by
//! running several independent analysis methods and combining their verdicts:
//!
//! - [`classify`]: maps a financial profile to a [`Category`] that determines
//!   which analysis tasks apply
//! - [`TaskRegistry`]: static table mapping category to an ordered set of
//!   task specs (kind, declared weight, per-task budget)
//! - [`Scheduler`]: fans the selected tasks out concurrently under per-task
//!   and global deadlines with tolerant partial failure
//! - [`aggregate`]: reduces the heterogeneous outcome list into one
//!   deterministic, weighted consensus result
//! - [`InsightEngine`]: composes the above into a single entry point:
//!   classify → select → schedule → aggregate
//!
//! # Example
//!
//! ```rust,ignore
//! use insight_core::SubjectProfile;
//! use insight_engine::InsightEngine;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let engine = InsightEngine::builder()
//!         .executors(insight_analyzers::default_executors())
//!         .build()?;
//!
//!     let profile = SubjectProfile::new("ACME")
//!         .with_current_price(172.0)
//!         .with_net_income(2.1e9)
//!         .with_revenue(18.5e9);
//!
//!     let report = engine.analyze(&profile).await?;
//!     println!("{}: {}", report.subject(), report.consensus.recommendation);
//!     Ok(())
//! }
//! ```

pub mod aggregator;
pub mod classifier;
pub mod engine;
pub mod registry;
pub mod scheduler;

pub use aggregator::{aggregate, recommendation_for_score};
pub use classifier::classify;
pub use engine::{InsightEngine, InsightEngineBuilder};
pub use registry::{TaskRegistry, TaskRegistryBuilder};
pub use scheduler::{Scheduler, SchedulerConfig};

// Re-export the core types callers need alongside the engine
pub use insight_core::{
    AnalysisReport, Category, ConsensusReport, InsightError, Result, SubjectProfile, TaskExecutor,
    TaskKind, TaskOutcome, TaskSpec,
};
