//! Built-in analysis task executors
//!
//! One [`TaskExecutor`] per task kind, each a deterministic heuristic over the
//! derived attributes of a [`SubjectProfile`](insight_core::SubjectProfile).
//! These are the engine's default collaborators; production deployments can
//! swap any of them for an executor backed by live data retrieval, since the
//! engine only ever observes the opaque report.

pub mod ai_insights;
pub mod analyst_consensus;
pub mod dcf;
pub mod early_stage;
pub mod news_sentiment;
pub mod peer_multiple;
pub mod price_pattern;

mod common;

pub use ai_insights::AiInsightsAnalyzer;
pub use analyst_consensus::AnalystConsensusAnalyzer;
pub use dcf::DcfAnalyzer;
pub use early_stage::EarlyStageAnalyzer;
pub use news_sentiment::NewsSentimentAnalyzer;
pub use peer_multiple::PeerMultipleAnalyzer;
pub use price_pattern::PricePatternAnalyzer;

use insight_core::TaskExecutor;
use std::sync::Arc;

/// The full default executor set, one per task kind
pub fn default_executors() -> Vec<Arc<dyn TaskExecutor>> {
    vec![
        Arc::new(DcfAnalyzer::default()),
        Arc::new(PeerMultipleAnalyzer::default()),
        Arc::new(PricePatternAnalyzer::default()),
        Arc::new(EarlyStageAnalyzer::default()),
        Arc::new(AnalystConsensusAnalyzer),
        Arc::new(AiInsightsAnalyzer),
        Arc::new(NewsSentimentAnalyzer),
    ]
}
