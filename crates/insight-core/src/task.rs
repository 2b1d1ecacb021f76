//! Analysis task kinds and task specifications

use crate::profile::Category;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Closed set of analysis task kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskKind {
    /// Discounted cash flow valuation
    Dcf,
    /// Peer-multiple comparison
    PeerMultiple,
    /// Price pattern / momentum read
    PricePattern,
    /// Early-stage growth and burn metrics (startups only)
    EarlyStageMetrics,
    /// Professional analyst consensus
    AnalystConsensus,
    /// Qualitative screen
    AiInsights,
    /// News sentiment - signals only, never weighted into the score
    NewsSentiment,
}

impl TaskKind {
    /// Canonical ordering used when selecting tasks for a category
    pub const ALL: [TaskKind; 7] = [
        Self::Dcf,
        Self::PeerMultiple,
        Self::PricePattern,
        Self::EarlyStageMetrics,
        Self::AnalystConsensus,
        Self::AiInsights,
        Self::NewsSentiment,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dcf => "dcf",
            Self::PeerMultiple => "peer_multiple",
            Self::PricePattern => "price_pattern",
            Self::EarlyStageMetrics => "early_stage_metrics",
            Self::AnalystConsensus => "analyst_consensus",
            Self::AiInsights => "ai_insights",
            Self::NewsSentiment => "news_sentiment",
        }
    }

    /// Human-readable label used in signal strings and rendered output
    pub fn label(self) -> &'static str {
        match self {
            Self::Dcf => "DCF",
            Self::PeerMultiple => "Peer Multiple",
            Self::PricePattern => "Price Pattern",
            Self::EarlyStageMetrics => "Early-Stage Metrics",
            Self::AnalystConsensus => "Analyst Consensus",
            Self::AiInsights => "AI Insights",
            Self::NewsSentiment => "News Sentiment",
        }
    }

    /// Applicability predicate over the subject category
    ///
    /// Cash-flow valuation is structurally inapplicable to financial
    /// institutions; Unknown subjects are restricted to tasks that do not
    /// require fundamentals.
    pub fn applies_to(self, category: Category) -> bool {
        match self {
            Self::Dcf => matches!(category, Category::Mature | Category::Growth),
            Self::PeerMultiple => matches!(
                category,
                Category::Mature | Category::Growth | Category::Financial
            ),
            Self::EarlyStageMetrics => category == Category::Startup,
            Self::AiInsights => category != Category::Unknown,
            Self::PricePattern | Self::AnalystConsensus | Self::NewsSentiment => true,
        }
    }

    /// Whether a Success outcome of this kind contributes to the consensus
    /// score. News sentiment never does; it feeds signals only.
    pub fn contributes_to_scoring(self) -> bool {
        self != Self::NewsSentiment
    }
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of the task registry: a task kind with its statically declared
/// weight and per-task budget
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TaskSpec {
    pub kind: TaskKind,
    /// Declared weight in [0, 1], renormalized during aggregation
    pub weight: f64,
    /// Per-task budget; the scheduler cancels the task alone once it elapses
    pub timeout: Duration,
}

impl TaskSpec {
    pub fn new(kind: TaskKind, weight: f64, timeout: Duration) -> Self {
        Self {
            kind,
            weight,
            timeout,
        }
    }
}
