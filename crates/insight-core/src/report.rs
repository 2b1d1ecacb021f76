//! Consensus and analysis report types

use crate::outcome::TaskOutcome;
use crate::profile::Category;
use crate::verdict::{Confidence, Recommendation, RiskLevel};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Weighted consensus over the outcomes of one analysis request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsensusReport {
    pub subject: String,
    pub recommendation: Recommendation,
    /// Weighted verdict score in [-2, 2]; absent when no scoring task succeeded
    pub consensus_score: Option<f64>,
    /// Weighted average over outcomes with a valid price; absent if none had one
    pub target_price: Option<f64>,
    /// Percent distance of the target price from the current price
    pub upside_potential: Option<f64>,
    pub confidence: Confidence,
    pub risk_level: RiskLevel,
    pub bullish_signals: Vec<String>,
    pub bearish_signals: Vec<String>,
    pub key_risks: Vec<String>,
    /// Number of Success outcomes in this request
    pub successful_tasks: usize,
    /// Set when successes exist but none contribute scoring weight
    pub insufficient_data: bool,
    pub summary: String,
    pub generated_at: DateTime<Utc>,
}

/// Full result of one analysis request: consensus plus every task outcome
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub category: Category,
    pub consensus: ConsensusReport,
    pub outcomes: Vec<TaskOutcome>,
}

impl AnalysisReport {
    pub fn subject(&self) -> &str {
        &self.consensus.subject
    }
}
