//! Task outcome types
//!
//! Every scheduled task yields exactly one [`TaskOutcome`]; none are silently
//! dropped. Result fields are only populated on Success - a cancelled or
//! timed-out task never contributes a partial verdict or price.

use crate::task::TaskKind;
use crate::verdict::Verdict;
use serde::{Deserialize, Serialize};

/// Terminal status of one analysis task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutcomeStatus {
    Success,
    Failed,
    TimedOut,
}

/// Payload returned by a successful task executor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskReport {
    pub verdict: Verdict,
    /// Estimated fair price; non-positive values are discarded on ingest
    pub price_target: Option<f64>,
    pub risk_flag: bool,
    pub rationale: String,
    pub signals: Vec<String>,
}

impl TaskReport {
    pub fn new(verdict: Verdict, rationale: impl Into<String>) -> Self {
        Self {
            verdict,
            price_target: None,
            risk_flag: false,
            rationale: rationale.into(),
            signals: Vec::new(),
        }
    }

    pub fn with_price_target(mut self, price: f64) -> Self {
        self.price_target = Some(price);
        self
    }

    pub fn with_risk_flag(mut self) -> Self {
        self.risk_flag = true;
        self
    }

    pub fn with_signal(mut self, signal: impl Into<String>) -> Self {
        self.signals.push(signal.into());
        self
    }
}

/// The terminal result of one task, produced exactly once per request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskOutcome {
    pub kind: TaskKind,
    pub status: OutcomeStatus,
    /// Present only when status is Success
    pub verdict: Option<Verdict>,
    /// Present only when status is Success and the reported price is positive
    pub price_target: Option<f64>,
    pub risk_flag: bool,
    /// Free-text rationale on Success, failure reason otherwise
    pub rationale: String,
    pub signals: Vec<String>,
}

impl TaskOutcome {
    /// Build a Success outcome from an executor report
    ///
    /// A missing or non-positive price target never contributes downstream,
    /// so it is normalized to `None` here.
    pub fn success(kind: TaskKind, report: TaskReport) -> Self {
        Self {
            kind,
            status: OutcomeStatus::Success,
            verdict: Some(report.verdict),
            price_target: report.price_target.filter(|p| p.is_finite() && *p > 0.0),
            risk_flag: report.risk_flag,
            rationale: report.rationale,
            signals: report.signals,
        }
    }

    pub fn failed(kind: TaskKind, reason: impl Into<String>) -> Self {
        Self {
            kind,
            status: OutcomeStatus::Failed,
            verdict: None,
            price_target: None,
            risk_flag: false,
            rationale: reason.into(),
            signals: Vec::new(),
        }
    }

    pub fn timed_out(kind: TaskKind) -> Self {
        Self {
            kind,
            status: OutcomeStatus::TimedOut,
            verdict: None,
            price_target: None,
            risk_flag: false,
            rationale: "task budget exceeded".to_string(),
            signals: Vec::new(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == OutcomeStatus::Success
    }
}
