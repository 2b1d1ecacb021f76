//! Professional analyst consensus analyzer

use async_trait::async_trait;
use insight_core::{
    InsightError, Result, SubjectProfile, TaskExecutor, TaskKind, TaskReport, Verdict,
};
use std::time::Instant;
use tracing::debug;

/// Maps the professional analyst mean rating (1.0 strong buy .. 5.0 sell)
/// and mean price target onto a verdict
#[derive(Default)]
pub struct AnalystConsensusAnalyzer;

fn verdict_for_rating(mean: f64) -> Verdict {
    if mean <= 1.5 {
        Verdict::StrongBuy
    } else if mean <= 2.5 {
        Verdict::Buy
    } else if mean < 3.5 {
        Verdict::Hold
    } else if mean < 4.5 {
        Verdict::Sell
    } else {
        Verdict::StrongSell
    }
}

#[async_trait]
impl TaskExecutor for AnalystConsensusAnalyzer {
    fn kind(&self) -> TaskKind {
        TaskKind::AnalystConsensus
    }

    async fn execute(
        &self,
        subject: &str,
        profile: &SubjectProfile,
        _deadline: Instant,
    ) -> Result<TaskReport> {
        let rating = profile.analyst_rating.ok_or_else(|| {
            InsightError::TaskFailed(format!("{subject}: no analyst coverage"))
        })?;

        let verdict = verdict_for_rating(rating);
        debug!(subject, rating, "analyst consensus mapped");

        let mut report = TaskReport::new(
            verdict,
            format!("street mean rating {rating:.1} maps to {verdict}"),
        );
        if let Some(target) = profile.analyst_target {
            report = report.with_price_target(target);
        }
        if verdict.is_bullish() {
            report = report.with_signal("street consensus is bullish");
        }
        Ok(report)
    }
}
