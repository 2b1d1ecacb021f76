//! Qualitative screen analyzer

use async_trait::async_trait;
use insight_core::{
    InsightError, Result, SubjectProfile, TaskExecutor, TaskKind, TaskReport, Verdict,
};
use std::time::Instant;
use tracing::debug;

/// Composite qualitative screen over profitability, growth and cash generation
///
/// Stands in for the model-backed qualitative analysis: scores a handful of
/// quality markers and maps the tally to a verdict, keeping the executor pure
/// and reproducible.
#[derive(Default)]
pub struct AiInsightsAnalyzer;

#[async_trait]
impl TaskExecutor for AiInsightsAnalyzer {
    fn kind(&self) -> TaskKind {
        TaskKind::AiInsights
    }

    async fn execute(
        &self,
        subject: &str,
        profile: &SubjectProfile,
        _deadline: Instant,
    ) -> Result<TaskReport> {
        let net_income = profile.net_income.ok_or_else(|| {
            InsightError::TaskFailed(format!("{subject}: fundamentals unavailable"))
        })?;
        let revenue = profile.revenue.filter(|r| *r > 0.0).ok_or_else(|| {
            InsightError::TaskFailed(format!("{subject}: fundamentals unavailable"))
        })?;

        let margin = net_income / revenue;
        let mut points = 0;
        let mut markers = Vec::new();
        if margin > 0.15 {
            points += 1;
            markers.push("strong net margin");
        }
        if profile.revenue_growth.is_some_and(|g| g > 0.15) {
            points += 1;
            markers.push("double-digit growth");
        }
        if profile.free_cash_flow.is_some_and(|f| f > 0.0) {
            points += 1;
            markers.push("cash generative");
        }
        if profile.pe_ratio.is_some_and(|pe| pe > 0.0 && pe < 18.0) {
            points += 1;
            markers.push("undemanding valuation");
        }

        let verdict = match points {
            4 => Verdict::StrongBuy,
            3 => Verdict::Buy,
            2 => Verdict::Hold,
            _ => Verdict::Monitor,
        };

        debug!(subject, points, margin, "qualitative screen scored");

        let mut report = TaskReport::new(
            verdict,
            format!("{points}/4 quality markers: {}", markers.join(", ")),
        );
        if margin < 0.0 {
            report = report.with_risk_flag();
        }
        for marker in markers {
            if verdict.is_bullish() {
                report = report.with_signal(marker);
            }
        }
        Ok(report)
    }
}
