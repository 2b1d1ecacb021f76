//! Early-stage metrics analyzer (startups only)

use async_trait::async_trait;
use insight_core::{
    InsightError, Result, SubjectProfile, TaskExecutor, TaskKind, TaskReport, Verdict,
};
use std::time::Instant;
use tracing::debug;

/// Growth-versus-burn screen for loss-making early-stage subjects
///
/// Valuation multiples and cash-flow projection do not work without earnings,
/// so the screen weighs revenue traction against the cash burn instead. Burn
/// without matching growth is the classic failure mode, hence the risk flag.
#[derive(Default)]
pub struct EarlyStageAnalyzer;

const HYPER_GROWTH: f64 = 0.40;
const HEALTHY_GROWTH: f64 = 0.20;

#[async_trait]
impl TaskExecutor for EarlyStageAnalyzer {
    fn kind(&self) -> TaskKind {
        TaskKind::EarlyStageMetrics
    }

    async fn execute(
        &self,
        subject: &str,
        profile: &SubjectProfile,
        _deadline: Instant,
    ) -> Result<TaskReport> {
        let growth = profile.revenue_growth.ok_or_else(|| {
            InsightError::TaskFailed(format!("{subject}: revenue growth unavailable"))
        })?;
        let revenue = profile.revenue.unwrap_or(0.0);
        let burning = profile.free_cash_flow.is_some_and(|f| f < 0.0);

        debug!(subject, growth, burning, "early-stage screen");

        let mut report = if growth > HYPER_GROWTH && revenue > 1.0e8 {
            TaskReport::new(
                Verdict::SpeculativeBuy,
                format!("hyper-growth at {:.0}% with meaningful revenue", growth * 100.0),
            )
            .with_signal("hyper-growth revenue trajectory")
        } else if growth > HEALTHY_GROWTH {
            TaskReport::new(
                Verdict::Monitor,
                format!("growing at {:.0}%, traction not yet proven", growth * 100.0),
            )
        } else {
            TaskReport::new(
                Verdict::Sell,
                format!("growth of {:.0}% does not cover the burn", growth * 100.0),
            )
            .with_signal("slowing growth while burning cash")
        };

        if burning {
            report = report.with_risk_flag();
        }
        Ok(report)
    }
}
