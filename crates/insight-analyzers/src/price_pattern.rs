//! Price pattern analyzer

use async_trait::async_trait;
use insight_core::{
    InsightError, Result, SubjectProfile, TaskExecutor, TaskKind, TaskReport, Verdict,
};
use std::time::Instant;
use tracing::debug;

/// Momentum and volatility read over the subject's trailing price action
///
/// Uptrends project a target of price * (1 + vol/2), downtrends retrace by
/// vol * 0.3; volatility above `high_volatility` raises the risk flag.
pub struct PricePatternAnalyzer {
    pub momentum_threshold: f64,
    pub high_volatility: f64,
}

impl Default for PricePatternAnalyzer {
    fn default() -> Self {
        Self {
            momentum_threshold: 0.08,
            high_volatility: 0.5,
        }
    }
}

#[async_trait]
impl TaskExecutor for PricePatternAnalyzer {
    fn kind(&self) -> TaskKind {
        TaskKind::PricePattern
    }

    async fn execute(
        &self,
        subject: &str,
        profile: &SubjectProfile,
        _deadline: Instant,
    ) -> Result<TaskReport> {
        let current = profile.current_price.filter(|p| *p > 0.0).ok_or_else(|| {
            InsightError::TaskFailed(format!("{subject}: price history unavailable"))
        })?;
        let volatility = profile.volatility_annual.unwrap_or(0.0).max(0.0);

        let mut report = match profile.momentum_3m {
            Some(momentum) if momentum > self.momentum_threshold => TaskReport::new(
                Verdict::Buy,
                format!("uptrend: {:.1}% over three months", momentum * 100.0),
            )
            .with_price_target(current * (1.0 + volatility * 0.5))
            .with_signal("sustained uptrend"),
            Some(momentum) if momentum < -self.momentum_threshold => TaskReport::new(
                Verdict::Sell,
                format!("downtrend: {:.1}% over three months", momentum * 100.0),
            )
            .with_price_target(current * (1.0 - volatility * 0.3))
            .with_signal("sustained downtrend"),
            Some(_) => TaskReport::new(Verdict::Hold, "sideways price action"),
            None => TaskReport::new(Verdict::Monitor, "insufficient history for a trend read"),
        };

        if volatility > self.high_volatility {
            report = report.with_risk_flag();
        }

        debug!(subject, volatility, "price pattern read complete");
        Ok(report)
    }
}
