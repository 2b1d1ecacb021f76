//! Discounted cash flow analyzer

use crate::common::{upside_pct, verdict_for_upside};
use async_trait::async_trait;
use insight_core::{
    InsightError, Result, SubjectProfile, TaskExecutor, TaskKind, TaskReport,
};
use std::time::Instant;
use tracing::debug;

/// Intrinsic valuation from projected free cash flow
///
/// Projects company-level FCF over a fixed horizon, discounts it together
/// with a Gordon-growth terminal value, and scales the current price by the
/// ratio of that equity value to the market cap. Growth is capped so a
/// one-off spike cannot run the projection away.
pub struct DcfAnalyzer {
    pub projection_years: u32,
    pub discount_rate: f64,
    pub terminal_growth: f64,
    pub max_growth: f64,
}

impl Default for DcfAnalyzer {
    fn default() -> Self {
        Self {
            projection_years: 5,
            discount_rate: 0.09,
            terminal_growth: 0.025,
            max_growth: 0.25,
        }
    }
}

impl DcfAnalyzer {
    fn equity_value(&self, fcf: f64, growth: f64) -> f64 {
        let growth = growth.clamp(0.0, self.max_growth);
        let mut value = 0.0;
        let mut cash_flow = fcf;
        for year in 1..=self.projection_years {
            cash_flow *= 1.0 + growth;
            value += cash_flow / (1.0 + self.discount_rate).powi(year as i32);
        }
        let terminal = cash_flow * (1.0 + self.terminal_growth)
            / (self.discount_rate - self.terminal_growth);
        value + terminal / (1.0 + self.discount_rate).powi(self.projection_years as i32)
    }
}

#[async_trait]
impl TaskExecutor for DcfAnalyzer {
    fn kind(&self) -> TaskKind {
        TaskKind::Dcf
    }

    async fn execute(
        &self,
        subject: &str,
        profile: &SubjectProfile,
        _deadline: Instant,
    ) -> Result<TaskReport> {
        let fcf = profile
            .free_cash_flow
            .filter(|f| *f > 0.0)
            .ok_or_else(|| {
                InsightError::TaskFailed(format!("{subject}: no positive free cash flow to project"))
            })?;
        let market_cap = profile.market_cap.filter(|m| *m > 0.0).ok_or_else(|| {
            InsightError::TaskFailed(format!("{subject}: market cap unavailable"))
        })?;
        let current = profile.current_price.filter(|p| *p > 0.0).ok_or_else(|| {
            InsightError::TaskFailed(format!("{subject}: current price unavailable"))
        })?;

        let growth = profile.revenue_growth.unwrap_or(0.0);
        let equity_value = self.equity_value(fcf, growth);
        let target = current * equity_value / market_cap;
        let upside = upside_pct(target, current);

        debug!(subject, target, upside, "dcf valuation computed");

        let mut report = TaskReport::new(
            verdict_for_upside(upside),
            format!("intrinsic value implies {upside:.1}% vs current price"),
        )
        .with_price_target(target);
        if upside > 10.0 {
            report = report.with_signal("trading below intrinsic value");
        } else if upside < -10.0 {
            report = report.with_signal("trading above intrinsic value");
        }
        Ok(report)
    }
}
