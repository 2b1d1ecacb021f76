//! Peer-multiple comparison analyzer

use crate::common::{upside_pct, verdict_for_upside};
use async_trait::async_trait;
use insight_core::{
    InsightError, Result, SubjectProfile, TaskExecutor, TaskKind, TaskReport,
};
use std::time::Instant;
use tracing::debug;

/// Relative valuation against a sector fair-multiple table
pub struct PeerMultipleAnalyzer {
    pub default_fair_pe: f64,
}

impl Default for PeerMultipleAnalyzer {
    fn default() -> Self {
        Self { default_fair_pe: 18.0 }
    }
}

impl PeerMultipleAnalyzer {
    fn fair_pe(&self, sector: Option<&str>) -> f64 {
        match sector {
            Some(s) if s.contains("Technology") => 24.0,
            Some(s) if s.contains("Healthcare") => 20.0,
            Some(s) if s.contains("Financial") => 12.0,
            Some(s) if s.contains("Energy") => 10.0,
            Some(s) if s.contains("Utilities") => 16.0,
            _ => self.default_fair_pe,
        }
    }
}

#[async_trait]
impl TaskExecutor for PeerMultipleAnalyzer {
    fn kind(&self) -> TaskKind {
        TaskKind::PeerMultiple
    }

    async fn execute(
        &self,
        subject: &str,
        profile: &SubjectProfile,
        _deadline: Instant,
    ) -> Result<TaskReport> {
        let eps = profile
            .earnings_per_share
            .filter(|e| *e > 0.0)
            .ok_or_else(|| {
                InsightError::TaskFailed(format!(
                    "{subject}: no positive earnings for multiple comparison"
                ))
            })?;
        let current = profile.current_price.filter(|p| *p > 0.0).ok_or_else(|| {
            InsightError::TaskFailed(format!("{subject}: current price unavailable"))
        })?;

        let fair_pe = self.fair_pe(profile.sector.as_deref());
        let target = eps * fair_pe;
        let upside = upside_pct(target, current);

        debug!(subject, fair_pe, target, upside, "peer multiple computed");

        let mut report = TaskReport::new(
            verdict_for_upside(upside),
            format!("fair P/E of {fair_pe:.0}x implies {upside:.1}% vs current price"),
        )
        .with_price_target(target);
        if upside > 10.0 {
            report = report.with_signal("below fair sector multiple");
        } else if upside < -10.0 {
            report = report.with_signal("above fair sector multiple");
        }
        Ok(report)
    }
}
