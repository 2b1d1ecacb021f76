//! News sentiment analyzer
//!
//! Contributes signals only: the kind carries zero scoring weight in the
//! default registry, so its verdict never moves the consensus score.

use async_trait::async_trait;
use insight_core::{
    InsightError, Result, SubjectProfile, TaskExecutor, TaskKind, TaskReport, Verdict,
};
use std::time::Instant;
use tracing::debug;

#[derive(Default)]
pub struct NewsSentimentAnalyzer;

const POSITIVE: f64 = 0.3;
const NEGATIVE: f64 = -0.3;

#[async_trait]
impl TaskExecutor for NewsSentimentAnalyzer {
    fn kind(&self) -> TaskKind {
        TaskKind::NewsSentiment
    }

    async fn execute(
        &self,
        subject: &str,
        profile: &SubjectProfile,
        _deadline: Instant,
    ) -> Result<TaskReport> {
        let score = profile.news_sentiment.ok_or_else(|| {
            InsightError::TaskFailed(format!("{subject}: no recent news coverage"))
        })?;

        debug!(subject, score, "news sentiment read");

        let report = if score >= POSITIVE {
            TaskReport::new(Verdict::Buy, format!("positive news flow ({score:+.2})"))
                .with_signal("positive news flow")
        } else if score <= NEGATIVE {
            TaskReport::new(Verdict::Sell, format!("negative news flow ({score:+.2})"))
                .with_signal("negative news flow")
        } else {
            TaskReport::new(Verdict::Hold, format!("neutral news flow ({score:+.2})"))
        };
        Ok(report)
    }
}
