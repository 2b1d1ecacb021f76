//! Weighted consensus aggregation
//!
//! Reduces a heterogeneous, variable-size set of task outcomes into one
//! deterministic consensus result. The reduction is commutative: weights are
//! looked up by task kind, never by position, and derived lists are sorted,
//! so permuting the outcome list produces an identical report.

use chrono::Utc;
use insight_core::{
    Confidence, ConsensusReport, InsightError, Recommendation, Result, RiskLevel, TaskOutcome,
    TaskSpec,
};
use std::collections::HashMap;
use tracing::debug;

const WEIGHT_EPSILON: f64 = 1e-9;

/// Map a consensus score to its recommendation band
///
/// Bands are evaluated in fixed priority order; boundary scores fall into the
/// stronger band.
pub fn recommendation_for_score(score: f64) -> Recommendation {
    if score >= 1.5 {
        Recommendation::StrongBuy
    } else if score >= 0.5 {
        Recommendation::Buy
    } else if score <= -1.5 {
        Recommendation::StrongSell
    } else if score <= -0.5 {
        Recommendation::Sell
    } else {
        Recommendation::Hold
    }
}

fn confidence_for(scoring_count: usize, score: f64) -> Confidence {
    let agreement = score.abs();
    if scoring_count >= 3 && agreement >= 1.0 {
        Confidence::High
    } else if scoring_count >= 2 && agreement >= 0.5 {
        Confidence::Medium
    } else {
        Confidence::Low
    }
}

/// Reduce the outcome list for one subject into a consensus report
///
/// `specs` supplies the declared weights; `outcomes` may arrive in any order.
/// An all-failed run still yields a well-formed report with recommendation
/// Indeterminate - "no signal available" is not a system error. An empty
/// outcome list is a structural error: selection should have caught it.
pub fn aggregate(
    subject: &str,
    current_price: Option<f64>,
    specs: &[TaskSpec],
    outcomes: &[TaskOutcome],
) -> Result<ConsensusReport> {
    if outcomes.is_empty() {
        return Err(InsightError::Other(
            "aggregation requires at least one task outcome".to_string(),
        ));
    }

    let weights: HashMap<_, _> = specs.iter().map(|s| (s.kind, s.weight)).collect();
    let weight_of = |outcome: &TaskOutcome| weights.get(&outcome.kind).copied().unwrap_or(0.0);

    let successes: Vec<&TaskOutcome> = outcomes.iter().filter(|o| o.is_success()).collect();

    if successes.is_empty() {
        debug!(subject, "every task failed or timed out, no signal available");
        return Ok(indeterminate_report(subject));
    }

    // Scoring subset: Success outcomes of kinds that contribute to scoring.
    let scoring: Vec<&TaskOutcome> = successes
        .iter()
        .copied()
        .filter(|o| o.kind.contributes_to_scoring() && o.verdict.is_some())
        .collect();
    let scoring_weight: f64 = scoring.iter().map(|o| weight_of(o)).sum();

    let (consensus_score, recommendation, confidence, insufficient_data) =
        if scoring_weight <= WEIGHT_EPSILON {
            // Successes exist but none carry scoring weight: insufficient
            // data, not a hard error.
            (None, Recommendation::Hold, Confidence::Low, true)
        } else {
            let score: f64 = scoring
                .iter()
                .map(|o| {
                    let effective = weight_of(o) / scoring_weight;
                    o.verdict.map_or(0.0, insight_core::Verdict::score) * effective
                })
                .sum();
            // Convex combination of bounded verdict scores; clamp only guards
            // against float drift at the edges.
            let score = score.clamp(-2.0, 2.0);
            (
                Some(score),
                recommendation_for_score(score),
                confidence_for(scoring.len(), score),
                false,
            )
        };

    // Price subset is independent of the scoring subset: any Success outcome
    // with a strictly positive price contributes, news sentiment included.
    let priced: Vec<&TaskOutcome> = successes
        .iter()
        .copied()
        .filter(|o| o.price_target.is_some_and(|p| p > 0.0))
        .collect();
    let target_price = consensus_target_price(&priced, weight_of);
    let upside_potential = match (target_price, current_price) {
        (Some(target), Some(current)) if current > 0.0 => {
            Some((target - current) / current * 100.0)
        }
        _ => None,
    };

    let flagged = successes.iter().filter(|o| o.risk_flag).count();
    let risk_level = if flagged * 2 >= successes.len() {
        RiskLevel::High
    } else if flagged > 0 {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    };

    let mut bullish_signals = Vec::new();
    let mut bearish_signals = Vec::new();
    for outcome in &successes {
        let Some(verdict) = outcome.verdict else {
            continue;
        };
        if verdict.is_bullish() {
            bullish_signals.push(format!("{} indicates {}", outcome.kind.label(), verdict));
            bullish_signals.extend(outcome.signals.iter().cloned());
        } else if verdict.is_bearish() {
            bearish_signals.push(format!("{} indicates {}", outcome.kind.label(), verdict));
            bearish_signals.extend(outcome.signals.iter().cloned());
        }
    }
    bullish_signals.sort();
    bearish_signals.sort();

    let mut key_risks: Vec<String> = successes
        .iter()
        .filter(|o| o.risk_flag)
        .map(|o| format!("{} flagged elevated risk", o.kind.label()))
        .collect();
    key_risks.sort();

    let summary = build_summary(recommendation, confidence, &scoring);

    Ok(ConsensusReport {
        subject: subject.to_string(),
        recommendation,
        consensus_score,
        target_price,
        upside_potential,
        confidence,
        risk_level,
        bullish_signals,
        bearish_signals,
        key_risks,
        successful_tasks: successes.len(),
        insufficient_data,
        summary,
        generated_at: Utc::now(),
    })
}

/// Weighted average over the valid-price subset, with declared weights
/// renormalized to sum to 1 over that subset. If every contributing kind has
/// zero declared weight, the unweighted mean is used instead.
fn consensus_target_price<F>(priced: &[&TaskOutcome], weight_of: F) -> Option<f64>
where
    F: Fn(&TaskOutcome) -> f64,
{
    if priced.is_empty() {
        return None;
    }
    let total_weight: f64 = priced.iter().map(|o| weight_of(o)).sum();
    if total_weight <= WEIGHT_EPSILON {
        let sum: f64 = priced.iter().filter_map(|o| o.price_target).sum();
        return Some(sum / priced.len() as f64);
    }
    let weighted: f64 = priced
        .iter()
        .map(|o| o.price_target.unwrap_or(0.0) * weight_of(o) / total_weight)
        .sum();
    Some(weighted)
}

fn indeterminate_report(subject: &str) -> ConsensusReport {
    ConsensusReport {
        subject: subject.to_string(),
        recommendation: Recommendation::Indeterminate,
        consensus_score: None,
        target_price: None,
        upside_potential: None,
        confidence: Confidence::Low,
        risk_level: RiskLevel::Low,
        bullish_signals: Vec::new(),
        bearish_signals: Vec::new(),
        key_risks: Vec::new(),
        successful_tasks: 0,
        insufficient_data: true,
        summary: "Consensus: Indeterminate | no analysis produced a usable signal".to_string(),
        generated_at: Utc::now(),
    }
}

fn build_summary(
    recommendation: Recommendation,
    confidence: Confidence,
    scoring: &[&TaskOutcome],
) -> String {
    let mut parts = vec![
        format!("Consensus: {recommendation}"),
        format!("Confidence: {confidence}"),
        format!("Analyses: {}", scoring.len()),
    ];
    let mut verdicts: Vec<String> = scoring
        .iter()
        .filter_map(|o| o.verdict.map(|v| format!("{}: {v}", o.kind.label())))
        .collect();
    verdicts.sort();
    parts.extend(verdicts);
    parts.join(" | ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use insight_core::{TaskKind, TaskReport, Verdict};
    use std::time::Duration;

    const TOLERANCE: f64 = 1e-9;

    fn spec(kind: TaskKind, weight: f64) -> TaskSpec {
        TaskSpec::new(kind, weight, Duration::from_secs(30))
    }

    fn mature_specs() -> Vec<TaskSpec> {
        vec![
            spec(TaskKind::Dcf, 0.25),
            spec(TaskKind::PeerMultiple, 0.20),
            spec(TaskKind::PricePattern, 0.15),
            spec(TaskKind::AnalystConsensus, 0.25),
            spec(TaskKind::AiInsights, 0.15),
        ]
    }

    fn success(kind: TaskKind, verdict: Verdict, price: Option<f64>) -> TaskOutcome {
        let mut report = TaskReport::new(verdict, "test");
        if let Some(price) = price {
            report = report.with_price_target(price);
        }
        TaskOutcome::success(kind, report)
    }

    fn mature_outcomes() -> Vec<TaskOutcome> {
        vec![
            success(TaskKind::Dcf, Verdict::Buy, Some(180.0)),
            success(TaskKind::PeerMultiple, Verdict::StrongBuy, Some(185.0)),
            success(TaskKind::PricePattern, Verdict::Hold, Some(175.0)),
            success(TaskKind::AnalystConsensus, Verdict::Buy, Some(190.0)),
            success(TaskKind::AiInsights, Verdict::Buy, Some(182.0)),
        ]
    }

    #[test]
    fn test_banding_boundaries() {
        assert_eq!(recommendation_for_score(1.5), Recommendation::StrongBuy);
        assert_eq!(recommendation_for_score(1.4999), Recommendation::Buy);
        assert_eq!(recommendation_for_score(0.5), Recommendation::Buy);
        assert_eq!(recommendation_for_score(0.4999), Recommendation::Hold);
        assert_eq!(recommendation_for_score(-0.4999), Recommendation::Hold);
        assert_eq!(recommendation_for_score(-0.5), Recommendation::Sell);
        assert_eq!(recommendation_for_score(-1.4999), Recommendation::Sell);
        assert_eq!(recommendation_for_score(-1.5), Recommendation::StrongSell);
    }

    #[test]
    fn test_confidence_table() {
        assert_eq!(confidence_for(3, 1.0), Confidence::High);
        assert_eq!(confidence_for(3, 0.999), Confidence::Medium);
        assert_eq!(confidence_for(2, 0.5), Confidence::Medium);
        assert_eq!(confidence_for(2, 0.499), Confidence::Low);
        assert_eq!(confidence_for(1, 2.0), Confidence::Low);
    }

    #[test]
    fn test_mature_end_to_end_example() {
        let report = aggregate("ACME", Some(170.0), &mature_specs(), &mature_outcomes())
            .expect("aggregation succeeds");

        let score = report.consensus_score.expect("score present");
        assert!((score - 1.05).abs() < TOLERANCE, "score was {score}");
        assert_eq!(report.recommendation, Recommendation::Buy);
        // 180*.25 + 185*.20 + 175*.15 + 190*.25 + 182*.15 over weight 1.0
        let target = report.target_price.expect("target present");
        assert!((target - 183.05).abs() < TOLERANCE, "target was {target}");
        assert_eq!(report.confidence, Confidence::High);
        assert_eq!(report.successful_tasks, 5);
        assert!(!report.insufficient_data);
        let upside = report.upside_potential.expect("upside present");
        assert!((upside - (183.05 - 170.0) / 170.0 * 100.0).abs() < TOLERANCE);
    }

    #[test]
    fn test_partial_failure_renormalizes_weights() {
        let mut outcomes = mature_outcomes();
        outcomes[2] = TaskOutcome::timed_out(TaskKind::PricePattern);

        let report = aggregate("ACME", None, &mature_specs(), &outcomes)
            .expect("aggregation succeeds");

        // Remaining declared weights {.25, .20, .25, .15} renormalize over .85
        let score = report.consensus_score.expect("score present");
        assert!((score - 1.05 / 0.85).abs() < TOLERANCE, "score was {score}");
        let target = report.target_price.expect("target present");
        let expected = (180.0 * 0.25 + 185.0 * 0.20 + 190.0 * 0.25 + 182.0 * 0.15) / 0.85;
        assert!((target - expected).abs() < TOLERANCE, "target was {target}");
        assert_eq!(report.successful_tasks, 4);
    }

    #[test]
    fn test_order_invariance() {
        let specs = mature_specs();
        let outcomes = mature_outcomes();
        let mut permuted = outcomes.clone();
        permuted.reverse();
        permuted.rotate_left(2);

        let a = aggregate("ACME", Some(170.0), &specs, &outcomes).expect("aggregation succeeds");
        let b = aggregate("ACME", Some(170.0), &specs, &permuted).expect("aggregation succeeds");

        assert_eq!(a.recommendation, b.recommendation);
        assert_eq!(a.consensus_score, b.consensus_score);
        assert_eq!(a.target_price, b.target_price);
        assert_eq!(a.confidence, b.confidence);
        assert_eq!(a.risk_level, b.risk_level);
        assert_eq!(a.bullish_signals, b.bullish_signals);
        assert_eq!(a.bearish_signals, b.bearish_signals);
        assert_eq!(a.key_risks, b.key_risks);
        assert_eq!(a.summary, b.summary);
    }

    #[test]
    fn test_missing_price_does_not_zero_the_average() {
        let specs = mature_specs();
        let with_priceless = vec![
            success(TaskKind::Dcf, Verdict::Buy, Some(100.0)),
            success(TaskKind::PeerMultiple, Verdict::Buy, None),
        ];
        let without = vec![success(TaskKind::Dcf, Verdict::Buy, Some(100.0))];

        let a = aggregate("ACME", None, &specs, &with_priceless).expect("aggregation succeeds");
        let b = aggregate("ACME", None, &specs, &without).expect("aggregation succeeds");
        assert_eq!(a.target_price, b.target_price);
        assert_eq!(a.target_price, Some(100.0));
    }

    #[test]
    fn test_all_failed_yields_indeterminate() {
        let specs = mature_specs();
        let outcomes: Vec<TaskOutcome> = specs
            .iter()
            .map(|s| TaskOutcome::timed_out(s.kind))
            .collect();

        let report = aggregate("DEAD", Some(50.0), &specs, &outcomes)
            .expect("all-failed is not an error");

        assert_eq!(report.recommendation, Recommendation::Indeterminate);
        assert_eq!(report.confidence, Confidence::Low);
        assert_eq!(report.consensus_score, None);
        assert_eq!(report.target_price, None);
        assert_eq!(report.successful_tasks, 0);
    }

    #[test]
    fn test_empty_outcome_list_is_structural_error() {
        let err = aggregate("NONE", None, &mature_specs(), &[])
            .expect_err("empty outcomes must error");
        assert!(matches!(err, InsightError::Other(_)));
    }

    #[test]
    fn test_only_non_scoring_success_is_insufficient_data() {
        let specs = vec![
            spec(TaskKind::Dcf, 0.25),
            spec(TaskKind::NewsSentiment, 0.0),
        ];
        let outcomes = vec![
            TaskOutcome::failed(TaskKind::Dcf, "no data"),
            success(TaskKind::NewsSentiment, Verdict::Buy, None),
        ];

        let report = aggregate("THIN", None, &specs, &outcomes).expect("aggregation succeeds");
        assert!(report.insufficient_data);
        assert_eq!(report.recommendation, Recommendation::Hold);
        assert_eq!(report.confidence, Confidence::Low);
        assert_eq!(report.consensus_score, None);
        assert_eq!(report.successful_tasks, 1);
    }

    #[test]
    fn test_zero_weight_price_subset_falls_back_to_mean() {
        let specs = vec![spec(TaskKind::NewsSentiment, 0.0)];
        let outcomes = vec![success(TaskKind::NewsSentiment, Verdict::Hold, Some(44.0))];

        let report = aggregate("ZW", None, &specs, &outcomes).expect("aggregation succeeds");
        assert_eq!(report.target_price, Some(44.0));
    }

    #[test]
    fn test_risk_level_thresholds() {
        let specs = mature_specs();
        let risky = |kind| {
            TaskOutcome::success(
                kind,
                TaskReport::new(Verdict::Hold, "volatile").with_risk_flag(),
            )
        };

        // 1 of 3 flagged -> Medium
        let outcomes = vec![
            risky(TaskKind::Dcf),
            success(TaskKind::PeerMultiple, Verdict::Hold, None),
            success(TaskKind::PricePattern, Verdict::Hold, None),
        ];
        let report = aggregate("RISK", None, &specs, &outcomes).expect("aggregation succeeds");
        assert_eq!(report.risk_level, RiskLevel::Medium);
        assert_eq!(report.key_risks.len(), 1);

        // 2 of 3 flagged -> High
        let outcomes = vec![
            risky(TaskKind::Dcf),
            risky(TaskKind::PeerMultiple),
            success(TaskKind::PricePattern, Verdict::Hold, None),
        ];
        let report = aggregate("RISK", None, &specs, &outcomes).expect("aggregation succeeds");
        assert_eq!(report.risk_level, RiskLevel::High);

        // none flagged -> Low
        let outcomes = vec![success(TaskKind::Dcf, Verdict::Hold, None)];
        let report = aggregate("RISK", None, &specs, &outcomes).expect("aggregation succeeds");
        assert_eq!(report.risk_level, RiskLevel::Low);
    }

    #[test]
    fn test_signal_lists_follow_verdicts() {
        let specs = mature_specs();
        let outcomes = vec![
            TaskOutcome::success(
                TaskKind::Dcf,
                TaskReport::new(Verdict::Buy, "undervalued").with_signal("trading below intrinsic value"),
            ),
            success(TaskKind::PeerMultiple, Verdict::Sell, None),
            success(TaskKind::PricePattern, Verdict::Hold, None),
        ];

        let report = aggregate("SIG", None, &specs, &outcomes).expect("aggregation succeeds");
        assert_eq!(
            report.bullish_signals,
            vec![
                "DCF indicates Buy".to_string(),
                "trading below intrinsic value".to_string(),
            ]
        );
        assert_eq!(
            report.bearish_signals,
            vec!["Peer Multiple indicates Sell".to_string()]
        );
    }

    #[test]
    fn test_score_stays_bounded() {
        let specs = vec![spec(TaskKind::Dcf, 0.9), spec(TaskKind::PeerMultiple, 0.1)];
        let outcomes = vec![
            success(TaskKind::Dcf, Verdict::StrongBuy, None),
            success(TaskKind::PeerMultiple, Verdict::StrongBuy, None),
        ];
        let report = aggregate("MAX", None, &specs, &outcomes).expect("aggregation succeeds");
        let score = report.consensus_score.expect("score present");
        assert!((-2.0..=2.0).contains(&score));
        assert!((score - 2.0).abs() < TOLERANCE);
        assert_eq!(report.recommendation, Recommendation::StrongBuy);
    }
}
