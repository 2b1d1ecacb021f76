//! Shared helpers for the valuation-style analyzers

use insight_core::Verdict;

/// Map a percent upside/downside against the current price to a verdict
pub(crate) fn verdict_for_upside(upside_pct: f64) -> Verdict {
    if upside_pct > 25.0 {
        Verdict::StrongBuy
    } else if upside_pct > 10.0 {
        Verdict::Buy
    } else if upside_pct < -25.0 {
        Verdict::StrongSell
    } else if upside_pct < -10.0 {
        Verdict::Sell
    } else {
        Verdict::Hold
    }
}

pub(crate) fn upside_pct(target: f64, current: f64) -> f64 {
    (target - current) / current * 100.0
}
