//! Subject classifier
//!
//! Pure, deterministic decision logic mapping a financial profile to the
//! category that drives task selection.

use insight_core::{Category, SubjectProfile};

/// Market cap below which a loss-making, cash-burning subject is treated as
/// an early-stage company rather than a troubled mature one.
const STARTUP_CAP_CEILING: f64 = 5e9;

/// Revenue growth above which a profitable subject counts as high-growth.
const GROWTH_THRESHOLD: f64 = 0.15;

/// Classify a subject profile
///
/// The financial-institution check runs first and overrides everything else:
/// cash-flow valuation is structurally inapplicable to banks and insurers, so
/// the category must win even when the growth or loss pattern would match.
/// Profiles missing essential fundamentals classify as Unknown, which
/// restricts selection to tasks that do not require them.
pub fn classify(profile: &SubjectProfile) -> Category {
    if is_financial_institution(profile) {
        return Category::Financial;
    }

    if !profile.has_fundamentals() {
        return Category::Unknown;
    }

    let net_income = profile.net_income.unwrap_or(0.0);
    let fcf = profile.free_cash_flow.unwrap_or(0.0);
    let market_cap = profile.market_cap.unwrap_or(0.0);
    let growth = profile.revenue_growth.unwrap_or(0.0);

    if net_income <= 0.0 && fcf <= 0.0 && market_cap < STARTUP_CAP_CEILING {
        return Category::Startup;
    }

    if net_income > 0.0 && growth > GROWTH_THRESHOLD {
        return Category::Growth;
    }

    // Profitable without high growth, or a loss-maker too large to read as
    // early-stage: both take the mature analysis path.
    Category::Mature
}

fn is_financial_institution(profile: &SubjectProfile) -> bool {
    let sector_hit = profile
        .sector
        .as_deref()
        .is_some_and(|s| s.contains("Financial"));
    let industry_hit = profile
        .industry
        .as_deref()
        .is_some_and(|i| i.contains("Bank") || i.contains("Insurance"));
    sector_hit || industry_hit
}
