//! Subject profile and classification category

use serde::{Deserialize, Serialize};
use std::fmt;

/// Classification of a subject, determining which analysis tasks apply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// Profitable with a mature financial pattern
    Mature,
    /// Profitable with high revenue growth
    Growth,
    /// Net loss with early-stage growth/burn signals
    Startup,
    /// Financial institution - structurally excluded from cash-flow valuation
    Financial,
    /// Essential fundamentals missing - only non-fundamental tasks apply
    Unknown,
}

impl Category {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Mature => "Mature",
            Self::Growth => "Growth",
            Self::Startup => "Startup",
            Self::Financial => "Financial",
            Self::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Financial profile of a subject under analysis
///
/// Supplied by a data-retrieval collaborator; every fundamental field is
/// optional because upstream coverage is uneven. The derived attributes are
/// consumed by the classifier and by the built-in analyzers; the engine core
/// itself only reads the symbol.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubjectProfile {
    /// Ticker symbol identifying the subject
    pub symbol: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub sector: Option<String>,
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default)]
    pub current_price: Option<f64>,
    #[serde(default)]
    pub market_cap: Option<f64>,
    #[serde(default)]
    pub net_income: Option<f64>,
    #[serde(default)]
    pub free_cash_flow: Option<f64>,
    #[serde(default)]
    pub revenue: Option<f64>,
    /// Year-over-year revenue growth as a fraction (0.15 = 15%)
    #[serde(default)]
    pub revenue_growth: Option<f64>,
    #[serde(default)]
    pub earnings_per_share: Option<f64>,
    #[serde(default)]
    pub pe_ratio: Option<f64>,
    /// Annualized price volatility as a fraction
    #[serde(default)]
    pub volatility_annual: Option<f64>,
    /// Trailing three-month price change as a fraction
    #[serde(default)]
    pub momentum_3m: Option<f64>,
    /// Mean professional analyst price target
    #[serde(default)]
    pub analyst_target: Option<f64>,
    /// Mean professional analyst rating, 1.0 (strong buy) to 5.0 (sell)
    #[serde(default)]
    pub analyst_rating: Option<f64>,
    /// Aggregate news sentiment in [-1.0, 1.0]
    #[serde(default)]
    pub news_sentiment: Option<f64>,
}

impl SubjectProfile {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            name: None,
            sector: None,
            industry: None,
            current_price: None,
            market_cap: None,
            net_income: None,
            free_cash_flow: None,
            revenue: None,
            revenue_growth: None,
            earnings_per_share: None,
            pe_ratio: None,
            volatility_annual: None,
            momentum_3m: None,
            analyst_target: None,
            analyst_rating: None,
            news_sentiment: None,
        }
    }

    pub fn with_sector(mut self, sector: impl Into<String>) -> Self {
        self.sector = Some(sector.into());
        self
    }

    pub fn with_industry(mut self, industry: impl Into<String>) -> Self {
        self.industry = Some(industry.into());
        self
    }

    pub fn with_current_price(mut self, price: f64) -> Self {
        self.current_price = Some(price);
        self
    }

    pub fn with_market_cap(mut self, market_cap: f64) -> Self {
        self.market_cap = Some(market_cap);
        self
    }

    pub fn with_net_income(mut self, net_income: f64) -> Self {
        self.net_income = Some(net_income);
        self
    }

    pub fn with_free_cash_flow(mut self, fcf: f64) -> Self {
        self.free_cash_flow = Some(fcf);
        self
    }

    pub fn with_revenue(mut self, revenue: f64) -> Self {
        self.revenue = Some(revenue);
        self
    }

    pub fn with_revenue_growth(mut self, growth: f64) -> Self {
        self.revenue_growth = Some(growth);
        self
    }

    /// Whether the essential fundamental inputs for classification are present
    pub fn has_fundamentals(&self) -> bool {
        self.net_income.is_some() && self.revenue.is_some()
    }
}
