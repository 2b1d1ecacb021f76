//! Verdict and consensus rating types

use serde::{Deserialize, Serialize};
use std::fmt;

/// Verdict reported by a single analysis task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Verdict {
    StrongBuy,
    Buy,
    SpeculativeBuy,
    Hold,
    Monitor,
    Sell,
    StrongSell,
}

impl Verdict {
    /// Numeric score used by the weighted consensus reduction
    pub fn score(self) -> f64 {
        match self {
            Self::StrongBuy => 2.0,
            Self::Buy | Self::SpeculativeBuy => 1.0,
            Self::Hold | Self::Monitor => 0.0,
            Self::Sell => -1.0,
            Self::StrongSell => -2.0,
        }
    }

    pub fn is_bullish(self) -> bool {
        matches!(self, Self::StrongBuy | Self::Buy | Self::SpeculativeBuy)
    }

    pub fn is_bearish(self) -> bool {
        matches!(self, Self::Sell | Self::StrongSell)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::StrongBuy => "Strong Buy",
            Self::Buy => "Buy",
            Self::SpeculativeBuy => "Speculative Buy",
            Self::Hold => "Hold",
            Self::Monitor => "Monitor",
            Self::Sell => "Sell",
            Self::StrongSell => "Strong Sell",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Final consensus recommendation
///
/// `Indeterminate` is reserved for requests where every task ended
/// Failed/TimedOut - "no signal available" as opposed to a system error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Recommendation {
    StrongBuy,
    Buy,
    Hold,
    Sell,
    StrongSell,
    Indeterminate,
}

impl Recommendation {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::StrongBuy => "Strong Buy",
            Self::Buy => "Buy",
            Self::Hold => "Hold",
            Self::Sell => "Sell",
            Self::StrongSell => "Strong Sell",
            Self::Indeterminate => "Indeterminate",
        }
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Confidence in the consensus recommendation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Confidence {
    High,
    Medium,
    Low,
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::High => f.write_str("High"),
            Self::Medium => f.write_str("Medium"),
            Self::Low => f.write_str("Low"),
        }
    }
}

/// Overall risk level derived from per-task risk flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    High,
    Medium,
    Low,
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::High => f.write_str("High"),
            Self::Medium => f.write_str("Medium"),
            Self::Low => f.write_str("Low"),
        }
    }
}
