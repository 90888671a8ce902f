//! Tier classification for the model outputs and the affordability signal.
//!
//! Each classifier is a small pure function returning a tier; labels and
//! colors hang off the tier so the boundaries can be tested on their own.
//! All comparisons are strict where the thresholds say so: a loan at exactly
//! 3x income is `Normal`, a probability of exactly 0.2 is `Medium`.

use serde::Serialize;

use super::palette::ColorToken;

/// Above this loan-to-income ratio the loan is flagged high risk.
pub const AFFORDABILITY_HIGH_RATIO: f64 = 3.0;
/// Above this (and up to the high mark) the ratio is considered normal.
pub const AFFORDABILITY_NORMAL_RATIO: f64 = 2.0;

/// Probabilities below this are low risk.
pub const PROBABILITY_MEDIUM_FROM: f64 = 0.2;
/// Probabilities at or above this are high risk.
pub const PROBABILITY_HIGH_FROM: f64 = 0.5;

/// Scores at or above this are excellent.
pub const SCORE_EXCELLENT_FROM: i64 = 750;
/// Scores at or above this (below excellent) are good.
pub const SCORE_GOOD_FROM: i64 = 650;

/// Loan amount over income, `0` when there is no income to divide by.
pub fn loan_to_income_ratio(loan_amount: f64, income: f64) -> f64 {
    if income > 0.0 { loan_amount / income } else { 0.0 }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AffordabilityTier {
    HighRisk,
    Normal,
    LowRisk,
}

impl AffordabilityTier {
    pub fn label(self) -> &'static str {
        match self {
            AffordabilityTier::HighRisk => "High Risk",
            AffordabilityTier::Normal => "Normal",
            AffordabilityTier::LowRisk => "Low Risk",
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            AffordabilityTier::HighRisk => "⚠",
            AffordabilityTier::Normal => "✓",
            AffordabilityTier::LowRisk => "●",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ProbabilityTier {
    Low,
    Medium,
    High,
}

impl ProbabilityTier {
    pub fn label(self) -> &'static str {
        match self {
            ProbabilityTier::Low => "Low Risk",
            ProbabilityTier::Medium => "Medium Risk",
            ProbabilityTier::High => "High Risk",
        }
    }

    pub fn color(self) -> ColorToken {
        match self {
            ProbabilityTier::Low => ColorToken::Green,
            ProbabilityTier::Medium => ColorToken::Orange,
            ProbabilityTier::High => ColorToken::Red,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ScoreTier {
    Excellent,
    Good,
    Poor,
}

impl ScoreTier {
    pub fn label(self) -> &'static str {
        match self {
            ScoreTier::Excellent => "Excellent",
            ScoreTier::Good => "Good",
            ScoreTier::Poor => "Poor",
        }
    }

    pub fn color(self) -> ColorToken {
        match self {
            ScoreTier::Excellent => ColorToken::Green,
            ScoreTier::Good => ColorToken::Orange,
            ScoreTier::Poor => ColorToken::Red,
        }
    }
}

/// Affordability reading for a loan request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Affordability {
    pub ratio: f64,
    pub tier: AffordabilityTier,
    pub label: &'static str,
}

/// Tiered default probability.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProbabilityBand {
    pub tier: ProbabilityTier,
    pub label: &'static str,
    pub color: ColorToken,
}

/// Tiered credit score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreBand {
    pub tier: ScoreTier,
    pub label: &'static str,
    pub color: ColorToken,
}

pub fn classify_affordability(loan_amount: f64, income: f64) -> Affordability {
    let ratio = loan_to_income_ratio(loan_amount, income);
    let tier = if ratio > AFFORDABILITY_HIGH_RATIO {
        AffordabilityTier::HighRisk
    } else if ratio > AFFORDABILITY_NORMAL_RATIO {
        AffordabilityTier::Normal
    } else {
        AffordabilityTier::LowRisk
    };
    Affordability {
        ratio,
        tier,
        label: tier.label(),
    }
}

pub fn classify_probability(probability: f64) -> ProbabilityBand {
    let tier = if probability < PROBABILITY_MEDIUM_FROM {
        ProbabilityTier::Low
    } else if probability < PROBABILITY_HIGH_FROM {
        ProbabilityTier::Medium
    } else {
        ProbabilityTier::High
    };
    ProbabilityBand {
        tier,
        label: tier.label(),
        color: tier.color(),
    }
}

pub fn classify_score(credit_score: i64) -> ScoreBand {
    let tier = if credit_score >= SCORE_EXCELLENT_FROM {
        ScoreTier::Excellent
    } else if credit_score >= SCORE_GOOD_FROM {
        ScoreTier::Good
    } else {
        ScoreTier::Poor
    };
    ScoreBand {
        tier,
        label: tier.label(),
        color: tier.color(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn affordability_boundaries() {
        let income = 1_000_000.0;
        let eps = 1.0;
        assert_eq!(classify_affordability(2.0 * income, income).tier, AffordabilityTier::LowRisk);
        assert_eq!(classify_affordability(2.0 * income + eps, income).tier, AffordabilityTier::Normal);
        assert_eq!(classify_affordability(3.0 * income, income).tier, AffordabilityTier::Normal);
        assert_eq!(classify_affordability(3.0 * income + eps, income).tier, AffordabilityTier::HighRisk);
        assert_eq!(classify_affordability(0.0, income).tier, AffordabilityTier::LowRisk);
    }

    #[test]
    fn affordability_zero_income_is_low_risk() {
        let a = classify_affordability(2_560_000.0, 0.0);
        assert_eq!(a.ratio, 0.0);
        assert_eq!(a.tier, AffordabilityTier::LowRisk);
        assert_eq!(a.label, "Low Risk");
    }

    #[test]
    fn probability_boundaries() {
        assert_eq!(classify_probability(0.0).tier, ProbabilityTier::Low);
        assert_eq!(classify_probability(0.19999).tier, ProbabilityTier::Low);
        assert_eq!(classify_probability(0.2).tier, ProbabilityTier::Medium);
        assert_eq!(classify_probability(0.49999).tier, ProbabilityTier::Medium);
        assert_eq!(classify_probability(0.5).tier, ProbabilityTier::High);
        assert_eq!(classify_probability(1.0).tier, ProbabilityTier::High);
    }

    #[test]
    fn probability_colors_follow_tier() {
        assert_eq!(classify_probability(0.1).color, ColorToken::Green);
        assert_eq!(classify_probability(0.3).color, ColorToken::Orange);
        assert_eq!(classify_probability(0.7).color, ColorToken::Red);
        assert_eq!(classify_probability(0.3).label, "Medium Risk");
    }

    #[test]
    fn score_boundaries() {
        assert_eq!(classify_score(749).tier, ScoreTier::Good);
        assert_eq!(classify_score(750).tier, ScoreTier::Excellent);
        assert_eq!(classify_score(649).tier, ScoreTier::Poor);
        assert_eq!(classify_score(650).tier, ScoreTier::Good);
        assert_eq!(classify_score(300).color, ColorToken::Red);
    }

    #[test]
    fn classifiers_are_idempotent() {
        assert_eq!(classify_affordability(3.5, 1.0), classify_affordability(3.5, 1.0));
        assert_eq!(classify_probability(0.42), classify_probability(0.42));
        assert_eq!(classify_score(701), classify_score(701));
    }
}
