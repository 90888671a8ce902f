//! Risk presenter: turns model outputs into tiers, labels and colors.
//!
//! Everything here is pure. The presenter does not validate the model's output
//! ranges; that happens at the collaborator boundary (`app::pipeline`).

pub mod palette;
pub mod rating;
pub mod tiers;

use serde::Serialize;

use crate::domain::{ApplicantInput, RiskResult};

pub use palette::ColorToken;
pub use rating::{map_rating_color, DEFAULT_RATING_COLOR, RATING_COLORS};
pub use tiers::*;

/// Everything a front-end needs to render one assessment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Presentation {
    pub affordability: Affordability,
    pub probability: ProbabilityBand,
    pub score: ScoreBand,
    pub rating_color: ColorToken,
}

/// Derive the full presentation for an applicant and the model's verdict.
pub fn present(input: &ApplicantInput, result: &RiskResult) -> Presentation {
    Presentation {
        affordability: classify_affordability(input.loan_amount, input.income),
        probability: classify_probability(result.probability),
        score: classify_score(result.credit_score),
        rating_color: map_rating_color(&result.rating),
    }
}
