//! Logistic scorecard driven by a JSON artifact.
//!
//! Feature engineering mirrors what the scorecard was built on:
//!
//! - numeric features (`age`, `loan_to_income`, `delinquency_ratio`, ...) are
//!   min-max scaled with the bounds stored in the artifact
//! - categorical inputs become one-hot indicators (`loan_type_secured`, ...)
//!
//! `probability = sigmoid(intercept + w·x)`, then
//! `credit_score = round(base_score + (1 - probability) * score_span)` and the
//! rating is the first band (highest `min_score` first) the score reaches.

use std::fs::File;
use std::path::Path;

use nalgebra::DVector;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::{ApplicantInput, LoanPurpose, LoanType, ResidenceType, RiskResult};
use crate::error::AppError;

use super::Predictor;

const BUNDLED_ARTIFACT: &str = include_str!("../../assets/scorecard.json");

/// Serialized scorecard artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scorecard {
    pub name: String,
    pub intercept: f64,
    pub base_score: f64,
    pub score_span: f64,
    pub features: Vec<FeatureWeight>,
    pub rating_bands: Vec<RatingBand>,
}

/// One model coefficient. `min`/`max` are present for scaled numeric features.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureWeight {
    pub name: String,
    pub weight: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingBand {
    pub grade: String,
    pub min_score: i64,
}

/// Feature names the engineering step knows how to produce.
const NUMERIC_FEATURES: [&str; 7] = [
    "age",
    "loan_tenure_months",
    "num_open_accounts",
    "loan_to_income",
    "delinquency_ratio",
    "avg_dpd",
    "credit_utilization_ratio",
];

fn raw_feature(name: &str, input: &ApplicantInput) -> Option<f64> {
    let indicator = |on: bool| if on { 1.0 } else { 0.0 };
    let value = match name {
        "age" => input.age as f64,
        "loan_tenure_months" => input.loan_tenure_months as f64,
        "num_open_accounts" => input.num_open_accounts as f64,
        "loan_to_income" => input.loan_to_income_ratio(),
        "delinquency_ratio" => input.delinquency_ratio as f64,
        "avg_dpd" => input.avg_dpd as f64,
        "credit_utilization_ratio" => input.credit_utilization_ratio as f64,
        "residence_type_owned" => indicator(input.residence_type == ResidenceType::Owned),
        "residence_type_rented" => indicator(input.residence_type == ResidenceType::Rented),
        "residence_type_mortgage" => indicator(input.residence_type == ResidenceType::Mortgage),
        "loan_purpose_education" => indicator(input.loan_purpose == LoanPurpose::Education),
        "loan_purpose_home" => indicator(input.loan_purpose == LoanPurpose::Home),
        "loan_purpose_auto" => indicator(input.loan_purpose == LoanPurpose::Auto),
        "loan_purpose_personal" => indicator(input.loan_purpose == LoanPurpose::Personal),
        "loan_type_unsecured" => indicator(input.loan_type == LoanType::Unsecured),
        "loan_type_secured" => indicator(input.loan_type == LoanType::Secured),
        _ => return None,
    };
    Some(value)
}

/// A validated scorecard ready to score applicants.
#[derive(Debug, Clone)]
pub struct ScorecardModel {
    card: Scorecard,
    weights: DVector<f64>,
}

impl ScorecardModel {
    /// Validate an artifact and prepare it for scoring.
    pub fn new(mut card: Scorecard) -> Result<Self, AppError> {
        if card.features.is_empty() {
            return Err(AppError::model(format!("Scorecard '{}' has no features.", card.name)));
        }
        if !(card.intercept.is_finite() && card.base_score.is_finite() && card.score_span.is_finite())
            || card.score_span <= 0.0
        {
            return Err(AppError::model(format!(
                "Scorecard '{}' has invalid intercept or score scale.",
                card.name
            )));
        }

        let sample = ApplicantInput::default();
        for f in &card.features {
            if raw_feature(&f.name, &sample).is_none() {
                return Err(AppError::model(format!("Unknown scorecard feature '{}'.", f.name)));
            }
            if !f.weight.is_finite() {
                return Err(AppError::model(format!("Non-finite weight for feature '{}'.", f.name)));
            }
            let numeric = NUMERIC_FEATURES.contains(&f.name.as_str());
            match (numeric, f.min, f.max) {
                (true, Some(lo), Some(hi)) if lo.is_finite() && hi.is_finite() && hi > lo => {}
                (true, _, _) => {
                    return Err(AppError::model(format!(
                        "Numeric feature '{}' needs finite scaling bounds with max > min.",
                        f.name
                    )));
                }
                (false, None, None) => {}
                (false, _, _) => {
                    return Err(AppError::model(format!(
                        "Indicator feature '{}' must not carry scaling bounds.",
                        f.name
                    )));
                }
            }
        }

        if card.rating_bands.is_empty() {
            return Err(AppError::model(format!("Scorecard '{}' has no rating bands.", card.name)));
        }
        card.rating_bands.sort_by(|a, b| b.min_score.cmp(&a.min_score));

        let weights = DVector::from_iterator(card.features.len(), card.features.iter().map(|f| f.weight));
        Ok(Self { card, weights })
    }

    /// Parse an artifact from JSON text.
    pub fn from_json(json: &str) -> Result<Self, AppError> {
        let card: Scorecard =
            serde_json::from_str(json).map_err(|e| AppError::model(format!("Invalid scorecard JSON: {e}")))?;
        Self::new(card)
    }

    /// Load an artifact file.
    pub fn from_path(path: &Path) -> Result<Self, AppError> {
        let file = File::open(path)
            .map_err(|e| AppError::model(format!("Failed to open scorecard '{}': {e}", path.display())))?;
        let card: Scorecard = serde_json::from_reader(file)
            .map_err(|e| AppError::model(format!("Invalid scorecard '{}': {e}", path.display())))?;
        Self::new(card)
    }

    /// The scorecard shipped with the binary.
    pub fn bundled() -> Result<Self, AppError> {
        Self::from_json(BUNDLED_ARTIFACT)
    }

    /// Engineered, scaled feature vector in artifact order.
    pub fn features(&self, input: &ApplicantInput) -> DVector<f64> {
        DVector::from_iterator(
            self.card.features.len(),
            self.card.features.iter().map(|f| {
                let raw = raw_feature(&f.name, input).unwrap_or(0.0);
                match (f.min, f.max) {
                    (Some(lo), Some(hi)) => (raw - lo) / (hi - lo),
                    _ => raw,
                }
            }),
        )
    }

    pub fn probability(&self, input: &ApplicantInput) -> f64 {
        let z = self.card.intercept + self.weights.dot(&self.features(input));
        1.0 / (1.0 + (-z).exp())
    }

    pub fn credit_score(&self, probability: f64) -> i64 {
        (self.card.base_score + (1.0 - probability) * self.card.score_span).round() as i64
    }

    pub fn rating_for(&self, credit_score: i64) -> &str {
        self.card
            .rating_bands
            .iter()
            .find(|band| credit_score >= band.min_score)
            .or_else(|| self.card.rating_bands.last())
            .map(|band| band.grade.as_str())
            .unwrap_or_default()
    }
}

impl Predictor for ScorecardModel {
    fn name(&self) -> &str {
        &self.card.name
    }

    fn predict(&self, input: &ApplicantInput) -> Result<RiskResult, AppError> {
        let probability = self.probability(input);
        let credit_score = self.credit_score(probability);
        let rating = self.rating_for(credit_score).to_string();
        debug!(probability, credit_score, rating = %rating, "scorecard evaluated");
        Ok(RiskResult {
            probability,
            credit_score,
            rating,
        })
    }
}
