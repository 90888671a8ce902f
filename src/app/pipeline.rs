//! Shared assessment pipeline used by both CLI and TUI front-ends.
//!
//! validate input -> one predictor call -> presentation
//!
//! The CLI and the TUI only differ in how they render the resulting
//! [`Assessment`].

use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};

use crate::domain::{ApplicantInput, RiskResult};
use crate::error::AppError;
use crate::model::Predictor;
use crate::presenter::{present, Presentation};

/// Everything computed for one submission.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Assessment {
    pub assessed_at: DateTime<Utc>,
    pub model: String,
    pub input: ApplicantInput,
    pub result: RiskResult,
    pub presentation: Presentation,
}

/// Run one applicant through the model and derive the presentation.
pub fn assess(predictor: &dyn Predictor, input: ApplicantInput) -> Result<Assessment, AppError> {
    input.validate()?;

    let started = Instant::now();
    let result = predictor.predict(&input)?;
    info!(
        model = predictor.name(),
        probability = result.probability,
        credit_score = result.credit_score,
        rating = %result.rating,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "assessment complete"
    );

    check_result(&result)?;
    if result.grade().is_none() {
        warn!(rating = %result.rating, "model returned an unrecognised rating grade");
    }

    let presentation = present(&input, &result);
    Ok(Assessment {
        assessed_at: Utc::now(),
        model: predictor.name().to_string(),
        input,
        result,
        presentation,
    })
}

fn check_result(result: &RiskResult) -> Result<(), AppError> {
    if !(result.probability.is_finite() && (0.0..=1.0).contains(&result.probability)) {
        return Err(AppError::runtime(format!(
            "Model returned a probability outside [0, 1]: {}",
            result.probability
        )));
    }
    Ok(())
}
