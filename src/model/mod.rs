//! Credit model seam.
//!
//! The risk computation itself lives outside this crate. A [`Predictor`] maps
//! applicant attributes to `(probability, credit_score, rating)`; the pipeline
//! consumes that tuple verbatim.
//!
//! Implementations:
//! - [`RemotePredictor`]: a model service reached over HTTP
//! - [`ScorecardModel`]: a logistic scorecard loaded from a JSON artifact

pub mod remote;
pub mod scorecard;

use tracing::info;

use crate::config::{ModelSettings, ModelSource};
use crate::domain::{ApplicantInput, RiskResult};
use crate::error::AppError;

pub use remote::RemotePredictor;
pub use scorecard::{Scorecard, ScorecardModel};

/// External collaborator producing a risk verdict for one applicant.
pub trait Predictor {
    /// Short name shown next to results.
    fn name(&self) -> &str;

    fn predict(&self, input: &ApplicantInput) -> Result<RiskResult, AppError>;
}

/// Build the predictor selected by `settings`.
pub fn build_predictor(settings: &ModelSettings) -> Result<Box<dyn Predictor>, AppError> {
    let predictor: Box<dyn Predictor> = match &settings.source {
        ModelSource::Remote { url, token } => {
            Box::new(RemotePredictor::new(url.clone(), token.clone(), settings.timeout)?)
        }
        ModelSource::Artifact(path) => Box::new(ScorecardModel::from_path(path)?),
        ModelSource::Bundled => Box::new(ScorecardModel::bundled()?),
    };
    info!(model = predictor.name(), "predictor ready");
    Ok(predictor)
}
