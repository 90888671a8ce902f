//! HTTP client for a remote credit model service.
//!
//! The service receives the applicant as JSON and answers with
//! `{"probability": .., "credit_score": .., "rating": ".."}`.

use std::time::{Duration, Instant};

use reqwest::blocking::Client;
use tracing::{debug, warn};

use crate::domain::{ApplicantInput, RiskResult};
use crate::error::AppError;

use super::Predictor;

pub struct RemotePredictor {
    client: Client,
    url: String,
    token: Option<String>,
}

impl RemotePredictor {
    pub fn new(url: String, token: Option<String>, timeout: Duration) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::model(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self { client, url, token })
    }
}

impl Predictor for RemotePredictor {
    fn name(&self) -> &str {
        &self.url
    }

    fn predict(&self, input: &ApplicantInput) -> Result<RiskResult, AppError> {
        let started = Instant::now();
        let mut request = self.client.post(&self.url).json(input);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().map_err(|e| {
            warn!(url = %self.url, error = %e, "model request failed");
            AppError::runtime(format!("Model service request failed: {e}"))
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(AppError::runtime(format!(
                "Model service returned HTTP {status}: {}",
                body.trim()
            )));
        }

        let result: RiskResult = response
            .json()
            .map_err(|e| AppError::runtime(format!("Invalid model service response: {e}")))?;

        debug!(
            url = %self.url,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "model service answered"
        );
        Ok(result)
    }
}
