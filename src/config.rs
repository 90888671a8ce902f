//! Model configuration from command-line flags and the environment.
//!
//! Flags win over environment variables; `.env` in the working directory is
//! loaded first (via `dotenvy`) so local setups don't need exported variables.

use std::path::PathBuf;
use std::time::Duration;

use crate::error::AppError;

pub const ENV_MODEL_URL: &str = "CREDITVISION_MODEL_URL";
pub const ENV_MODEL_TOKEN: &str = "CREDITVISION_MODEL_TOKEN";
pub const ENV_MODEL_PATH: &str = "CREDITVISION_MODEL_PATH";
pub const ENV_TIMEOUT_SECS: &str = "CREDITVISION_TIMEOUT_SECS";

pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Where predictions come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelSource {
    /// A model service reached over HTTP.
    Remote { url: String, token: Option<String> },
    /// A scorecard artifact on disk.
    Artifact(PathBuf),
    /// The scorecard compiled into the binary.
    Bundled,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelSettings {
    pub source: ModelSource,
    pub timeout: Duration,
}

impl ModelSettings {
    /// Resolve settings from flags, falling back to the process environment.
    pub fn from_env(url: Option<String>, artifact: Option<PathBuf>) -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        Self::resolve(url, artifact, |key| std::env::var(key).ok())
    }

    /// Resolve settings with an explicit environment lookup.
    ///
    /// Precedence: URL (flag, then env) → artifact path (flag, then env) →
    /// bundled scorecard.
    pub fn resolve(
        url: Option<String>,
        artifact: Option<PathBuf>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, AppError> {
        let non_empty = |v: Option<String>| v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty());

        let timeout_secs = match non_empty(env(ENV_TIMEOUT_SECS)) {
            Some(raw) => raw
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or_else(|| AppError::model(format!("{ENV_TIMEOUT_SECS} must be a positive integer (got '{raw}').")))?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        let source = if let Some(url) = non_empty(url).or_else(|| non_empty(env(ENV_MODEL_URL))) {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(AppError::model(format!("Model URL must start with http:// or https:// (got '{url}').")));
            }
            ModelSource::Remote {
                url,
                token: non_empty(env(ENV_MODEL_TOKEN)),
            }
        } else if let Some(path) = artifact.or_else(|| non_empty(env(ENV_MODEL_PATH)).map(PathBuf::from)) {
            ModelSource::Artifact(path)
        } else {
            ModelSource::Bundled
        };

        Ok(Self {
            source,
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> + use<> {
        let map: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_to_bundled_scorecard() {
        let s = ModelSettings::resolve(None, None, env_of(&[])).unwrap();
        assert_eq!(s.source, ModelSource::Bundled);
        assert_eq!(s.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
    }

    #[test]
    fn flag_url_beats_env_and_artifact() {
        let env = env_of(&[(ENV_MODEL_URL, "http://env:8000/predict"), (ENV_MODEL_TOKEN, "t0k")]);
        let s = ModelSettings::resolve(
            Some("https://flag/predict".to_string()),
            Some(PathBuf::from("model.json")),
            env,
        )
        .unwrap();
        assert_eq!(
            s.source,
            ModelSource::Remote {
                url: "https://flag/predict".to_string(),
                token: Some("t0k".to_string()),
            }
        );
    }

    #[test]
    fn env_path_used_when_no_url() {
        let env = env_of(&[(ENV_MODEL_PATH, "/models/scorecard.json"), (ENV_MODEL_URL, "  ")]);
        let s = ModelSettings::resolve(None, None, env).unwrap();
        assert_eq!(s.source, ModelSource::Artifact(PathBuf::from("/models/scorecard.json")));
    }

    #[test]
    fn bad_timeout_and_url_are_rejected() {
        let err = ModelSettings::resolve(None, None, env_of(&[(ENV_TIMEOUT_SECS, "0")])).unwrap_err();
        assert_eq!(err.exit_code(), 3);
        assert!(ModelSettings::resolve(Some("ftp://x".to_string()), None, env_of(&[])).is_err());
    }
}
