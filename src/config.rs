//! Runtime configuration for the prediction API client.

use std::time::Duration;

/// Default deployment of the prediction service.
const DEFAULT_API_BASE: &str = "https://yrac79mzj9.execute-api.sa-east-1.amazonaws.com";

/// Named operating point selecting the binary classification cutoff.
const DEFAULT_THRESHOLD_PROFILE: &str = "balanced";

const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Configuration for the remote prediction API.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL of the service, without a trailing slash.
    pub base_url: String,

    /// Threshold profile passed as the `threshold_key` query parameter.
    pub threshold_profile: String,

    /// Per-request timeout. Expiry is surfaced as a distinct timeout error.
    pub timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE.to_string(),
            threshold_profile: DEFAULT_THRESHOLD_PROFILE.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl ApiConfig {
    /// Build the configuration from the environment, falling back to the
    /// default deployment.
    ///
    /// Recognized variables: `PRESSURA_API_BASE`, `PRESSURA_THRESHOLD_PROFILE`,
    /// `PRESSURA_TIMEOUT_SECS`.
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(base) = std::env::var("PRESSURA_API_BASE") {
            if !base.is_empty() {
                config.base_url = base.trim_end_matches('/').to_string();
            }
        }
        if let Ok(profile) = std::env::var("PRESSURA_THRESHOLD_PROFILE") {
            if !profile.is_empty() {
                config.threshold_profile = profile;
            }
        }
        if let Some(secs) = std::env::var("PRESSURA_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .filter(|&v| v > 0)
        {
            config.timeout = Duration::from_secs(secs);
        }

        config
    }

    /// Full URL of the prediction endpoint, including the threshold profile.
    #[must_use]
    pub fn predict_url(&self) -> String {
        format!(
            "{}/predict?threshold_key={}",
            self.base_url, self.threshold_profile
        )
    }

    /// Full URL of the health endpoint.
    #[must_use]
    pub fn health_url(&self) -> String {
        format!("{}/health", self.base_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_predict_url_includes_threshold_profile() {
        let config = ApiConfig {
            base_url: "http://localhost:8000".to_string(),
            threshold_profile: "screening".to_string(),
            timeout: Duration::from_secs(5),
        };
        assert_eq!(
            config.predict_url(),
            "http://localhost:8000/predict?threshold_key=screening"
        );
        assert_eq!(config.health_url(), "http://localhost:8000/health");
    }

    #[test]
    fn test_default_profile_is_balanced() {
        let config = ApiConfig::default();
        assert_eq!(config.threshold_profile, "balanced");
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert!(config.predict_url().ends_with("/predict?threshold_key=balanced"));
    }
}
