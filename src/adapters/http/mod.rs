//! HTTP adapter for the prediction service.
//!
//! Blocking reqwest client; requests run on the TUI's background worker
//! thread, so there is no async runtime in the process.

use reqwest::blocking::{Client, Response};
use reqwest::StatusCode;
use serde::Deserialize;

use crate::config::ApiConfig;
use crate::domain::{PatientInput, PredictionResult};
use crate::ports::{ApiError, HealthReport, PredictionApi};

/// Error body of a rejected request, per the service contract.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    detail: Option<String>,
}

/// Fallback for non-2xx responses without a usable `detail` field.
const GENERIC_REJECTION: &str = "Erro na API";

/// reqwest-backed implementation of [`PredictionApi`].
pub struct HttpPredictionApi {
    client: Client,
    config: ApiConfig,
}

impl HttpPredictionApi {
    /// Build the client with the configured per-request timeout.
    ///
    /// # Errors
    /// Returns [`ApiError::Network`] if the TLS backend cannot be initialized.
    pub fn new(config: ApiConfig) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Ok(Self { client, config })
    }

    /// The configuration this client was built with.
    #[must_use]
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    fn map_send_error(&self, e: reqwest::Error) -> ApiError {
        if e.is_timeout() {
            ApiError::Timeout(self.config.timeout)
        } else {
            ApiError::Network(e.to_string())
        }
    }

    fn rejection(status: StatusCode, response: Response) -> ApiError {
        let detail = response
            .json::<ErrorBody>()
            .ok()
            .and_then(|body| body.detail)
            .filter(|d| !d.is_empty())
            .unwrap_or_else(|| GENERIC_REJECTION.to_string());

        ApiError::Rejected {
            status: status.as_u16(),
            detail,
        }
    }
}

impl PredictionApi for HttpPredictionApi {
    fn predict(&self, input: &PatientInput) -> Result<PredictionResult, ApiError> {
        let url = self.config.predict_url();
        tracing::debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .header("Accept", "application/json")
            .json(input)
            .send()
            .map_err(|e| self.map_send_error(e))?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("Prediction rejected with status {}", status);
            return Err(Self::rejection(status, response));
        }

        response
            .json::<PredictionResult>()
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    fn health(&self) -> HealthReport {
        let url = self.config.health_url();
        tracing::debug!("GET {}", url);

        let response = match self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .send()
        {
            Ok(r) => r,
            Err(e) => return HealthReport::unhealthy(e.to_string()),
        };

        if !response.status().is_success() {
            return HealthReport::unhealthy("API not responding");
        }

        match response.json::<serde_json::Value>() {
            Ok(data) => HealthReport::healthy(data),
            Err(e) => HealthReport::unhealthy(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::time::Duration;

    /// Minimal one-shot HTTP server for exercising the adapter without
    /// external fixtures.
    fn serve_once(response: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").expect("Should bind");
        let addr = listener.local_addr().expect("Should have addr");
        std::thread::spawn(move || {
            if let Ok((mut stream, _)) = listener.accept() {
                let mut buf = [0_u8; 4096];
                let _ = stream.read(&mut buf);
                let _ = stream.write_all(response.as_bytes());
            }
        });
        format!("http://{addr}")
    }

    fn config(base: String) -> ApiConfig {
        ApiConfig {
            base_url: base,
            threshold_profile: "balanced".to_string(),
            timeout: Duration::from_secs(2),
        }
    }

    #[test]
    fn test_client_exposes_its_config() {
        let api = HttpPredictionApi::new(config("http://localhost:8000".to_string()))
            .expect("Should build");
        assert_eq!(api.config().base_url, "http://localhost:8000");
        assert_eq!(api.config().timeout, Duration::from_secs(2));
    }

    #[test]
    fn test_predict_parses_success_body() {
        let base = serve_once(
            "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: 56\r\n\r\n\
             {\"probability\": 0.42, \"prediction\": 0, \"threshold\": 0.5}",
        );
        let api = HttpPredictionApi::new(config(base)).expect("Should build");
        let result = api
            .predict(&PatientInput::sample_low())
            .expect("Should predict");
        assert!((result.probability - 0.42).abs() < f64::EPSILON);
    }

    #[test]
    fn test_rejection_surfaces_detail() {
        let base = serve_once(
            "HTTP/1.1 400 Bad Request\r\nContent-Type: application/json\r\nContent-Length: 33\r\n\r\n\
             {\"detail\":\"No features provided\"}",
        );
        let api = HttpPredictionApi::new(config(base)).expect("Should build");
        let err = api
            .predict(&PatientInput::sample_low())
            .expect_err("Should reject");
        match err {
            ApiError::Rejected { status, detail } => {
                assert_eq!(status, 400);
                assert_eq!(detail, "No features provided");
            }
            other => panic!("Expected Rejected, got {other:?}"),
        }
    }

    #[test]
    fn test_rejection_without_detail_uses_fallback() {
        let base = serve_once("HTTP/1.1 500 Internal Server Error\r\nContent-Length: 0\r\n\r\n");
        let api = HttpPredictionApi::new(config(base)).expect("Should build");
        let err = api
            .predict(&PatientInput::sample_low())
            .expect_err("Should reject");
        match err {
            ApiError::Rejected { status, detail } => {
                assert_eq!(status, 500);
                assert_eq!(detail, GENERIC_REJECTION);
            }
            other => panic!("Expected Rejected, got {other:?}"),
        }
    }

    #[test]
    fn test_unreachable_service_is_network_error() {
        // Port 1 on loopback: nothing listens there.
        let api = HttpPredictionApi::new(config("http://127.0.0.1:1".to_string()))
            .expect("Should build");
        let err = api
            .predict(&PatientInput::sample_low())
            .expect_err("Should fail");
        assert!(matches!(err, ApiError::Network(_) | ApiError::Timeout(_)));
    }

    #[test]
    fn test_health_failure_is_unhealthy_not_error() {
        let api = HttpPredictionApi::new(config("http://127.0.0.1:1".to_string()))
            .expect("Should build");
        let report = api.health();
        assert!(!report.is_healthy());
        assert!(report.message.is_some());
    }

    #[test]
    fn test_health_success_carries_body() {
        let base = serve_once(
            "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: 16\r\n\r\n\
             {\"status\": \"ok\"}",
        );
        let api = HttpPredictionApi::new(config(base)).expect("Should build");
        let report = api.health();
        assert!(report.is_healthy());
        assert_eq!(report.data.expect("Should have data")["status"], "ok");
    }
}
