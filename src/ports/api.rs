//! Prediction API port: Trait for the remote inference service.
//!
//! This trait abstracts the HTTP client from the application logic.

use std::time::Duration;

use crate::domain::{PatientInput, PredictionResult};

/// Errors at the prediction service boundary.
///
/// Timeouts are a distinct kind: the UI must not conflate an expired
/// request with a generic network failure.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ApiError {
    /// The request did not complete within the configured timeout.
    #[error("a requisição expirou após {}s; tente novamente", .0.as_secs())]
    Timeout(Duration),

    /// The service answered with a non-2xx status. `detail` carries the
    /// response body's message verbatim when present.
    #[error("{detail}")]
    Rejected { status: u16, detail: String },

    /// The request could not be sent or the connection failed.
    #[error("falha de rede: {0}")]
    Network(String),

    /// The service answered 2xx but the body was not a valid result.
    #[error("resposta inválida da API: {0}")]
    Decode(String),
}

/// Health probe outcome. Never an error: failures are reported as an
/// unhealthy status with a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
}

/// Result of a health check against the service.
#[derive(Debug, Clone)]
pub struct HealthReport {
    pub status: HealthStatus,
    /// Failure description, for unhealthy reports.
    pub message: Option<String>,
    /// Response body, for healthy reports.
    pub data: Option<serde_json::Value>,
}

impl HealthReport {
    #[must_use]
    pub fn healthy(data: serde_json::Value) -> Self {
        Self {
            status: HealthStatus::Healthy,
            message: None,
            data: Some(data),
        }
    }

    #[must_use]
    pub fn unhealthy(message: impl Into<String>) -> Self {
        Self {
            status: HealthStatus::Unhealthy,
            message: Some(message.into()),
            data: None,
        }
    }

    #[must_use]
    pub fn is_healthy(&self) -> bool {
        self.status == HealthStatus::Healthy
    }
}

/// Trait for the remote prediction service.
pub trait PredictionApi: Send + Sync {
    /// Request a prediction for a validated patient record.
    ///
    /// # Errors
    /// Returns [`ApiError`] on timeout, rejection, network failure or a
    /// malformed response body.
    fn predict(&self, input: &PatientInput) -> Result<PredictionResult, ApiError>;

    /// Probe the service's health endpoint.
    ///
    /// Infallible by contract: any failure becomes an unhealthy report.
    fn health(&self) -> HealthReport;
}
