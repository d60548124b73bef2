//! Assessment service: Orchestrates one risk assessment.
//!
//! This service coordinates:
//! - Normalization (smoker invariant)
//! - Range validation (collect-all, never sent to the network on failure)
//! - The prediction request
//! - Presentation of the response

use std::sync::Arc;

use crate::application::ResultPresentation;
use crate::domain::{PatientInput, PredictionResult};
use crate::ports::{HealthReport, PredictionApi};
use crate::PressuraError;

/// One completed risk assessment.
///
/// Ephemeral: lives for the current session only, replaced on the next
/// submission, never persisted.
#[derive(Debug, Clone)]
pub struct Assessment {
    /// The normalized record that was submitted.
    pub input: PatientInput,
    /// Raw service response.
    pub result: PredictionResult,
    /// Display-ready view of the response.
    pub presentation: ResultPresentation,
    /// When the response arrived.
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Service for running risk assessments against the prediction API.
pub struct AssessmentService<C>
where
    C: PredictionApi,
{
    api: Arc<C>,
}

impl<C> AssessmentService<C>
where
    C: PredictionApi,
{
    /// Create a new assessment service.
    pub fn new(api: Arc<C>) -> Self {
        Self { api }
    }

    /// Run the full assessment pipeline for one patient record.
    ///
    /// Validation failures reject the submission locally; the request is
    /// never sent in that case.
    ///
    /// # Errors
    /// Returns [`PressuraError::Validation`] with every offending field, or
    /// [`PressuraError::Api`] if the request fails.
    pub fn assess(&self, input: PatientInput) -> Result<Assessment, PressuraError> {
        let input = input.normalized();
        input.validate().map_err(PressuraError::from)?;

        tracing::info!("Submitting prediction request...");
        let result = self.api.predict(&input)?;

        let presentation = ResultPresentation::new(&result, &input);
        tracing::info!(
            "Prediction complete: prediction={}, probability={}, risk={}",
            result.prediction,
            presentation.probability_display,
            presentation.category
        );

        Ok(Assessment {
            input,
            result,
            presentation,
            created_at: chrono::Utc::now(),
        })
    }

    /// Probe the service's health endpoint. Never fails; degraded service
    /// is reported as an unhealthy status.
    #[must_use]
    pub fn check_health(&self) -> HealthReport {
        let report = self.api.health();
        if report.is_healthy() {
            tracing::debug!("Health check: healthy");
        } else {
            tracing::warn!(
                "Health check: unhealthy ({})",
                report.message.as_deref().unwrap_or("no message")
            );
        }
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::ApiError;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    /// Scripted API double: fixed response, counts calls.
    struct MockApi {
        response: Result<PredictionResult, ApiError>,
        calls: AtomicUsize,
    }

    impl MockApi {
        fn returning(response: Result<PredictionResult, ApiError>) -> Arc<Self> {
            Arc::new(Self {
                response,
                calls: AtomicUsize::new(0),
            })
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl PredictionApi for MockApi {
        fn predict(&self, _input: &PatientInput) -> Result<PredictionResult, ApiError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.response.clone()
        }

        fn health(&self) -> HealthReport {
            HealthReport::healthy(serde_json::json!({"status": "ok"}))
        }
    }

    fn ok_response(probability: f64, prediction: u8) -> Result<PredictionResult, ApiError> {
        Ok(PredictionResult {
            probability,
            prediction,
            threshold: Some(0.5),
            threshold_profile: Some("balanced".to_string()),
            ..Default::default()
        })
    }

    #[test]
    fn test_assess_happy_path() {
        let api = MockApi::returning(ok_response(0.73, 1));
        let service = AssessmentService::new(api.clone());

        let assessment = service
            .assess(PatientInput::sample_high())
            .expect("Should assess");

        assert_eq!(api.call_count(), 1);
        assert_eq!(assessment.presentation.probability_display, "73.0%");
        assert_eq!(assessment.presentation.prediction_label, "Positivo (1)");
        assert!(assessment
            .presentation
            .interpretation
            .contains("Fatores de risco identificados"));
    }

    #[test]
    fn test_invalid_input_never_reaches_network() {
        let api = MockApi::returning(ok_response(0.5, 0));
        let service = AssessmentService::new(api.clone());

        let mut input = PatientInput::sample_low();
        input.idade = 150;

        let err = service.assess(input).expect_err("Should reject");
        match err {
            PressuraError::Validation(errors) => {
                assert_eq!(errors.0.len(), 1);
                assert_eq!(errors.0[0].field, "idade");
                assert!(errors.0[0].message.contains("100"));
            }
            other => panic!("Expected Validation, got {other:?}"),
        }
        assert_eq!(api.call_count(), 0);
    }

    #[test]
    fn test_assess_normalizes_before_validation() {
        let api = MockApi::returning(ok_response(0.2, 0));
        let service = AssessmentService::new(api);

        // Inconsistent on entry: non-smoker with a cigarette count.
        let mut input = PatientInput::sample_medium();
        input.fumante_atualmente = 0;
        input.cigarros_por_dia = 20;

        let assessment = service.assess(input).expect("Should assess");
        assert_eq!(assessment.input.cigarros_por_dia, 0);
    }

    #[test]
    fn test_timeout_is_surfaced_distinctly() {
        let api = MockApi::returning(Err(ApiError::Timeout(Duration::from_secs(10))));
        let service = AssessmentService::new(api);

        let err = service
            .assess(PatientInput::sample_medium())
            .expect_err("Should time out");
        match err {
            PressuraError::Api(ApiError::Timeout(d)) => {
                assert_eq!(d, Duration::from_secs(10));
            }
            other => panic!("Expected Timeout, got {other:?}"),
        }
    }

    #[test]
    fn test_rejection_detail_propagates() {
        let api = MockApi::returning(Err(ApiError::Rejected {
            status: 400,
            detail: "No features provided".to_string(),
        }));
        let service = AssessmentService::new(api);

        let err = service
            .assess(PatientInput::sample_medium())
            .expect_err("Should reject");
        assert!(err.to_string().contains("No features provided"));
    }

    #[test]
    fn test_health_passthrough() {
        let api = MockApi::returning(ok_response(0.5, 0));
        let service = AssessmentService::new(api);
        assert!(service.check_health().is_healthy());
    }
}
