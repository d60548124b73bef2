//! # Pressura
//!
//! Terminal client for hypertension risk assessment.
//!
//! Patient vitals are entered locally, validated against clinical ranges,
//! and sent to a remote prediction service. The response is rendered as a
//! probability gauge, a risk category badge and a natural-language clinical
//! interpretation. No model inference and no patient data persistence happen
//! on this side of the HTTP boundary.
//!
//! ## Architecture
//!
//! The crate follows Hexagonal Architecture:
//! - `domain`: Core types (patient record, risk categories, interpretation)
//! - `ports`: Trait definitions for the prediction API boundary
//! - `adapters`: Concrete implementations (reqwest HTTP client, log sanitizer)
//! - `application`: Use cases orchestrating domain and ports
//! - `tui`: Terminal user interface

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod tui;

pub use domain::{PatientInput, PredictionResult, RiskCategory};

/// Result type for Pressura operations
pub type Result<T> = std::result::Result<T, PressuraError>;

/// Main error type for Pressura
#[derive(Debug, thiserror::Error)]
pub enum PressuraError {
    /// Patient data failed local validation; the request is never sent.
    #[error("dados do paciente inválidos: {0}")]
    Validation(domain::ValidationErrors),

    /// The prediction service rejected the request or could not be reached.
    #[error(transparent)]
    Api(#[from] ports::ApiError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<Vec<domain::FieldError>> for PressuraError {
    fn from(errors: Vec<domain::FieldError>) -> Self {
        Self::Validation(domain::ValidationErrors(errors))
    }
}
