//! Domain layer: Core business types and logic.
//!
//! This module contains pure Rust types with no I/O.
//! All types are serializable and implement strict validation.

mod interpretation;
mod patient;
mod risk;

pub use interpretation::{interpret, risk_factors};
pub use patient::{FieldError, FieldSpec, PatientInput, ValidationErrors, FIELD_SPECS};
pub use risk::{PredictionResult, RiskCategory};
