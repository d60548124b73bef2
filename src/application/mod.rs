//! Application layer: Use cases and services.
//!
//! This module orchestrates domain logic with ports to implement
//! the core use cases of the application.

mod assessment;
mod presenter;

pub use assessment::{Assessment, AssessmentService};
pub use presenter::ResultPresentation;
