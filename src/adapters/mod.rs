//! Adapters layer: Concrete implementations of ports.
//!
//! These modules contain the actual integration with external systems:
//! - `http`: reqwest-based client for the prediction service
//! - `sanitize`: PII filtering for logs

pub mod http;
pub mod sanitize;

pub use http::HttpPredictionApi;
