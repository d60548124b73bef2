//! TUI module: Terminal User Interface using Ratatui.
//!
//! Provides a medical-themed interface for:
//! - Dashboard with service health and session summary
//! - Patient data entry with per-field validation flags
//! - Risk assessment result rendering

mod app;
mod styles;
mod ui;
mod worker;

pub use app::App;
pub use styles::Theme;
pub use worker::{
    HealthProbe, HealthProbeHandle, RequestProgress, RequestWorker, RequestWorkerHandle,
};
