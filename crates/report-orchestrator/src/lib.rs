//! Report orchestration
//!
//! Fetches records from the injected stores, assembles report documents, hands
//! them to a renderer and records maintenance events with their cached-ROI
//! side effect.

pub mod config;
pub mod maintenance;
pub mod renderer;
pub mod service;

pub use config::ReportConfig;
pub use maintenance::MaintenanceOutcome;
pub use renderer::{JsonFileRenderer, ReportRenderer};
pub use service::{ReportHandle, ReportService};
