//! Trip eco-efficiency scoring and behavioral profiling from UI telemetry.

pub mod behavior;
pub mod config;
pub mod error;
pub mod logging;
pub mod report;
pub mod scoring;
pub mod service;
pub mod stats;
pub mod store;
pub mod types;

pub use behavior::{analyze_telemetry, TelemetryAnalysis, TelemetryAnalyzer};
pub use error::{EcoError, Result};
pub use scoring::{score_trip, ScoreEngine};
