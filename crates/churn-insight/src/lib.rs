pub mod batch;
pub mod config;
pub mod error;
pub mod prediction;
pub mod scoring;
pub mod telemetry;
