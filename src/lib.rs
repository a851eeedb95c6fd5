//! # HeartGuard
//!
//! Heart-disease risk assessment form for the terminal.
//!
//! A clinician enters eleven cardiovascular measurements; a pre-trained
//! classifier turns them into a binary risk verdict, and a plain-text report
//! can be saved for the patient record. Nothing is persisted.
//!
//! ## Architecture
//!
//! The crate follows Hexagonal Architecture:
//! - `domain`: Observation, feature alignment, verdict and report types
//! - `ports`: Trait definitions for the model and the report download
//! - `adapters`: Concrete implementations (JSON artifacts, file export, log redaction)
//! - `application`: The assessment use case
//! - `tui`: Terminal user interface

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod tui;

pub use config::AppConfig;
pub use domain::{ClinicalObservation, PredictionResult, Report};

/// The only message shown when startup cannot load the model.
pub const MISSING_MODEL_MESSAGE: &str = "System Error: Model files are missing.";

/// Result type for HeartGuard operations
pub type Result<T> = std::result::Result<T, HeartGuardError>;

/// Main error type for HeartGuard
#[derive(Debug, thiserror::Error)]
pub enum HeartGuardError {
    #[error("Model artifacts unavailable: {0}")]
    Artifact(#[from] adapters::ArtifactError),

    #[error("Model evaluation failed: {0}")]
    Model(#[from] ports::ModelError),

    #[error("Report export failed: {0}")]
    Export(#[from] adapters::ExportError),

    #[error("Classifier returned label {0}, expected 0 or 1")]
    InvalidLabel(u8),
}
