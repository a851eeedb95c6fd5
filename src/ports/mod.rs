//! Ports layer: Trait definitions for external collaborators.
//!
//! The trained model artifacts and the report download are the only things
//! this crate talks to. These traits keep the application independent of the
//! artifact format and the download target.

mod model;
mod report_export;

pub use model::{ensure_width, Classifier, FeatureScaler, ModelError};
pub use report_export::ReportExporter;
