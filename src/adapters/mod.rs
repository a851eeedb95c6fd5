//! Adapters layer: Concrete implementations of ports.
//!
//! - `artifacts`: loading the trained model files from disk
//! - `classifier` / `scaler`: fitted estimators behind the model ports
//! - `export`: writing the report download to a directory
//! - `redact`: clinical value filtering for logs

pub mod artifacts;
pub mod classifier;
pub mod export;
pub mod redact;
pub mod scaler;

pub use artifacts::{ArtifactError, ModelArtifacts};
pub use classifier::{ClassifierModel, KnnClassifier, KnnWeights, LogisticClassifier};
pub use export::{ExportError, FileReportExporter};
pub use scaler::StandardScaler;
