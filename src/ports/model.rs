//! Model ports: Traits for the pre-trained scaler and classifier.
//!
//! Both are deterministic, single-row, and fixed-width. How they were
//! trained is outside this crate.

/// Errors raised by scaler or classifier evaluation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ModelError {
    #[error("Feature width mismatch: got {got}, expected {expected}")]
    ShapeMismatch { got: usize, expected: usize },

    #[error("Invalid model parameters: {0}")]
    InvalidParameters(String),
}

/// Check a row width against what a model expects.
///
/// # Errors
/// Returns `ModelError::ShapeMismatch` if the widths differ.
pub fn ensure_width(row: &[f64], expected: usize) -> Result<(), ModelError> {
    if row.len() == expected {
        Ok(())
    } else {
        Err(ModelError::ShapeMismatch {
            got: row.len(),
            expected,
        })
    }
}

/// A fitted per-feature transform applied before classification.
pub trait FeatureScaler: Send + Sync {
    /// Number of features the scaler was fitted on.
    fn n_features(&self) -> usize;

    /// Transform one row, preserving its width.
    ///
    /// # Errors
    /// Returns `ModelError::ShapeMismatch` if the row width is wrong.
    fn transform(&self, row: &[f64]) -> Result<Vec<f64>, ModelError>;
}

/// A trained binary classifier.
pub trait Classifier: Send + Sync {
    /// Number of features the classifier was trained on.
    fn n_features(&self) -> usize;

    /// Predict the label (0 or 1) of one scaled row.
    ///
    /// # Errors
    /// Returns `ModelError::ShapeMismatch` if the row width is wrong.
    fn predict(&self, row: &[f64]) -> Result<u8, ModelError>;
}
