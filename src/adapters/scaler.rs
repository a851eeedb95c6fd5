//! Standard scaler adapter: per-feature centering and scaling.

use serde::{Deserialize, Serialize};

use crate::ports::{ensure_width, FeatureScaler, ModelError};

/// Fitted standard scaler parameters, as exported by the training pipeline.
///
/// `transform(x) = (x - mean) / scale`. Either part may be absent when the
/// scaler was fitted without centering or without scaling. A zero scale
/// entry (constant training feature) divides by 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    #[serde(default)]
    pub mean: Option<Vec<f64>>,
    #[serde(default)]
    pub scale: Option<Vec<f64>>,
    /// Feature count, required when neither `mean` nor `scale` is present.
    #[serde(default)]
    pub n_features: Option<usize>,
}

impl StandardScaler {
    /// Create a scaler with both centering and scaling.
    #[must_use]
    pub fn new(mean: Vec<f64>, scale: Vec<f64>) -> Self {
        Self {
            mean: Some(mean),
            scale: Some(scale),
            n_features: None,
        }
    }

    /// Check that the parameters describe a usable scaler.
    ///
    /// # Errors
    /// Returns `ModelError::InvalidParameters` on inconsistent lengths or
    /// non-finite values.
    pub fn validate(&self) -> Result<(), ModelError> {
        let width = self.width().ok_or_else(|| {
            ModelError::InvalidParameters(
                "scaler needs mean, scale, or n_features".to_string(),
            )
        })?;
        if width == 0 {
            return Err(ModelError::InvalidParameters(
                "scaler has zero features".to_string(),
            ));
        }

        for (name, part) in [("mean", &self.mean), ("scale", &self.scale)] {
            if let Some(values) = part {
                if values.len() != width {
                    return Err(ModelError::InvalidParameters(format!(
                        "scaler {name} has {} entries, expected {width}",
                        values.len()
                    )));
                }
                if values.iter().any(|v| !v.is_finite()) {
                    return Err(ModelError::InvalidParameters(format!(
                        "scaler {name} contains non-finite values"
                    )));
                }
            }
        }

        if let Some(n) = self.n_features {
            if n != width {
                return Err(ModelError::InvalidParameters(format!(
                    "scaler n_features is {n} but parameters have {width} entries"
                )));
            }
        }

        Ok(())
    }

    fn width(&self) -> Option<usize> {
        self.mean
            .as_ref()
            .map(Vec::len)
            .or_else(|| self.scale.as_ref().map(Vec::len))
            .or(self.n_features)
    }
}

impl FeatureScaler for StandardScaler {
    fn n_features(&self) -> usize {
        self.width().unwrap_or(0)
    }

    fn transform(&self, row: &[f64]) -> Result<Vec<f64>, ModelError> {
        ensure_width(row, self.n_features())?;

        let out = row
            .iter()
            .enumerate()
            .map(|(i, &x)| {
                let centered = match &self.mean {
                    Some(mean) => x - mean[i],
                    None => x,
                };
                match &self.scale {
                    Some(scale) if scale[i] != 0.0 => centered / scale[i],
                    _ => centered,
                }
            })
            .collect();

        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transform() {
        let scaler = StandardScaler::new(vec![10.0, 0.0], vec![2.0, 0.5]);
        let out = scaler.transform(&[14.0, 1.0]).expect("Should transform");
        assert_eq!(out, vec![2.0, 2.0]);
    }

    #[test]
    fn test_zero_scale_is_identity_scale() {
        let scaler = StandardScaler::new(vec![1.0], vec![0.0]);
        let out = scaler.transform(&[3.0]).expect("Should transform");
        assert_eq!(out, vec![2.0]);
    }

    #[test]
    fn test_without_mean() {
        let scaler = StandardScaler {
            mean: None,
            scale: Some(vec![4.0]),
            n_features: None,
        };
        assert!(scaler.validate().is_ok());
        assert_eq!(scaler.transform(&[8.0]).expect("Should transform"), vec![2.0]);
    }

    #[test]
    fn test_width_mismatch() {
        let scaler = StandardScaler::new(vec![0.0, 0.0], vec![1.0, 1.0]);
        let err = scaler.transform(&[1.0]).expect_err("must fail");
        assert_eq!(err, ModelError::ShapeMismatch { got: 1, expected: 2 });
    }

    #[test]
    fn test_validate_rejects_ragged_parameters() {
        let scaler = StandardScaler::new(vec![0.0, 0.0], vec![1.0]);
        assert!(scaler.validate().is_err());

        let empty = StandardScaler {
            mean: None,
            scale: None,
            n_features: None,
        };
        assert!(empty.validate().is_err());
    }

    #[test]
    fn test_deserialize_exported_json() {
        let json = r#"{"mean": [1.0, 2.0], "scale": [1.0, 4.0]}"#;
        let scaler: StandardScaler = serde_json::from_str(json).expect("Should parse");
        assert_eq!(scaler.n_features(), 2);
        assert!(scaler.validate().is_ok());
    }
}
