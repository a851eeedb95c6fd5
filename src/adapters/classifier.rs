//! Classifier adapters: k-nearest-neighbours and logistic models.
//!
//! Parameters are exported by the training pipeline as JSON, tagged by
//! `"kind"`. Both models operate on rows that were already scaled.

use serde::{Deserialize, Serialize};

use crate::ports::{ensure_width, Classifier, ModelError};

fn default_n_neighbors() -> usize {
    5
}

fn default_p() -> f64 {
    2.0
}

/// Neighbour vote weighting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KnnWeights {
    /// Every neighbour counts once.
    #[default]
    Uniform,
    /// Neighbours count by inverse distance.
    Distance,
}

/// k-nearest-neighbours classifier over stored training rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnnClassifier {
    #[serde(default = "default_n_neighbors")]
    pub n_neighbors: usize,
    #[serde(default)]
    pub weights: KnnWeights,
    /// Minkowski power (2 = Euclidean, 1 = Manhattan).
    #[serde(default = "default_p")]
    pub p: f64,
    /// Training rows in scaled feature space.
    pub samples: Vec<Vec<f64>>,
    /// Label of each training row.
    pub labels: Vec<u8>,
}

impl KnnClassifier {
    /// Check that the parameters describe a usable model.
    ///
    /// # Errors
    /// Returns `ModelError::InvalidParameters` describing the first problem.
    pub fn validate(&self) -> Result<(), ModelError> {
        let invalid = |msg: String| -> Result<(), ModelError> {
            Err(ModelError::InvalidParameters(msg))
        };

        if self.samples.is_empty() {
            return invalid("knn model has no training samples".into());
        }
        if self.samples.len() != self.labels.len() {
            return invalid(format!(
                "knn model has {} samples but {} labels",
                self.samples.len(),
                self.labels.len()
            ));
        }
        if self.n_neighbors == 0 || self.n_neighbors > self.samples.len() {
            return invalid(format!(
                "n_neighbors must be in 1..={}, got {}",
                self.samples.len(),
                self.n_neighbors
            ));
        }
        if !(self.p >= 1.0 && self.p.is_finite()) {
            return invalid(format!("Minkowski p must be >= 1, got {}", self.p));
        }
        if let Some(label) = self.labels.iter().find(|l| **l > 1) {
            return invalid(format!("labels must be 0 or 1, found {label}"));
        }

        let width = self.samples[0].len();
        if width == 0 {
            return invalid("knn samples have zero features".into());
        }
        if self.samples.iter().any(|s| s.len() != width) {
            return invalid("knn samples have inconsistent widths".into());
        }
        if self.samples.iter().flatten().any(|v| !v.is_finite()) {
            return invalid("knn samples contain non-finite values".into());
        }

        Ok(())
    }

    fn distance(&self, a: &[f64], b: &[f64]) -> f64 {
        if self.p == 2.0 {
            a.iter()
                .zip(b)
                .map(|(x, y)| (x - y) * (x - y))
                .sum::<f64>()
                .sqrt()
        } else {
            a.iter()
                .zip(b)
                .map(|(x, y)| (x - y).abs().powf(self.p))
                .sum::<f64>()
                .powf(1.0 / self.p)
        }
    }
}

impl Classifier for KnnClassifier {
    fn n_features(&self) -> usize {
        self.samples.first().map_or(0, Vec::len)
    }

    fn predict(&self, row: &[f64]) -> Result<u8, ModelError> {
        ensure_width(row, self.n_features())?;

        let mut neighbours: Vec<(f64, usize)> = self
            .samples
            .iter()
            .enumerate()
            .map(|(i, sample)| (self.distance(row, sample), i))
            .collect();
        // Equal distances keep training order.
        neighbours.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
        neighbours.truncate(self.n_neighbors);

        let mut votes = [0.0_f64; 2];
        match self.weights {
            KnnWeights::Uniform => {
                for &(_, i) in &neighbours {
                    votes[usize::from(self.labels[i])] += 1.0;
                }
            }
            KnnWeights::Distance => {
                let exact: Vec<usize> = neighbours
                    .iter()
                    .filter(|(d, _)| *d == 0.0)
                    .map(|&(_, i)| i)
                    .collect();
                if exact.is_empty() {
                    for &(d, i) in &neighbours {
                        votes[usize::from(self.labels[i])] += 1.0 / d;
                    }
                } else {
                    for i in exact {
                        votes[usize::from(self.labels[i])] += 1.0;
                    }
                }
            }
        }

        // Ties go to the smaller label.
        Ok(u8::from(votes[1] > votes[0]))
    }
}

/// Linear logistic classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticClassifier {
    pub coefficients: Vec<f64>,
    pub intercept: f64,
}

impl LogisticClassifier {
    /// Check that the parameters describe a usable model.
    ///
    /// # Errors
    /// Returns `ModelError::InvalidParameters` describing the problem.
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.coefficients.is_empty() {
            return Err(ModelError::InvalidParameters(
                "logistic model has no coefficients".into(),
            ));
        }
        if !self.intercept.is_finite() || self.coefficients.iter().any(|c| !c.is_finite()) {
            return Err(ModelError::InvalidParameters(
                "logistic model contains non-finite parameters".into(),
            ));
        }
        Ok(())
    }

    fn decision(&self, row: &[f64]) -> f64 {
        self.intercept
            + self
                .coefficients
                .iter()
                .zip(row)
                .map(|(c, x)| c * x)
                .sum::<f64>()
    }
}

impl Classifier for LogisticClassifier {
    fn n_features(&self) -> usize {
        self.coefficients.len()
    }

    fn predict(&self, row: &[f64]) -> Result<u8, ModelError> {
        ensure_width(row, self.n_features())?;
        Ok(u8::from(self.decision(row) > 0.0))
    }
}

/// Any supported classifier artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ClassifierModel {
    Knn(KnnClassifier),
    Logistic(LogisticClassifier),
}

impl ClassifierModel {
    /// Validate the wrapped model.
    ///
    /// # Errors
    /// Returns `ModelError::InvalidParameters` if the model is unusable.
    pub fn validate(&self) -> Result<(), ModelError> {
        match self {
            Self::Knn(m) => m.validate(),
            Self::Logistic(m) => m.validate(),
        }
    }

    /// Short name for logging.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Knn(_) => "knn",
            Self::Logistic(_) => "logistic",
        }
    }
}

impl Classifier for ClassifierModel {
    fn n_features(&self) -> usize {
        match self {
            Self::Knn(m) => m.n_features(),
            Self::Logistic(m) => m.n_features(),
        }
    }

    fn predict(&self, row: &[f64]) -> Result<u8, ModelError> {
        match self {
            Self::Knn(m) => m.predict(row),
            Self::Logistic(m) => m.predict(row),
        }
    }
}
