//! Artifact loader: reads the trained classifier, the fitted scaler and the
//! expected column schema from a model directory.
//!
//! # Format
//!
//! All three artifacts are JSON exported by the training pipeline:
//! - `KNN_heart.json`: classifier, tagged by `"kind"` (`knn` or `logistic`)
//! - `scaler.json`: standard scaler (`mean`, `scale`)
//! - `columns.json`: ordered array of column names
//!
//! # Integrity
//!
//! If `manifest.json` is present it must list the SHA-256 of each artifact,
//! and every listed digest must match. Without a manifest the artifacts are
//! loaded as-is.
//!
//! Loading is all-or-nothing: any missing, corrupt or inconsistent artifact
//! fails the whole load.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use sha2::{Digest, Sha256};

use crate::adapters::classifier::ClassifierModel;
use crate::adapters::scaler::StandardScaler;
use crate::domain::ExpectedSchema;
use crate::ports::{Classifier, FeatureScaler};

/// Classifier artifact file name.
pub const CLASSIFIER_FILE: &str = "KNN_heart.json";

/// Scaler artifact file name.
pub const SCALER_FILE: &str = "scaler.json";

/// Expected column schema file name.
pub const COLUMNS_FILE: &str = "columns.json";

/// Optional integrity manifest file name.
pub const MANIFEST_FILE: &str = "manifest.json";

const ARTIFACT_FILES: [&str; 3] = [CLASSIFIER_FILE, SCALER_FILE, COLUMNS_FILE];

/// Error type for artifact loading.
#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("Model directory not found: {0:?}")]
    DirectoryMissing(PathBuf),

    #[error("Artifact missing or unreadable at {path:?}: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Artifact {file} failed to deserialize: {source}")]
    Malformed {
        file: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("Artifact {file} is invalid: {reason}")]
    Invalid { file: &'static str, reason: String },

    #[error("Artifact shapes disagree: {0}")]
    ShapeMismatch(String),

    #[error("Integrity check failed: {0}")]
    Integrity(String),
}

#[derive(Debug, Deserialize)]
struct ArtifactManifest {
    files: BTreeMap<String, String>,
}

/// The three loaded artifacts.
///
/// Built once at startup and only read afterwards.
#[derive(Debug, Clone)]
pub struct ModelArtifacts {
    pub classifier: ClassifierModel,
    pub scaler: StandardScaler,
    pub schema: ExpectedSchema,
}

impl ModelArtifacts {
    /// Load all artifacts from `model_dir`.
    ///
    /// # Errors
    /// Returns the first failure; nothing is partially loaded.
    pub fn load(model_dir: &Path) -> Result<Self, ArtifactError> {
        if !model_dir.is_dir() {
            return Err(ArtifactError::DirectoryMissing(model_dir.to_path_buf()));
        }

        let [classifier_bytes, scaler_bytes, columns_bytes] =
            ARTIFACT_FILES.map(|file| read_artifact(&model_dir.join(file)));
        let classifier_bytes = classifier_bytes?;
        let scaler_bytes = scaler_bytes?;
        let columns_bytes = columns_bytes?;

        verify_manifest(
            model_dir,
            &[
                (CLASSIFIER_FILE, classifier_bytes.as_slice()),
                (SCALER_FILE, scaler_bytes.as_slice()),
                (COLUMNS_FILE, columns_bytes.as_slice()),
            ],
        )?;

        let classifier: ClassifierModel = parse(CLASSIFIER_FILE, &classifier_bytes)?;
        let scaler: StandardScaler = parse(SCALER_FILE, &scaler_bytes)?;
        let columns: Vec<String> = parse(COLUMNS_FILE, &columns_bytes)?;

        classifier.validate().map_err(|e| ArtifactError::Invalid {
            file: CLASSIFIER_FILE,
            reason: e.to_string(),
        })?;
        scaler.validate().map_err(|e| ArtifactError::Invalid {
            file: SCALER_FILE,
            reason: e.to_string(),
        })?;
        let schema = ExpectedSchema::new(columns).map_err(|reason| ArtifactError::Invalid {
            file: COLUMNS_FILE,
            reason,
        })?;

        let artifacts = Self::from_parts(classifier, scaler, schema)?;

        tracing::info!(
            "Loaded model artifacts from {:?} (classifier={}, n_features={})",
            model_dir,
            artifacts.classifier.kind(),
            artifacts.schema.len()
        );

        Ok(artifacts)
    }

    /// Assemble artifacts that were built in memory.
    ///
    /// # Errors
    /// Returns `ArtifactError::ShapeMismatch` if the scaler or classifier
    /// width differs from the schema.
    pub fn from_parts(
        classifier: ClassifierModel,
        scaler: StandardScaler,
        schema: ExpectedSchema,
    ) -> Result<Self, ArtifactError> {
        let width = schema.len();
        if scaler.n_features() != width {
            return Err(ArtifactError::ShapeMismatch(format!(
                "scaler expects {} features, schema has {width}",
                scaler.n_features()
            )));
        }
        if classifier.n_features() != width {
            return Err(ArtifactError::ShapeMismatch(format!(
                "classifier expects {} features, schema has {width}",
                classifier.n_features()
            )));
        }

        Ok(Self {
            classifier,
            scaler,
            schema,
        })
    }
}

fn read_artifact(path: &Path) -> Result<Vec<u8>, ArtifactError> {
    fs::read(path).map_err(|source| ArtifactError::Unreadable {
        path: path.to_path_buf(),
        source,
    })
}

fn parse<T: serde::de::DeserializeOwned>(
    file: &'static str,
    bytes: &[u8],
) -> Result<T, ArtifactError> {
    serde_json::from_slice(bytes).map_err(|source| ArtifactError::Malformed { file, source })
}

fn sha256_hex(bytes: &[u8]) -> String {
    Sha256::digest(bytes)
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect()
}

fn verify_manifest(model_dir: &Path, artifacts: &[(&str, &[u8])]) -> Result<(), ArtifactError> {
    let manifest_path = model_dir.join(MANIFEST_FILE);
    if !manifest_path.exists() {
        tracing::info!("No {MANIFEST_FILE} in model directory, skipping integrity check");
        return Ok(());
    }

    let bytes = read_artifact(&manifest_path)?;
    let manifest: ArtifactManifest = serde_json::from_slice(&bytes)
        .map_err(|e| ArtifactError::Integrity(format!("invalid {MANIFEST_FILE}: {e}")))?;

    for (file, contents) in artifacts {
        let expected = manifest.files.get(*file).ok_or_else(|| {
            ArtifactError::Integrity(format!("{MANIFEST_FILE} does not list {file}"))
        })?;
        if !sha256_hex(contents).eq_ignore_ascii_case(expected.trim()) {
            return Err(ArtifactError::Integrity(format!("digest mismatch for {file}")));
        }
    }

    tracing::info!("Artifact digests verified against {MANIFEST_FILE}");
    Ok(())
}
