//! Assessment service: runs one observation through the loaded model.
//!
//! The pipeline is align → scale → classify → report. It holds the loaded
//! artifacts behind `Arc`s; they are shared read-only for the life of the
//! process and never reloaded.

use std::sync::Arc;

use crate::adapters::{ClassifierModel, ModelArtifacts, StandardScaler};
use crate::domain::{align_features, ClinicalObservation, ExpectedSchema, PredictionResult, Report};
use crate::ports::{Classifier, FeatureScaler, ModelError};
use crate::HeartGuardError;

/// Outcome of one submission.
#[derive(Debug, Clone, PartialEq)]
pub struct Assessment {
    pub prediction: PredictionResult,
    pub report: Report,
}

impl Assessment {
    /// The observation that was assessed.
    #[must_use]
    pub fn observation(&self) -> &ClinicalObservation {
        &self.report.observation
    }
}

/// Service that turns clinical observations into risk verdicts.
pub struct AssessmentService<C, S>
where
    C: Classifier,
    S: FeatureScaler,
{
    classifier: Arc<C>,
    scaler: Arc<S>,
    schema: Arc<ExpectedSchema>,
}

impl<C, S> Clone for AssessmentService<C, S>
where
    C: Classifier,
    S: FeatureScaler,
{
    fn clone(&self) -> Self {
        Self {
            classifier: Arc::clone(&self.classifier),
            scaler: Arc::clone(&self.scaler),
            schema: Arc::clone(&self.schema),
        }
    }
}

impl AssessmentService<ClassifierModel, StandardScaler> {
    /// Build the service from artifacts loaded at startup.
    #[must_use]
    pub fn from_artifacts(artifacts: ModelArtifacts) -> Self {
        let ModelArtifacts {
            classifier,
            scaler,
            schema,
        } = artifacts;
        Self {
            classifier: Arc::new(classifier),
            scaler: Arc::new(scaler),
            schema: Arc::new(schema),
        }
    }
}

impl<C, S> AssessmentService<C, S>
where
    C: Classifier,
    S: FeatureScaler,
{
    /// Create a service over arbitrary model implementations.
    ///
    /// # Errors
    /// Returns `ModelError::ShapeMismatch` if the scaler or classifier was
    /// fitted on a different width than the schema.
    pub fn new(
        classifier: Arc<C>,
        scaler: Arc<S>,
        schema: Arc<ExpectedSchema>,
    ) -> Result<Self, ModelError> {
        for expected in [scaler.n_features(), classifier.n_features()] {
            if expected != schema.len() {
                return Err(ModelError::ShapeMismatch {
                    got: schema.len(),
                    expected,
                });
            }
        }

        Ok(Self {
            classifier,
            scaler,
            schema,
        })
    }

    /// Predict the risk class for one observation.
    ///
    /// # Errors
    /// Returns `HeartGuardError::Model` on a width mismatch and
    /// `HeartGuardError::InvalidLabel` if the classifier answers with
    /// anything but 0 or 1.
    pub fn predict(&self, observation: &ClinicalObservation) -> Result<PredictionResult, HeartGuardError> {
        let row = align_features(observation, &self.schema);
        let scaled = self.scaler.transform(row.values())?;
        let label = self.classifier.predict(&scaled)?;
        PredictionResult::from_label(label).map_err(HeartGuardError::InvalidLabel)
    }

    /// Predict and build the report for one observation.
    ///
    /// # Errors
    /// See [`AssessmentService::predict`].
    pub fn assess(&self, observation: &ClinicalObservation) -> Result<Assessment, HeartGuardError> {
        let prediction = self.predict(observation)?;
        tracing::info!("Assessment completed");

        Ok(Assessment {
            prediction,
            report: Report::new(observation.clone(), prediction),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::LogisticClassifier;
    use crate::domain::{ChestPainType, ExerciseAngina, StSlope};
    use std::path::Path;

    fn schema() -> ExpectedSchema {
        ExpectedSchema::new(vec![
            "Age".into(),
            "Cholesterol".into(),
            "ExerciseAngina_Y".into(),
        ])
        .expect("valid schema")
    }

    /// High risk exactly when exercise angina is present.
    fn angina_service() -> AssessmentService<ClassifierModel, StandardScaler> {
        let classifier = ClassifierModel::Logistic(LogisticClassifier {
            coefficients: vec![0.0, 0.0, 1.0],
            intercept: -0.5,
        });
        let scaler = StandardScaler::new(vec![50.0, 200.0, 0.0], vec![10.0, 50.0, 1.0]);
        let artifacts =
            ModelArtifacts::from_parts(classifier, scaler, schema()).expect("Should assemble");
        AssessmentService::from_artifacts(artifacts)
    }

    struct FixedLabel(u8);

    impl Classifier for FixedLabel {
        fn n_features(&self) -> usize {
            3
        }

        fn predict(&self, _row: &[f64]) -> Result<u8, ModelError> {
            Ok(self.0)
        }
    }

    #[test]
    fn test_assess_high_and_low() {
        let service = angina_service();

        let high = service
            .assess(&ClinicalObservation::default())
            .expect("Should assess");
        assert_eq!(high.prediction, PredictionResult::HighRisk);
        assert!(high.report.render().contains("[HIGH RISK]"));

        let obs = ClinicalObservation {
            exercise_angina: ExerciseAngina::No,
            ..ClinicalObservation::default()
        };
        let low = service.assess(&obs).expect("Should assess");
        assert_eq!(low.prediction, PredictionResult::LowRisk);
        assert_eq!(low.observation(), &obs);
    }

    #[test]
    fn test_prediction_is_deterministic() {
        let service = angina_service();
        let obs = ClinicalObservation::default();

        let first = service.predict(&obs).expect("Should predict");
        for _ in 0..10 {
            assert_eq!(service.predict(&obs).expect("Should predict"), first);
        }
    }

    #[test]
    fn test_invalid_label_is_error() {
        let service = AssessmentService::new(
            Arc::new(FixedLabel(2)),
            Arc::new(StandardScaler::new(vec![0.0; 3], vec![1.0; 3])),
            Arc::new(schema()),
        )
        .expect("Should build");

        let err = service
            .predict(&ClinicalObservation::default())
            .expect_err("must fail");
        assert!(matches!(err, HeartGuardError::InvalidLabel(2)));
    }

    #[test]
    fn test_new_rejects_width_mismatch() {
        let result = AssessmentService::new(
            Arc::new(FixedLabel(0)),
            Arc::new(StandardScaler::new(vec![0.0; 2], vec![1.0; 2])),
            Arc::new(schema()),
        );
        assert!(matches!(
            result,
            Err(ModelError::ShapeMismatch { got: 3, expected: 2 })
        ));
    }

    #[test]
    fn test_shipped_demo_models() {
        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("models");
        let artifacts = ModelArtifacts::load(&dir).expect("Should load shipped models");
        assert_eq!(artifacts.schema.len(), 15);
        let service = AssessmentService::from_artifacts(artifacts);

        let low = service
            .predict(&ClinicalObservation::default())
            .expect("Should predict");
        assert_eq!(low, PredictionResult::LowRisk);

        let obs = ClinicalObservation {
            age: 65,
            resting_bp: 150,
            cholesterol: 260,
            fasting_bs: true,
            max_hr: 110,
            oldpeak: 2.5,
            chest_pain_type: ChestPainType::Asymptomatic,
            exercise_angina: ExerciseAngina::Yes,
            st_slope: StSlope::Flat,
            ..ClinicalObservation::default()
        };
        assert_eq!(service.predict(&obs).expect("Should predict"), PredictionResult::HighRisk);
    }
}
