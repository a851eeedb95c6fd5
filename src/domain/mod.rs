//! Domain layer: Core clinical and prediction types.
//!
//! Pure types with no I/O. Feature alignment lives here because the column
//! schema is part of the trained model's contract, not of any adapter.

mod features;
mod observation;
mod prediction;
mod report;

pub use features::{align_features, AlignedFeatureRow, ExpectedSchema};
pub use observation::{
    Category, ChestPainType, ClinicalObservation, ExerciseAngina, RestingEcg, Sex, StSlope,
    AGE_RANGE, CHOLESTEROL_RANGE, MAX_HR_RANGE, OLDPEAK_RANGE, RESTING_BP_RANGE,
};
pub use prediction::PredictionResult;
pub use report::{Report, ReportDownload, REPORT_FILE_NAME, REPORT_MIME};
