//! Plain-text risk assessment report.

use chrono::{DateTime, Local};

use super::observation::{Category, ClinicalObservation};
use super::prediction::PredictionResult;

/// File name offered for the downloaded report.
pub const REPORT_FILE_NAME: &str = "HeartGuard_Risk_Report.txt";

/// MIME type of the downloaded report.
pub const REPORT_MIME: &str = "text/plain";

const RULE: &str = "----------------------------------------------";

/// Snapshot of an observation and its verdict at a point in time.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub observation: ClinicalObservation,
    pub prediction: PredictionResult,
    pub generated_at: DateTime<Local>,
}

impl Report {
    #[must_use]
    pub fn new(observation: ClinicalObservation, prediction: PredictionResult) -> Self {
        Self::at(observation, prediction, Local::now())
    }

    /// Build a report with an explicit timestamp.
    #[must_use]
    pub fn at(
        observation: ClinicalObservation,
        prediction: PredictionResult,
        generated_at: DateTime<Local>,
    ) -> Self {
        Self {
            observation,
            prediction,
            generated_at,
        }
    }

    /// Render the report body.
    #[must_use]
    pub fn render(&self) -> String {
        let o = &self.observation;
        let fasting = if o.fasting_bs { "Yes" } else { "No" };

        let lines = [
            "HEARTGUARD AI - MEDICAL RISK ASSESSMENT REPORT".to_string(),
            RULE.to_string(),
            format!("Date: {}", self.generated_at.format("%Y-%m-%d %H:%M:%S")),
            String::new(),
            "PATIENT VITALS:".to_string(),
            format!("- Age: {}", o.age),
            format!("- Sex: {}", o.sex.code()),
            format!("- Resting BP: {} mm Hg", o.resting_bp),
            format!("- Cholesterol: {} mg/dL", o.cholesterol),
            format!("- Max Heart Rate: {}", o.max_hr),
            format!("- Fasting BS > 120: {fasting}"),
            String::new(),
            "HEART METRICS:".to_string(),
            format!("- Chest Pain Type: {}", o.chest_pain_type.code()),
            format!("- Resting ECG: {}", o.resting_ecg.code()),
            format!("- Exercise Angina: {}", o.exercise_angina.code()),
            format!("- ST Slope: {}", o.st_slope.code()),
            format!("- Oldpeak: {:.1}", o.oldpeak),
            String::new(),
            "PREDICTION RESULT:".to_string(),
            self.prediction.report_line().to_string(),
            String::new(),
            RULE.to_string(),
            "Disclaimer: This tool is for informational purposes only.".to_string(),
        ];

        let mut out = lines.join("\n");
        out.push('\n');
        out
    }

    /// Package the rendered report for download.
    #[must_use]
    pub fn to_download(&self) -> ReportDownload {
        ReportDownload {
            file_name: REPORT_FILE_NAME,
            mime: REPORT_MIME,
            body: self.render(),
        }
    }
}

/// A rendered report ready to hand to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportDownload {
    pub file_name: &'static str,
    pub mime: &'static str,
    pub body: String,
}
