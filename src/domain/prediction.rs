//! Prediction result types.
//!
//! The classifier yields a bare binary label. There are no intermediate
//! risk tiers and no confidence score.

/// Binary heart-disease risk label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PredictionResult {
    /// Label 0
    LowRisk,
    /// Label 1
    HighRisk,
}

impl PredictionResult {
    /// Interpret a classifier label.
    ///
    /// # Errors
    /// Returns the label back if it is neither 0 nor 1.
    pub fn from_label(label: u8) -> Result<Self, u8> {
        match label {
            0 => Ok(Self::LowRisk),
            1 => Ok(Self::HighRisk),
            other => Err(other),
        }
    }

    /// Numeric label as produced by the classifier.
    #[must_use]
    pub fn label(&self) -> u8 {
        match self {
            Self::LowRisk => 0,
            Self::HighRisk => 1,
        }
    }

    #[must_use]
    pub fn is_high_risk(&self) -> bool {
        matches!(self, Self::HighRisk)
    }

    /// Banner headline.
    #[must_use]
    pub fn headline(&self) -> &'static str {
        match self {
            Self::HighRisk => "High Risk Detected",
            Self::LowRisk => "Low Risk Profile",
        }
    }

    /// Banner body text.
    #[must_use]
    pub fn advice(&self) -> &'static str {
        match self {
            Self::HighRisk => {
                "The analysis indicates a high probability of heart disease based on the provided clinical factors. Immediate consultation with a cardiologist is recommended."
            }
            Self::LowRisk => {
                "The analysis indicates a low probability of heart disease. Continue with regular check-ups and a healthy lifestyle."
            }
        }
    }

    /// Bracketed verdict line used in the report.
    #[must_use]
    pub fn report_line(&self) -> &'static str {
        match self {
            Self::HighRisk => "[HIGH RISK] - Immediate consultation recommended.",
            Self::LowRisk => "[LOW RISK] - Maintain healthy lifestyle.",
        }
    }
}

impl std::fmt::Display for PredictionResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::LowRisk => write!(f, "LOW RISK"),
            Self::HighRisk => write!(f, "HIGH RISK"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_label() {
        assert_eq!(PredictionResult::from_label(0), Ok(PredictionResult::LowRisk));
        assert_eq!(PredictionResult::from_label(1), Ok(PredictionResult::HighRisk));
        assert_eq!(PredictionResult::from_label(2), Err(2));
    }

    #[test]
    fn test_label_roundtrip() {
        for p in [PredictionResult::LowRisk, PredictionResult::HighRisk] {
            assert_eq!(PredictionResult::from_label(p.label()), Ok(p));
        }
    }

    #[test]
    fn test_report_line_markers() {
        assert!(PredictionResult::HighRisk.report_line().starts_with("[HIGH RISK]"));
        assert!(PredictionResult::LowRisk.report_line().starts_with("[LOW RISK]"));
    }
}
