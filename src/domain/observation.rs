//! Clinical observation types for heart-disease risk assessment.
//!
//! One `ClinicalObservation` is built per submission from the form and is
//! dropped once the prediction and report have been produced.

use std::ops::RangeInclusive;

/// Age slider range in years.
pub const AGE_RANGE: RangeInclusive<u32> = 18..=100;

/// Resting blood pressure input range in mmHg.
pub const RESTING_BP_RANGE: RangeInclusive<u32> = 80..=200;

/// Serum cholesterol input range in mg/dL.
pub const CHOLESTEROL_RANGE: RangeInclusive<u32> = 100..=600;

/// Maximum heart rate slider range in bpm.
pub const MAX_HR_RANGE: RangeInclusive<u32> = 60..=220;

/// Oldpeak slider range (ST depression), stepped by 0.1.
pub const OLDPEAK_RANGE: RangeInclusive<f64> = 0.0..=6.0;

/// A categorical clinical field with a fixed set of codes.
///
/// The field name and code together form the one-hot column name
/// `"<FIELD>_<code>"` used by the trained schema.
pub trait Category: Copy + Eq + 'static {
    /// Column prefix used by the trained schema.
    const FIELD: &'static str;

    /// All categories, in the order the form offers them.
    const ALL: &'static [Self];

    /// Short code as it appears in the schema and the report.
    fn code(&self) -> &'static str;

    /// Name of the one-hot indicator column for this category.
    fn indicator_column(&self) -> String {
        format!("{}_{}", Self::FIELD, self.code())
    }

    /// Look up a category by its code.
    fn from_code(code: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.code() == code)
    }
}

/// Biological sex.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sex {
    Male,
    Female,
}

impl Category for Sex {
    const FIELD: &'static str = "Sex";
    const ALL: &'static [Self] = &[Self::Male, Self::Female];

    fn code(&self) -> &'static str {
        match self {
            Self::Male => "M",
            Self::Female => "F",
        }
    }
}

/// Chest pain type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChestPainType {
    /// Atypical angina
    AtypicalAngina,
    /// Non-anginal pain
    NonAnginalPain,
    /// Typical angina
    TypicalAngina,
    /// Asymptomatic
    Asymptomatic,
}

impl Category for ChestPainType {
    const FIELD: &'static str = "ChestPainType";
    const ALL: &'static [Self] = &[
        Self::AtypicalAngina,
        Self::NonAnginalPain,
        Self::TypicalAngina,
        Self::Asymptomatic,
    ];

    fn code(&self) -> &'static str {
        match self {
            Self::AtypicalAngina => "ATA",
            Self::NonAnginalPain => "NAP",
            Self::TypicalAngina => "TA",
            Self::Asymptomatic => "ASY",
        }
    }
}

/// Resting electrocardiogram result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestingEcg {
    Normal,
    /// ST-T wave abnormality
    StAbnormality,
    /// Left ventricular hypertrophy
    Lvh,
}

impl Category for RestingEcg {
    const FIELD: &'static str = "RestingECG";
    const ALL: &'static [Self] = &[Self::Normal, Self::StAbnormality, Self::Lvh];

    fn code(&self) -> &'static str {
        match self {
            Self::Normal => "Normal",
            Self::StAbnormality => "ST",
            Self::Lvh => "LVH",
        }
    }
}

/// Exercise-induced angina.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExerciseAngina {
    Yes,
    No,
}

impl Category for ExerciseAngina {
    const FIELD: &'static str = "ExerciseAngina";
    const ALL: &'static [Self] = &[Self::Yes, Self::No];

    fn code(&self) -> &'static str {
        match self {
            Self::Yes => "Y",
            Self::No => "N",
        }
    }
}

/// Slope of the peak exercise ST segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StSlope {
    Up,
    Flat,
    Down,
}

impl Category for StSlope {
    const FIELD: &'static str = "ST_Slope";
    const ALL: &'static [Self] = &[Self::Up, Self::Flat, Self::Down];

    fn code(&self) -> &'static str {
        match self {
            Self::Up => "Up",
            Self::Flat => "Flat",
            Self::Down => "Down",
        }
    }
}

/// A single patient's cardiovascular measurements as entered on the form.
///
/// Numeric fields are expected to be clamped by the form widgets already;
/// no range validation happens here.
#[derive(Debug, Clone, PartialEq)]
pub struct ClinicalObservation {
    /// Age in years
    pub age: u32,
    pub sex: Sex,
    pub chest_pain_type: ChestPainType,
    /// Resting blood pressure in mmHg
    pub resting_bp: u32,
    /// Serum cholesterol in mg/dL
    pub cholesterol: u32,
    /// Fasting blood sugar above 120 mg/dL
    pub fasting_bs: bool,
    pub resting_ecg: RestingEcg,
    /// Maximum heart rate achieved in bpm
    pub max_hr: u32,
    pub exercise_angina: ExerciseAngina,
    /// ST depression induced by exercise
    pub oldpeak: f64,
    pub st_slope: StSlope,
}

impl Default for ClinicalObservation {
    /// The values a freshly loaded form starts with.
    fn default() -> Self {
        Self {
            age: 40,
            sex: Sex::Male,
            chest_pain_type: ChestPainType::AtypicalAngina,
            resting_bp: 120,
            cholesterol: 200,
            fasting_bs: false,
            resting_ecg: RestingEcg::Normal,
            max_hr: 150,
            exercise_angina: ExerciseAngina::Yes,
            oldpeak: 1.0,
            st_slope: StSlope::Up,
        }
    }
}

impl ClinicalObservation {
    /// The six directly copied numeric columns, keyed by schema name.
    #[must_use]
    pub fn numeric_entries(&self) -> [(&'static str, f64); 6] {
        [
            ("Age", f64::from(self.age)),
            ("RestingBP", f64::from(self.resting_bp)),
            ("Cholesterol", f64::from(self.cholesterol)),
            ("FastingBS", f64::from(u8::from(self.fasting_bs))),
            ("MaxHR", f64::from(self.max_hr)),
            ("Oldpeak", self.oldpeak),
        ]
    }

    /// One synthesized indicator column per categorical field, as
    /// `(field, column)` pairs.
    #[must_use]
    pub fn indicator_columns(&self) -> [(&'static str, String); 5] {
        [
            (Sex::FIELD, self.sex.indicator_column()),
            (ChestPainType::FIELD, self.chest_pain_type.indicator_column()),
            (RestingEcg::FIELD, self.resting_ecg.indicator_column()),
            (ExerciseAngina::FIELD, self.exercise_angina.indicator_column()),
            (StSlope::FIELD, self.st_slope.indicator_column()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indicator_column_names() {
        assert_eq!(Sex::Male.indicator_column(), "Sex_M");
        assert_eq!(ChestPainType::Asymptomatic.indicator_column(), "ChestPainType_ASY");
        assert_eq!(RestingEcg::StAbnormality.indicator_column(), "RestingECG_ST");
        assert_eq!(ExerciseAngina::No.indicator_column(), "ExerciseAngina_N");
        assert_eq!(StSlope::Flat.indicator_column(), "ST_Slope_Flat");
    }

    #[test]
    fn test_from_code() {
        assert_eq!(ChestPainType::from_code("NAP"), Some(ChestPainType::NonAnginalPain));
        assert_eq!(RestingEcg::from_code("LVH"), Some(RestingEcg::Lvh));
        assert_eq!(Sex::from_code("X"), None);
    }

    #[test]
    fn test_defaults_match_form() {
        let obs = ClinicalObservation::default();
        assert_eq!(obs.age, 40);
        assert_eq!(obs.exercise_angina, ExerciseAngina::Yes);
        assert!(AGE_RANGE.contains(&obs.age));
        assert!(OLDPEAK_RANGE.contains(&obs.oldpeak));
    }

    #[test]
    fn test_fasting_bs_is_binary() {
        let obs = ClinicalObservation {
            fasting_bs: true,
            ..Default::default()
        };
        let entries = obs.numeric_entries();
        assert_eq!(entries[3], ("FastingBS", 1.0));
    }
}
