//! Patient record types collected by the questionnaire.
//!
//! Every measured value is an `Option`: `None` means the patient did not
//! supply it, and the evaluator degrades gracefully instead of defaulting
//! to zero. The booleans in `MedicalHistory` are diagnosed-condition /
//! on-medication flags, not presence flags.

use serde::{Deserialize, Serialize};

/// Biological sex, used for the sex-specific waist threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sex {
    Male,
    Female,
}

impl Default for Sex {
    fn default() -> Self {
        Self::Male
    }
}

impl std::fmt::Display for Sex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Male => write!(f, "Male"),
            Self::Female => write!(f, "Female"),
        }
    }
}

/// Who the patient is. Only `age` and `sex` participate in scoring;
/// the contact fields exist for the exported report header.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    /// Age in years. The collector guarantees this is positive.
    pub age: u32,
    pub sex: Sex,
    pub phone: String,
    pub address: String,
    pub email: String,
}

/// Body measurements the patient may or may not know.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BodyMetrics {
    /// Weight in kilograms
    pub weight_kg: Option<f64>,
    /// Height in centimeters
    pub height_cm: Option<f64>,
    /// Waist circumference in centimeters
    pub waist_cm: Option<f64>,
}

/// Self-reported medical history.
///
/// Each domain carries a condition/medication flag that short-circuits the
/// need for a measured value (e.g. a patient on blood-pressure medication is
/// hypertensive regardless of the reading entered).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MedicalHistory {
    /// Taking blood-pressure medication
    pub on_bp_meds: bool,
    /// Systolic blood pressure in mmHg
    pub systolic: Option<f64>,
    /// Diastolic blood pressure in mmHg
    pub diastolic: Option<f64>,

    /// Diagnosed diabetes or on diabetes medication
    pub has_diabetes: bool,
    /// Pre-meal (fasting) glucose in mmol/L
    pub glucose_pre_meal: Option<f64>,
    /// Post-meal glucose in mmol/L
    pub glucose_post_meal: Option<f64>,

    /// Diagnosed cholesterol problem or on lipid medication
    pub has_cholesterol_issues: bool,
    /// HDL cholesterol in mmol/L
    pub hdl: Option<f64>,
    /// Triglycerides in mmol/L
    pub triglycerides: Option<f64>,
}

/// Blood-work values needed for the FIB-4 index.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ClinicalLabs {
    /// Platelet count in 10^9/L
    pub platelet: Option<f64>,
    /// Aspartate aminotransferase in U/L
    pub ast: Option<f64>,
    /// Alanine aminotransferase in U/L
    pub alt: Option<f64>,
}

/// Immutable input to the risk evaluator.
///
/// Built once by the questionnaire and consumed by [`crate::domain::evaluate`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PatientRecord {
    pub profile: Profile,
    pub metrics: BodyMetrics,
    pub history: MedicalHistory,
    pub labs: ClinicalLabs,
}

/// A supplied numeric value is malformed.
///
/// Missing optional data is NOT an error; only non-finite or negative
/// numbers are rejected.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("{field}: {value} is not a finite number")]
    NonFinite { field: &'static str, value: f64 },

    #[error("{field}: {value} must not be negative")]
    Negative { field: &'static str, value: f64 },
}

impl PatientRecord {
    /// Validate that every supplied numeric field is finite and non-negative.
    ///
    /// # Errors
    /// Returns the first malformed field found, in declaration order.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let checks: [(&'static str, Option<f64>); 12] = [
            ("weight_kg", self.metrics.weight_kg),
            ("height_cm", self.metrics.height_cm),
            ("waist_cm", self.metrics.waist_cm),
            ("systolic", self.history.systolic),
            ("diastolic", self.history.diastolic),
            ("glucose_pre_meal", self.history.glucose_pre_meal),
            ("glucose_post_meal", self.history.glucose_post_meal),
            ("hdl", self.history.hdl),
            ("triglycerides", self.history.triglycerides),
            ("platelet", self.labs.platelet),
            ("ast", self.labs.ast),
            ("alt", self.labs.alt),
        ];

        for (field, value) in checks {
            validate_field(field, value)?;
        }
        Ok(())
    }
}

fn validate_field(field: &'static str, value: Option<f64>) -> Result<(), ValidationError> {
    match value {
        Some(v) if !v.is_finite() => Err(ValidationError::NonFinite { field, value: v }),
        Some(v) if v < 0.0 => Err(ValidationError::Negative { field, value: v }),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_record_is_valid() {
        let record = PatientRecord::default();
        assert!(record.validate().is_ok());
    }

    #[test]
    fn test_zero_values_are_valid_input() {
        let record = PatientRecord {
            labs: ClinicalLabs {
                platelet: Some(0.0),
                ast: Some(0.0),
                alt: Some(0.0),
            },
            ..Default::default()
        };
        assert!(record.validate().is_ok());
    }

    #[test]
    fn test_nan_is_rejected() {
        let record = PatientRecord {
            metrics: BodyMetrics {
                weight_kg: Some(f64::NAN),
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(matches!(
            record.validate(),
            Err(ValidationError::NonFinite {
                field: "weight_kg",
                ..
            })
        ));
    }

    #[test]
    fn test_infinity_is_rejected() {
        let record = PatientRecord {
            labs: ClinicalLabs {
                ast: Some(f64::INFINITY),
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(record.validate().is_err());
    }

    #[test]
    fn test_negative_is_rejected() {
        let record = PatientRecord {
            history: MedicalHistory {
                triglycerides: Some(-1.7),
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(matches!(
            record.validate(),
            Err(ValidationError::Negative {
                field: "triglycerides",
                ..
            })
        ));
    }
}
