//! Risk report types.
//!
//! Output of the risk evaluation: FIB-4 score, risk tier, and the list of
//! matched risk criteria.

use serde::{Deserialize, Serialize};

use super::record::Sex;

/// Risk tier derived from the FIB-4 score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskTier {
    /// Low risk of advanced fibrosis
    Low,
    /// Indeterminate zone, follow-up recommended
    Moderate,
    /// High risk, specialist referral advised
    High,
}

impl RiskTier {
    /// Classify a FIB-4 score into a tier.
    ///
    /// Both boundary values (1.30 and 2.67) fall into the moderate tier.
    #[must_use]
    pub fn classify(score: f64) -> Self {
        if score < 1.30 {
            Self::Low
        } else if score <= 2.67 {
            Self::Moderate
        } else {
            Self::High
        }
    }

    /// Get the advisory text shown to the patient.
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Self::Low => {
                "No immediate concern for fatty liver. Keep healthy habits such as a balanced diet and regular exercise."
            }
            Self::Moderate => {
                "Consult a gastroenterologist or hepatologist for fatty-liver follow-up tests, and keep to lifestyle guidance."
            }
            Self::High => {
                "The findings suggest a serious fatty-liver problem. See a gastroenterologist or hepatologist promptly, alongside lifestyle changes."
            }
        }
    }

    /// Get the associated color for TUI display (RGB).
    #[must_use]
    pub fn color(&self) -> (u8, u8, u8) {
        match self {
            Self::Low => (16, 185, 129),      // Emerald (#10B981)
            Self::Moderate => (251, 191, 36), // Amber (#FBBF24)
            Self::High => (244, 63, 94),      // Rose (#F43F5E)
        }
    }
}

impl std::fmt::Display for RiskTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "LOW"),
            Self::Moderate => write!(f, "MODERATE"),
            Self::High => write!(f, "HIGH"),
        }
    }
}

/// A risk criterion matched against the patient record.
///
/// Criteria are independent of the FIB-4 score and are reported in the
/// order declared here, regardless of input order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskCriterion {
    /// BMI at or above 25 kg/m²
    ElevatedBmi,
    /// Waist circumference above the sex-specific threshold
    WaistCircumference(Sex),
    /// On blood-pressure medication, or systolic at or above 130 mmHg
    BloodPressure,
    /// Diagnosed diabetes, or pre-meal glucose at or above 5.6 mmol/L
    Diabetes,
    /// Triglycerides at or above 1.7 mmol/L
    Triglycerides,
}

impl std::fmt::Display for RiskCriterion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ElevatedBmi => write!(f, "BMI ≥ 25 kg/m²"),
            Self::WaistCircumference(Sex::Male) => write!(f, "Waist > 94 cm (M)"),
            Self::WaistCircumference(Sex::Female) => write!(f, "Waist > 80 cm (F)"),
            Self::BloodPressure => write!(f, "Blood pressure risk"),
            Self::Diabetes => write!(f, "Diabetes risk"),
            Self::Triglycerides => write!(f, "Triglyceride risk"),
        }
    }
}

/// Immutable output of the risk evaluation.
///
/// Absent fields mean "could not be computed from the supplied data",
/// never zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RiskReport {
    /// Body mass index, rounded to one decimal place
    pub bmi: Option<f64>,

    /// FIB-4 index, rounded to two decimal places
    pub fib4_score: Option<f64>,

    /// Tier classification of the FIB-4 score
    pub risk_tier: Option<RiskTier>,

    /// Matched risk criteria, in rule-declaration order
    pub matched_criteria: Vec<RiskCriterion>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(RiskTier::classify(1.29), RiskTier::Low);
        assert_eq!(RiskTier::classify(1.30), RiskTier::Moderate);
        assert_eq!(RiskTier::classify(2.67), RiskTier::Moderate);
        assert_eq!(RiskTier::classify(2.68), RiskTier::High);
    }

    #[test]
    fn test_tier_extremes() {
        assert_eq!(RiskTier::classify(0.0), RiskTier::Low);
        assert_eq!(RiskTier::classify(10.0), RiskTier::High);
    }

    #[test]
    fn test_criterion_labels() {
        assert_eq!(RiskCriterion::ElevatedBmi.to_string(), "BMI ≥ 25 kg/m²");
        assert_eq!(
            RiskCriterion::WaistCircumference(Sex::Male).to_string(),
            "Waist > 94 cm (M)"
        );
        assert_eq!(
            RiskCriterion::WaistCircumference(Sex::Female).to_string(),
            "Waist > 80 cm (F)"
        );
    }
}
