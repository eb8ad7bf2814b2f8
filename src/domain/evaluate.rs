//! The risk evaluator.
//!
//! A single-pass, side-effect-free transformation from a `PatientRecord`
//! to a `RiskReport`. Derived values are computed only when their full set
//! of inputs is present; otherwise they are reported as absent.

use super::record::{PatientRecord, Sex, ValidationError};
use super::report::{RiskCriterion, RiskReport, RiskTier};

/// Evaluate a patient record into a risk report.
///
/// # Errors
/// Returns [`ValidationError`] if any supplied numeric value is non-finite
/// or negative. Missing optional data is never an error.
pub fn evaluate(record: &PatientRecord) -> Result<RiskReport, ValidationError> {
    record.validate()?;

    let bmi = derive_bmi(record);
    let fib4_score = derive_fib4(record);
    let risk_tier = fib4_score.map(RiskTier::classify);
    let matched_criteria = derive_criteria(record, bmi);

    Ok(RiskReport {
        bmi,
        fib4_score,
        risk_tier,
        matched_criteria,
    })
}

/// BMI = weight_kg / (height_m)^2, to one decimal place.
fn derive_bmi(record: &PatientRecord) -> Option<f64> {
    let weight = positive(record.metrics.weight_kg)?;
    let height_cm = positive(record.metrics.height_cm)?;
    let height_m = height_cm / 100.0;
    Some(round_to(weight / (height_m * height_m), 1))
}

/// FIB-4 = (age * AST) / (platelet * sqrt(ALT)), to two decimal places.
///
/// ALT must be strictly positive: sqrt(0) would divide by zero.
fn derive_fib4(record: &PatientRecord) -> Option<f64> {
    if record.profile.age == 0 {
        return None;
    }
    let age = f64::from(record.profile.age);
    let platelet = positive(record.labs.platelet)?;
    let ast = positive(record.labs.ast)?;
    let alt = positive(record.labs.alt)?;
    Some(round_to((age * ast) / (platelet * alt.sqrt()), 2))
}

/// Evaluate the independent criteria rules in declaration order.
///
/// A rule whose inputs are unavailable is skipped, not counted as unmatched.
fn derive_criteria(record: &PatientRecord, bmi: Option<f64>) -> Vec<RiskCriterion> {
    let mut criteria = Vec::new();

    if matches!(bmi, Some(v) if v >= 25.0) {
        criteria.push(RiskCriterion::ElevatedBmi);
    }

    if let Some(waist) = record.metrics.waist_cm {
        match record.profile.sex {
            Sex::Male if waist > 94.0 => {
                criteria.push(RiskCriterion::WaistCircumference(Sex::Male));
            }
            Sex::Female if waist > 80.0 => {
                criteria.push(RiskCriterion::WaistCircumference(Sex::Female));
            }
            _ => {}
        }
    }

    if record.history.on_bp_meds || matches!(record.history.systolic, Some(v) if v >= 130.0) {
        criteria.push(RiskCriterion::BloodPressure);
    }

    if record.history.has_diabetes
        || matches!(record.history.glucose_pre_meal, Some(v) if v >= 5.6)
    {
        criteria.push(RiskCriterion::Diabetes);
    }

    if matches!(record.history.triglycerides, Some(v) if v >= 1.7) {
        criteria.push(RiskCriterion::Triglycerides);
    }

    criteria
}

fn positive(value: Option<f64>) -> Option<f64> {
    value.filter(|v| *v > 0.0)
}

fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BodyMetrics, ClinicalLabs, MedicalHistory, Profile};

    fn full_record() -> PatientRecord {
        PatientRecord {
            profile: Profile {
                name: "Test Patient".to_string(),
                age: 45,
                sex: Sex::Male,
                ..Default::default()
            },
            metrics: BodyMetrics {
                weight_kg: Some(85.0),
                height_cm: Some(170.0),
                waist_cm: Some(100.0),
            },
            history: MedicalHistory {
                triglycerides: Some(2.0),
                ..Default::default()
            },
            labs: ClinicalLabs {
                platelet: Some(180.0),
                ast: Some(60.0),
                alt: Some(40.0),
            },
        }
    }

    #[test]
    fn test_end_to_end_scenario() {
        let report = evaluate(&full_record()).expect("Should evaluate");

        assert_eq!(report.bmi, Some(29.4));
        // (45 * 60) / (180 * sqrt(40)) = 2.3717... -> 2.37
        assert_eq!(report.fib4_score, Some(2.37));
        assert_eq!(report.risk_tier, Some(RiskTier::Moderate));
        assert_eq!(
            report.matched_criteria,
            vec![
                RiskCriterion::ElevatedBmi,
                RiskCriterion::WaistCircumference(Sex::Male),
                RiskCriterion::Triglycerides,
            ]
        );
    }

    #[test]
    fn test_fib4_formula() {
        let mut record = full_record();
        record.profile.age = 60;
        record.labs = ClinicalLabs {
            platelet: Some(250.0),
            ast: Some(35.0),
            alt: Some(40.0),
        };

        let expected = (60.0 * 35.0) / (250.0 * 40.0_f64.sqrt());
        let expected = (expected * 100.0).round() / 100.0;

        let report = evaluate(&record).expect("Should evaluate");
        assert_eq!(report.fib4_score, Some(expected));
    }

    #[test]
    fn test_fib4_absent_when_any_lab_missing() {
        let wipes: [fn(&mut ClinicalLabs); 3] = [
            |l| l.platelet = None,
            |l| l.ast = None,
            |l| l.alt = None,
        ];
        for wipe in wipes {
            let mut record = full_record();
            wipe(&mut record.labs);

            let report = evaluate(&record).expect("Missing labs must not fail");
            assert_eq!(report.fib4_score, None);
            assert_eq!(report.risk_tier, None);
        }
    }

    #[test]
    fn test_fib4_absent_when_age_zero() {
        let mut record = full_record();
        record.profile.age = 0;

        let report = evaluate(&record).expect("Should evaluate");
        assert_eq!(report.fib4_score, None);
    }

    #[test]
    fn test_fib4_guards_nonpositive_alt_and_platelet() {
        let mut record = full_record();
        record.labs.alt = Some(0.0);
        let report = evaluate(&record).expect("Zero ALT must not fail");
        assert_eq!(report.fib4_score, None);

        let mut record = full_record();
        record.labs.platelet = Some(0.0);
        let report = evaluate(&record).expect("Zero platelet must not fail");
        assert_eq!(report.fib4_score, None);
    }

    #[test]
    fn test_partial_report_without_score() {
        let mut record = full_record();
        record.labs = ClinicalLabs::default();

        let report = evaluate(&record).expect("Should evaluate");
        assert_eq!(report.fib4_score, None);
        assert_eq!(report.bmi, Some(29.4));
        // Criteria are still derived from the available data.
        assert!(report.matched_criteria.contains(&RiskCriterion::ElevatedBmi));
        assert!(report
            .matched_criteria
            .contains(&RiskCriterion::Triglycerides));
    }

    #[test]
    fn test_bmi_rounding() {
        let record = PatientRecord {
            metrics: BodyMetrics {
                weight_kg: Some(70.0),
                height_cm: Some(175.0),
                ..Default::default()
            },
            ..Default::default()
        };

        let report = evaluate(&record).expect("Should evaluate");
        assert_eq!(report.bmi, Some(22.9));
    }

    #[test]
    fn test_bmi_absent_without_both_inputs() {
        let mut record = PatientRecord::default();
        record.metrics.weight_kg = Some(70.0);
        assert_eq!(evaluate(&record).unwrap().bmi, None);

        let mut record = PatientRecord::default();
        record.metrics.height_cm = Some(175.0);
        assert_eq!(evaluate(&record).unwrap().bmi, None);
    }

    #[test]
    fn test_waist_thresholds_are_sex_specific() {
        let waist_case = |sex: Sex, waist: f64| {
            let record = PatientRecord {
                profile: Profile {
                    age: 40,
                    sex,
                    ..Default::default()
                },
                metrics: BodyMetrics {
                    waist_cm: Some(waist),
                    ..Default::default()
                },
                ..Default::default()
            };
            evaluate(&record)
                .expect("Should evaluate")
                .matched_criteria
                .contains(&RiskCriterion::WaistCircumference(sex))
        };

        assert!(waist_case(Sex::Male, 95.0));
        assert!(!waist_case(Sex::Male, 94.0));
        assert!(waist_case(Sex::Female, 81.0));
        assert!(!waist_case(Sex::Female, 80.0));
    }

    #[test]
    fn test_bp_meds_short_circuit_measurement() {
        let record = PatientRecord {
            history: MedicalHistory {
                on_bp_meds: true,
                ..Default::default()
            },
            ..Default::default()
        };
        let report = evaluate(&record).expect("Should evaluate");
        assert!(report.matched_criteria.contains(&RiskCriterion::BloodPressure));

        let record = PatientRecord {
            history: MedicalHistory {
                systolic: Some(130.0),
                ..Default::default()
            },
            ..Default::default()
        };
        let report = evaluate(&record).expect("Should evaluate");
        assert!(report.matched_criteria.contains(&RiskCriterion::BloodPressure));

        // Below threshold, not on meds: rule does not match.
        let record = PatientRecord {
            history: MedicalHistory {
                systolic: Some(125.0),
                ..Default::default()
            },
            ..Default::default()
        };
        let report = evaluate(&record).expect("Should evaluate");
        assert!(!report.matched_criteria.contains(&RiskCriterion::BloodPressure));
    }

    #[test]
    fn test_diabetes_flag_and_glucose_threshold() {
        let record = PatientRecord {
            history: MedicalHistory {
                has_diabetes: true,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(evaluate(&record)
            .unwrap()
            .matched_criteria
            .contains(&RiskCriterion::Diabetes));

        let record = PatientRecord {
            history: MedicalHistory {
                glucose_pre_meal: Some(5.6),
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(evaluate(&record)
            .unwrap()
            .matched_criteria
            .contains(&RiskCriterion::Diabetes));

        let record = PatientRecord {
            history: MedicalHistory {
                glucose_pre_meal: Some(5.5),
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(!evaluate(&record)
            .unwrap()
            .matched_criteria
            .contains(&RiskCriterion::Diabetes));
    }

    #[test]
    fn test_criteria_preserve_declaration_order() {
        let report = evaluate(&full_record()).expect("Should evaluate");
        let positions: Vec<usize> = [
            RiskCriterion::ElevatedBmi,
            RiskCriterion::WaistCircumference(Sex::Male),
            RiskCriterion::Triglycerides,
        ]
        .iter()
        .map(|c| {
            report
                .matched_criteria
                .iter()
                .position(|m| m == c)
                .expect("Criterion should match")
        })
        .collect();

        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_empty_record_yields_empty_report() {
        let report = evaluate(&PatientRecord::default()).expect("Should evaluate");
        assert_eq!(report.bmi, None);
        assert_eq!(report.fib4_score, None);
        assert_eq!(report.risk_tier, None);
        assert!(report.matched_criteria.is_empty());
    }

    #[test]
    fn test_malformed_numeric_is_rejected() {
        let mut record = full_record();
        record.labs.ast = Some(f64::NAN);
        assert!(evaluate(&record).is_err());

        let mut record = full_record();
        record.metrics.waist_cm = Some(-1.0);
        assert!(evaluate(&record).is_err());
    }

    #[test]
    fn test_evaluation_is_idempotent() {
        let record = full_record();
        let first = evaluate(&record).expect("Should evaluate");
        let second = evaluate(&record).expect("Should evaluate");
        assert_eq!(first, second);
    }
}
