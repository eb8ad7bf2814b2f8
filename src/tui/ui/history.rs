//! Step 3: medical history entry.
//!
//! Three condition blocks (blood pressure, diabetes, cholesterol). Each
//! starts with a diagnosed/on-medication toggle; when that is off, a
//! "have you measured it?" toggle reveals the measured-value inputs.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    Frame,
};

use crate::domain::MedicalHistory;
use crate::tui::ui::form::{
    render_form_footer, render_form_header, render_form_rows, FormRow, InputField,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HistoryItem {
    OnBpMeds,
    BpMeasured,
    Systolic,
    Diastolic,
    HasDiabetes,
    GlucoseMeasured,
    GlucosePre,
    GlucosePost,
    HasCholesterol,
    CholesterolMeasured,
    Hdl,
    Triglycerides,
}

/// Medical history form state.
pub struct HistoryFormState {
    pub on_bp_meds: bool,
    pub bp_measured: bool,
    pub systolic: InputField,
    pub diastolic: InputField,

    pub has_diabetes: bool,
    pub glucose_measured: bool,
    pub glucose_pre: InputField,
    pub glucose_post: InputField,

    pub has_cholesterol_issues: bool,
    pub cholesterol_measured: bool,
    pub hdl: InputField,
    pub triglycerides: InputField,

    pub selected: usize,
    pub error_message: Option<String>,
}

impl Default for HistoryFormState {
    fn default() -> Self {
        Self {
            on_bp_meds: false,
            bp_measured: false,
            systolic: InputField::numeric("Systolic", "mmHg"),
            diastolic: InputField::numeric("Diastolic", "mmHg"),
            has_diabetes: false,
            glucose_measured: false,
            glucose_pre: InputField::numeric("Glucose before meal", "mmol/L"),
            glucose_post: InputField::numeric("Glucose after meal", "mmol/L"),
            has_cholesterol_issues: false,
            cholesterol_measured: false,
            hdl: InputField::numeric("HDL", "mmol/L"),
            triglycerides: InputField::numeric("Triglycerides", "mmol/L"),
            selected: 0,
            error_message: None,
        }
    }
}

impl HistoryFormState {
    fn items(&self) -> Vec<HistoryItem> {
        let mut items = vec![HistoryItem::OnBpMeds];
        if !self.on_bp_meds {
            items.push(HistoryItem::BpMeasured);
            if self.bp_measured {
                items.push(HistoryItem::Systolic);
                items.push(HistoryItem::Diastolic);
            }
        }

        items.push(HistoryItem::HasDiabetes);
        if !self.has_diabetes {
            items.push(HistoryItem::GlucoseMeasured);
            if self.glucose_measured {
                items.push(HistoryItem::GlucosePre);
                items.push(HistoryItem::GlucosePost);
            }
        }

        items.push(HistoryItem::HasCholesterol);
        if !self.has_cholesterol_issues {
            items.push(HistoryItem::CholesterolMeasured);
            if self.cholesterol_measured {
                items.push(HistoryItem::Hdl);
                items.push(HistoryItem::Triglycerides);
            }
        }

        items
    }

    fn current(&self) -> HistoryItem {
        let items = self.items();
        items[self.selected.min(items.len() - 1)]
    }

    fn clamp_selected(&mut self) {
        let len = self.items().len();
        if self.selected >= len {
            self.selected = len - 1;
        }
    }

    pub fn next_field(&mut self) {
        self.selected = (self.selected + 1) % self.items().len();
    }

    pub fn prev_field(&mut self) {
        if self.selected == 0 {
            self.selected = self.items().len() - 1;
        } else {
            self.selected -= 1;
        }
    }

    /// Whether the selection is on a yes/no toggle.
    #[must_use]
    pub fn on_toggle(&self) -> bool {
        !matches!(
            self.current(),
            HistoryItem::Systolic
                | HistoryItem::Diastolic
                | HistoryItem::GlucosePre
                | HistoryItem::GlucosePost
                | HistoryItem::Hdl
                | HistoryItem::Triglycerides
        )
    }

    /// Flip the toggle under the selection.
    pub fn toggle(&mut self) {
        self.error_message = None;
        match self.current() {
            HistoryItem::OnBpMeds => self.on_bp_meds = !self.on_bp_meds,
            HistoryItem::BpMeasured => self.bp_measured = !self.bp_measured,
            HistoryItem::HasDiabetes => self.has_diabetes = !self.has_diabetes,
            HistoryItem::GlucoseMeasured => self.glucose_measured = !self.glucose_measured,
            HistoryItem::HasCholesterol => {
                self.has_cholesterol_issues = !self.has_cholesterol_issues;
            }
            HistoryItem::CholesterolMeasured => {
                self.cholesterol_measured = !self.cholesterol_measured;
            }
            _ => {}
        }
        self.clamp_selected();
    }

    pub fn input_char(&mut self, c: char) {
        self.error_message = None;
        if let Some(field) = self.field_mut() {
            field.push_char(c);
        }
    }

    pub fn delete_char(&mut self) {
        if let Some(field) = self.field_mut() {
            field.pop_char();
        }
    }

    pub fn clear_field(&mut self) {
        if let Some(field) = self.field_mut() {
            field.clear();
        }
    }

    fn field_mut(&mut self) -> Option<&mut InputField> {
        match self.current() {
            HistoryItem::Systolic => Some(&mut self.systolic),
            HistoryItem::Diastolic => Some(&mut self.diastolic),
            HistoryItem::GlucosePre => Some(&mut self.glucose_pre),
            HistoryItem::GlucosePost => Some(&mut self.glucose_post),
            HistoryItem::Hdl => Some(&mut self.hdl),
            HistoryItem::Triglycerides => Some(&mut self.triglycerides),
            _ => None,
        }
    }

    /// Wipe all field buffers from memory and reset the form.
    pub fn clear_sensitive(&mut self) {
        for field in [
            &mut self.systolic,
            &mut self.diastolic,
            &mut self.glucose_pre,
            &mut self.glucose_post,
            &mut self.hdl,
            &mut self.triglycerides,
        ] {
            field.wipe();
        }
        self.on_bp_meds = false;
        self.bp_measured = false;
        self.has_diabetes = false;
        self.glucose_measured = false;
        self.has_cholesterol_issues = false;
        self.cholesterol_measured = false;
        self.selected = 0;
        self.error_message = None;
    }

    /// Validate and convert to `MedicalHistory`.
    ///
    /// Measured values are only read along the active measured path: a
    /// patient on medication skips the measurement questions entirely.
    pub fn to_history(&self) -> Result<MedicalHistory, String> {
        let bp_active = !self.on_bp_meds && self.bp_measured;
        let glucose_active = !self.has_diabetes && self.glucose_measured;
        let lipid_active = !self.has_cholesterol_issues && self.cholesterol_measured;

        Ok(MedicalHistory {
            on_bp_meds: self.on_bp_meds,
            systolic: self.measured_value(bp_active, &self.systolic)?,
            diastolic: self.measured_value(bp_active, &self.diastolic)?,
            has_diabetes: self.has_diabetes,
            glucose_pre_meal: self.measured_value(glucose_active, &self.glucose_pre)?,
            glucose_post_meal: self.measured_value(glucose_active, &self.glucose_post)?,
            has_cholesterol_issues: self.has_cholesterol_issues,
            hdl: self.measured_value(lipid_active, &self.hdl)?,
            triglycerides: self.measured_value(lipid_active, &self.triglycerides)?,
        })
    }

    fn measured_value(&self, active: bool, field: &InputField) -> Result<Option<f64>, String> {
        if !active {
            return Ok(None);
        }
        field.parse_optional()
    }
}

/// Render the medical history form.
pub fn render_history_form(f: &mut Frame, area: Rect, state: &HistoryFormState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(area);

    render_form_header(f, chunks[0], "Medical History", 3);

    let rows: Vec<FormRow> = state
        .items()
        .into_iter()
        .map(|item| match item {
            HistoryItem::OnBpMeds => FormRow::Toggle {
                label: "Taking blood-pressure medication?",
                value: state.on_bp_meds,
            },
            HistoryItem::BpMeasured => FormRow::Toggle {
                label: "Ever measured your blood pressure?",
                value: state.bp_measured,
            },
            HistoryItem::Systolic => FormRow::Input(&state.systolic),
            HistoryItem::Diastolic => FormRow::Input(&state.diastolic),
            HistoryItem::HasDiabetes => FormRow::Toggle {
                label: "Diabetes, or on diabetes medication?",
                value: state.has_diabetes,
            },
            HistoryItem::GlucoseMeasured => FormRow::Toggle {
                label: "Ever measured your blood glucose?",
                value: state.glucose_measured,
            },
            HistoryItem::GlucosePre => FormRow::Input(&state.glucose_pre),
            HistoryItem::GlucosePost => FormRow::Input(&state.glucose_post),
            HistoryItem::HasCholesterol => FormRow::Toggle {
                label: "Cholesterol problem, or on medication?",
                value: state.has_cholesterol_issues,
            },
            HistoryItem::CholesterolMeasured => FormRow::Toggle {
                label: "Ever measured your cholesterol?",
                value: state.cholesterol_measured,
            },
            HistoryItem::Hdl => FormRow::Input(&state.hdl),
            HistoryItem::Triglycerides => FormRow::Input(&state.triglycerides),
        })
        .collect();
    render_form_rows(f, chunks[1], &rows, state.selected);

    render_form_footer(f, chunks[2], state.error_message.as_deref(), "Next");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_history_is_empty() {
        let state = HistoryFormState::default();
        let history = state.to_history().expect("Should build history");
        assert_eq!(history, MedicalHistory::default());
    }

    #[test]
    fn test_medication_flag_hides_measurement_path() {
        let mut state = HistoryFormState::default();
        state.on_bp_meds = true;
        state.bp_measured = true; // stale from a previous toggle
        for c in "140".chars() {
            state.systolic.push_char(c);
        }

        let history = state.to_history().expect("Should build history");
        assert!(history.on_bp_meds);
        // On-medication short-circuits: the stale reading is not carried over.
        assert_eq!(history.systolic, None);
    }

    #[test]
    fn test_measured_values_carry_through() {
        let mut state = HistoryFormState::default();
        state.glucose_measured = true;
        for c in "6.1".chars() {
            state.glucose_pre.push_char(c);
        }

        let history = state.to_history().expect("Should build history");
        assert_eq!(history.glucose_pre_meal, Some(6.1));
        assert_eq!(history.glucose_post_meal, None);
    }

    #[test]
    fn test_item_visibility_follows_toggles() {
        let mut state = HistoryFormState::default();
        assert_eq!(state.items().len(), 6); // three condition + three measured toggles

        state.bp_measured = true;
        assert_eq!(state.items().len(), 8);

        state.on_bp_meds = true;
        assert_eq!(state.items().len(), 5); // whole bp measurement path hidden
    }

    #[test]
    fn test_invalid_number_is_reported() {
        let mut state = HistoryFormState::default();
        state.cholesterol_measured = true;
        for c in "1..7".chars() {
            state.triglycerides.push_char(c);
        }
        assert!(state.to_history().is_err());
    }
}
