//! Step 2: body metrics entry.
//!
//! Each measurement starts with a "do you know it?" toggle; the value
//! input only appears (and is only read) when the toggle is on.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    Frame,
};

use crate::domain::BodyMetrics;
use crate::tui::ui::form::{
    render_form_footer, render_form_header, render_form_rows, FormRow, InputField,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MetricsItem {
    WeightKnown,
    Weight,
    HeightKnown,
    Height,
    WaistKnown,
    Waist,
}

/// Body metrics form state.
pub struct MetricsFormState {
    pub weight_known: bool,
    pub weight: InputField,
    pub height_known: bool,
    pub height: InputField,
    pub waist_known: bool,
    pub waist: InputField,
    pub selected: usize,
    pub error_message: Option<String>,
}

impl Default for MetricsFormState {
    fn default() -> Self {
        Self {
            weight_known: false,
            weight: InputField::numeric("Weight", "kg"),
            height_known: false,
            height: InputField::numeric("Height", "cm"),
            waist_known: false,
            waist: InputField::numeric("Waist", "cm"),
            selected: 0,
            error_message: None,
        }
    }
}

impl MetricsFormState {
    fn items(&self) -> Vec<MetricsItem> {
        let mut items = vec![MetricsItem::WeightKnown];
        if self.weight_known {
            items.push(MetricsItem::Weight);
        }
        items.push(MetricsItem::HeightKnown);
        if self.height_known {
            items.push(MetricsItem::Height);
        }
        items.push(MetricsItem::WaistKnown);
        if self.waist_known {
            items.push(MetricsItem::Waist);
        }
        items
    }

    fn current(&self) -> MetricsItem {
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
        matches!(
            self.current(),
            MetricsItem::WeightKnown | MetricsItem::HeightKnown | MetricsItem::WaistKnown
        )
    }

    /// Flip the toggle under the selection.
    pub fn toggle(&mut self) {
        self.error_message = None;
        match self.current() {
            MetricsItem::WeightKnown => self.weight_known = !self.weight_known,
            MetricsItem::HeightKnown => self.height_known = !self.height_known,
            MetricsItem::WaistKnown => self.waist_known = !self.waist_known,
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
            MetricsItem::Weight => Some(&mut self.weight),
            MetricsItem::Height => Some(&mut self.height),
            MetricsItem::Waist => Some(&mut self.waist),
            _ => None,
        }
    }

    /// Wipe all field buffers from memory and reset the form.
    pub fn clear_sensitive(&mut self) {
        self.weight.wipe();
        self.height.wipe();
        self.waist.wipe();
        self.weight_known = false;
        self.height_known = false;
        self.waist_known = false;
        self.selected = 0;
        self.error_message = None;
    }

    /// Validate and convert to `BodyMetrics`.
    ///
    /// A measurement toggled off, or toggled on but left empty, is absent.
    pub fn to_metrics(&self) -> Result<BodyMetrics, String> {
        Ok(BodyMetrics {
            weight_kg: self.optional_value(self.weight_known, &self.weight)?,
            height_cm: self.optional_value(self.height_known, &self.height)?,
            waist_cm: self.optional_value(self.waist_known, &self.waist)?,
        })
    }

    fn optional_value(&self, known: bool, field: &InputField) -> Result<Option<f64>, String> {
        if !known {
            return Ok(None);
        }
        field.parse_optional()
    }
}

/// Render the body metrics form.
pub fn render_metrics_form(f: &mut Frame, area: Rect, state: &MetricsFormState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(area);

    render_form_header(f, chunks[0], "Body Metrics", 2);

    let rows: Vec<FormRow> = state
        .items()
        .into_iter()
        .map(|item| match item {
            MetricsItem::WeightKnown => FormRow::Toggle {
                label: "Do you know your weight?",
                value: state.weight_known,
            },
            MetricsItem::Weight => FormRow::Input(&state.weight),
            MetricsItem::HeightKnown => FormRow::Toggle {
                label: "Do you know your height?",
                value: state.height_known,
            },
            MetricsItem::Height => FormRow::Input(&state.height),
            MetricsItem::WaistKnown => FormRow::Toggle {
                label: "Do you know your waist size?",
                value: state.waist_known,
            },
            MetricsItem::Waist => FormRow::Input(&state.waist),
        })
        .collect();
    render_form_rows(f, chunks[1], &rows, state.selected);

    render_form_footer(f, chunks[2], state.error_message.as_deref(), "Next");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_measurements_are_absent() {
        let state = MetricsFormState::default();
        let metrics = state.to_metrics().expect("Should build metrics");
        assert_eq!(metrics, BodyMetrics::default());
    }

    #[test]
    fn test_known_with_value() {
        let mut state = MetricsFormState::default();
        state.toggle(); // weight known
        state.next_field();
        for c in "70".chars() {
            state.input_char(c);
        }

        let metrics = state.to_metrics().expect("Should build metrics");
        assert_eq!(metrics.weight_kg, Some(70.0));
        assert_eq!(metrics.height_cm, None);
    }

    #[test]
    fn test_known_but_empty_is_absent() {
        let mut state = MetricsFormState::default();
        state.toggle();
        let metrics = state.to_metrics().expect("Should build metrics");
        assert_eq!(metrics.weight_kg, None);
    }

    #[test]
    fn test_toggle_expands_and_collapses_items() {
        let mut state = MetricsFormState::default();
        assert_eq!(state.items().len(), 3);
        state.toggle();
        assert_eq!(state.items().len(), 4);
        state.toggle();
        assert_eq!(state.items().len(), 3);
    }

    #[test]
    fn test_selection_stays_in_bounds_when_collapsing() {
        let mut state = MetricsFormState::default();
        state.weight_known = true;
        state.height_known = true;
        state.waist_known = true;
        state.selected = state.items().len() - 1; // Waist input

        // Collapse the waist block from its toggle.
        state.selected -= 1;
        state.toggle();
        assert!(state.selected < state.items().len());
    }
}
