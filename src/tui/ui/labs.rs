//! Step 4: clinical lab report entry (platelet, AST, ALT for FIB-4).

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::domain::ClinicalLabs;
use crate::tui::styles::MedicalTheme;
use crate::tui::ui::form::{
    render_form_footer, render_form_header, render_form_rows, FormRow, InputField,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LabsItem {
    HasLabs,
    Platelet,
    Ast,
    Alt,
}

/// Clinical labs form state.
pub struct LabsFormState {
    pub has_labs: bool,
    pub platelet: InputField,
    pub ast: InputField,
    pub alt: InputField,
    pub selected: usize,
    pub error_message: Option<String>,
}

impl Default for LabsFormState {
    fn default() -> Self {
        Self {
            has_labs: false,
            platelet: InputField::numeric("Platelet", "e.g. 250"),
            ast: InputField::numeric("AST (SGOT)", "e.g. 35"),
            alt: InputField::numeric("ALT (SGPT)", "e.g. 40"),
            selected: 0,
            error_message: None,
        }
    }
}

impl LabsFormState {
    fn items(&self) -> Vec<LabsItem> {
        let mut items = vec![LabsItem::HasLabs];
        if self.has_labs {
            items.push(LabsItem::Platelet);
            items.push(LabsItem::Ast);
            items.push(LabsItem::Alt);
        }
        items
    }

    fn current(&self) -> LabsItem {
        let items = self.items();
        items[self.selected.min(items.len() - 1)]
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

    /// Whether the selection is on the has-labs toggle.
    #[must_use]
    pub fn on_toggle(&self) -> bool {
        self.current() == LabsItem::HasLabs
    }

    /// Flip the has-labs toggle.
    pub fn toggle(&mut self) {
        self.error_message = None;
        if self.current() == LabsItem::HasLabs {
            self.has_labs = !self.has_labs;
        }
        let len = self.items().len();
        if self.selected >= len {
            self.selected = len - 1;
        }
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
            LabsItem::Platelet => Some(&mut self.platelet),
            LabsItem::Ast => Some(&mut self.ast),
            LabsItem::Alt => Some(&mut self.alt),
            LabsItem::HasLabs => None,
        }
    }

    /// Wipe all field buffers from memory and reset the form.
    pub fn clear_sensitive(&mut self) {
        self.platelet.wipe();
        self.ast.wipe();
        self.alt.wipe();
        self.has_labs = false;
        self.selected = 0;
        self.error_message = None;
    }

    /// Validate and convert to `ClinicalLabs`.
    pub fn to_labs(&self) -> Result<ClinicalLabs, String> {
        if !self.has_labs {
            return Ok(ClinicalLabs::default());
        }
        Ok(ClinicalLabs {
            platelet: self.platelet.parse_optional()?,
            ast: self.ast.parse_optional()?,
            alt: self.alt.parse_optional()?,
        })
    }
}

/// Render the clinical labs form.
pub fn render_labs_form(f: &mut Frame, area: Rect, state: &LabsFormState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(4), // Screening note
            Constraint::Min(0),    // Form
            Constraint::Length(3), // Footer/error
        ])
        .split(area);

    render_form_header(f, chunks[0], "Clinical Lab Report", 4);

    let note = Paragraph::new(Line::from(Span::styled(
        "Fatty-liver screening uses your blood work. Do you have an ultrasound and blood test report (CBC, ALT, AST)?",
        MedicalTheme::info(),
    )))
    .wrap(Wrap { trim: true })
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(MedicalTheme::border()),
    );
    f.render_widget(note, chunks[1]);

    let rows: Vec<FormRow> = state
        .items()
        .into_iter()
        .map(|item| match item {
            LabsItem::HasLabs => FormRow::Toggle {
                label: "Lab report available?",
                value: state.has_labs,
            },
            LabsItem::Platelet => FormRow::Input(&state.platelet),
            LabsItem::Ast => FormRow::Input(&state.ast),
            LabsItem::Alt => FormRow::Input(&state.alt),
        })
        .collect();
    render_form_rows(f, chunks[2], &rows, state.selected);

    render_form_footer(f, chunks[3], state.error_message.as_deref(), "Submit");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_labs_yields_empty() {
        let mut state = LabsFormState::default();
        // Stale values behind a switched-off toggle are ignored.
        for c in "250".chars() {
            state.platelet.push_char(c);
        }
        let labs = state.to_labs().expect("Should build labs");
        assert_eq!(labs, ClinicalLabs::default());
    }

    #[test]
    fn test_labs_values_carry_through() {
        let mut state = LabsFormState::default();
        state.toggle();
        for (field, text) in [
            (&mut state.platelet, "180"),
            (&mut state.ast, "60"),
            (&mut state.alt, "40"),
        ] {
            for c in text.chars() {
                field.push_char(c);
            }
        }

        let labs = state.to_labs().expect("Should build labs");
        assert_eq!(labs.platelet, Some(180.0));
        assert_eq!(labs.ast, Some(60.0));
        assert_eq!(labs.alt, Some(40.0));
    }

    #[test]
    fn test_partial_labs_are_allowed() {
        let mut state = LabsFormState::default();
        state.toggle();
        for c in "180".chars() {
            state.platelet.push_char(c);
        }

        let labs = state.to_labs().expect("Should build labs");
        assert_eq!(labs.platelet, Some(180.0));
        assert_eq!(labs.ast, None);
    }
}
