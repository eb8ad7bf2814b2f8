//! Shared form widgets for the questionnaire steps.
//!
//! Each step screen owns its own state struct; this module provides the
//! common input-field type and the row renderers they all use.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use zeroize::Zeroize;

use crate::tui::styles::MedicalTheme;

/// What characters an input field accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Free text (names, addresses)
    Text,
    /// Non-negative decimal numbers
    Numeric,
}

/// A single editable form field.
#[derive(Debug, Clone)]
pub struct InputField {
    pub label: &'static str,
    pub hint: &'static str,
    pub kind: FieldKind,
    pub value: String,
}

impl InputField {
    #[must_use]
    pub fn text(label: &'static str, hint: &'static str) -> Self {
        Self {
            label,
            hint,
            kind: FieldKind::Text,
            value: String::new(),
        }
    }

    #[must_use]
    pub fn numeric(label: &'static str, hint: &'static str) -> Self {
        Self {
            label,
            hint,
            kind: FieldKind::Numeric,
            value: String::new(),
        }
    }

    /// Append a character if the field kind accepts it.
    ///
    /// Numeric fields only take digits and a decimal point, so negative or
    /// non-finite numbers cannot be entered at all.
    pub fn push_char(&mut self, c: char) {
        match self.kind {
            FieldKind::Numeric => {
                if c.is_ascii_digit() || c == '.' {
                    self.value.push(c);
                }
            }
            FieldKind::Text => {
                if !c.is_control() {
                    self.value.push(c);
                }
            }
        }
    }

    /// Delete the last character.
    pub fn pop_char(&mut self) {
        self.value.pop();
    }

    /// Clear the field.
    pub fn clear(&mut self) {
        self.value.clear();
    }

    /// Wipe the field buffer from memory.
    pub fn wipe(&mut self) {
        self.value.zeroize();
    }

    /// Parse as an optional number: an empty field means "not supplied".
    ///
    /// # Errors
    /// Returns a message naming the field if the value does not parse.
    pub fn parse_optional(&self) -> Result<Option<f64>, String> {
        let trimmed = self.value.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }
        trimmed
            .parse::<f64>()
            .map(Some)
            .map_err(|_| format!("{}: enter a valid number", self.label))
    }
}

/// A renderable form row: either an input field or a yes/no toggle.
pub enum FormRow<'a> {
    Input(&'a InputField),
    Toggle {
        label: &'static str,
        value: bool,
    },
}

/// Render form rows in a two-column layout, boxes of height 3.
pub fn render_form_rows(f: &mut Frame, area: Rect, rows: &[FormRow], selected: usize) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .margin(1)
        .split(area);

    let mid = (rows.len() + 1) / 2;

    render_row_column(f, columns[0], &rows[..mid], 0, selected);
    render_row_column(f, columns[1], &rows[mid..], mid, selected);
}

fn render_row_column(f: &mut Frame, area: Rect, rows: &[FormRow], offset: usize, selected: usize) {
    let row_height = 3;
    let constraints: Vec<Constraint> = rows
        .iter()
        .map(|_| Constraint::Length(row_height))
        .chain(std::iter::once(Constraint::Min(0)))
        .collect();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    for (i, row) in rows.iter().enumerate() {
        let is_selected = offset + i == selected;
        match row {
            FormRow::Input(field) => render_input_row(f, chunks[i], field, is_selected),
            FormRow::Toggle { label, value } => {
                render_toggle_row(f, chunks[i], label, *value, is_selected)
            }
        }
    }
}

fn row_block(label: &'static str, is_selected: bool) -> Block<'static> {
    let border_style = if is_selected {
        MedicalTheme::border_focused()
    } else {
        MedicalTheme::border()
    };

    let title_style = if is_selected {
        MedicalTheme::focused()
    } else {
        MedicalTheme::text_secondary()
    };

    Block::default()
        .title(Span::styled(format!(" {label} "), title_style))
        .borders(Borders::ALL)
        .border_style(border_style)
}

fn render_input_row(f: &mut Frame, area: Rect, field: &InputField, is_selected: bool) {
    let value_display = if field.value.is_empty() {
        Span::styled(field.hint, MedicalTheme::text_muted())
    } else {
        Span::styled(field.value.as_str(), MedicalTheme::text())
    };

    let content = Paragraph::new(Line::from(vec![
        Span::raw(" "),
        value_display,
        if is_selected {
            Span::styled("▌", MedicalTheme::cursor())
        } else {
            Span::raw("")
        },
    ]))
    .block(row_block(field.label, is_selected));

    f.render_widget(content, area);
}

fn render_toggle_row(f: &mut Frame, area: Rect, label: &'static str, value: bool, is_selected: bool) {
    let (yes_style, no_style) = if value {
        (MedicalTheme::selected(), MedicalTheme::text_muted())
    } else {
        (MedicalTheme::text_muted(), MedicalTheme::selected())
    };

    let content = Paragraph::new(Line::from(vec![
        Span::raw(" "),
        Span::styled(" Yes ", yes_style),
        Span::raw("  "),
        Span::styled(" No ", no_style),
    ]))
    .block(row_block(label, is_selected));

    f.render_widget(content, area);
}

/// Render a step header line, e.g. "Body Metrics │ Step 2 / 4".
pub fn render_form_header(f: &mut Frame, area: Rect, title: &'static str, step: usize) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled(" ", MedicalTheme::text()),
        Span::styled(title, MedicalTheme::title()),
        Span::styled(
            format!(" │ Step {step} / 4"),
            MedicalTheme::text_secondary(),
        ),
    ]))
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(MedicalTheme::border()),
    );

    f.render_widget(header, area);
}

/// Render the footer: error message if present, key hints otherwise.
pub fn render_form_footer(f: &mut Frame, area: Rect, error: Option<&str>, next_label: &'static str) {
    let content = if let Some(err) = error {
        Line::from(vec![
            Span::styled("! ", MedicalTheme::danger()),
            Span::styled(err.to_string(), MedicalTheme::danger()),
        ])
    } else {
        Line::from(vec![
            Span::styled("[↑↓] ", MedicalTheme::key_hint()),
            Span::styled("Navigate ", MedicalTheme::key_desc()),
            Span::styled("[Space] ", MedicalTheme::key_hint()),
            Span::styled("Toggle ", MedicalTheme::key_desc()),
            Span::styled("[Enter] ", MedicalTheme::key_hint()),
            Span::styled(next_label, MedicalTheme::key_desc()),
            Span::styled(" [Esc] ", MedicalTheme::key_hint()),
            Span::styled("Back", MedicalTheme::key_desc()),
        ])
    };

    let footer = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(MedicalTheme::border()),
    );

    f.render_widget(footer, area);
}
