//! Step 1: patient profile entry.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    Frame,
};

use crate::domain::{Profile, Sex};
use crate::tui::ui::form::{
    render_form_footer, render_form_header, render_form_rows, FormRow, InputField,
};

/// Items of the profile step, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ProfileItem {
    Name,
    Age,
    Sex,
    Phone,
    Address,
    Email,
}

const ITEMS: [ProfileItem; 6] = [
    ProfileItem::Name,
    ProfileItem::Age,
    ProfileItem::Sex,
    ProfileItem::Phone,
    ProfileItem::Address,
    ProfileItem::Email,
];

/// Profile form state.
pub struct ProfileFormState {
    pub name: InputField,
    pub age: InputField,
    pub sex: Sex,
    pub phone: InputField,
    pub address: InputField,
    pub email: InputField,
    pub selected: usize,
    pub error_message: Option<String>,
}

impl Default for ProfileFormState {
    fn default() -> Self {
        Self {
            name: InputField::text("Name", "your full name"),
            age: InputField::numeric("Age", "years"),
            sex: Sex::default(),
            phone: InputField::text("Phone", "phone number"),
            address: InputField::text("Address", "home address"),
            email: InputField::text("Email", "email address"),
            selected: 0,
            error_message: None,
        }
    }
}

impl ProfileFormState {
    pub fn next_field(&mut self) {
        self.selected = (self.selected + 1) % ITEMS.len();
    }

    pub fn prev_field(&mut self) {
        if self.selected == 0 {
            self.selected = ITEMS.len() - 1;
        } else {
            self.selected -= 1;
        }
    }

    /// Whether the selection is on the sex toggle.
    #[must_use]
    pub fn on_toggle(&self) -> bool {
        ITEMS[self.selected] == ProfileItem::Sex
    }

    /// Flip the sex toggle.
    pub fn toggle(&mut self) {
        if self.on_toggle() {
            self.sex = match self.sex {
                Sex::Male => Sex::Female,
                Sex::Female => Sex::Male,
            };
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
        match ITEMS[self.selected] {
            ProfileItem::Name => Some(&mut self.name),
            ProfileItem::Age => Some(&mut self.age),
            ProfileItem::Sex => None,
            ProfileItem::Phone => Some(&mut self.phone),
            ProfileItem::Address => Some(&mut self.address),
            ProfileItem::Email => Some(&mut self.email),
        }
    }

    /// Wipe all field buffers from memory and reset the form.
    pub fn clear_sensitive(&mut self) {
        for field in [
            &mut self.name,
            &mut self.age,
            &mut self.phone,
            &mut self.address,
            &mut self.email,
        ] {
            field.wipe();
        }
        self.sex = Sex::default();
        self.selected = 0;
        self.error_message = None;
    }

    /// Validate and convert to a `Profile`.
    ///
    /// The step gate of the original questionnaire: name must be non-empty
    /// and age a positive integer.
    pub fn to_profile(&self) -> Result<Profile, String> {
        let name = self.name.value.trim();
        if name.is_empty() {
            return Err("Name: must not be empty".to_string());
        }

        let age: u32 = self
            .age
            .value
            .trim()
            .parse()
            .map_err(|_| "Age: enter a whole number of years".to_string())?;
        if age == 0 {
            return Err("Age: must be greater than zero".to_string());
        }

        Ok(Profile {
            name: name.to_string(),
            age,
            sex: self.sex,
            phone: self.phone.value.trim().to_string(),
            address: self.address.value.trim().to_string(),
            email: self.email.value.trim().to_string(),
        })
    }
}

/// Render the profile entry form.
pub fn render_profile_form(f: &mut Frame, area: Rect, state: &ProfileFormState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Form
            Constraint::Length(3), // Footer/error
        ])
        .split(area);

    render_form_header(f, chunks[0], "Patient Profile", 1);

    let sex_label = match state.sex {
        Sex::Male => "Sex: Male",
        Sex::Female => "Sex: Female",
    };
    let rows = [
        FormRow::Input(&state.name),
        FormRow::Input(&state.age),
        FormRow::Toggle {
            label: sex_label,
            value: state.sex == Sex::Male,
        },
        FormRow::Input(&state.phone),
        FormRow::Input(&state.address),
        FormRow::Input(&state.email),
    ];
    render_form_rows(f, chunks[1], &rows, state.selected);

    render_form_footer(f, chunks[2], state.error_message.as_deref(), "Next");
}
