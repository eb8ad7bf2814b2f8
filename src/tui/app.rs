//! Main TUI application state machine.
//!
//! Handles:
//! - Step navigation through the questionnaire
//! - Input event handling
//! - Record building and submission to the evaluator

use std::io;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    Terminal,
};

use crate::adapters::export::FileExporter;
use crate::application::AssessmentService;
use crate::domain::PatientRecord;
use crate::ports::ExportFormat;

use super::ui::{
    history::{render_history_form, HistoryFormState},
    labs::{render_labs_form, LabsFormState},
    metrics::{render_metrics_form, MetricsFormState},
    profile::{render_profile_form, ProfileFormState},
    render_disclaimer,
    result::{render_result, ResultState},
    welcome::render_welcome,
};

/// Current screen/view in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Welcome,
    Profile,
    Metrics,
    History,
    Labs,
    Result,
}

/// Main application state
pub struct App {
    /// Current screen
    screen: Screen,

    /// Whether the app should quit
    should_quit: bool,

    /// Assessment service (evaluation + export)
    service: AssessmentService<FileExporter>,

    /// Step 1 state
    profile_form: ProfileFormState,

    /// Step 2 state
    metrics_form: MetricsFormState,

    /// Step 3 state
    history_form: HistoryFormState,

    /// Step 4 state
    labs_form: LabsFormState,

    /// Result screen state
    result: ResultState,
}

impl App {
    /// Create a new application instance using the default exporter.
    #[must_use]
    pub fn new() -> Self {
        Self::with_service(AssessmentService::new(FileExporter::from_env()))
    }

    /// Create application with an injected service (Composition Root pattern).
    ///
    /// This allows `main.rs` or tests to construct the exporter externally.
    #[must_use]
    pub fn with_service(service: AssessmentService<FileExporter>) -> Self {
        Self {
            screen: Screen::Welcome,
            should_quit: false,
            service,
            profile_form: ProfileFormState::default(),
            metrics_form: MetricsFormState::default(),
            history_form: HistoryFormState::default(),
            labs_form: LabsFormState::default(),
            result: ResultState::default(),
        }
    }

    /// Run the main application loop.
    ///
    /// # Errors
    /// Returns error if terminal operations fail.
    pub fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        // Main loop
        let result = self.main_loop(&mut terminal);

        // Restore terminal
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;

        result
    }

    fn main_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
        loop {
            // Draw current screen
            terminal.draw(|f| {
                let area = f.area();
                let chunks = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([Constraint::Min(0), Constraint::Length(3)])
                    .split(area);

                let content_area = chunks[0];
                let disclaimer_area = chunks[1];

                match self.screen {
                    Screen::Welcome => render_welcome(f, content_area),
                    Screen::Profile => render_profile_form(f, content_area, &self.profile_form),
                    Screen::Metrics => render_metrics_form(f, content_area, &self.metrics_form),
                    Screen::History => render_history_form(f, content_area, &self.history_form),
                    Screen::Labs => render_labs_form(f, content_area, &self.labs_form),
                    Screen::Result => render_result(f, content_area, &self.result),
                }

                render_disclaimer(f, disclaimer_area);
            })?;

            // Handle input (short poll to stay responsive)
            if event::poll(Duration::from_millis(200))? {
                if let Event::Key(key) = event::read()? {
                    self.handle_key(key.code, key.modifiers);
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn handle_key(&mut self, key: KeyCode, modifiers: KeyModifiers) {
        // Global quit handling
        if key == KeyCode::Char('q') && modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        match self.screen {
            Screen::Welcome => self.handle_welcome_key(key),
            Screen::Profile => self.handle_profile_key(key),
            Screen::Metrics => self.handle_metrics_key(key),
            Screen::History => self.handle_history_key(key),
            Screen::Labs => self.handle_labs_key(key),
            Screen::Result => self.handle_result_key(key),
        }
    }

    fn handle_welcome_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Enter => {
                self.reset_forms();
                self.screen = Screen::Profile;
            }
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
            }
            _ => {}
        }
    }

    fn handle_profile_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Esc => self.screen = Screen::Welcome,
            KeyCode::Up => self.profile_form.prev_field(),
            KeyCode::Down | KeyCode::Tab => self.profile_form.next_field(),
            KeyCode::Left | KeyCode::Right => self.profile_form.toggle(),
            KeyCode::Char(' ') if self.profile_form.on_toggle() => self.profile_form.toggle(),
            KeyCode::Char(c) => self.profile_form.input_char(c),
            KeyCode::Backspace => self.profile_form.delete_char(),
            KeyCode::Delete => self.profile_form.clear_field(),
            KeyCode::Enter => {
                // Step gate: name and a positive age are required to continue.
                match self.profile_form.to_profile() {
                    Ok(_) => {
                        self.profile_form.error_message = None;
                        self.screen = Screen::Metrics;
                    }
                    Err(e) => self.profile_form.error_message = Some(e),
                }
            }
            _ => {}
        }
    }

    fn handle_metrics_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Esc => self.screen = Screen::Profile,
            KeyCode::Up => self.metrics_form.prev_field(),
            KeyCode::Down | KeyCode::Tab => self.metrics_form.next_field(),
            KeyCode::Left | KeyCode::Right => self.metrics_form.toggle(),
            KeyCode::Char(' ') if self.metrics_form.on_toggle() => self.metrics_form.toggle(),
            KeyCode::Char(c) => self.metrics_form.input_char(c),
            KeyCode::Backspace => self.metrics_form.delete_char(),
            KeyCode::Delete => self.metrics_form.clear_field(),
            KeyCode::Enter => match self.metrics_form.to_metrics() {
                Ok(_) => {
                    self.metrics_form.error_message = None;
                    self.screen = Screen::History;
                }
                Err(e) => self.metrics_form.error_message = Some(e),
            },
            _ => {}
        }
    }

    fn handle_history_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Esc => self.screen = Screen::Metrics,
            KeyCode::Up => self.history_form.prev_field(),
            KeyCode::Down | KeyCode::Tab => self.history_form.next_field(),
            KeyCode::Left | KeyCode::Right => self.history_form.toggle(),
            KeyCode::Char(' ') if self.history_form.on_toggle() => self.history_form.toggle(),
            KeyCode::Char(c) => self.history_form.input_char(c),
            KeyCode::Backspace => self.history_form.delete_char(),
            KeyCode::Delete => self.history_form.clear_field(),
            KeyCode::Enter => match self.history_form.to_history() {
                Ok(_) => {
                    self.history_form.error_message = None;
                    self.screen = Screen::Labs;
                }
                Err(e) => self.history_form.error_message = Some(e),
            },
            _ => {}
        }
    }

    fn handle_labs_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Esc => self.screen = Screen::History,
            KeyCode::Up => self.labs_form.prev_field(),
            KeyCode::Down | KeyCode::Tab => self.labs_form.next_field(),
            KeyCode::Left | KeyCode::Right => self.labs_form.toggle(),
            KeyCode::Char(' ') if self.labs_form.on_toggle() => self.labs_form.toggle(),
            KeyCode::Char(c) => self.labs_form.input_char(c),
            KeyCode::Backspace => self.labs_form.delete_char(),
            KeyCode::Delete => self.labs_form.clear_field(),
            KeyCode::Enter => self.submit_assessment(),
            _ => {}
        }
    }

    fn handle_result_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('d') | KeyCode::Char('D') => self.export_report(ExportFormat::Text),
            KeyCode::Char('j') | KeyCode::Char('J') => self.export_report(ExportFormat::Json),
            KeyCode::Char('n') | KeyCode::Char('N') => {
                self.reset_forms();
                self.result = ResultState::default();
                self.screen = Screen::Profile;
            }
            KeyCode::Esc => {
                self.result = ResultState::default();
                self.screen = Screen::Welcome;
            }
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
            }
            _ => {}
        }
    }

    /// Build the record from all four steps and run the evaluation.
    fn submit_assessment(&mut self) {
        let record = match self.build_record() {
            Ok(record) => record,
            Err(e) => {
                self.labs_form.error_message = Some(e);
                return;
            }
        };

        match self.service.assess(&record) {
            Ok(assessment) => {
                self.result = ResultState {
                    assessment: Some(assessment),
                    notice: None,
                };
                self.screen = Screen::Result;

                // Clear plaintext buffers from the UI once the record is consumed.
                self.reset_forms();
            }
            Err(e) => {
                self.labs_form.error_message = Some(e.to_string());
            }
        }
    }

    fn build_record(&self) -> Result<PatientRecord, String> {
        Ok(PatientRecord {
            profile: self.profile_form.to_profile()?,
            metrics: self.metrics_form.to_metrics()?,
            history: self.history_form.to_history()?,
            labs: self.labs_form.to_labs()?,
        })
    }

    fn export_report(&mut self, format: ExportFormat) {
        let Some(assessment) = &self.result.assessment else {
            return;
        };

        match self.service.export(assessment, format) {
            Ok(path) => {
                self.result.notice = Some(format!("Report saved to {}", path.display()));
            }
            Err(e) => {
                tracing::error!("Export failed: {}", e);
                self.result.notice = Some(format!("Export failed: {e}"));
            }
        }
    }

    fn reset_forms(&mut self) {
        self.profile_form.clear_sensitive();
        self.metrics_form.clear_sensitive();
        self.history_form.clear_sensitive();
        self.labs_form.clear_sensitive();
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_chars(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key(KeyCode::Char(c), KeyModifiers::NONE);
        }
    }

    fn press(app: &mut App, key: KeyCode) {
        app.handle_key(key, KeyModifiers::NONE);
    }

    fn app_with_temp_exporter() -> App {
        let dir = std::env::temp_dir().join(format!("hepascan-app-test-{}", std::process::id()));
        App::with_service(AssessmentService::new(FileExporter::new(dir)))
    }

    #[test]
    fn test_welcome_enter_starts_questionnaire() {
        let mut app = app_with_temp_exporter();
        assert_eq!(app.screen, Screen::Welcome);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.screen, Screen::Profile);
    }

    #[test]
    fn test_profile_gate_blocks_empty_form() {
        let mut app = app_with_temp_exporter();
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Enter); // no name/age yet
        assert_eq!(app.screen, Screen::Profile);
        assert!(app.profile_form.error_message.is_some());
    }

    #[test]
    fn test_full_walkthrough_reaches_result() {
        let mut app = app_with_temp_exporter();
        press(&mut app, KeyCode::Enter);

        // Step 1: name + age
        type_chars(&mut app, "Jane Doe");
        press(&mut app, KeyCode::Down);
        type_chars(&mut app, "45");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.screen, Screen::Metrics);

        // Step 2: skip all measurements
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.screen, Screen::History);

        // Step 3: nothing diagnosed, nothing measured
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.screen, Screen::Labs);

        // Step 4: enter labs
        press(&mut app, KeyCode::Char(' ')); // has labs
        press(&mut app, KeyCode::Down);
        type_chars(&mut app, "180");
        press(&mut app, KeyCode::Down);
        type_chars(&mut app, "60");
        press(&mut app, KeyCode::Down);
        type_chars(&mut app, "40");
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.screen, Screen::Result);
        let assessment = app.result.assessment.as_ref().expect("Should have result");
        assert_eq!(assessment.report.fib4_score, Some(2.37));

        // Form buffers are wiped after submission.
        assert!(app.profile_form.name.value.is_empty());
        assert!(app.labs_form.platelet.value.is_empty());
    }

    #[test]
    fn test_new_assessment_resets_state() {
        let mut app = app_with_temp_exporter();
        app.screen = Screen::Result;
        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.screen, Screen::Profile);
        assert!(app.result.assessment.is_none());
    }
}
