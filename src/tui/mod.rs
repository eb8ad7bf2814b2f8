//! TUI module: Terminal User Interface using Ratatui.
//!
//! Provides a medical-themed interface for:
//! - Welcome screen
//! - The four questionnaire steps (profile, metrics, history, labs)
//! - Result display with advisory text and report export

mod app;
mod styles;
mod ui;

pub use app::{App, Screen};
pub use styles::MedicalTheme;
