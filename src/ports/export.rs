//! Export port: Trait for writing a completed assessment report.
//!
//! Export is a user-invoked action on an already-rendered report (the
//! questionnaire's "download report" button). Patient records themselves
//! are never persisted.

use std::path::PathBuf;

use crate::domain::Assessment;

/// Output format for an exported report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Human-readable plain text
    Text,
    /// Machine-readable JSON
    Json,
}

impl ExportFormat {
    /// File extension for this format.
    #[must_use]
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Text => "txt",
            Self::Json => "json",
        }
    }
}

/// Trait for report export destinations.
pub trait ReportSink: Send + Sync {
    /// Error type for export operations.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Write the assessment report in the given format.
    ///
    /// # Returns
    /// The path of the written report.
    ///
    /// # Errors
    /// Returns error if the report cannot be written.
    fn export(&self, assessment: &Assessment, format: ExportFormat) -> Result<PathBuf, Self::Error>;
}
