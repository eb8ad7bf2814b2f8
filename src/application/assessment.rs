//! Assessment service: runs the risk evaluation and handles report export.
//!
//! The service is a thin shell over the pure evaluator: it adds logging
//! (PII-free summaries only) and wires the export port.

use crate::domain::{evaluate, Assessment, PatientRecord};
use crate::ports::{ExportFormat, ReportSink};
use crate::HepascanError;

/// Service for running assessments and exporting reports.
pub struct AssessmentService<E>
where
    E: ReportSink,
{
    exporter: E,
}

impl<E> AssessmentService<E>
where
    E: ReportSink,
    E::Error: Into<crate::adapters::ExportError>,
{
    /// Create a new assessment service.
    pub fn new(exporter: E) -> Self {
        Self { exporter }
    }

    /// Evaluate a completed patient record.
    ///
    /// # Errors
    /// Returns error if a supplied numeric value is malformed. Missing
    /// optional data is not an error; the report carries absent fields.
    pub fn assess(&self, record: &PatientRecord) -> Result<Assessment, HepascanError> {
        let report = evaluate(record)?;

        // Summary only: no names, no raw inputs.
        tracing::info!(
            "Assessment complete: fib4={}, tier={}, criteria={}",
            report
                .fib4_score
                .map_or_else(|| "n/a".to_string(), |s| format!("{s:.2}")),
            report
                .risk_tier
                .map_or_else(|| "n/a".to_string(), |t| t.to_string()),
            report.matched_criteria.len()
        );

        Ok(Assessment::new(report))
    }

    /// Export an assessment report.
    ///
    /// # Errors
    /// Returns error if the report cannot be written.
    pub fn export(
        &self,
        assessment: &Assessment,
        format: ExportFormat,
    ) -> Result<std::path::PathBuf, HepascanError> {
        let path = self
            .exporter
            .export(assessment, format)
            .map_err(|e| HepascanError::Export(e.into()))?;

        tracing::info!("Report exported to {}", path.display());
        Ok(path)
    }
}
