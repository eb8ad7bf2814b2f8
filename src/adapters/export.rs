//! File-based report exporter.
//!
//! Renders a completed assessment into the export directory
//! (`HEPASCAN_EXPORT_DIR`, default: current directory) as plain text or
//! JSON. Reports contain the evaluation output only, no contact details.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use crate::domain::Assessment;
use crate::ports::{ExportFormat, ReportSink};

/// Error type for file export operations.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("Failed to write report: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize report: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Exports assessment reports as files in a directory.
#[derive(Debug, Clone)]
pub struct FileExporter {
    dir: PathBuf,
}

impl FileExporter {
    /// Create an exporter writing into the given directory.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Create an exporter from the environment.
    ///
    /// Uses `HEPASCAN_EXPORT_DIR` when set, otherwise the current directory.
    #[must_use]
    pub fn from_env() -> Self {
        let dir = std::env::var("HEPASCAN_EXPORT_DIR").unwrap_or_else(|_| ".".to_string());
        Self::new(dir)
    }

    /// Directory reports are written into.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn render_text(assessment: &Assessment) -> String {
        let report = &assessment.report;
        let mut out = String::new();

        // Infallible: fmt::Write on String never errors.
        let _ = writeln!(out, "HEPASCAN RISK ASSESSMENT REPORT");
        let _ = writeln!(out, "Assessment ID: {}", assessment.id);
        let _ = writeln!(
            out,
            "Prepared: {}",
            assessment.created_at.format("%Y-%m-%d %H:%M UTC")
        );
        let _ = writeln!(out);

        match report.bmi {
            Some(bmi) => {
                let _ = writeln!(out, "BMI: {bmi:.1} kg/m²");
            }
            None => {
                let _ = writeln!(out, "BMI: not computed (weight and height required)");
            }
        }

        match (report.fib4_score, report.risk_tier) {
            (Some(score), Some(tier)) => {
                let _ = writeln!(out, "FIB-4 score: {score:.2}");
                let _ = writeln!(out, "Risk tier: {tier}");
                let _ = writeln!(out);
                let _ = writeln!(out, "Advice: {}", tier.description());
            }
            _ => {
                let _ = writeln!(
                    out,
                    "FIB-4 score: not computed (platelet, AST and ALT values required)"
                );
            }
        }

        let _ = writeln!(out);
        if report.matched_criteria.is_empty() {
            let _ = writeln!(out, "Risk factors: none found");
        } else {
            let _ = writeln!(out, "Risk factors:");
            for criterion in &report.matched_criteria {
                let _ = writeln!(out, "  - {criterion}");
            }
        }

        let _ = writeln!(out);
        let _ = writeln!(out, "Recommended screening: Ultrasound, CBC, ALT, AST");
        let _ = writeln!(
            out,
            "This report is indicative only and does not replace professional medical evaluation."
        );

        out
    }
}

impl ReportSink for FileExporter {
    type Error = ExportError;

    fn export(&self, assessment: &Assessment, format: ExportFormat) -> Result<PathBuf, ExportError> {
        std::fs::create_dir_all(&self.dir)?;

        let filename = format!("hepascan-report-{}.{}", assessment.id, format.extension());
        let path = self.dir.join(filename);

        let contents = match format {
            ExportFormat::Text => Self::render_text(assessment),
            ExportFormat::Json => serde_json::to_string_pretty(assessment)?,
        };

        std::fs::write(&path, contents)?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{RiskReport, RiskTier};

    fn temp_export_dir(tag: &str) -> PathBuf {
        std::env::temp_dir().join(format!("hepascan-export-test-{tag}-{}", std::process::id()))
    }

    fn sample_assessment() -> Assessment {
        Assessment::new(RiskReport {
            bmi: Some(29.4),
            fib4_score: Some(2.37),
            risk_tier: Some(RiskTier::Moderate),
            matched_criteria: vec![crate::domain::RiskCriterion::ElevatedBmi],
        })
    }

    #[test]
    fn test_text_export_contains_score_and_tier() {
        let dir = temp_export_dir("text");
        let exporter = FileExporter::new(&dir);

        let path = exporter
            .export(&sample_assessment(), ExportFormat::Text)
            .expect("Should export");
        let contents = std::fs::read_to_string(&path).expect("Should read back");

        assert!(contents.contains("FIB-4 score: 2.37"));
        assert!(contents.contains("MODERATE"));
        assert!(contents.contains("BMI ≥ 25 kg/m²"));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_json_export_round_trips() {
        let dir = temp_export_dir("json");
        let exporter = FileExporter::new(&dir);
        let assessment = sample_assessment();

        let path = exporter
            .export(&assessment, ExportFormat::Json)
            .expect("Should export");
        let contents = std::fs::read_to_string(&path).expect("Should read back");
        let parsed: Assessment = serde_json::from_str(&contents).expect("Should parse");

        assert_eq!(parsed.id, assessment.id);
        assert_eq!(parsed.report, assessment.report);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_text_export_reports_unavailable_score() {
        let dir = temp_export_dir("partial");
        let exporter = FileExporter::new(&dir);
        let assessment = Assessment::new(RiskReport::default());

        let path = exporter
            .export(&assessment, ExportFormat::Text)
            .expect("Should export");
        let contents = std::fs::read_to_string(&path).expect("Should read back");

        assert!(contents.contains("FIB-4 score: not computed"));
        assert!(contents.contains("Risk factors: none found"));

        let _ = std::fs::remove_dir_all(&dir);
    }
}
