//! # Hepascan
//!
//! Local fatty-liver risk assessment using the FIB-4 index.
//!
//! This crate provides:
//! - A pure, deterministic risk evaluator (FIB-4 score, risk tier, risk criteria)
//! - A guided terminal questionnaire for collecting patient records
//! - Plain-text / JSON report export
//!
//! ## Architecture
//!
//! The crate follows Hexagonal Architecture:
//! - `domain`: Core business types (PatientRecord, RiskReport) and the evaluator
//! - `ports`: Trait definitions for external operations
//! - `adapters`: Concrete implementations (file export, log sanitization)
//! - `application`: Use cases orchestrating domain and ports
//! - `tui`: Terminal user interface

pub mod adapters;
pub mod application;
pub mod domain;
pub mod ports;
pub mod tui;

pub use domain::{Assessment, PatientRecord, RiskReport, RiskTier};

/// Result type for Hepascan operations
pub type Result<T> = std::result::Result<T, HepascanError>;

/// Main error type for Hepascan
#[derive(Debug, thiserror::Error)]
pub enum HepascanError {
    #[error("Invalid patient data: {0}")]
    Validation(#[from] domain::ValidationError),

    #[error("Report export failed: {0}")]
    Export(#[from] adapters::ExportError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
