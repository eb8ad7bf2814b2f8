//! Adapters layer: Concrete implementations of ports.
//!
//! These modules contain the actual integration with external concerns:
//! - `export`: file-based report export (plain text / JSON)
//! - `sanitize`: PII filtering for logs

pub mod export;
pub mod sanitize;

// Re-export export error for lib.rs
pub use export::ExportError;
