//! Ports layer: Trait definitions for external operations.
//!
//! Following Hexagonal Architecture, these traits define the boundaries
//! between the application and external systems (report export).

mod export;

pub use export::{ExportFormat, ReportSink};
