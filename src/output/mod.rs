//! Output system for the `rubig` application.
//!
//! # Available Formatters
//!
//! - **Text**: narrative report with volume details and the ranked file list
//! - **CSV**: machine-readable table with a fixed three-column header
//! - **Terminal**: menus, per-volume results and the final summary
//!
//! The file formatters consume already aggregated candidates and contain no
//! traversal logic.

pub mod csv;
pub mod terminal;
pub mod text;

/// CSV report writer.
///
/// See [`csv::write_report`] for full documentation.
pub use csv::write_report as write_csv_report;

/// Text report writer.
///
/// See [`text::write_report`] for full documentation.
pub use text::write_report as write_text_report;
