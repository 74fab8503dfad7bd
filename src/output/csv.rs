//! CSV report (`relatorio_arquivos.csv`).
//!
//! One header row followed by one row per candidate. The header is always
//! written, even when there are no candidates.

use crate::data::FileCandidate;
use anyhow::{Context, Result};
use csv::WriterBuilder;
use std::fs::File;
use std::io;
use std::path::Path;

/// Default file name of the CSV report.
pub const DEFAULT_FILE_NAME: &str = "relatorio_arquivos.csv";

/// Fixed header row.
pub const HEADER: [&str; 3] = ["Tamanho (GB)", "Caminho", "Data de Modificação"];

/// A single CSV row.
///
/// # Fields
/// * `size_gb` - Size in binary GB with two decimals
/// * `path` - Absolute path of the file
/// * `modified` - Modification time, `YYYY-MM-DD HH:MM:SS`
#[derive(Debug, serde::Serialize)]
pub struct CsvRow {
    pub size_gb: String,
    pub path: String,
    pub modified: String,
}

impl From<&FileCandidate> for CsvRow {
    fn from(candidate: &FileCandidate) -> Self {
        Self {
            size_gb: format!("{:.2}", candidate.size_gb()),
            path: candidate.path.display().to_string(),
            modified: candidate.modified_display(),
        }
    }
}

/// Renders candidates as CSV into `writer`.
///
/// # Note
/// This function accepts already ranked candidates and contains no business logic.
pub fn render<W: io::Write>(writer: W, candidates: &[FileCandidate]) -> Result<()> {
    let mut csv_writer = WriterBuilder::new().has_headers(false).from_writer(writer);

    csv_writer.write_record(HEADER)?;
    for candidate in candidates {
        csv_writer.serialize(CsvRow::from(candidate))?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Writes the CSV report to `path` (UTF-8), replacing any existing file.
pub fn write_report(path: &Path, candidates: &[FileCandidate]) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create CSV report {}", path.display()))?;
    render(file, candidates)
        .with_context(|| format!("Failed to write CSV report {}", path.display()))
}
