//! Narrative text report (`relatorio_discos.txt`).
//!
//! Layout: a header with the generation timestamp, one block per scanned
//! volume with its capacity figures, the ranked list of candidates, and a
//! closing footer. Sizes are binary GB with two decimals.

use crate::data::{FileCandidate, TIMESTAMP_FORMAT, Volume};
use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Default file name of the text report.
pub const DEFAULT_FILE_NAME: &str = "relatorio_discos.txt";

const WIDTH: usize = 80;

/// Renders the report into `out`.
///
/// # Arguments
/// * `out` - Destination writer
/// * `volumes` - The volumes that were scanned
/// * `candidates` - The aggregated, already ranked candidates
/// * `generated_at` - Timestamp printed in the header
pub fn render<W: Write>(
    out: &mut W,
    volumes: &[Volume],
    candidates: &[FileCandidate],
    generated_at: DateTime<Local>,
) -> io::Result<()> {
    let rule = "=".repeat(WIDTH);
    let thin = "─".repeat(WIDTH);

    writeln!(out, "{rule}")?;
    writeln!(out, "RELATÓRIO DE ANÁLISE DE DISCOS")?;
    writeln!(out, "Data: {}", generated_at.format(TIMESTAMP_FORMAT))?;
    writeln!(out, "{rule}")?;
    writeln!(out)?;

    writeln!(out, "TOTAL DE DISCOS ENCONTRADOS: {}", volumes.len())?;
    writeln!(out)?;

    for (i, volume) in volumes.iter().enumerate() {
        writeln!(out)?;
        writeln!(out, "{thin}")?;
        writeln!(out, "DISCO {}: {}", i + 1, volume.identifier)?;
        writeln!(out, "{thin}")?;
        writeln!(out, "  Ponto de montagem: {}", volume.mount_path.display())?;
        writeln!(out, "  Sistema de arquivos: {}", volume.filesystem_type)?;
        writeln!(out, "  Tamanho total: {:.2} GB", volume.total_gb())?;
        writeln!(
            out,
            "  Espaço usado: {:.2} GB ({:.1}%)",
            volume.used_gb(),
            volume.used_percent
        )?;
        writeln!(out, "  Espaço livre: {:.2} GB", volume.free_gb())?;
    }

    writeln!(out)?;
    writeln!(out)?;
    writeln!(out, "{rule}")?;
    writeln!(out, "ARQUIVOS MAIS PESADOS ENCONTRADOS")?;
    writeln!(out, "{rule}")?;
    writeln!(out)?;

    if candidates.is_empty() {
        writeln!(out, "Nenhum arquivo grande encontrado.")?;
    } else {
        for (i, candidate) in candidates.iter().enumerate() {
            writeln!(out)?;
            writeln!(out, "{}. Tamanho: {:.2} GB", i + 1, candidate.size_gb())?;
            writeln!(out, "   Caminho: {}", candidate.path.display())?;
            writeln!(out, "   Modificado: {}", candidate.modified_display())?;
        }
    }

    writeln!(out)?;
    writeln!(out, "{rule}")?;
    writeln!(out, "FIM DO RELATÓRIO")?;
    writeln!(out, "{rule}")?;
    Ok(())
}

/// Writes the report to `path` (UTF-8), replacing any existing file.
pub fn write_report(
    path: &Path,
    volumes: &[Volume],
    candidates: &[FileCandidate],
    generated_at: DateTime<Local>,
) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create text report {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    render(&mut writer, volumes, candidates, generated_at)
        .and_then(|_| writer.flush())
        .with_context(|| format!("Failed to write text report {}", path.display()))?;
    Ok(())
}
