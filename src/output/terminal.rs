//! Console rendering for the interactive flow.
//!
//! Every function takes the destination writer so the flow can be driven
//! against a buffer in tests. None of them contain business logic.

use crate::data::{TraversalMode, Volume};
use crate::metrics::{RunSummary, format_elapsed};
use crate::scan::VolumeScan;
use std::io::{self, Write};
use std::path::Path;

/// Phase names shared with the run summary.
pub const SCAN_PHASE: &str = "Escaneamento";
pub const REPORT_PHASE: &str = "Geração de relatórios";

const WIDTH: usize = 80;

/// Prints a full-width `=` rule, a title and another rule.
pub fn render_section<W: Write>(out: &mut W, title: &str) -> io::Result<()> {
    let rule = "=".repeat(WIDTH);
    writeln!(out, "\n{rule}")?;
    writeln!(out, "{title}")?;
    writeln!(out, "{rule}")
}

pub fn render_banner<W: Write>(out: &mut W) -> io::Result<()> {
    let rule = "=".repeat(WIDTH);
    writeln!(out, "{rule}")?;
    writeln!(out, "ANALISADOR DE DISCOS E ARQUIVOS GRANDES")?;
    writeln!(out, "{rule}")?;
    writeln!(out)
}

/// Lists the enumerated volumes with their usage.
pub fn render_volume_overview<W: Write>(out: &mut W, volumes: &[Volume]) -> io::Result<()> {
    writeln!(out, "\n✓ {} disco(s) encontrado(s):", volumes.len())?;
    for volume in volumes {
        writeln!(
            out,
            "  • {} - {:.2} GB usado de {:.2} GB ({:.1}%)",
            volume.identifier,
            volume.used_gb(),
            volume.total_gb(),
            volume.used_percent
        )?;
    }
    Ok(())
}

/// Shows the numbered selection menu.
pub fn render_selection_menu<W: Write>(out: &mut W, volumes: &[Volume]) -> io::Result<()> {
    render_section(out, "SELEÇÃO DE DISCOS")?;
    writeln!(out, "\nDiscos disponíveis:\n")?;
    for (i, volume) in volumes.iter().enumerate() {
        writeln!(
            out,
            "  [{}] {} - {}",
            i + 1,
            volume.identifier,
            volume.filesystem_type
        )?;
        writeln!(
            out,
            "      Total: {:.2} GB | Usado: {:.2} GB ({:.1}%) | Livre: {:.2} GB",
            volume.total_gb(),
            volume.used_gb(),
            volume.used_percent,
            volume.free_gb()
        )?;
    }
    writeln!(out, "\n  [0] Todos os discos")?;
    writeln!(out, "\n{}", "-".repeat(WIDTH))
}

/// Shows the scan mode choices.
pub fn render_mode_menu<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "\n{}", "-".repeat(WIDTH))?;
    writeln!(out, "CONFIGURAÇÕES")?;
    writeln!(out, "{}", "-".repeat(WIDTH))?;
    writeln!(out, "\nModo de escaneamento:")?;
    writeln!(
        out,
        "  [1] Rápido - Escaneia apenas pastas principais (recomendado)"
    )?;
    writeln!(out, "  [2] Completo - Escaneia todas as pastas (mais demorado)")
}

pub fn render_mode_chosen<W: Write>(out: &mut W, mode: TraversalMode) -> io::Result<()> {
    writeln!(out, "✓ Modo {} selecionado", mode.as_str())?;
    if mode == TraversalMode::Fast {
        writeln!(
            out,
            "\n💡 Dica: No modo rápido, recomendamos buscar arquivos >= 1.0 GB"
        )?;
    }
    Ok(())
}

/// One line per finished volume.
pub fn render_volume_result<W: Write>(
    out: &mut W,
    index: usize,
    total: usize,
    volume: &Volume,
    scan: &VolumeScan,
) -> io::Result<()> {
    writeln!(
        out,
        "\n📂 [{}/{}] Disco: {}",
        index, total, volume.identifier
    )?;
    if let Some(error) = &scan.error {
        writeln!(out, "   ✗ Erro ao escanear: {}", error)?;
    }
    writeln!(
        out,
        "   ✓ {} arquivo(s) grande(s) encontrado(s) ({:.1}s)",
        scan.candidates.len(),
        scan.elapsed.as_secs_f64()
    )?;
    if scan.stats.errors > 0 {
        writeln!(
            out,
            "   • {} entrada(s) ignorada(s) por erro ou falta de permissão",
            scan.stats.errors
        )?;
    }
    if scan.interrupted {
        writeln!(out, "   ⚠ Escaneamento interrompido; resultados parciais")?;
    }
    Ok(())
}

pub fn render_report_written<W: Write>(out: &mut W, label: &str, path: &Path) -> io::Result<()> {
    writeln!(out, "\n{} salvo em: {}", label, path.display())
}

/// Final summary: candidate count, aggregate size and timings.
pub fn render_summary<W: Write>(out: &mut W, summary: &RunSummary) -> io::Result<()> {
    if summary.interrupted {
        render_section(out, "⚠ ANÁLISE INTERROMPIDA - RESULTADOS PARCIAIS")?;
    } else {
        render_section(out, "✓ ANÁLISE CONCLUÍDA COM SUCESSO!")?;
    }
    writeln!(
        out,
        "\n📊 Total de arquivos grandes encontrados: {}",
        summary.candidates
    )?;
    if summary.candidates > 0 {
        writeln!(
            out,
            "💾 Tamanho total dos arquivos listados: {:.2} GB",
            crate::data::bytes_to_gb(summary.total_bytes)
        )?;
    }

    let errors = summary.total_errors();
    if errors > 0 {
        writeln!(
            out,
            "⚠ Entradas ignoradas por erro ou falta de permissão: {}",
            errors
        )?;
    }

    writeln!(out, "\n⏱️  Tempo de execução: {}", format_elapsed(summary.total))?;
    writeln!(
        out,
        "   • Escaneamento: {:.1}s",
        summary.phase(SCAN_PHASE).as_secs_f64()
    )?;
    writeln!(
        out,
        "   • Geração de relatórios: {:.1}s",
        summary.phase(REPORT_PHASE).as_secs_f64()
    )?;
    writeln!(out, "\n{}", "=".repeat(WIDTH))
}
