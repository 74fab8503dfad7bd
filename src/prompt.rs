//! Interactive prompts.
//!
//! The `parse_*` functions hold the decision logic and are pure. The
//! [`Prompter`] does the terminal I/O and is generic over its reader and
//! writer so the whole dialogue can be scripted in tests.
//!
//! Invalid numeric answers never fail: they fall back to the default.

use crate::data::{TraversalMode, Volume};
use crate::output::terminal;
use crate::select::select;
use anyhow::{Context, Result};
use std::io::{BufRead, Write};

/// Default number of files kept per volume.
pub const DEFAULT_MAX_FILES: usize = 50;

/// `"2"` selects the full scan; anything else is the fast scan.
pub fn parse_mode(input: &str) -> TraversalMode {
    match input.trim() {
        "2" => TraversalMode::Full,
        _ => TraversalMode::Fast,
    }
}

/// Parses a minimum size in GB. Accepts a decimal comma (`1,5`).
///
/// Empty, unparsable, negative and non-finite values yield `default`.
pub fn parse_min_size_gb(input: &str, default: f64) -> f64 {
    let input = input.trim().replace(',', ".");
    match input.parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 => value,
        _ => default,
    }
}

/// Parses the per-volume file limit. Empty, unparsable and zero yield `default`.
pub fn parse_max_files(input: &str, default: usize) -> usize {
    match input.trim().parse::<usize>() {
        Ok(value) if value > 0 => value,
        _ => default,
    }
}

/// Terminal dialogue over any reader/writer pair.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Access to the output for rendering between questions.
    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }

    /// Prints `question` and reads one line. End of input reads as empty.
    pub fn ask(&mut self, question: &str) -> Result<String> {
        write!(self.output, "{}", question)?;
        self.output.flush()?;

        let mut line = String::new();
        self.input
            .read_line(&mut line)
            .context("Failed to read from stdin")?;
        Ok(line.trim().to_string())
    }

    /// Shows the menu and asks until the selection parses.
    pub fn select_volumes(&mut self, volumes: &[Volume]) -> Result<Vec<Volume>> {
        terminal::render_selection_menu(&mut self.output, volumes)?;
        loop {
            let answer = self.ask(
                "\nSelecione o(s) disco(s) para escanear (ex: 1,2 ou 0 para todos): ",
            )?;
            match select(volumes, &answer) {
                Ok(selected) => {
                    if answer.is_empty() {
                        tracing::warn!("Nenhuma seleção feita. Usando todos os discos.");
                    }
                    log_selection(&selected);
                    return Ok(selected);
                }
                Err(err) => writeln!(self.output, "❌ Erro: {}", err)?,
            }
        }
    }

    pub fn choose_mode(&mut self) -> Result<TraversalMode> {
        terminal::render_mode_menu(&mut self.output)?;
        let answer = self.ask("\nEscolha o modo (padrão 1): ")?;
        let mode = parse_mode(&answer);
        tracing::info!("Modo selecionado: {}", mode.as_str());
        terminal::render_mode_chosen(&mut self.output, mode)?;
        Ok(mode)
    }

    pub fn min_size_gb(&mut self, mode: TraversalMode) -> Result<f64> {
        let default = mode.default_min_size_gb();
        let answer = self.ask(&format!(
            "\nTamanho mínimo dos arquivos em GB (padrão {:.1}): ",
            default
        ))?;
        let value = parse_min_size_gb(&answer, default);
        tracing::info!("Tamanho mínimo configurado: {} GB", value);
        Ok(value)
    }

    pub fn max_files(&mut self) -> Result<usize> {
        let answer = self.ask(&format!(
            "Quantidade máxima de arquivos por disco (padrão {}): ",
            DEFAULT_MAX_FILES
        ))?;
        let value = parse_max_files(&answer, DEFAULT_MAX_FILES);
        tracing::info!("Máximo de arquivos por disco: {}", value);
        Ok(value)
    }
}

pub(crate) fn log_selection(selected: &[Volume]) {
    let ids: Vec<&str> = selected.iter().map(|v| v.identifier.as_str()).collect();
    tracing::info!(
        "{} disco(s) selecionado(s): {}",
        selected.len(),
        ids.join(", ")
    );
}
