//! The end-to-end flow: enumerate → select → configure → scan → aggregate → report.
//!
//! The flow is split in two; a Ctrl-C before [`execute`] starts scanning
//! cancels the run outright, afterwards it only stops the walk:
//! - [`configure`] enumerates volumes and resolves every setting, asking on
//!   the terminal for whatever the CLI left out
//! - [`execute`] scans, aggregates, writes both reports and prints the summary
//!
//! Both take their reader/writer explicitly, so the whole run can be driven
//! from tests with `--path` directories and scripted answers.

use crate::aggregate::{aggregate, default_global_cap};
use crate::cli::Args;
use crate::data::{ScanConfig, TraversalMode, Volume};
use crate::interrupt::Interrupt;
use crate::metrics::{PhaseTimer, RunSummary, format_elapsed, save_stats_json};
use crate::observer::ScanObserver;
use crate::output::terminal::{self, REPORT_PHASE, SCAN_PHASE};
use crate::output::{csv, text, write_csv_report, write_text_report};
use crate::prompt::{DEFAULT_MAX_FILES, Prompter, log_selection};
use crate::runner::scan_volumes;
use crate::scan::Scanner;
use crate::select::select;
use crate::volumes::list_volumes;
use anyhow::{Context, Result, bail};
use std::io::{BufRead, Write};
use std::path::PathBuf;

/// Everything decided before scanning starts.
#[derive(Debug)]
pub struct RunPlan {
    pub volumes: Vec<Volume>,
    pub scanner: Scanner,
    pub global_cap: usize,
    started: PhaseTimer,
}

/// What a finished run produced.
#[derive(Debug)]
pub struct RunOutcome {
    pub summary: RunSummary,
    pub text_report: PathBuf,
    pub csv_report: PathBuf,
}

/// Resolves the volumes and scan settings.
///
/// # Errors
/// Fails if no volume is available, if `--volumes` does not parse, if an
/// exclusion pattern is invalid, or on terminal I/O errors.
pub fn configure<R: BufRead, W: Write>(args: &Args, input: R, out: &mut W) -> Result<RunPlan> {
    let started = PhaseTimer::new("Total");
    let mut prompter = Prompter::new(input, out);
    terminal::render_banner(prompter.output())?;

    let volumes = if args.paths.is_empty() {
        tracing::info!("Identificando discos no sistema...");
        let volumes = list_volumes();
        tracing::info!("{} disco(s) encontrado(s)", volumes.len());
        if volumes.is_empty() {
            bail!("Nenhum disco encontrado no sistema");
        }
        terminal::render_volume_overview(prompter.output(), &volumes)?;

        match &args.volumes {
            Some(raw) => {
                let selected = select(&volumes, raw)
                    .with_context(|| format!("Seleção de discos inválida: '{}'", raw))?;
                log_selection(&selected);
                selected
            }
            None => prompter.select_volumes(&volumes)?,
        }
    } else {
        let selected: Vec<Volume> = args
            .paths
            .iter()
            .map(|p| Volume::for_directory(&std::path::absolute(p).unwrap_or_else(|_| p.clone())))
            .collect();
        log_selection(&selected);
        selected
    };

    let mode = match args.mode {
        Some(mode) => mode,
        None => prompter.choose_mode()?,
    };
    let min_size_gb = match args.min_size_gb {
        Some(gb) => checked_min_size(gb, mode),
        None => prompter.min_size_gb(mode)?,
    };
    let max_files = match args.max_files {
        Some(0) => {
            tracing::warn!("--max-files 0 ignorado; usando {}", DEFAULT_MAX_FILES);
            DEFAULT_MAX_FILES
        }
        Some(n) => n,
        None => prompter.max_files()?,
    };

    let config = ScanConfig::from_gb(min_size_gb, max_files, mode).with_exclusions(args.exclude.clone());
    let scanner = Scanner::new(config).context("Invalid --exclude pattern")?;
    let global_cap = args
        .global_cap
        .unwrap_or_else(|| default_global_cap(max_files, volumes.len()));

    Ok(RunPlan {
        volumes,
        scanner,
        global_cap,
        started,
    })
}

fn checked_min_size(gb: f64, mode: TraversalMode) -> f64 {
    if gb.is_finite() && gb >= 0.0 {
        gb
    } else {
        let default = mode.default_min_size_gb();
        tracing::warn!("--min-size-gb {} ignorado; usando {}", gb, default);
        default
    }
}

/// Scans the planned volumes and writes both reports.
///
/// Switches `interrupt` to the scan phase first. Reports are written even
/// when the scan was interrupted, from whatever was gathered until then.
pub fn execute<W: Write>(
    plan: RunPlan,
    args: &Args,
    out: &mut W,
    observer: &dyn ScanObserver,
    interrupt: &Interrupt,
) -> Result<RunOutcome> {
    let RunPlan {
        volumes,
        scanner,
        global_cap,
        started,
    } = plan;

    interrupt.begin_scan();
    terminal::render_section(out, "INICIANDO ESCANEAMENTO...")?;
    tracing::info!("Escaneamento iniciado");

    let scan_timer = PhaseTimer::new(SCAN_PHASE);
    let scans = scan_volumes(&volumes, &scanner, observer, interrupt, args.execution_mode())?;
    let scan_phase = scan_timer.finish();

    for (i, (volume, scan)) in volumes.iter().zip(&scans).enumerate() {
        tracing::info!(
            "Disco {}: {} arquivo(s) encontrado(s) em {:.1}s",
            volume.identifier,
            scan.candidates.len(),
            scan.elapsed.as_secs_f64()
        );
        terminal::render_volume_result(out, i + 1, volumes.len(), volume, scan)?;
    }
    tracing::info!(
        "Escaneamento concluído em {:.1}s",
        scan_phase.duration.as_secs_f64()
    );

    tracing::info!("Ordenando arquivos por tamanho...");
    let ranked = aggregate(&scans, global_cap);
    tracing::info!(
        "Total de arquivos no relatório: {} (limite: {})",
        ranked.len(),
        global_cap
    );

    terminal::render_section(out, "GERANDO RELATÓRIOS...")?;
    std::fs::create_dir_all(&args.output_dir).with_context(|| {
        format!(
            "Failed to create output directory {}",
            args.output_dir.display()
        )
    })?;
    let text_report = args.output_dir.join(text::DEFAULT_FILE_NAME);
    let csv_report = args.output_dir.join(csv::DEFAULT_FILE_NAME);

    let (written, report_phase) = crate::time_phase!(REPORT_PHASE, {
        write_text_report(&text_report, &volumes, &ranked, chrono::Local::now())
            .and_then(|_| write_csv_report(&csv_report, &ranked))
    });
    written?;
    terminal::render_report_written(out, "Relatório", &text_report)?;
    terminal::render_report_written(out, "Relatório CSV", &csv_report)?;
    tracing::info!(
        "Relatórios gerados em {:.1}s",
        report_phase.duration.as_secs_f64()
    );

    let summary = RunSummary::new(
        &ranked,
        global_cap,
        &scans,
        vec![scan_phase, report_phase],
        started.elapsed(),
    );
    terminal::render_summary(out, &summary)?;

    if let Some(path) = &args.stats_json {
        save_stats_json(path, &summary)?;
        writeln!(out, "Estatísticas salvas em: {}", path.display())?;
    }

    tracing::info!("Execução completa em {}", format_elapsed(summary.total));
    Ok(RunOutcome {
        summary,
        text_report,
        csv_report,
    })
}

/// [`configure`] followed by [`execute`], without installing a signal handler.
pub fn run<R: BufRead, W: Write>(
    args: &Args,
    input: R,
    out: &mut W,
    observer: &dyn ScanObserver,
    interrupt: &Interrupt,
) -> Result<RunOutcome> {
    let plan = configure(args, input, out)?;
    execute(plan, args, out, observer, interrupt)
}
