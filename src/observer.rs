//! Scan observers: the injected logging/progress capability of the scanner.
//!
//! The traversal engine never logs or prints on its own. It reports events to
//! a [`ScanObserver`] passed in by the caller:
//! - [`NoopObserver`] discards everything
//! - [`TracingObserver`] writes structured log lines through `tracing`
//! - [`ConsoleObserver`] adds `indicatif` spinners on top of the log lines
//! - [`RecordingObserver`] keeps every event in memory for assertions
//!
//! Observers are shared across worker threads when volumes are scanned in
//! parallel, so every callback takes `&self` and implementations must be
//! `Send + Sync`. Events are notifications only; ignoring them never changes
//! scan results.

use crate::data::{FileCandidate, ScanStats, TraversalMode, Volume};
use crate::error::{EntryErrorKind, ScanError};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Receives traversal events. Every method has an empty default body.
pub trait ScanObserver: Send + Sync {
    /// A volume is about to be scanned (`index` is 1-based).
    fn volume_started(&self, _index: usize, _total: usize, _volume: &Volume) {}

    /// Traversal of `root` begins.
    fn scan_started(&self, _root: &Path, _mode: TraversalMode) {}

    /// Periodic progress with the running counters.
    fn progress(&self, _root: &Path, _stats: &ScanStats) {}

    /// A candidate of at least 5 GB was found.
    fn large_file(&self, _root: &Path, _candidate: &FileCandidate) {}

    /// A single entry failed and was skipped.
    fn entry_error(&self, _root: &Path, _path: Option<&Path>, _kind: EntryErrorKind) {}

    /// The root of the volume could not be opened.
    fn root_error(&self, _error: &ScanError) {}

    /// Traversal of `root` ended (completed, failed at the root, or interrupted).
    fn scan_finished(&self, _root: &Path, _stats: &ScanStats, _elapsed: Duration) {}
}

/// Observer that ignores every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl ScanObserver for NoopObserver {}

/// Observer that logs through `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl ScanObserver for TracingObserver {
    fn volume_started(&self, index: usize, total: usize, volume: &Volume) {
        tracing::info!(
            "Iniciando escaneamento do disco {} ({}) [{}/{}]",
            volume.identifier,
            volume.mount_path.display(),
            index,
            total
        );
    }

    fn scan_started(&self, root: &Path, mode: TraversalMode) {
        tracing::info!("Iniciando escaneamento {} de {}", mode.as_str(), root.display());
    }

    fn progress(&self, _root: &Path, stats: &ScanStats) {
        tracing::info!(
            "   Progresso: {} pastas | {} arquivos | {} grandes encontrados",
            stats.dirs_visited,
            stats.files_visited,
            stats.candidates_found
        );
    }

    fn large_file(&self, _root: &Path, candidate: &FileCandidate) {
        let name = candidate
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| candidate.path.display().to_string());
        tracing::info!(
            "   → Arquivo grande encontrado: {:.2} GB - {}",
            candidate.size_gb(),
            name
        );
    }

    fn entry_error(&self, _root: &Path, path: Option<&Path>, kind: EntryErrorKind) {
        match path {
            Some(path) => tracing::debug!("Ignorando {} ({})", path.display(), kind.as_str()),
            None => tracing::debug!("Ignorando entrada ({})", kind.as_str()),
        }
    }

    fn root_error(&self, error: &ScanError) {
        tracing::error!("{}", error);
    }

    fn scan_finished(&self, root: &Path, stats: &ScanStats, elapsed: Duration) {
        tracing::info!(
            "Escaneamento concluído: {} arquivos em {} pastas ({}, {:.1}s)",
            stats.files_visited,
            stats.dirs_visited,
            root.display(),
            elapsed.as_secs_f64()
        );
        tracing::info!("   • Arquivos grandes encontrados: {}", stats.candidates_found);
        if stats.errors > 0 {
            tracing::warn!("   • Arquivos sem permissão/erro: {}", stats.errors);
        }
    }
}

/// Observer for interactive runs: one spinner per volume plus log lines.
///
/// Log lines are emitted while the spinners are suspended so they do not
/// tear the progress display. Spinners are stacked per root because the
/// same volume may be selected more than once.
pub struct ConsoleObserver {
    bars: MultiProgress,
    spinners: Mutex<HashMap<PathBuf, Vec<ProgressBar>>>,
    log: TracingObserver,
}

impl ConsoleObserver {
    pub fn new() -> Self {
        Self {
            bars: MultiProgress::new(),
            spinners: Mutex::new(HashMap::new()),
            log: TracingObserver,
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "✓"])
            .template("{spinner} {prefix} {msg} [{elapsed}]")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }
}

impl Default for ConsoleObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl ScanObserver for ConsoleObserver {
    fn volume_started(&self, index: usize, total: usize, volume: &Volume) {
        let pb = self.bars.add(ProgressBar::new_spinner());
        pb.set_style(Self::spinner_style());
        pb.set_prefix(format!("📂 [{}/{}] {}", index, total, volume.identifier));
        pb.enable_steady_tick(Duration::from_millis(100));
        self.spinners
            .lock()
            .entry(volume.mount_path.clone())
            .or_default()
            .push(pb);
        self.bars
            .suspend(|| self.log.volume_started(index, total, volume));
    }

    fn scan_started(&self, root: &Path, mode: TraversalMode) {
        self.bars.suspend(|| self.log.scan_started(root, mode));
    }

    fn progress(&self, root: &Path, stats: &ScanStats) {
        if let Some(pb) = self.spinners.lock().get(root).and_then(|bars| bars.last()) {
            pb.set_message(format!(
                "{} pastas | {} arquivos | {} grandes",
                stats.dirs_visited, stats.files_visited, stats.candidates_found
            ));
        }
        tracing::debug!(
            "{}: {} pastas, {} arquivos",
            root.display(),
            stats.dirs_visited,
            stats.files_visited
        );
    }

    fn large_file(&self, root: &Path, candidate: &FileCandidate) {
        self.bars.suspend(|| self.log.large_file(root, candidate));
    }

    fn entry_error(&self, root: &Path, path: Option<&Path>, kind: EntryErrorKind) {
        self.log.entry_error(root, path, kind);
    }

    fn root_error(&self, error: &ScanError) {
        self.bars.suspend(|| self.log.root_error(error));
    }

    fn scan_finished(&self, root: &Path, stats: &ScanStats, elapsed: Duration) {
        let finished = {
            let mut spinners = self.spinners.lock();
            let pb = spinners
                .get_mut(root)
                .filter(|bars| !bars.is_empty())
                .map(|bars| bars.remove(0));
            if spinners.get(root).is_some_and(|bars| bars.is_empty()) {
                spinners.remove(root);
            }
            pb
        };
        if let Some(pb) = finished {
            pb.finish_with_message(format!(
                "{} pastas | {} arquivos | {} grandes",
                stats.dirs_visited, stats.files_visited, stats.candidates_found
            ));
        }
        self.bars
            .suspend(|| self.log.scan_finished(root, stats, elapsed));
    }
}

/// One event captured by [`RecordingObserver`].
#[derive(Debug, Clone, PartialEq)]
pub enum ObservedEvent {
    VolumeStarted { index: usize, total: usize, root: PathBuf },
    ScanStarted(PathBuf),
    Progress(ScanStats),
    LargeFile(PathBuf),
    EntryError(EntryErrorKind),
    RootError(PathBuf),
    ScanFinished(ScanStats),
}

/// Observer that records events in order, for tests and diagnostics.
#[derive(Debug, Default)]
pub struct RecordingObserver {
    events: Mutex<Vec<ObservedEvent>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything recorded so far.
    pub fn events(&self) -> Vec<ObservedEvent> {
        self.events.lock().clone()
    }

    fn push(&self, event: ObservedEvent) {
        self.events.lock().push(event);
    }
}

impl ScanObserver for RecordingObserver {
    fn volume_started(&self, index: usize, total: usize, volume: &Volume) {
        self.push(ObservedEvent::VolumeStarted {
            index,
            total,
            root: volume.mount_path.clone(),
        });
    }

    fn scan_started(&self, root: &Path, _mode: TraversalMode) {
        self.push(ObservedEvent::ScanStarted(root.to_path_buf()));
    }

    fn progress(&self, _root: &Path, stats: &ScanStats) {
        self.push(ObservedEvent::Progress(*stats));
    }

    fn large_file(&self, _root: &Path, candidate: &FileCandidate) {
        self.push(ObservedEvent::LargeFile(candidate.path.clone()));
    }

    fn entry_error(&self, _root: &Path, _path: Option<&Path>, kind: EntryErrorKind) {
        self.push(ObservedEvent::EntryError(kind));
    }

    fn root_error(&self, error: &ScanError) {
        self.push(ObservedEvent::RootError(error.volume.clone()));
    }

    fn scan_finished(&self, _root: &Path, stats: &ScanStats, _elapsed: Duration) {
        self.push(ObservedEvent::ScanFinished(*stats));
    }
}
