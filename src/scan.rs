//! File system traversal for `rubig`.
//!
//! This module handles:
//! - Depth-first traversal of one volume using `WalkDir` (explicit stack, no recursion)
//! - Pruning of excluded directories before descent via `filter_entry`
//! - Classification of regular files against the size threshold
//! - Skip-and-count handling of per-entry failures
//! - Progress and diagnostics through an injected [`ScanObserver`]
//!
//! The main entry point is [`Scanner::traverse`], which returns a
//! [`VolumeScan`] holding at most `max_results_per_volume` candidates sorted
//! by size, largest first.
//!
//! Symbolic links are never followed and never reported, which rules out
//! cycles and double counting. Entries inside each directory are visited in
//! file-name order, so two scans of an unchanged tree yield the same result.

use crate::aggregate::rank_and_cap;
use crate::data::{BYTES_PER_GB, FileCandidate, ScanConfig, ScanStats};
use crate::error::{EntryErrorKind, ScanError};
use crate::exclude::ExclusionSet;
use crate::interrupt::Interrupt;
use crate::observer::{NoopObserver, ScanObserver};
use anyhow::Result;
use chrono::{DateTime, Local};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use walkdir::{DirEntry, WalkDir};

/// Emit a progress event every this many directories.
pub const PROGRESS_DIR_INTERVAL: u64 = 100;

/// Emit a progress event once this many files were visited since the last one.
pub const PROGRESS_FILE_INTERVAL: u64 = 5_000;

/// Candidates at least this large are announced immediately.
pub const LARGE_FILE_NOTICE_BYTES: u64 = 5 * BYTES_PER_GB;

/// Outcome of traversing one volume.
///
/// # Fields
/// * `root` - The traversal root
/// * `candidates` - Ranked and capped candidates
/// * `stats` - Counters accumulated during the walk
/// * `error` - Set when the root itself could not be opened
/// * `interrupted` - True if the walk stopped because of a user interrupt
/// * `elapsed` - Wall time spent on this volume
#[derive(Debug)]
pub struct VolumeScan {
    pub root: PathBuf,
    pub candidates: Vec<FileCandidate>,
    pub stats: ScanStats,
    pub error: Option<ScanError>,
    pub interrupted: bool,
    pub elapsed: Duration,
}

impl VolumeScan {
    /// True if the walk ran to the end without a root failure or interrupt.
    pub fn is_complete(&self) -> bool {
        self.error.is_none() && !self.interrupted
    }
}

impl AsRef<[FileCandidate]> for VolumeScan {
    fn as_ref(&self) -> &[FileCandidate] {
        &self.candidates
    }
}

/// A configured traversal engine. Immutable and shareable across threads.
#[derive(Debug, Clone)]
pub struct Scanner {
    config: ScanConfig,
    exclusions: ExclusionSet,
}

impl Scanner {
    /// Builds a scanner for `config`.
    ///
    /// # Errors
    /// Returns an error if one of the user exclusion patterns is not a valid glob.
    pub fn new(config: ScanConfig) -> Result<Self> {
        let exclusions = ExclusionSet::with_patterns(config.mode, &config.extra_exclusions)?;
        Ok(Self { config, exclusions })
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Walks `root` and collects files at or above the size threshold.
    ///
    /// Per-entry failures are counted in [`ScanStats::errors`] and skipped.
    /// A failure to open `root` itself ends the walk and is returned in
    /// [`VolumeScan::error`]. When `interrupt` is triggered the walk stops
    /// and the candidates gathered so far are returned.
    pub fn traverse(
        &self,
        root: &Path,
        observer: &dyn ScanObserver,
        interrupt: &Interrupt,
    ) -> VolumeScan {
        let start = Instant::now();
        let root = std::path::absolute(root).unwrap_or_else(|_| root.to_path_buf());
        observer.scan_started(&root, self.config.mode);

        let mut walk = Walk {
            root: &root,
            observer,
            stats: ScanStats::default(),
            candidates: Vec::new(),
            files_at_last_report: 0,
        };
        let mut error = None;
        let mut interrupted = false;

        let entries = WalkDir::new(&root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| !self.prunes(e));

        for entry in entries {
            if interrupt.is_triggered() {
                interrupted = true;
                break;
            }

            match entry {
                Ok(entry) => walk.visit(entry, self.config.min_size_bytes),
                Err(err) if err.depth() == 0 => {
                    let scan_error = ScanError::from_walkdir(root.clone(), err);
                    observer.root_error(&scan_error);
                    error = Some(scan_error);
                    break;
                }
                Err(err) => {
                    walk.stats.errors += 1;
                    observer.entry_error(&root, err.path(), EntryErrorKind::from_walkdir(&err));
                }
            }
        }

        let Walk {
            stats,
            mut candidates,
            ..
        } = walk;
        rank_and_cap(&mut candidates, self.config.max_results_per_volume);

        let elapsed = start.elapsed();
        observer.scan_finished(&root, &stats, elapsed);

        VolumeScan {
            root,
            candidates,
            stats,
            error,
            interrupted,
            elapsed,
        }
    }

    /// Directories below the root whose name is in the exclusion set are
    /// pruned before walkdir opens them. The root is never pruned.
    fn prunes(&self, entry: &DirEntry) -> bool {
        entry.depth() > 0
            && entry.file_type().is_dir()
            && self.exclusions.is_excluded(entry.file_name())
    }
}

/// Mutable state of one walk.
struct Walk<'a> {
    root: &'a Path,
    observer: &'a dyn ScanObserver,
    stats: ScanStats,
    candidates: Vec<FileCandidate>,
    files_at_last_report: u64,
}

impl Walk<'_> {
    fn visit(&mut self, entry: DirEntry, min_size_bytes: u64) {
        let file_type = entry.file_type();

        if file_type.is_dir() {
            self.stats.dirs_visited += 1;
            if self.stats.dirs_visited % PROGRESS_DIR_INTERVAL == 0 {
                self.report_progress();
            }
            return;
        }

        self.stats.files_visited += 1;
        if self.stats.files_visited - self.files_at_last_report >= PROGRESS_FILE_INTERVAL {
            self.report_progress();
        }

        // Symlinks, sockets, fifos and devices are counted but never classified.
        if !file_type.is_file() {
            return;
        }

        match classify(&entry, min_size_bytes) {
            Ok(Some(candidate)) => {
                self.stats.candidates_found += 1;
                if candidate.size_bytes >= LARGE_FILE_NOTICE_BYTES {
                    self.observer.large_file(self.root, &candidate);
                }
                self.candidates.push(candidate);
            }
            Ok(None) => {}
            Err(kind) => {
                self.stats.errors += 1;
                self.observer
                    .entry_error(self.root, Some(entry.path()), kind);
            }
        }
    }

    fn report_progress(&mut self) {
        self.files_at_last_report = self.stats.files_visited;
        self.observer.progress(self.root, &self.stats);
    }
}

/// Reads size and modification time of a regular file and turns it into a
/// candidate if it meets the threshold.
fn classify(entry: &DirEntry, min_size_bytes: u64) -> Result<Option<FileCandidate>, EntryErrorKind> {
    let metadata = entry
        .metadata()
        .map_err(|err| EntryErrorKind::from_walkdir(&err))?;

    let size = metadata.len();
    if size < min_size_bytes {
        return Ok(None);
    }

    let modified = metadata
        .modified()
        .map_err(|err| EntryErrorKind::from_io(&err))?;

    Ok(Some(FileCandidate::new(
        entry.path().to_path_buf(),
        size,
        DateTime::<Local>::from(modified),
    )))
}

/// Convenience wrapper: builds a [`Scanner`] for `config` and traverses
/// `root` with the given observer and interrupt flag.
pub fn traverse(
    root: &Path,
    config: &ScanConfig,
    observer: &dyn ScanObserver,
    interrupt: &Interrupt,
) -> Result<VolumeScan> {
    let scanner = Scanner::new(config.clone())?;
    Ok(scanner.traverse(root, observer, interrupt))
}

/// Traverses `root` without observing events and without an interrupt.
pub fn traverse_quiet(root: &Path, config: &ScanConfig) -> Result<VolumeScan> {
    traverse(root, config, &NoopObserver, &Interrupt::new())
}
