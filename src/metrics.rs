//! Timing and run summary for `rubig`.
//!
//! Contents:
//! - [`PhaseTimer`] - A wrapper around `Instant` for timing the scan and report phases
//! - [`RunSummary`] - What the final console summary and the stats JSON show
//! - [`format_elapsed`] - `H:MM:SS` rendering of a duration
//! - [`save_stats_json`] - JSON output for scripting integration
//!
//! # Example
//!
//! ```rust
//! use rubig::metrics::PhaseTimer;
//! # fn walk_the_volumes() {}
//!
//! let timer = PhaseTimer::new("Escaneamento");
//! walk_the_volumes();
//! let phase = timer.finish();
//! assert_eq!(phase.name, "Escaneamento");
//! ```

use crate::data::{FileCandidate, ScanStats};
use crate::scan::VolumeScan;
use anyhow::{Context, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Measures one named phase of the run (scan, reports, total).
#[derive(Debug, Clone)]
pub struct PhaseTimer {
    pub name: String,
    pub start: Instant,
}

impl PhaseTimer {
    /// Starts timing `name` now.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            start: Instant::now(),
        }
    }

    /// Stops the timer.
    pub fn finish(self) -> PhaseResult {
        PhaseResult {
            name: self.name,
            duration: self.start.elapsed(),
        }
    }

    /// Time since the timer started; the timer keeps running.
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

/// A named, finished phase.
#[derive(Debug, Clone, Serialize)]
pub struct PhaseResult {
    pub name: String,
    #[serde(serialize_with = "duration_ms")]
    pub duration: Duration,
}

/// Durations are written to JSON as whole milliseconds.
fn duration_ms<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_u64(duration.as_millis() as u64)
}

/// Per-volume line of the run summary.
#[derive(Debug, Clone, Serialize)]
pub struct VolumeSummary {
    pub root: PathBuf,
    pub stats: ScanStats,
    pub candidates: usize,
    pub error: Option<String>,
    pub interrupted: bool,
    #[serde(serialize_with = "duration_ms")]
    pub elapsed: Duration,
}

impl From<&VolumeScan> for VolumeSummary {
    fn from(scan: &VolumeScan) -> Self {
        Self {
            root: scan.root.clone(),
            stats: scan.stats,
            candidates: scan.candidates.len(),
            error: scan.error.as_ref().map(|e| e.to_string()),
            interrupted: scan.interrupted,
            elapsed: scan.elapsed,
        }
    }
}

/// Everything the final summary reports.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    /// Number of candidates in the aggregated report
    pub candidates: usize,
    /// Sum of the sizes of the reported candidates
    pub total_bytes: u64,
    /// The report limit that was applied
    pub global_cap: usize,
    /// Scan and report phases, in order
    pub phases: Vec<PhaseResult>,
    /// Wall time of the whole run
    #[serde(serialize_with = "duration_ms")]
    pub total: Duration,
    pub volumes: Vec<VolumeSummary>,
    pub interrupted: bool,
}

impl RunSummary {
    pub fn new(
        candidates: &[FileCandidate],
        global_cap: usize,
        scans: &[VolumeScan],
        phases: Vec<PhaseResult>,
        total: Duration,
    ) -> Self {
        Self {
            candidates: candidates.len(),
            total_bytes: candidates.iter().map(|c| c.size_bytes).sum(),
            global_cap,
            phases,
            total,
            volumes: scans.iter().map(VolumeSummary::from).collect(),
            interrupted: scans.iter().any(|s| s.interrupted),
        }
    }

    /// Duration of the named phase, zero if it was not recorded.
    pub fn phase(&self, name: &str) -> Duration {
        self.phases
            .iter()
            .find(|p| p.name == name)
            .map(|p| p.duration)
            .unwrap_or_default()
    }

    pub fn total_errors(&self) -> u64 {
        self.volumes.iter().map(|v| v.stats.errors).sum()
    }
}

/// Formats a duration as `H:MM:SS`, dropping fractional seconds.
pub fn format_elapsed(duration: Duration) -> String {
    let secs = duration.as_secs();
    format!("{}:{:02}:{:02}", secs / 3600, (secs / 60) % 60, secs % 60)
}

/// Saves the run summary as pretty-printed JSON.
pub fn save_stats_json(path: &Path, summary: &RunSummary) -> Result<()> {
    let stats = serde_json::json!({
        "summary": summary,
        "timestamp": chrono::Local::now().to_rfc3339(),
    });
    let body = serde_json::to_string_pretty(&stats).context("Failed to serialize run stats")?;
    std::fs::write(path, body)
        .with_context(|| format!("Failed to write stats to {}", path.display()))?;
    Ok(())
}

/// Runs a block inside a [`PhaseTimer`] and yields `(value, PhaseResult)`.
///
/// # Example
/// ```rust
/// use rubig::time_phase;
///
/// let (answer, timing) = time_phase!("Relatórios", { 42 });
/// assert_eq!(answer, 42);
/// assert_eq!(timing.name, "Relatórios");
/// ```
#[macro_export]
macro_rules! time_phase {
    ($name:expr, $code:block) => {{
        let timer = $crate::metrics::PhaseTimer::new($name);
        let result = $code;
        let timing = timer.finish();
        (result, timing)
    }};
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Local;
    use std::thread;

    #[test]
    fn test_phase_timer_measures_sleep() {
        let timer = PhaseTimer::new("Escaneamento");
        thread::sleep(Duration::from_millis(10));
        assert!(timer.elapsed() >= Duration::from_millis(10));

        let phase = timer.finish();
        assert_eq!(phase.name, "Escaneamento");
        assert!(phase.duration >= Duration::from_millis(10));
    }

    #[test]
    fn test_format_elapsed() {
        assert_eq!(format_elapsed(Duration::ZERO), "0:00:00");
        assert_eq!(format_elapsed(Duration::from_millis(59_999)), "0:00:59");
        assert_eq!(format_elapsed(Duration::from_secs(3_723)), "1:02:03");
        assert_eq!(format_elapsed(Duration::from_secs(36_000)), "10:00:00");
    }

    #[test]
    fn test_run_summary_totals() {
        let candidates = vec![
            FileCandidate::new(PathBuf::from("/a"), 300, Local::now()),
            FileCandidate::new(PathBuf::from("/b"), 200, Local::now()),
        ];
        let phases = vec![PhaseResult {
            name: "scan".to_string(),
            duration: Duration::from_millis(1500),
        }];

        let summary = RunSummary::new(&candidates, 10, &[], phases, Duration::from_secs(2));
        assert_eq!(summary.candidates, 2);
        assert_eq!(summary.total_bytes, 500);
        assert_eq!(summary.phase("scan"), Duration::from_millis(1500));
        assert_eq!(summary.phase("missing"), Duration::ZERO);
        assert!(!summary.interrupted);
    }

    #[test]
    fn test_save_stats_json() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("stats.json");
        let summary = RunSummary::new(&[], 0, &[], Vec::new(), Duration::from_millis(1234));

        save_stats_json(&path, &summary).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["summary"]["total"], 1234);
        assert_eq!(value["summary"]["candidates"], 0);
    }

    #[test]
    fn test_time_phase_yields_block_value() {
        let (written, phase) = crate::time_phase!("Geração de relatórios", {
            thread::sleep(Duration::from_millis(5));
            vec!["txt", "csv"]
        });

        assert_eq!(written, ["txt", "csv"]);
        assert_eq!(phase.name, "Geração de relatórios");
        assert!(phase.duration >= Duration::from_millis(5));
    }
}
