//! Data structures shared by the scanner, the aggregator and the reports.
//!
//! This module defines the core types used throughout `rubig`:
//! - [`Volume`]: a snapshot of one mounted volume and its capacity figures
//! - [`FileCandidate`]: a regular file that met the size threshold
//! - [`ScanConfig`] / [`TraversalMode`]: the immutable knobs of a scan
//! - [`ScanStats`]: diagnostic counters accumulated during a traversal
//!
//! All size conversions use binary units: one GB is `1024³` bytes.

use chrono::{DateTime, Local};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Number of bytes in one (binary) gigabyte.
pub const BYTES_PER_GB: u64 = 1024 * 1024 * 1024;

/// Timestamp layout used by every report.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Converts a byte count to gigabytes (1024-based).
pub fn bytes_to_gb(bytes: u64) -> f64 {
    bytes as f64 / BYTES_PER_GB as f64
}

/// Converts gigabytes (1024-based) to a byte count, rounding up so that a
/// threshold never admits a file smaller than the requested size.
///
/// Negative and non-finite inputs map to zero.
pub fn gb_to_bytes(gb: f64) -> u64 {
    if !gb.is_finite() || gb <= 0.0 {
        return 0;
    }
    (gb * BYTES_PER_GB as f64).ceil() as u64
}

/// A mounted storage volume with its capacity accounting.
///
/// # Fields
/// * `identifier` - Device name or drive letter (e.g. `/dev/sda1`, `C:\`)
/// * `mount_path` - Where the volume is mounted; this is the traversal root
/// * `filesystem_type` - Filesystem name reported by the OS (e.g. `ext4`, `NTFS`)
/// * `total_bytes` / `used_bytes` / `free_bytes` - Capacity figures
/// * `used_percent` - Usage rounded to one decimal place
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Volume {
    pub identifier: String,
    pub mount_path: PathBuf,
    pub filesystem_type: String,
    pub total_bytes: u64,
    pub used_bytes: u64,
    pub free_bytes: u64,
    pub used_percent: f64,
}

impl Volume {
    /// Builds a snapshot from raw capacity numbers.
    ///
    /// `used_bytes` is derived as `total - free` and `used_percent` is
    /// rounded to one decimal place. A zero-sized volume reports 0%.
    ///
    /// `free_bytes` is the space available to unprivileged users, which is
    /// all `sysinfo` exposes. On filesystems with reserved blocks (ext4
    /// reserves 5% by default) the reserve therefore counts as used, and
    /// `used_percent` is higher than what `df` prints in its `Use%` column.
    pub fn from_usage(
        identifier: impl Into<String>,
        mount_path: impl Into<PathBuf>,
        filesystem_type: impl Into<String>,
        total_bytes: u64,
        free_bytes: u64,
    ) -> Self {
        let free_bytes = free_bytes.min(total_bytes);
        let used_bytes = total_bytes - free_bytes;
        let used_percent = if total_bytes > 0 {
            (used_bytes as f64 / total_bytes as f64 * 1000.0).round() / 10.0
        } else {
            0.0
        };

        Self {
            identifier: identifier.into(),
            mount_path: mount_path.into(),
            filesystem_type: filesystem_type.into(),
            total_bytes,
            used_bytes,
            free_bytes,
            used_percent,
        }
    }

    /// A volume standing in for an arbitrary directory given on the command
    /// line. Capacity figures are unknown and reported as zero.
    pub fn for_directory(path: &Path) -> Self {
        let display = path.display().to_string();
        Self::from_usage(display, path, "dir", 0, 0)
    }

    pub fn total_gb(&self) -> f64 {
        bytes_to_gb(self.total_bytes)
    }

    pub fn used_gb(&self) -> f64 {
        bytes_to_gb(self.used_bytes)
    }

    pub fn free_gb(&self) -> f64 {
        bytes_to_gb(self.free_bytes)
    }
}

/// A regular file whose size met the configured threshold.
///
/// Candidates are created once during traversal and never mutated; they are
/// moved from the scanner into the aggregator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileCandidate {
    pub path: PathBuf,
    pub size_bytes: u64,
    pub modified: DateTime<Local>,
}

impl FileCandidate {
    pub fn new(path: PathBuf, size_bytes: u64, modified: DateTime<Local>) -> Self {
        Self {
            path,
            size_bytes,
            modified,
        }
    }

    /// Size in binary gigabytes.
    pub fn size_gb(&self) -> f64 {
        bytes_to_gb(self.size_bytes)
    }

    /// Modification time formatted as `YYYY-MM-DD HH:MM:SS`.
    pub fn modified_display(&self) -> String {
        self.modified.format(TIMESTAMP_FORMAT).to_string()
    }
}

/// How aggressively the traversal prunes directories.
///
/// # Variants
/// * `Fast` - Also skips large user-data folders (documents, media, cloud sync, games)
/// * `Full` - Only skips system, cache and build folders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, clap::ValueEnum)]
pub enum TraversalMode {
    Fast,
    Full,
}

impl TraversalMode {
    /// Label used in logs and on the console.
    pub fn as_str(&self) -> &'static str {
        match self {
            TraversalMode::Fast => "RÁPIDO",
            TraversalMode::Full => "COMPLETO",
        }
    }

    /// Default minimum file size (GB) offered for this mode.
    pub fn default_min_size_gb(&self) -> f64 {
        match self {
            TraversalMode::Fast => 1.0,
            TraversalMode::Full => 0.5,
        }
    }
}

/// Immutable configuration for one scan.
///
/// # Fields
/// * `min_size_bytes` - Files smaller than this are ignored
/// * `max_results_per_volume` - Cap applied to each volume's sorted result
/// * `mode` - Which exclusion sets apply
/// * `extra_exclusions` - Additional directory-name glob patterns
#[derive(Debug, Clone, PartialEq)]
pub struct ScanConfig {
    pub min_size_bytes: u64,
    pub max_results_per_volume: usize,
    pub mode: TraversalMode,
    pub extra_exclusions: Vec<String>,
}

impl ScanConfig {
    pub fn new(min_size_bytes: u64, max_results_per_volume: usize, mode: TraversalMode) -> Self {
        Self {
            min_size_bytes,
            max_results_per_volume,
            mode,
            extra_exclusions: Vec::new(),
        }
    }

    /// Builds a config from a threshold expressed in binary gigabytes.
    pub fn from_gb(min_size_gb: f64, max_results_per_volume: usize, mode: TraversalMode) -> Self {
        Self::new(gb_to_bytes(min_size_gb), max_results_per_volume, mode)
    }

    pub fn with_exclusions(mut self, patterns: Vec<String>) -> Self {
        self.extra_exclusions = patterns;
        self
    }

    pub fn min_size_gb(&self) -> f64 {
        bytes_to_gb(self.min_size_bytes)
    }
}

/// Diagnostic counters for one traversal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScanStats {
    pub files_visited: u64,
    pub dirs_visited: u64,
    pub candidates_found: u64,
    pub errors: u64,
}
