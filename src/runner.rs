//! Runs the traversal engine over every selected volume.
//!
//! Sequential execution is the reference behavior: volumes are scanned one
//! after another in selection order. Parallel execution scans each volume on
//! its own worker; results are still returned in selection order, so the
//! aggregate is the same either way.

use crate::data::Volume;
use crate::interrupt::Interrupt;
use crate::observer::ScanObserver;
use crate::scan::{Scanner, VolumeScan};
use crate::thread_pool::{build_volume_pool, volume_worker_count};
use anyhow::Result;
use rayon::prelude::*;

/// How volumes are scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionMode {
    /// One volume at a time, in selection order.
    Sequential,
    /// One worker per volume, at most `max_threads` (`None` = CPU count).
    Parallel { max_threads: Option<usize> },
}

/// Scans every volume and returns one [`VolumeScan`] per volume, in order.
///
/// A root failure on one volume never affects the others. After an
/// interrupt, volumes that have not started yet are returned as empty,
/// interrupted scans.
pub fn scan_volumes(
    volumes: &[Volume],
    scanner: &Scanner,
    observer: &dyn ScanObserver,
    interrupt: &Interrupt,
    mode: ExecutionMode,
) -> Result<Vec<VolumeScan>> {
    let total = volumes.len();
    let scan_one = |index: usize, volume: &Volume| {
        observer.volume_started(index + 1, total, volume);
        scanner.traverse(&volume.mount_path, observer, interrupt)
    };

    match mode {
        ExecutionMode::Sequential => Ok(volumes
            .iter()
            .enumerate()
            .map(|(i, volume)| scan_one(i, volume))
            .collect()),
        ExecutionMode::Parallel { max_threads } => {
            let workers = volume_worker_count(total, max_threads);
            tracing::debug!("Escaneando {} disco(s) com {} worker(s)", total, workers);
            let pool = build_volume_pool(workers)?;
            Ok(pool.install(|| {
                volumes
                    .par_iter()
                    .enumerate()
                    .map(|(i, volume)| scan_one(i, volume))
                    .collect()
            }))
        }
    }
}
