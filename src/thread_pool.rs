//! Worker pool for scanning volumes in parallel.
//!
//! Each volume is an independent subtree, so one worker per volume is
//! enough; the pool never has more workers than volumes. The pool is local
//! to the run rather than Rayon's global pool.

use anyhow::{Context, Result};
use rayon::ThreadPool;

/// Number of workers for `volume_count` volumes.
///
/// # Arguments
/// * `volume_count` - How many volumes will be scanned
/// * `max_threads` - Upper bound from `--threads`; `None` or `0` means the CPU count
pub fn volume_worker_count(volume_count: usize, max_threads: Option<usize>) -> usize {
    let cap = match max_threads {
        Some(n) if n > 0 => n,
        _ => num_cpus::get(),
    };
    volume_count.min(cap).max(1)
}

/// Builds a dedicated pool with `workers` threads.
pub fn build_volume_pool(workers: usize) -> Result<ThreadPool> {
    rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .thread_name(|i| format!("rubig-volume-{}", i))
        .build()
        .context("Failed to configure thread pool")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_worker_count_never_exceeds_volumes() {
        assert_eq!(volume_worker_count(2, Some(8)), 2);
        assert_eq!(volume_worker_count(5, Some(3)), 3);
    }

    #[test]
    fn test_worker_count_defaults_to_cpus() {
        let cpus = num_cpus::get();
        assert_eq!(volume_worker_count(usize::MAX, None), cpus);
        assert_eq!(volume_worker_count(usize::MAX, Some(0)), cpus);
    }

    #[test]
    fn test_worker_count_at_least_one() {
        assert_eq!(volume_worker_count(0, Some(4)), 1);
    }

    #[test]
    fn test_build_volume_pool() {
        let pool = build_volume_pool(2).unwrap();
        assert_eq!(pool.current_num_threads(), 2);
    }
}
