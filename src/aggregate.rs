//! Merging of per-volume results into one globally ranked list.
//!
//! Both the scanner (per volume) and the aggregator (across volumes) rank
//! candidates with [`sort_by_size_desc`], a stable sort, so files of equal
//! size keep the order in which they were encountered.

use crate::data::FileCandidate;

/// Sorts candidates by size, largest first. Equal sizes keep their order.
pub fn sort_by_size_desc(candidates: &mut [FileCandidate]) {
    candidates.sort_by(|a, b| b.size_bytes.cmp(&a.size_bytes));
}

/// Sorts candidates by size (stable) and keeps at most `cap` of them.
pub fn rank_and_cap(candidates: &mut Vec<FileCandidate>, cap: usize) {
    sort_by_size_desc(candidates);
    candidates.truncate(cap);
}

/// The default report limit: `max_per_volume × volume_count`.
pub fn default_global_cap(max_per_volume: usize, volume_count: usize) -> usize {
    max_per_volume.saturating_mul(volume_count)
}

/// Concatenates per-volume results in volume order, ranks them globally and
/// keeps the `global_cap` largest.
///
/// The inputs are left untouched; a new vector is returned.
pub fn aggregate<S>(per_volume: &[S], global_cap: usize) -> Vec<FileCandidate>
where
    S: AsRef<[FileCandidate]>,
{
    let total: usize = per_volume.iter().map(|v| v.as_ref().len()).sum();
    let mut merged = Vec::with_capacity(total);
    for volume in per_volume {
        merged.extend_from_slice(volume.as_ref());
    }
    rank_and_cap(&mut merged, global_cap);
    merged
}
