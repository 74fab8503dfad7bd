//! Volume enumeration using `sysinfo`.
//!
//! Lists mounted volumes with their capacity figures. Volumes whose mount
//! point the current user may not query are left out silently: that is a
//! discoverability policy, not a scan error.

use crate::data::Volume;
use std::fs;
use std::io;
use std::path::Path;
use sysinfo::{Disk, Disks};

/// Enumerate all mounted volumes the current user can query.
///
/// Returns an empty vec when the platform reports no disks.
pub fn list_volumes() -> Vec<Volume> {
    let disks = Disks::new_with_refreshed_list();
    let volumes: Vec<Volume> = disks
        .list()
        .iter()
        .filter(|disk| is_queryable(disk.mount_point()))
        .map(volume_from_disk)
        .collect();

    tracing::debug!("{} volume(s) enumerated", volumes.len());
    volumes
}

/// Builds a [`Volume`] snapshot from a `sysinfo` disk.
///
/// The device name is used as identifier; when the platform reports none,
/// the mount point stands in.
fn volume_from_disk(disk: &Disk) -> Volume {
    let mount = disk.mount_point();
    let name = disk.name().to_string_lossy();
    let identifier = if name.trim().is_empty() {
        mount.display().to_string()
    } else {
        name.into_owned()
    };

    Volume::from_usage(
        identifier,
        mount,
        disk.file_system().to_string_lossy().into_owned(),
        disk.total_space(),
        disk.available_space(),
    )
}

/// A mount point is skipped only when querying it is denied; any other
/// failure is left for the scanner to report.
fn is_queryable(mount: &Path) -> bool {
    match fs::metadata(mount) {
        Err(err) if err.kind() == io::ErrorKind::PermissionDenied => {
            tracing::debug!("Ignorando {} (sem permissão)", mount.display());
            false
        }
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_volumes_snapshots_are_consistent() {
        for volume in list_volumes() {
            assert_eq!(volume.used_bytes + volume.free_bytes, volume.total_bytes);
            assert!((0.0..=100.0).contains(&volume.used_percent));
            assert!(!volume.identifier.is_empty());
        }
    }

    #[test]
    fn test_existing_directory_is_queryable() {
        let dir = tempfile::TempDir::new().unwrap();
        assert!(is_queryable(dir.path()));
    }

    #[test]
    fn test_missing_mount_is_left_to_the_scanner() {
        assert!(is_queryable(Path::new("/definitely/not/mounted/here")));
    }
}
