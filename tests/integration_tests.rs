use rubig::aggregate::aggregate;
use rubig::data::BYTES_PER_GB;
use rubig::observer::{ObservedEvent, RecordingObserver};
use rubig::scan::traverse_quiet;
use rubig::{Interrupt, ScanConfig, Scanner, TraversalMode, VolumeScan};
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Creates a sparse file of `len` bytes; no blocks are allocated.
fn sparse_file(path: &Path, len: u64) {
    let file = File::create(path).expect("Failed to create sparse file");
    file.set_len(len).expect("Failed to extend sparse file");
}

fn gb_fraction(numerator: u64, denominator: u64) -> u64 {
    BYTES_PER_GB * numerator / denominator
}

fn paths(scan: &VolumeScan) -> Vec<PathBuf> {
    scan.candidates.iter().map(|c| c.path.clone()).collect()
}

#[test]
fn test_multi_gigabyte_tree_with_symlink() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let root = temp_dir.path().join("volume");
    let outside = temp_dir.path().join("outside");
    fs::create_dir_all(root.join("media")).unwrap();
    fs::create_dir_all(&outside).unwrap();

    // volume/
    // ├── small.bin          0.5 GB
    // ├── media/medium.bin   1.5 GB
    // ├── large.bin          3 GB
    // └── link.bin -> ../outside/huge.bin (10 GB)
    sparse_file(&root.join("small.bin"), gb_fraction(1, 2));
    sparse_file(&root.join("media").join("medium.bin"), gb_fraction(3, 2));
    sparse_file(&root.join("large.bin"), 3 * BYTES_PER_GB);
    sparse_file(&outside.join("huge.bin"), 10 * BYTES_PER_GB);
    #[cfg(unix)]
    std::os::unix::fs::symlink(outside.join("huge.bin"), root.join("link.bin")).unwrap();

    let config = ScanConfig::from_gb(1.0, 50, TraversalMode::Fast);
    let scan = traverse_quiet(&root, &config).expect("Failed to scan");

    assert!(scan.is_complete());
    assert_eq!(
        paths(&scan),
        vec![root.join("large.bin"), root.join("media").join("medium.bin")]
    );
    assert_eq!(scan.candidates[0].size_bytes, 3 * BYTES_PER_GB);
    assert_eq!(scan.candidates[1].size_bytes, gb_fraction(3, 2));
    assert_eq!(scan.stats.candidates_found, 2);
}

#[test]
fn test_large_file_notice_for_files_over_five_gb() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    sparse_file(&temp_dir.path().join("disk.img"), 6 * BYTES_PER_GB);
    sparse_file(&temp_dir.path().join("backup.tar"), 2 * BYTES_PER_GB);

    let scanner = Scanner::new(ScanConfig::from_gb(1.0, 10, TraversalMode::Full)).unwrap();
    let observer = RecordingObserver::new();
    let scan = scanner.traverse(temp_dir.path(), &observer, &Interrupt::new());

    assert_eq!(scan.candidates.len(), 2);
    let notices: Vec<PathBuf> = observer
        .events()
        .into_iter()
        .filter_map(|event| match event {
            ObservedEvent::LargeFile(path) => Some(path),
            _ => None,
        })
        .collect();
    assert_eq!(notices, vec![temp_dir.path().join("disk.img")]);
}

#[test]
fn test_repeated_scans_are_identical() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    for dir in ["a", "b", "c"] {
        let sub = temp_dir.path().join(dir);
        fs::create_dir(&sub).unwrap();
        for i in 0..4 {
            fs::write(sub.join(format!("f{}.dat", i)), vec![0u8; 1000]).unwrap();
        }
    }

    let config = ScanConfig::new(500, 5, TraversalMode::Full);
    let first = traverse_quiet(temp_dir.path(), &config).unwrap();
    let second = traverse_quiet(temp_dir.path(), &config).unwrap();

    assert_eq!(first.candidates, second.candidates);
    assert_eq!(first.stats, second.stats);
    assert_eq!(first.candidates.len(), 5);
    // Equal sizes keep encounter order, which is sorted by file name.
    assert_eq!(first.candidates[0].path, temp_dir.path().join("a").join("f0.dat"));
    assert_eq!(first.candidates[4].path, temp_dir.path().join("b").join("f0.dat"));
}

#[test]
fn test_fast_results_are_subset_of_full() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let root = temp_dir.path();
    for dir in ["Documents", "Downloads", "Projects", "node_modules", ".git", "Videos"] {
        fs::create_dir(root.join(dir)).unwrap();
        fs::write(root.join(dir).join("payload.bin"), vec![0u8; 2048]).unwrap();
    }

    let fast = traverse_quiet(root, &ScanConfig::new(1024, 100, TraversalMode::Fast)).unwrap();
    let full = traverse_quiet(root, &ScanConfig::new(1024, 100, TraversalMode::Full)).unwrap();

    let full_paths = paths(&full);
    assert!(paths(&fast).iter().all(|p| full_paths.contains(p)));
    assert!(fast.candidates.len() < full.candidates.len());
    assert!(!full_paths.contains(&root.join("node_modules").join("payload.bin")));
    assert!(!full_paths.contains(&root.join(".git").join("payload.bin")));
    assert!(!paths(&fast).contains(&root.join("Documents").join("payload.bin")));
    assert!(full_paths.contains(&root.join("Documents").join("payload.bin")));
    assert_eq!(paths(&fast), vec![root.join("Projects").join("payload.bin")]);
}

#[test]
fn test_exclusions_ignore_case_at_any_depth() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let deep = temp_dir.path().join("projects").join("web").join("Node_Modules");
    fs::create_dir_all(&deep).unwrap();
    fs::write(deep.join("bundle.js"), vec![0u8; 4096]).unwrap();
    fs::write(
        temp_dir.path().join("projects").join("web").join("app.js"),
        vec![0u8; 4096],
    )
    .unwrap();

    let scan = traverse_quiet(temp_dir.path(), &ScanConfig::new(1, 10, TraversalMode::Full)).unwrap();

    assert_eq!(
        paths(&scan),
        vec![temp_dir.path().join("projects").join("web").join("app.js")]
    );
}

#[test]
fn test_user_exclusion_patterns() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    for dir in ["target", "build-cache", "src"] {
        fs::create_dir(temp_dir.path().join(dir)).unwrap();
        fs::write(temp_dir.path().join(dir).join("out.o"), vec![0u8; 100]).unwrap();
    }

    let config = ScanConfig::new(1, 10, TraversalMode::Full)
        .with_exclusions(vec!["target".to_string(), "BUILD-*".to_string()]);
    let scan = traverse_quiet(temp_dir.path(), &config).unwrap();

    assert_eq!(paths(&scan), vec![temp_dir.path().join("src").join("out.o")]);
}

#[test]
fn test_missing_root_is_reported_not_raised() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let missing = temp_dir.path().join("unplugged");

    let scan = traverse_quiet(&missing, &ScanConfig::new(1, 10, TraversalMode::Full)).unwrap();

    assert!(scan.candidates.is_empty());
    let error = scan.error.expect("root failure should be reported");
    assert_eq!(error.volume, missing);
}

#[test]
fn test_aggregate_across_volumes_respects_global_cap() {
    let first = TempDir::new().unwrap();
    let second = TempDir::new().unwrap();
    for (dir, sizes) in [(&first, [500usize, 300, 100]), (&second, [400, 200, 50])] {
        for (i, size) in sizes.iter().enumerate() {
            fs::write(dir.path().join(format!("f{}", i)), vec![0u8; *size]).unwrap();
        }
    }

    let config = ScanConfig::new(100, 2, TraversalMode::Full);
    let scans = vec![
        traverse_quiet(first.path(), &config).unwrap(),
        traverse_quiet(second.path(), &config).unwrap(),
    ];
    let ranked = aggregate(&scans, 3);

    let sizes: Vec<u64> = ranked.iter().map(|c| c.size_bytes).collect();
    assert_eq!(sizes, vec![500, 400, 300]);
    // Per-volume caps are applied before the global one.
    assert!(ranked.iter().all(|c| c.size_bytes != 100));
}

/// Locks a directory with mode `000` and unlocks it again on drop so the
/// temp dir can be cleaned up.
#[cfg(unix)]
struct LockedDir(PathBuf);

#[cfg(unix)]
impl LockedDir {
    /// Returns `None` when the lock has no effect (running as root).
    fn lock(path: &Path) -> Option<Self> {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o000)).unwrap();
        let locked = LockedDir(path.to_path_buf());
        if fs::read_dir(path).is_ok() {
            eprintln!("skipping: permissions are not enforced for this user");
            return None;
        }
        Some(locked)
    }
}

#[cfg(unix)]
impl Drop for LockedDir {
    fn drop(&mut self) {
        use std::os::unix::fs::PermissionsExt;
        let _ = fs::set_permissions(&self.0, fs::Permissions::from_mode(0o755));
    }
}

#[cfg(unix)]
#[test]
fn test_unreadable_subdirectory_is_counted_and_skipped() {
    use rubig::EntryErrorKind;

    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let locked = temp_dir.path().join("locked");
    fs::create_dir(&locked).unwrap();
    fs::write(locked.join("hidden.bin"), vec![0u8; 100]).unwrap();
    fs::write(temp_dir.path().join("ok.bin"), vec![0u8; 100]).unwrap();
    let Some(_guard) = LockedDir::lock(&locked) else {
        return;
    };

    let scanner = Scanner::new(ScanConfig::new(1, 10, TraversalMode::Full)).unwrap();
    let observer = RecordingObserver::new();
    let scan = scanner.traverse(temp_dir.path(), &observer, &Interrupt::new());

    assert!(scan.error.is_none());
    assert_eq!(scan.stats.errors, 1);
    assert_eq!(paths(&scan), vec![temp_dir.path().join("ok.bin")]);
    assert!(
        observer
            .events()
            .contains(&ObservedEvent::EntryError(EntryErrorKind::PermissionDenied))
    );
}

#[cfg(unix)]
#[test]
fn test_unreadable_root_is_a_scan_error() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let root = temp_dir.path().join("rootlocked");
    fs::create_dir(&root).unwrap();
    fs::write(root.join("inside.bin"), vec![0u8; 100]).unwrap();
    let Some(_guard) = LockedDir::lock(&root) else {
        return;
    };

    let scan = traverse_quiet(&root, &ScanConfig::new(1, 10, TraversalMode::Full)).unwrap();

    let error = scan.error.as_ref().expect("root failure should be reported");
    assert_eq!(error.volume, root);
    assert_eq!(error.cause.kind(), std::io::ErrorKind::PermissionDenied);
    assert!(scan.candidates.is_empty());
    assert_eq!(scan.stats.errors, 0);
    assert!(!scan.is_complete());
}
