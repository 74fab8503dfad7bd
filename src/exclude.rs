//! Directory exclusion rules applied before descent.
//!
//! Two static sets of lowercase directory names are defined here:
//! - [`BASE_EXCLUSIONS`]: system, recycle, VCS, package-cache, temp and build folders
//! - [`FAST_EXCLUSIONS`]: large user-data folders, added only in [`TraversalMode::Fast`]
//!
//! User-supplied patterns (`--exclude`) are compiled into a case-insensitive
//! [`GlobSet`] and matched against the directory name as well.

use crate::data::TraversalMode;
use anyhow::{Context, Result};
use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use once_cell::sync::Lazy;
use std::collections::HashSet;
use std::ffi::OsStr;

/// Directory names skipped in every mode.
pub const BASE_EXCLUSIONS: &[&str] = &[
    "system volume information",
    "$recycle.bin",
    "windows",
    "program files",
    "program files (x86)",
    "programdata",
    "$windows.~bt",
    "$windows.~ws",
    "windowsapps",
    "winsxs",
    "appdata",
    ".git",
    ".svn",
    "node_modules",
    "__pycache__",
    ".cache",
    ".npm",
    ".nuget",
    "temp",
    "tmp",
    ".vs",
    ".vscode-server",
    "packages",
    "obj",
    "bin",
];

/// Directory names additionally skipped in fast mode.
pub const FAST_EXCLUSIONS: &[&str] = &[
    "documents",
    "desktop",
    "downloads",
    "pictures",
    "music",
    "videos",
    "onedrive",
    "dropbox",
    "google drive",
    "icloud",
    ".minecraft",
    "steamapps",
    "%localappdata%",
    "%appdata%",
];

static BASE_SET: Lazy<HashSet<&'static str>> =
    Lazy::new(|| BASE_EXCLUSIONS.iter().copied().collect());

static FAST_SET: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    BASE_EXCLUSIONS
        .iter()
        .chain(FAST_EXCLUSIONS)
        .copied()
        .collect()
});

/// The effective exclusion rules for one scan.
#[derive(Debug, Clone)]
pub struct ExclusionSet {
    names: &'static HashSet<&'static str>,
    patterns: GlobSet,
}

impl ExclusionSet {
    /// Builds the rules for `mode` without user patterns.
    pub fn for_mode(mode: TraversalMode) -> Self {
        Self {
            names: static_set(mode),
            patterns: GlobSet::empty(),
        }
    }

    /// Builds the rules for `mode` plus user-supplied glob patterns.
    ///
    /// # Errors
    /// Returns an error if any pattern is not a valid glob.
    pub fn with_patterns(mode: TraversalMode, patterns: &[String]) -> Result<Self> {
        Ok(Self {
            names: static_set(mode),
            patterns: build_exclude_matcher(patterns)?,
        })
    }

    /// Returns true if a directory with this name must not be descended into.
    ///
    /// The comparison is case-insensitive: `Node_Modules` matches `node_modules`.
    pub fn is_excluded(&self, name: &OsStr) -> bool {
        let lower = name.to_string_lossy().to_lowercase();
        self.names.contains(lower.as_str()) || self.patterns.is_match(&lower)
    }
}

fn static_set(mode: TraversalMode) -> &'static HashSet<&'static str> {
    match mode {
        TraversalMode::Fast => &*FAST_SET,
        TraversalMode::Full => &*BASE_SET,
    }
}

/// Compiles directory-name glob patterns into a case-insensitive `GlobSet`.
///
/// Patterns are trimmed and trailing slashes are dropped, so `target/` and
/// `target` behave the same. Empty patterns are ignored.
pub fn build_exclude_matcher(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let pattern = pattern.trim().trim_end_matches('/');
        if pattern.is_empty() {
            continue;
        }
        let glob = GlobBuilder::new(pattern)
            .case_insensitive(true)
            .build()
            .with_context(|| format!("Invalid glob pattern: '{}'", pattern))?;
        builder.add(glob);
    }
    builder.build().context("Failed to build glob set")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_names_excluded_in_both_modes() {
        for mode in [TraversalMode::Fast, TraversalMode::Full] {
            let set = ExclusionSet::for_mode(mode);
            assert!(set.is_excluded(OsStr::new("node_modules")));
            assert!(set.is_excluded(OsStr::new("$Recycle.Bin")));
            assert!(set.is_excluded(OsStr::new("Program Files (x86)")));
        }
    }

    #[test]
    fn test_mixed_case_is_excluded() {
        let set = ExclusionSet::for_mode(TraversalMode::Full);
        assert!(set.is_excluded(OsStr::new("Node_Modules")));
        assert!(set.is_excluded(OsStr::new("TEMP")));
    }

    #[test]
    fn test_fast_only_names() {
        let fast = ExclusionSet::for_mode(TraversalMode::Fast);
        let full = ExclusionSet::for_mode(TraversalMode::Full);

        assert!(fast.is_excluded(OsStr::new("Documents")));
        assert!(fast.is_excluded(OsStr::new("Google Drive")));
        assert!(!full.is_excluded(OsStr::new("Documents")));
        assert!(!full.is_excluded(OsStr::new("steamapps")));
    }

    #[test]
    fn test_fast_set_is_superset_of_base() {
        assert!(BASE_SET.is_subset(&FAST_SET));
        assert_eq!(FAST_SET.len(), BASE_EXCLUSIONS.len() + FAST_EXCLUSIONS.len());
    }

    #[test]
    fn test_unrelated_names_pass() {
        let set = ExclusionSet::for_mode(TraversalMode::Fast);
        assert!(!set.is_excluded(OsStr::new("projects")));
        assert!(!set.is_excluded(OsStr::new("binaries")));
    }

    #[test]
    fn test_user_patterns() {
        let patterns = vec!["target".to_string(), "*.bak".to_string(), "vms/".to_string()];
        let set = ExclusionSet::with_patterns(TraversalMode::Full, &patterns).unwrap();

        assert!(set.is_excluded(OsStr::new("Target")));
        assert!(set.is_excluded(OsStr::new("old.BAK")));
        assert!(set.is_excluded(OsStr::new("vms")));
        assert!(!set.is_excluded(OsStr::new("src")));
    }

    #[test]
    fn test_build_exclude_matcher_invalid_pattern() {
        let patterns = vec!["[invalid".to_string()];
        assert!(build_exclude_matcher(&patterns).is_err());
    }
}
