//! CLI interface definitions for the `rubig` application.
//!
//! Every flag is optional. A flag that is given answers the matching
//! interactive question; anything left out is asked on the terminal.
//!
//! # Example
//!
//! ```bash
//! rubig --volumes 1,2 --mode full --min-size-gb 0.5 --max-files 100
//! rubig --path /srv/media --mode full --parallel --output-dir /tmp/reports
//! ```

use crate::data::TraversalMode;
use crate::runner::ExecutionMode;
use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments for the `rubig` large-file finder.
///
/// # Examples
///
/// ```rust
/// use clap::Parser;
/// use rubig::Args;
///
/// let args = Args::parse_from(["rubig", "--mode", "full", "--max-files", "10"]);
/// assert_eq!(args.max_files, Some(10));
/// ```
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "rubig", version, about)]
pub struct Args {
    /// Scan these directories instead of the mounted volumes (repeatable)
    #[arg(long = "path", value_name = "DIR")]
    pub paths: Vec<PathBuf>,

    /// Volumes to scan, e.g. "1,3" or "0" for all (skips the prompt)
    #[arg(long, value_name = "LIST")]
    pub volumes: Option<String>,

    /// Scan mode (skips the prompt)
    #[arg(long, value_enum)]
    pub mode: Option<TraversalMode>,

    /// Minimum file size in GB, 1024-based (skips the prompt)
    #[arg(long, value_name = "GB")]
    pub min_size_gb: Option<f64>,

    /// Maximum files kept per volume (skips the prompt)
    #[arg(long, value_name = "N")]
    pub max_files: Option<usize>,

    /// Maximum files in the final report (default: max files × volumes)
    #[arg(long, value_name = "N")]
    pub global_cap: Option<usize>,

    /// Additional directory names or globs to skip (e.g. 'target', '*.bak')
    #[arg(long, value_name = "PATTERN", num_args = 1.., action = clap::ArgAction::Append)]
    pub exclude: Vec<String>,

    /// Scan volumes in parallel, one worker per volume
    #[arg(long, default_value_t = false)]
    pub parallel: bool,

    /// Limit the number of workers used with --parallel (default: CPU count)
    #[arg(long, value_name = "N")]
    pub threads: Option<usize>,

    /// Directory where the reports are written
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub output_dir: PathBuf,

    /// Also write run statistics as JSON to this file
    #[arg(long, value_name = "FILE")]
    pub stats_json: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only log warnings and errors; hide progress spinners
    #[arg(short, long, default_value_t = false)]
    pub quiet: bool,
}

impl Args {
    pub fn execution_mode(&self) -> ExecutionMode {
        if self.parallel {
            ExecutionMode::Parallel {
                max_threads: self.threads,
            }
        } else {
            ExecutionMode::Sequential
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["rubig"]);
        assert!(args.paths.is_empty());
        assert_eq!(args.mode, None);
        assert_eq!(args.output_dir, PathBuf::from("."));
        assert_eq!(args.execution_mode(), ExecutionMode::Sequential);
    }

    #[test]
    fn test_all_flags() {
        let args = Args::parse_from([
            "rubig",
            "--path",
            "/a",
            "--path",
            "/b",
            "--mode",
            "fast",
            "--min-size-gb",
            "2.5",
            "--max-files",
            "7",
            "--global-cap",
            "9",
            "--exclude",
            "target",
            "vendor",
            "--parallel",
            "--threads",
            "3",
            "-vv",
        ]);

        assert_eq!(args.paths, vec![PathBuf::from("/a"), PathBuf::from("/b")]);
        assert_eq!(args.mode, Some(TraversalMode::Fast));
        assert_eq!(args.min_size_gb, Some(2.5));
        assert_eq!(args.max_files, Some(7));
        assert_eq!(args.global_cap, Some(9));
        assert_eq!(args.exclude, vec!["target", "vendor"]);
        assert_eq!(args.verbose, 2);
        assert_eq!(
            args.execution_mode(),
            ExecutionMode::Parallel {
                max_threads: Some(3)
            }
        );
    }
}
