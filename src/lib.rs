//! Library crate for rubig
//!
//! Finds the largest files on the mounted volumes and writes them to a text
//! report and a CSV report. The binary is a thin wrapper around [`app`].
//!
//! # Modules
//!
//! - [`data`]: Core data structures (`Volume`, `FileCandidate`, `ScanConfig`)
//! - [`volumes`]: Mounted volume enumeration
//! - [`select`]: Parsing of the volume selection
//! - [`scan`]: The traversal engine
//! - [`exclude`]: Directory exclusion lists and user patterns
//! - [`aggregate`]: Merging, ranking and capping of candidates
//! - [`runner`]: Sequential or parallel scanning of the selected volumes
//! - [`output`]: Text, CSV and terminal formatters
//! - [`observer`]: Progress and diagnostic events raised during a scan
//! - [`app`]: The end-to-end flow driven by [`cli::Args`] and the prompts

pub mod aggregate;
pub mod app;
pub mod cli;
pub mod data;
pub mod error;
pub mod exclude;
pub mod interrupt;
pub mod logging;
pub mod metrics;
pub mod observer;
pub mod output;
pub mod prompt;
pub mod runner;
pub mod scan;
pub mod select;
pub mod thread_pool;
pub mod volumes;

pub use cli::Args;
pub use data::{FileCandidate, ScanConfig, ScanStats, TraversalMode, Volume};
pub use error::{EntryErrorKind, ScanError, SelectionError};
pub use interrupt::Interrupt;
pub use scan::{Scanner, VolumeScan};
