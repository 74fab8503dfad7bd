//! Error types for `rubig`.
//!
//! Recoverable failures are typed with `thiserror` so callers can decide how
//! to recover; anything unexpected is carried as `anyhow::Error` up to `main`.
//!
//! - [`EntryErrorKind`]: classification of a per-entry traversal failure
//! - [`ScanError`]: the root of a volume could not be opened
//! - [`SelectionError`]: the user's volume selection could not be parsed

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Classification of a failure on a single filesystem entry.
///
/// Entry failures are always recovered: the entry is skipped and counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryErrorKind {
    /// The caller lacks permission to read the entry.
    PermissionDenied,
    /// The entry disappeared between listing and stat.
    Vanished,
    /// Any other I/O fault.
    Io,
}

impl EntryErrorKind {
    pub fn from_io(err: &io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::PermissionDenied => EntryErrorKind::PermissionDenied,
            io::ErrorKind::NotFound => EntryErrorKind::Vanished,
            _ => EntryErrorKind::Io,
        }
    }

    /// Classifies a walkdir error. Loop errors count as generic I/O faults.
    pub fn from_walkdir(err: &walkdir::Error) -> Self {
        err.io_error().map(Self::from_io).unwrap_or(EntryErrorKind::Io)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EntryErrorKind::PermissionDenied => "permission denied",
            EntryErrorKind::Vanished => "vanished",
            EntryErrorKind::Io => "i/o error",
        }
    }
}

/// The root of a volume could not be opened. Non-fatal: the volume's scan
/// ends early and the other volumes are unaffected.
#[derive(Debug, Error)]
#[error("Erro ao acessar {}: {}", .volume.display(), .cause)]
pub struct ScanError {
    pub volume: PathBuf,
    #[source]
    pub cause: io::Error,
}

impl ScanError {
    pub fn new(volume: impl Into<PathBuf>, cause: io::Error) -> Self {
        Self {
            volume: volume.into(),
            cause,
        }
    }

    /// Builds a root error from a walkdir failure, keeping the underlying
    /// I/O error when there is one.
    pub fn from_walkdir(volume: impl Into<PathBuf>, err: walkdir::Error) -> Self {
        let cause = match err.into_io_error() {
            Some(io_err) => io_err,
            None => io::Error::other("filesystem loop at root"),
        };
        Self::new(volume, cause)
    }
}

/// Invalid volume selection. The caller re-prompts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("'{0}' não é um número; digite números separados por vírgula (ex: 1,2)")]
    InvalidToken(String),
    #[error("índice {index} fora do intervalo; digite números entre 1 e {max}")]
    OutOfRange { index: i64, max: usize },
    #[error("nenhum disco disponível para seleção")]
    NoVolumes,
}
