use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures surfaced by the session driver. None of these are downgraded to
/// a default: a missing seed or a failed save ends the current step.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("input sequence is empty")]
    EmptyInput,

    #[error("seed digits {digits:?} do not form a valid seed")]
    InvalidSeed { digits: String },

    #[error("failed to save session to {}", path.display())]
    SaveFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to load session: {0}")]
    LoadFailed(#[from] LoadError),

    #[error("session is over; no further input is accepted")]
    SessionOver,
}

/// Why a save slot could not be turned back into a session.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("no saved session at {}", path.display())]
    NoSave { path: PathBuf },

    #[error("save slot I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("save file is malformed: {message}")]
    Malformed { message: String },

    #[error("save file format version {found} is not supported")]
    UnsupportedVersion { found: u16 },

    #[error("save file checksum does not match its contents")]
    ChecksumMismatch,

    #[error("save file is inconsistent: {message}")]
    Inconsistent { message: String },
}
