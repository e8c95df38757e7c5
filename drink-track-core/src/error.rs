//! Error types for catalog, ledger and storage operations.

use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by the tracker core.
///
/// `InvalidInput` is returned synchronously to the caller so the front end
/// can show a validation message. `Persistence` and `Parse` describe a
/// failing backing store; the `Tracker` logs them and keeps going with its
/// in-memory state.
#[derive(Error, Debug)]
pub enum TrackerError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("I/O error for {}: {message}", path.display())]
    Persistence { path: PathBuf, message: String },

    #[error("Failed to parse {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },
}

impl TrackerError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        TrackerError::InvalidInput(message.into())
    }

    /// True for the backing-store failures (I/O and parse).
    pub fn is_persistence(&self) -> bool {
        matches!(
            self,
            TrackerError::Persistence { .. } | TrackerError::Parse { .. }
        )
    }
}

pub type TrackerResult<T> = Result<T, TrackerError>;
