//! Error types for the transcoder module.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while invoking the external transcoder.
#[derive(Debug, Error)]
pub enum TranscoderError {
    /// Transcoder binary not found.
    #[error("Transcoder not found at path: {path}")]
    NotFound { path: PathBuf },

    /// Transcoder exited with a failure status.
    #[error("Transcoder exited with code {code:?} for {input}")]
    ExitFailure { input: PathBuf, code: Option<i32> },

    /// I/O error while spawning or waiting on the transcoder.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl TranscoderError {
    /// Maps a spawn error, turning `NotFound` into a dedicated variant.
    pub(crate) fn from_spawn(err: std::io::Error, path: &std::path::Path) -> Self {
        if err.kind() == std::io::ErrorKind::NotFound {
            Self::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            Self::Io(err)
        }
    }
}
