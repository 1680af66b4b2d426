//! In-memory transcoder used by unit tests.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tokio_util::sync::CancellationToken;

use super::error::TranscoderError;
use super::traits::Transcoder;
use super::types::Invocation;

/// Records every conversion and writes a small output file in its place.
pub(crate) struct MockTranscoder {
    executable: PathBuf,
    listing: Option<String>,
    exit_code: i32,
    calls: Mutex<Vec<(PathBuf, PathBuf)>>,
    cancel_after: Option<(usize, CancellationToken)>,
}

impl MockTranscoder {
    pub(crate) fn new() -> Self {
        Self {
            executable: PathBuf::from("mock-ffmpeg"),
            listing: None,
            exit_code: 0,
            calls: Mutex::new(Vec::new()),
            cancel_after: None,
        }
    }

    /// Text returned by `list_formats`; without it the call fails as if
    /// the executable were missing.
    pub(crate) fn with_listing(mut self, listing: &str) -> Self {
        self.listing = Some(listing.to_string());
        self
    }

    pub(crate) fn with_exit_code(mut self, code: i32) -> Self {
        self.exit_code = code;
        self
    }

    /// Cancels `token` once the `n`-th conversion has finished.
    pub(crate) fn cancel_after(mut self, n: usize, token: CancellationToken) -> Self {
        self.cancel_after = Some((n, token));
        self
    }

    pub(crate) fn calls(&self) -> Vec<(PathBuf, PathBuf)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transcoder for MockTranscoder {
    fn name(&self) -> &str {
        "mock"
    }

    fn executable(&self) -> &Path {
        &self.executable
    }

    async fn list_formats(&self) -> Result<String, TranscoderError> {
        self.listing
            .clone()
            .ok_or_else(|| TranscoderError::NotFound {
                path: self.executable.clone(),
            })
    }

    async fn convert(&self, input: &Path, output: &Path) -> Result<Invocation, TranscoderError> {
        tokio::fs::write(output, b"converted").await?;

        let count = {
            let mut calls = self.calls.lock().unwrap();
            calls.push((input.to_path_buf(), output.to_path_buf()));
            calls.len()
        };

        if let Some((n, token)) = &self.cancel_after {
            if count == *n {
                token.cancel();
            }
        }

        Ok(Invocation {
            success: self.exit_code == 0,
            exit_code: Some(self.exit_code),
            duration_ms: 1,
        })
    }
}
