//! FFmpeg-based transcoder implementation.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Instant;
use tokio::process::Command;
use tracing::debug;

use super::error::TranscoderError;
use super::traits::Transcoder;
use super::types::Invocation;

/// Flag that makes ffmpeg print its container format table.
const FORMATS_FLAG: &str = "-formats";

/// FFmpeg-based transcoder implementation.
#[derive(Debug, Clone)]
pub struct FfmpegTranscoder {
    executable: PathBuf,
}

impl FfmpegTranscoder {
    /// Creates a transcoder invoking the given executable.
    pub fn new(executable: impl Into<PathBuf>) -> Self {
        Self {
            executable: executable.into(),
        }
    }

    /// Creates a transcoder that looks `ffmpeg` up on PATH.
    pub fn with_defaults() -> Self {
        Self::new("ffmpeg")
    }

    /// Builds the conversion arguments: `-i <input> <output>`.
    fn build_convert_args(input: &Path, output: &Path) -> Vec<std::ffi::OsString> {
        vec![
            "-i".into(),
            input.as_os_str().to_os_string(),
            output.as_os_str().to_os_string(),
        ]
    }
}

#[async_trait]
impl Transcoder for FfmpegTranscoder {
    fn name(&self) -> &str {
        "ffmpeg"
    }

    fn executable(&self) -> &Path {
        &self.executable
    }

    async fn list_formats(&self) -> Result<String, TranscoderError> {
        let output = Command::new(&self.executable)
            .arg(FORMATS_FLAG)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .output()
            .await
            .map_err(|e| TranscoderError::from_spawn(e, &self.executable))?;

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    async fn convert(&self, input: &Path, output: &Path) -> Result<Invocation, TranscoderError> {
        let start = Instant::now();

        // stdout/stderr stay attached so the transcoder's own report is visible.
        let status = Command::new(&self.executable)
            .args(Self::build_convert_args(input, output))
            .stdin(Stdio::null())
            .status()
            .await
            .map_err(|e| TranscoderError::from_spawn(e, &self.executable))?;

        let duration_ms = start.elapsed().as_millis() as u64;
        debug!(
            input = %input.display(),
            output = %output.display(),
            code = ?status.code(),
            duration_ms,
            "Transcoder exited"
        );

        Ok(Invocation {
            success: status.success(),
            exit_code: status.code(),
            duration_ms,
        })
    }
}
