use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub transcoder: TranscoderConfig,
    #[serde(default)]
    pub batch: BatchConfig,
}

/// External transcoder configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TranscoderConfig {
    /// Path to the transcoder executable (looked up on PATH when bare).
    #[serde(default = "default_transcoder_path")]
    pub path: PathBuf,
    /// Treat a non-zero exit status as a failed job.
    ///
    /// Off by default: the exit status is not inspected and every
    /// invocation counts as converted.
    #[serde(default)]
    pub check_exit_status: bool,
}

impl Default for TranscoderConfig {
    fn default() -> Self {
        Self {
            path: default_transcoder_path(),
            check_exit_status: false,
        }
    }
}

fn default_transcoder_path() -> PathBuf {
    PathBuf::from("ffmpeg")
}

/// Defaults for a batch run, overridable from the command line
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BatchConfig {
    /// Target format identifier (e.g. "mkv").
    #[serde(default)]
    pub format: Option<String>,
    #[serde(default)]
    pub recursive: bool,
    #[serde(default)]
    pub overwrite: bool,
    /// Capacity of the progress event channel.
    #[serde(default = "default_event_buffer")]
    pub event_buffer: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            format: None,
            recursive: false,
            overwrite: false,
            event_buffer: default_event_buffer(),
        }
    }
}

fn default_event_buffer() -> usize {
    64
}
