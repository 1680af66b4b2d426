//! Runner configuration.

use serde::{Deserialize, Serialize};

use crate::config::Config;

/// Configuration for the batch runner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunnerConfig {
    /// Count a non-zero transcoder exit as a failed job.
    /// When disabled every finished invocation counts as converted.
    #[serde(default)]
    pub check_exit_status: bool,

    /// Capacity of the progress event channel.
    #[serde(default = "default_event_buffer")]
    pub event_buffer: usize,
}

fn default_event_buffer() -> usize {
    64
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            check_exit_status: false,
            event_buffer: default_event_buffer(),
        }
    }
}

impl From<&Config> for RunnerConfig {
    fn from(config: &Config) -> Self {
        Self {
            check_exit_status: config.transcoder.check_exit_status,
            event_buffer: config.batch.event_buffer.max(1),
        }
    }
}
