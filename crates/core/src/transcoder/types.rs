//! Types for the transcoder module.

use serde::{Deserialize, Serialize};

/// Result of one completed transcoder invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invocation {
    /// Whether the process exited successfully.
    pub success: bool,
    /// Exit code, if the process exited normally.
    pub exit_code: Option<i32>,
    /// Wall time spent waiting on the process.
    pub duration_ms: u64,
}
