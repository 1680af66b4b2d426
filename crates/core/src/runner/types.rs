//! Types for the batch runner.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;
use uuid::Uuid;

use crate::catalog::FormatId;

/// Errors that can occur when starting or awaiting a batch.
#[derive(Debug, Error)]
pub enum RunnerError {
    /// Another batch is already running on this runner.
    #[error("a batch is already running")]
    AlreadyRunning,

    /// The request has no jobs.
    #[error("batch has no files to convert")]
    EmptyBatch,

    /// The request names a different executable than the runner's transcoder.
    #[error("batch requests transcoder {requested} but the runner uses {configured}")]
    TranscoderMismatch {
        requested: PathBuf,
        configured: PathBuf,
    },

    /// The background task panicked or was aborted.
    #[error("batch task failed: {0}")]
    TaskFailed(String),
}

/// Whether the batch input was a single file or a directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputKind {
    File,
    Directory,
}

impl InputKind {
    pub fn is_directory(self) -> bool {
        matches!(self, Self::Directory)
    }
}

/// One input file and the output it is converted into.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionJob {
    pub input: PathBuf,
    pub output: PathBuf,
}

/// Everything one batch run needs; immutable once built.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchRequest {
    /// Identifier used to correlate log lines of one run.
    pub id: Uuid,
    /// Transcoder executable the jobs are run with.
    pub transcoder: PathBuf,
    pub input_root: PathBuf,
    pub output_root: PathBuf,
    pub format: FormatId,
    pub input_kind: InputKind,
    pub recursive: bool,
    pub overwrite: bool,
    /// Jobs in processing order.
    pub jobs: Vec<ConversionJob>,
}

impl BatchRequest {
    pub fn total(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }
}

/// Lifecycle of a batch run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunState {
    Idle,
    Running,
    Completed,
    Cancelled,
}

impl RunState {
    /// Whether the run has ended.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }
}

/// What happened to a single job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum JobOutcome {
    /// The transcoder ran to completion.
    Converted {
        exit_code: Option<i32>,
        duration_ms: u64,
    },
    /// The overwrite policy left the job alone.
    Skipped { output_exists: bool },
    /// The job could not be run.
    Failed { reason: String },
}

/// Progress report emitted after each job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobReport {
    /// Zero-based position of the job in the batch.
    pub index: usize,
    /// Jobs processed so far, including this one.
    pub completed: usize,
    pub total: usize,
    pub input: PathBuf,
    pub output: PathBuf,
    pub outcome: JobOutcome,
}

/// Final report of a batch run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchSummary {
    pub id: Uuid,
    pub state: RunState,
    pub total: usize,
    /// Jobs processed (converted, skipped or failed).
    pub completed: usize,
    pub converted: usize,
    pub skipped: usize,
    pub failed: usize,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

/// Events a running batch sends to whoever presents it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum BatchEvent {
    /// One job finished; sent once per job, in order.
    Progress(JobReport),
    /// The batch ended; always the last event.
    Finished(BatchSummary),
}
