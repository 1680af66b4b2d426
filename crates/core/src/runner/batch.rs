//! Batch runner implementation.
//!
//! Drives one batch through `Idle -> Running -> (Completed | Cancelled)`:
//! jobs run strictly one after another on a background task, each job is
//! followed by exactly one `Progress` event and the run ends with a single
//! `Finished` event.

use chrono::Utc;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tokio::sync::{mpsc, RwLock};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::transcoder::{Transcoder, TranscoderError};

use super::cancel::{ActiveGuard, CancellationToken};
use super::config::RunnerConfig;
use super::policy::should_convert;
use super::types::{
    BatchEvent, BatchRequest, BatchSummary, ConversionJob, JobOutcome, JobReport, RunState,
    RunnerError,
};

/// Runs conversion batches, one at a time.
pub struct BatchRunner<T: Transcoder> {
    config: RunnerConfig,
    transcoder: Arc<T>,
    active: Arc<AtomicBool>,
    state: Arc<RwLock<RunState>>,
}

/// Handle to a batch running in the background.
pub struct BatchHandle {
    events: mpsc::Receiver<BatchEvent>,
    cancel: CancellationToken,
    task: JoinHandle<BatchSummary>,
}

impl BatchHandle {
    /// Requests cancellation; takes effect before the next job starts.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// A token that cancels this batch, for use from another task.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Next event, or `None` once the batch has finished and every event
    /// has been received.
    pub async fn next_event(&mut self) -> Option<BatchEvent> {
        self.events.recv().await
    }

    /// Waits for the batch to end, discarding events not yet received.
    pub async fn wait(self) -> Result<BatchSummary, RunnerError> {
        drop(self.events);
        self.task
            .await
            .map_err(|e| RunnerError::TaskFailed(e.to_string()))
    }
}

/// Per-run tallies.
#[derive(Default)]
struct Tally {
    completed: usize,
    converted: usize,
    skipped: usize,
    failed: usize,
}

impl Tally {
    fn record(&mut self, outcome: &JobOutcome) {
        self.completed += 1;
        match outcome {
            JobOutcome::Converted { .. } => self.converted += 1,
            JobOutcome::Skipped { .. } => self.skipped += 1,
            JobOutcome::Failed { .. } => self.failed += 1,
        }
    }
}

impl<T: Transcoder + 'static> BatchRunner<T> {
    /// Creates a new runner using the given transcoder.
    pub fn new(config: RunnerConfig, transcoder: T) -> Self {
        Self::with_shared(config, Arc::new(transcoder))
    }

    /// Creates a runner sharing an existing transcoder.
    pub fn with_shared(config: RunnerConfig, transcoder: Arc<T>) -> Self {
        Self {
            config,
            transcoder,
            active: Arc::new(AtomicBool::new(false)),
            state: Arc::new(RwLock::new(RunState::Idle)),
        }
    }

    /// State of the most recent run.
    pub async fn state(&self) -> RunState {
        *self.state.read().await
    }

    /// Whether a batch is currently running.
    pub fn is_active(&self) -> bool {
        self.active.load(std::sync::atomic::Ordering::SeqCst)
    }

    /// Starts `request` on a background task.
    ///
    /// Fails without side effects when the request is empty or another
    /// batch is still running on this runner.
    pub fn start(&self, request: BatchRequest) -> Result<BatchHandle, RunnerError> {
        self.start_with_token(request, CancellationToken::new())
    }

    /// Starts `request`, observing an externally owned cancellation token.
    pub fn start_with_token(
        &self,
        request: BatchRequest,
        cancel: CancellationToken,
    ) -> Result<BatchHandle, RunnerError> {
        if request.is_empty() {
            return Err(RunnerError::EmptyBatch);
        }
        if request.transcoder.as_path() != self.transcoder.executable() {
            return Err(RunnerError::TranscoderMismatch {
                requested: request.transcoder,
                configured: self.transcoder.executable().to_path_buf(),
            });
        }

        let guard = ActiveGuard::acquire(&self.active).ok_or(RunnerError::AlreadyRunning)?;

        let (tx, rx) = mpsc::channel(self.config.event_buffer.max(1));
        let worker = Worker {
            transcoder: Arc::clone(&self.transcoder),
            check_exit_status: self.config.check_exit_status,
            state: Arc::clone(&self.state),
            events: tx,
        };
        let token = cancel.clone();

        let task = tokio::spawn(async move { worker.run(request, token, guard).await });

        Ok(BatchHandle {
            events: rx,
            cancel,
            task,
        })
    }
}

/// State moved into the background task.
struct Worker<T: Transcoder> {
    transcoder: Arc<T>,
    check_exit_status: bool,
    state: Arc<RwLock<RunState>>,
    events: mpsc::Sender<BatchEvent>,
}

impl<T: Transcoder> Worker<T> {
    async fn emit(&self, event: BatchEvent) {
        // A presentation layer that stopped listening does not stop the batch.
        let _ = self.events.send(event).await;
    }

    async fn run(
        self,
        request: BatchRequest,
        cancel: CancellationToken,
        guard: ActiveGuard,
    ) -> BatchSummary {
        let started_at = Utc::now();
        let total = request.total();
        *self.state.write().await = RunState::Running;

        info!(
            batch = %request.id,
            transcoder = %request.transcoder.display(),
            format = %request.format,
            total,
            overwrite = request.overwrite,
            "Starting batch"
        );

        let mut tally = Tally::default();
        let mut final_state = RunState::Completed;

        for (index, job) in request.jobs.iter().enumerate() {
            if cancel.is_cancelled() {
                info!(
                    batch = %request.id,
                    "Batch cancelled after {} of {} jobs",
                    tally.completed,
                    total
                );
                final_state = RunState::Cancelled;
                break;
            }

            let outcome = self.process(job, request.overwrite).await;
            tally.record(&outcome);

            self.emit(BatchEvent::Progress(JobReport {
                index,
                completed: tally.completed,
                total,
                input: job.input.clone(),
                output: job.output.clone(),
                outcome,
            }))
            .await;
        }

        *self.state.write().await = final_state;
        // The runner accepts a new batch before `Finished` reaches anyone.
        drop(guard);

        let summary = BatchSummary {
            id: request.id,
            state: final_state,
            total,
            completed: tally.completed,
            converted: tally.converted,
            skipped: tally.skipped,
            failed: tally.failed,
            started_at,
            finished_at: Utc::now(),
        };

        info!(
            batch = %request.id,
            state = ?summary.state,
            converted = summary.converted,
            skipped = summary.skipped,
            failed = summary.failed,
            "Batch finished"
        );

        self.emit(BatchEvent::Finished(summary.clone())).await;
        summary
    }

    /// Applies the overwrite policy and runs the transcoder for one job.
    async fn process(&self, job: &ConversionJob, overwrite: bool) -> JobOutcome {
        let exists = match tokio::fs::try_exists(&job.output).await {
            Ok(exists) => exists,
            Err(e) => return self.fail(job, format!("cannot check output: {}", e)),
        };

        if !should_convert(overwrite, exists) {
            debug!(
                input = %job.input.display(),
                output_exists = exists,
                "Skipping job"
            );
            return JobOutcome::Skipped {
                output_exists: exists,
            };
        }

        // Existing output is deleted before the transcoder runs.
        if exists {
            if let Err(e) = tokio::fs::remove_file(&job.output).await {
                return self.fail(job, format!("cannot remove existing output: {}", e));
            }
        }

        if let Err(e) = ensure_parent(&job.output).await {
            return self.fail(job, format!("cannot create output directory: {}", e));
        }

        match self.transcoder.convert(&job.input, &job.output).await {
            Ok(invocation) if self.check_exit_status && !invocation.success => {
                let err = TranscoderError::ExitFailure {
                    input: job.input.clone(),
                    code: invocation.exit_code,
                };
                self.fail(job, err.to_string())
            }
            Ok(invocation) => JobOutcome::Converted {
                exit_code: invocation.exit_code,
                duration_ms: invocation.duration_ms,
            },
            Err(e) => self.fail(job, e.to_string()),
        }
    }

    fn fail(&self, job: &ConversionJob, reason: String) -> JobOutcome {
        warn!(input = %job.input.display(), "Job failed: {}", reason);
        JobOutcome::Failed { reason }
    }
}

async fn ensure_parent(path: &Path) -> std::io::Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => tokio::fs::create_dir_all(parent).await,
        _ => Ok(()),
    }
}
