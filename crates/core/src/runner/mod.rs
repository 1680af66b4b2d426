//! Batch runner for sequential conversions.
//!
//! The runner owns a batch for the duration of one run:
//! - **Jobs**: processed strictly in order, one transcoder process at a time
//! - **Overwrite policy**: decides per job whether the transcoder runs
//! - **Cancellation**: cooperative, checked between jobs
//! - **Events**: one `Progress` per job, then a single `Finished`

mod batch;
mod cancel;
mod config;
mod policy;
mod types;

pub use batch::{BatchHandle, BatchRunner};
pub use cancel::CancellationToken;
pub use config::RunnerConfig;
pub use policy::should_convert;
pub use types::{
    BatchEvent, BatchRequest, BatchSummary, ConversionJob, InputKind, JobOutcome, JobReport,
    RunState, RunnerError,
};
