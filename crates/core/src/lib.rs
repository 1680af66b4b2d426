pub mod catalog;
pub mod config;
pub mod enumerator;
pub mod planner;
pub mod resolver;
pub mod runner;
pub mod transcoder;

pub use catalog::{load_supported_formats, parse_formats_listing, FormatCatalog, FormatId};
pub use config::{
    load_config, load_config_from_str, load_default_config, validate_config, BatchConfig, Config,
    ConfigError, TranscoderConfig,
};
pub use enumerator::{enumerate, EnumerateError};
pub use planner::{plan, BatchSettings, ClassificationMismatch, PlanError};
pub use resolver::{resolve, ResolveError};
pub use runner::{
    should_convert, BatchEvent, BatchHandle, BatchRequest, BatchRunner, BatchSummary,
    CancellationToken, ConversionJob, InputKind, JobOutcome, JobReport, RunState, RunnerConfig,
    RunnerError,
};
pub use transcoder::{FfmpegTranscoder, Invocation, Transcoder, TranscoderError};
