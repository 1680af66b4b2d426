//! Trait definitions for the transcoder module.

use async_trait::async_trait;
use std::path::Path;

use super::error::TranscoderError;
use super::types::Invocation;

/// An external program that converts one media file into another.
///
/// Implementations only launch the process and wait for it; deciding
/// whether a job runs at all is the runner's business.
#[async_trait]
pub trait Transcoder: Send + Sync {
    /// Returns the name of this transcoder implementation.
    fn name(&self) -> &str;

    /// Path of the executable being invoked.
    fn executable(&self) -> &Path;

    /// Returns the raw text of the transcoder's format table.
    async fn list_formats(&self) -> Result<String, TranscoderError>;

    /// Converts `input` into `output`, blocking until the process exits.
    ///
    /// The exit status is reported in the returned [`Invocation`], never
    /// as an error; only a failure to launch or wait is an error.
    async fn convert(&self, input: &Path, output: &Path) -> Result<Invocation, TranscoderError>;
}
