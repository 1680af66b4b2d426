//! Transcoder module wrapping the external conversion executable.
//!
//! The `Transcoder` trait is the seam between the batch runner and the
//! process that does the real work. `FfmpegTranscoder` launches ffmpeg:
//!
//! - `ffmpeg -formats` to list the supported container formats
//! - `ffmpeg -i <input> <output>` to convert one file
//!
//! # Example
//!
//! ```ignore
//! use mediaconv_core::{FfmpegTranscoder, Transcoder};
//!
//! let ffmpeg = FfmpegTranscoder::new("/usr/bin/ffmpeg");
//! let invocation = ffmpeg.convert(Path::new("in.mov"), Path::new("out.mkv")).await?;
//! println!("exit code: {:?}", invocation.exit_code);
//! ```

mod error;
mod ffmpeg;
#[cfg(test)]
pub(crate) mod mock;
mod traits;
mod types;

pub use error::TranscoderError;
pub use ffmpeg::FfmpegTranscoder;
pub use traits::Transcoder;
pub use types::Invocation;
