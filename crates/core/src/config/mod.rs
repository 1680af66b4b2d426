//! Layered configuration: built-in defaults, an optional TOML file, then
//! `MEDIACONV_*` environment variables.

mod loader;
mod types;
mod validate;

pub use loader::{load_config, load_config_from_str, load_default_config};
pub use types::*;
pub use validate::validate_config;

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config file {} does not exist", .0.display())]
    FileNotFound(PathBuf),

    #[error("Invalid configuration: {0}")]
    ParseError(String),

    #[error("{0}")]
    ValidationError(String),
}
