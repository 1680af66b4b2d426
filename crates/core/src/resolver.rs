//! Output path derivation.

use std::ffi::OsString;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while deriving an output path.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// Input file does not live under the input root.
    #[error("{file} is not inside input root {root}")]
    NotUnderRoot { file: PathBuf, root: PathBuf },

    /// Relative path would leave the output root.
    #[error("{path} would be written outside the output directory")]
    EscapesOutputRoot { path: PathBuf },

    /// Input path has no file name to derive an output name from.
    #[error("Input path has no file name: {path}")]
    NoFileName { path: PathBuf },

    /// Target format cannot be used as an extension.
    #[error("Invalid target format: {format:?}")]
    InvalidFormat { format: String },
}

fn validate_format(format: &str) -> Result<(), ResolveError> {
    if format.is_empty() || format.contains(['/', '\\']) {
        return Err(ResolveError::InvalidFormat {
            format: format.to_string(),
        });
    }
    Ok(())
}

/// Derives where the converted copy of `input_file` is written.
///
/// Directory mode keeps the file's path relative to `input_root` and joins
/// it under `output_root`. Single-file mode writes straight into
/// `output_root`. In both modes only the final extension is replaced by
/// `format`, so `show.s01.mp4` becomes `show.s01.<format>`.
pub fn resolve(
    input_file: &Path,
    input_root: &Path,
    output_root: &Path,
    format: &str,
    is_input_directory: bool,
) -> Result<PathBuf, ResolveError> {
    validate_format(format)?;

    if !is_input_directory {
        let stem = input_file
            .file_stem()
            .ok_or_else(|| ResolveError::NoFileName {
                path: input_file.to_path_buf(),
            })?;
        let mut name = OsString::from(stem);
        name.push(".");
        name.push(format);
        return Ok(output_root.join(name));
    }

    let relative =
        input_file
            .strip_prefix(input_root)
            .map_err(|_| ResolveError::NotUnderRoot {
                file: input_file.to_path_buf(),
                root: input_root.to_path_buf(),
            })?;

    if !relative
        .components()
        .all(|c| matches!(c, Component::Normal(_)))
    {
        return Err(ResolveError::EscapesOutputRoot {
            path: relative.to_path_buf(),
        });
    }

    if relative.file_name().is_none() {
        return Err(ResolveError::NoFileName {
            path: input_file.to_path_buf(),
        });
    }

    Ok(output_root.join(relative).with_extension(format))
}
