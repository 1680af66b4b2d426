//! Input file enumeration.

use std::cmp::Ordering;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;
use walkdir::{DirEntry, WalkDir};

use crate::catalog::FormatCatalog;

/// Errors that can occur while listing input files.
#[derive(Debug, Error)]
pub enum EnumerateError {
    /// Input path does not exist.
    #[error("Input path not found: {path}")]
    NotFound { path: PathBuf },

    /// Failed to read the input path's metadata.
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to walk the input directory.
    #[error("Failed to walk input directory: {0}")]
    Walk(#[from] walkdir::Error),
}

/// Files before directories, then by name.
fn files_first(a: &DirEntry, b: &DirEntry) -> Ordering {
    let a_dir = a.file_type().is_dir();
    let b_dir = b.file_type().is_dir();
    a_dir
        .cmp(&b_dir)
        .then_with(|| a.file_name().cmp(b.file_name()))
}

/// Lists the files a batch should convert.
///
/// A single file is returned as-is whatever its extension. For a directory,
/// only files whose extension is in `catalog` are kept; with `recursive`
/// the walk is depth-first, each directory yielding its own files (in name
/// order) before descending into its subdirectories (in name order).
pub fn enumerate(
    path: &Path,
    recursive: bool,
    catalog: &FormatCatalog,
) -> Result<Vec<PathBuf>, EnumerateError> {
    let metadata = std::fs::metadata(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            EnumerateError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            EnumerateError::Io {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })?;

    if !metadata.is_dir() {
        return Ok(vec![path.to_path_buf()]);
    }

    let max_depth = if recursive { usize::MAX } else { 1 };
    let walker = WalkDir::new(path)
        .min_depth(1)
        .max_depth(max_depth)
        .follow_links(true)
        .sort_by(files_first);

    let mut files = Vec::new();
    for entry in walker {
        let entry = entry?;
        if entry.file_type().is_file() && catalog.accepts(entry.path()) {
            files.push(entry.into_path());
        }
    }

    debug!(
        root = %path.display(),
        recursive,
        count = files.len(),
        "Enumerated input files"
    );

    Ok(files)
}
