//! Batch planning: validates user parameters and builds the job list.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, info};
use uuid::Uuid;

use crate::catalog::{FormatCatalog, FormatId};
use crate::enumerator::{enumerate, EnumerateError};
use crate::resolver::{resolve, ResolveError};
use crate::runner::{BatchRequest, ConversionJob, InputKind};

/// Parameters supplied by the user for one batch.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchSettings {
    /// Transcoder executable.
    pub transcoder: PathBuf,
    /// Input file or directory.
    pub input: PathBuf,
    /// Output directory.
    pub output: PathBuf,
    /// Target format identifier.
    pub format: Option<String>,
    /// The user says the input is a directory.
    pub is_folder: bool,
    /// Descend into subdirectories of a directory input.
    pub recursive: bool,
    /// Overwrite flag handed to the runner's skip policy.
    pub overwrite: bool,
}

/// The input's type on disk disagrees with the user's "is folder" choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassificationMismatch {
    /// Input is a directory but was not marked as a folder.
    DirectoryNotMarked,
    /// Input is a file but was marked as a folder.
    FileMarkedAsFolder,
}

impl fmt::Display for ClassificationMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DirectoryNotMarked => f.write_str(
                "input path is a folder but \"is folder\" is not set; continue as a folder?",
            ),
            Self::FileMarkedAsFolder => f.write_str(
                "input path is a file but \"is folder\" is set; continue as a single file?",
            ),
        }
    }
}

/// Reasons a batch cannot start.
#[derive(Debug, Error)]
pub enum PlanError {
    #[error("Input is empty")]
    EmptyInput,

    #[error("Output is empty, please enter a folder")]
    EmptyOutput,

    #[error("Output is not a folder, please enter a folder: {path}")]
    OutputNotDirectory { path: PathBuf },

    #[error("Failed to create output directory {path}: {source}")]
    OutputCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Please select an output format")]
    NoFormatSelected,

    #[error("Format {format:?} is not supported by the transcoder")]
    UnsupportedFormat { format: String },

    #[error("Input path not found: {path}")]
    InputNotFound { path: PathBuf },

    #[error("Batch not started: {0}")]
    Declined(ClassificationMismatch),

    #[error(transparent)]
    Enumerate(#[from] EnumerateError),

    #[error(transparent)]
    Resolve(#[from] ResolveError),
}

impl PlanError {
    /// Whether the error comes from the parameters rather than the filesystem.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::EmptyInput
                | Self::EmptyOutput
                | Self::OutputNotDirectory { .. }
                | Self::NoFormatSelected
                | Self::UnsupportedFormat { .. }
                | Self::InputNotFound { .. }
        )
    }
}

fn select_format(
    settings: &BatchSettings,
    catalog: &FormatCatalog,
) -> Result<FormatId, PlanError> {
    let format = settings
        .format
        .as_deref()
        .map(str::trim)
        .filter(|f| !f.is_empty())
        .ok_or(PlanError::NoFormatSelected)?;

    if !catalog.contains(format) {
        return Err(PlanError::UnsupportedFormat {
            format: format.to_string(),
        });
    }

    Ok(FormatId::new(format))
}

fn prepare_output(settings: &BatchSettings) -> Result<(), PlanError> {
    let output = &settings.output;
    if output.as_os_str().is_empty() {
        return Err(PlanError::EmptyOutput);
    }

    if !output.exists() {
        std::fs::create_dir_all(output).map_err(|e| PlanError::OutputCreate {
            path: output.clone(),
            source: e,
        })?;
        info!("Created output directory {}", output.display());
    }

    if !output.is_dir() {
        return Err(PlanError::OutputNotDirectory {
            path: output.clone(),
        });
    }

    Ok(())
}

/// Validates `settings` and builds the request for one batch run.
///
/// `confirm` is asked once when the input's type on disk disagrees with
/// `is_folder`; declining aborts with [`PlanError::Declined`], accepting
/// goes on with the type found on disk. The output directory is created
/// when missing.
pub fn plan<F>(
    settings: &BatchSettings,
    catalog: &FormatCatalog,
    confirm: F,
) -> Result<BatchRequest, PlanError>
where
    F: FnOnce(ClassificationMismatch) -> bool,
{
    if settings.input.as_os_str().is_empty() {
        return Err(PlanError::EmptyInput);
    }

    prepare_output(settings)?;
    let format = select_format(settings, catalog)?;

    let input_is_dir = match std::fs::metadata(&settings.input) {
        Ok(meta) => meta.is_dir(),
        Err(_) => {
            return Err(PlanError::InputNotFound {
                path: settings.input.clone(),
            })
        }
    };

    let mismatch = match (input_is_dir, settings.is_folder) {
        (true, false) => Some(ClassificationMismatch::DirectoryNotMarked),
        (false, true) => Some(ClassificationMismatch::FileMarkedAsFolder),
        _ => None,
    };
    if let Some(mismatch) = mismatch {
        if !confirm(mismatch) {
            return Err(PlanError::Declined(mismatch));
        }
        debug!("Classification mismatch accepted: {:?}", mismatch);
    }

    let input_kind = if input_is_dir {
        InputKind::Directory
    } else {
        InputKind::File
    };

    let files = enumerate(&settings.input, settings.recursive, catalog)?;
    let jobs = files
        .into_iter()
        .map(|input| {
            let output = resolve(
                &input,
                &settings.input,
                &settings.output,
                format.as_str(),
                input_kind.is_directory(),
            )?;
            Ok(ConversionJob { input, output })
        })
        .collect::<Result<Vec<_>, ResolveError>>()?;

    info!(
        input = %settings.input.display(),
        kind = ?input_kind,
        format = %format,
        jobs = jobs.len(),
        "Planned batch"
    );

    Ok(BatchRequest {
        id: Uuid::new_v4(),
        transcoder: settings.transcoder.clone(),
        input_root: settings.input.clone(),
        output_root: settings.output.clone(),
        format,
        input_kind,
        recursive: settings.recursive,
        overwrite: settings.overwrite,
        jobs,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn catalog() -> FormatCatalog {
        ["mp4", "mkv", "avi", "mov"].into_iter().collect()
    }

    fn workspace() -> TempDir {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in");
        fs::create_dir_all(input.join("a")).unwrap();
        fs::write(input.join("top.mov"), b"").unwrap();
        fs::write(input.join("a").join("b.mp4"), b"").unwrap();
        fs::write(input.join("skip.txt"), b"").unwrap();
        dir
    }

    fn settings(root: &Path) -> BatchSettings {
        BatchSettings {
            transcoder: PathBuf::from("ffmpeg"),
            input: root.join("in"),
            output: root.join("out"),
            format: Some("mkv".to_string()),
            is_folder: true,
            recursive: true,
            overwrite: false,
        }
    }

    fn never(_: ClassificationMismatch) -> bool {
        panic!("confirmation not expected")
    }

    #[test]
    fn test_plan_directory_recursive() {
        let dir = workspace();
        let settings = settings(dir.path());

        let request = plan(&settings, &catalog(), never).unwrap();

        assert_eq!(request.input_kind, InputKind::Directory);
        assert_eq!(request.format.as_str(), "mkv");
        assert!(dir.path().join("out").is_dir());
        let outputs: Vec<PathBuf> = request.jobs.iter().map(|j| j.output.clone()).collect();
        assert_eq!(
            outputs,
            vec![
                dir.path().join("out").join("top.mkv"),
                dir.path().join("out").join("a").join("b.mkv"),
            ]
        );
        assert!(request
            .jobs
            .iter()
            .all(|j| j.output.starts_with(&request.output_root)));
    }

    #[test]
    fn test_plan_single_file() {
        let dir = workspace();
        let mut settings = settings(dir.path());
        settings.input = dir.path().join("in").join("skip.txt");
        settings.is_folder = false;

        let request = plan(&settings, &catalog(), never).unwrap();

        assert_eq!(request.input_kind, InputKind::File);
        assert_eq!(request.jobs.len(), 1);
        assert_eq!(
            request.jobs[0].output,
            dir.path().join("out").join("skip.mkv")
        );
    }

    #[test]
    fn test_validation_errors() {
        let dir = workspace();

        let mut s = settings(dir.path());
        s.input = PathBuf::new();
        assert!(matches!(plan(&s, &catalog(), never), Err(PlanError::EmptyInput)));

        let mut s = settings(dir.path());
        s.output = PathBuf::new();
        assert!(matches!(plan(&s, &catalog(), never), Err(PlanError::EmptyOutput)));

        let mut s = settings(dir.path());
        s.format = None;
        assert!(matches!(
            plan(&s, &catalog(), never),
            Err(PlanError::NoFormatSelected)
        ));

        let mut s = settings(dir.path());
        s.format = Some("   ".to_string());
        assert!(matches!(
            plan(&s, &catalog(), never),
            Err(PlanError::NoFormatSelected)
        ));

        let mut s = settings(dir.path());
        s.format = Some("xyz".to_string());
        assert!(matches!(
            plan(&s, &catalog(), never),
            Err(PlanError::UnsupportedFormat { .. })
        ));

        let mut s = settings(dir.path());
        s.input = dir.path().join("missing");
        assert!(matches!(
            plan(&s, &catalog(), never),
            Err(PlanError::InputNotFound { .. })
        ));
    }

    #[test]
    fn test_output_must_be_directory() {
        let dir = workspace();
        let mut s = settings(dir.path());
        s.output = dir.path().join("in").join("top.mov");

        let err = plan(&s, &catalog(), never).unwrap_err();
        assert!(matches!(err, PlanError::OutputNotDirectory { .. }));
        assert!(err.is_validation());
    }

    #[test]
    fn test_empty_catalog_rejects_any_format() {
        let dir = workspace();
        let err = plan(&settings(dir.path()), &FormatCatalog::default(), never).unwrap_err();
        assert!(matches!(err, PlanError::UnsupportedFormat { .. }));
    }

    #[test]
    fn test_directory_not_marked_asks_and_continues() {
        let dir = workspace();
        let mut s = settings(dir.path());
        s.is_folder = false;
        s.recursive = false;

        let mut asked = None;
        let request = plan(&s, &catalog(), |m| {
            asked = Some(m);
            true
        })
        .unwrap();

        assert_eq!(asked, Some(ClassificationMismatch::DirectoryNotMarked));
        assert_eq!(request.input_kind, InputKind::Directory);
        assert_eq!(request.jobs.len(), 1);
    }

    #[test]
    fn test_file_marked_as_folder_declined() {
        let dir = workspace();
        let mut s = settings(dir.path());
        s.input = dir.path().join("in").join("top.mov");

        let err = plan(&s, &catalog(), |_| false).unwrap_err();
        assert!(matches!(
            err,
            PlanError::Declined(ClassificationMismatch::FileMarkedAsFolder)
        ));
    }
}
