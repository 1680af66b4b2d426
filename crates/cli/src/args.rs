//! Command-line arguments.

use clap::Parser;
use std::path::PathBuf;

use mediaconv_core::{BatchSettings, Config};

#[derive(Debug, Parser)]
#[command(name = "mediaconv")]
#[command(version, about = "Batch-convert media files with ffmpeg", long_about = None)]
pub struct Cli {
    /// Input file or folder
    #[arg(short, long, value_name = "PATH", required_unless_present = "list_formats")]
    pub input: Option<PathBuf>,

    /// Output folder (created if missing)
    #[arg(short, long, value_name = "DIR", required_unless_present = "list_formats")]
    pub output: Option<PathBuf>,

    /// Target format, one of `--list-formats`
    #[arg(short, long)]
    pub format: Option<String>,

    /// Transcoder executable
    #[arg(long, value_name = "PATH")]
    pub ffmpeg: Option<PathBuf>,

    /// The input is a folder
    #[arg(long)]
    pub folder: bool,

    /// Descend into subfolders (folder input only)
    #[arg(short, long)]
    pub recursive: bool,

    /// Convert only files whose output already exists, replacing it
    #[arg(long)]
    pub overwrite: bool,

    /// Treat a non-zero transcoder exit as a failed file
    #[arg(long)]
    pub check_exit_status: bool,

    /// Answer yes to the folder/file mismatch question
    #[arg(short = 'y', long)]
    pub yes: bool,

    /// Print the formats the transcoder supports and exit
    #[arg(long)]
    pub list_formats: bool,

    /// Print the batch summary as JSON
    #[arg(long)]
    pub json: bool,

    /// Configuration file
    #[arg(short, long, value_name = "FILE", env = "MEDIACONV_CONFIG")]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Folds command-line values over the loaded configuration.
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(path) = &self.ffmpeg {
            config.transcoder.path = path.clone();
        }
        if self.check_exit_status {
            config.transcoder.check_exit_status = true;
        }
        if let Some(format) = &self.format {
            config.batch.format = Some(format.clone());
        }
        config.batch.recursive |= self.recursive;
        config.batch.overwrite |= self.overwrite;
    }

    /// Batch parameters for the planner.
    pub fn settings(&self, config: &Config) -> BatchSettings {
        BatchSettings {
            transcoder: config.transcoder.path.clone(),
            input: self.input.clone().unwrap_or_default(),
            output: self.output.clone().unwrap_or_default(),
            format: config.batch.format.clone(),
            is_folder: self.folder,
            recursive: config.batch.recursive,
            overwrite: config.batch.overwrite,
        }
    }
}
