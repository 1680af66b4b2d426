//! Test fixture for running the `mediaconv` binary against a fake transcoder.
//!
//! The fake is a shell script that answers `-formats` with a small listing
//! and, for `-i <in> <out>`, writes a marker file at `<out>`.

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::{Output, Stdio};
use std::time::Duration;

use tempfile::TempDir;

const FAKE_TRANSCODER: &str = r#"#!/bin/sh
if [ "$1" = "-formats" ]; then
cat <<'LISTING'
File formats:
 D. = Demuxing supported
 .E = Muxing supported
 --
 DE avi             AVI (Audio Video Interleaved)
 DE matroska,webm   Matroska / WebM
  E mkv             raw Matroska
 DE mov             QuickTime / MOV
 DE mp4             MP4 (MPEG-4 Part 14)
LISTING
exit 0
fi
if [ "$1" = "-i" ]; then
  echo converted > "$3"
  exit 0
fi
exit 1
"#;

/// Temporary input/output tree plus the fake transcoder.
pub struct Workspace {
    pub dir: TempDir,
    pub transcoder: PathBuf,
}

impl Workspace {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let transcoder = dir.path().join("fake-ffmpeg");
        fs::write(&transcoder, FAKE_TRANSCODER).unwrap();
        fs::set_permissions(&transcoder, fs::Permissions::from_mode(0o755)).unwrap();

        fs::create_dir_all(dir.path().join("in")).unwrap();
        Self { dir, transcoder }
    }

    pub fn input(&self) -> PathBuf {
        self.dir.path().join("in")
    }

    pub fn output(&self) -> PathBuf {
        self.dir.path().join("out")
    }

    /// Creates an empty file under the input directory.
    pub fn add_input(&self, relative: &str) -> PathBuf {
        let path = self.input().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, b"").unwrap();
        path
    }

    /// Runs the binary with `--ffmpeg` pointing at the fake transcoder.
    pub async fn run(&self, args: &[&str]) -> Output {
        run_with(&self.transcoder, args).await
    }
}

pub async fn run_with(transcoder: &Path, args: &[&str]) -> Output {
    let child = tokio::process::Command::new(env!("CARGO_BIN_EXE_mediaconv"))
        .arg("--ffmpeg")
        .arg(transcoder)
        .args(args)
        .env("RUST_LOG", "error") // Quiet logs during tests
        .env_remove("MEDIACONV_CONFIG")
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .expect("Failed to spawn mediaconv");

    tokio::time::timeout(Duration::from_secs(30), child.wait_with_output())
        .await
        .expect("mediaconv did not finish in time")
        .expect("Failed to collect mediaconv output")
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}
