//! Terminal progress display for a running batch.

use indicatif::{ProgressBar, ProgressStyle};
use tracing::warn;

use mediaconv_core::{BatchEvent, BatchHandle, JobOutcome};

const TEMPLATE: &str = "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}";

fn progress_bar(total: usize, hidden: bool) -> ProgressBar {
    if hidden {
        return ProgressBar::hidden();
    }

    let bar = ProgressBar::new(total as u64);
    match ProgressStyle::default_bar().template(TEMPLATE) {
        Ok(style) => bar.set_style(style.progress_chars("█▓░")),
        Err(e) => warn!("Invalid progress template: {}", e),
    }
    bar
}

/// Drives a progress bar from the batch's events until it finishes.
pub async fn follow(handle: &mut BatchHandle, total: usize, hidden: bool) {
    let bar = progress_bar(total, hidden);

    while let Some(event) = handle.next_event().await {
        match event {
            BatchEvent::Progress(report) => {
                let name = report
                    .input
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default();

                if let JobOutcome::Failed { reason } = &report.outcome {
                    bar.suspend(|| warn!("{}: {}", report.input.display(), reason));
                }

                bar.set_position(report.completed as u64);
                bar.set_message(name);
            }
            BatchEvent::Finished(_) => bar.finish_and_clear(),
        }
    }
}
