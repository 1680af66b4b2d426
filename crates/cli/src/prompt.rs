//! Confirmation prompt for folder/file mismatches.

use dialoguer::Confirm;
use tracing::warn;

use mediaconv_core::ClassificationMismatch;

/// Asks whether the batch should go on despite `mismatch`.
///
/// With `assume_yes` nothing is asked. Without a terminal to ask on, the
/// answer is no.
pub fn confirm_mismatch(mismatch: ClassificationMismatch, assume_yes: bool) -> bool {
    if assume_yes {
        return true;
    }

    match Confirm::new()
        .with_prompt(capitalize(&mismatch.to_string()))
        .default(false)
        .interact()
    {
        Ok(answer) => answer,
        Err(e) => {
            warn!("Cannot ask for confirmation ({}); pass --yes to continue", e);
            false
        }
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
