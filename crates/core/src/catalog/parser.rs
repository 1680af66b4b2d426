//! Parser for the transcoder's `-formats` table.
//!
//! The table looks like:
//!
//! ```text
//! File formats:
//!  D. = Demuxing supported
//!  .E = Muxing supported
//!  --
//!  D  3dostr          3DO STR
//!   E 3g2             3GP2 (3GP2 format)
//!  DE matroska,webm   Matroska / WebM
//! ```
//!
//! Newer builds add a third capability column (`d` for devices) and an
//! extra legend line, so the header is skipped up to the dashed separator
//! when one is present.

use once_cell::sync::Lazy;
use regex_lite::Regex;

use super::types::{FormatCatalog, FormatId};

/// Header lines skipped when the listing has no dashed separator.
pub const HEADER_LINES: usize = 4;

/// Separator between multiple names sharing one table row.
const MULTI_VALUE_SEPARATOR: char = ',';

/// Capability markers followed by the format token.
static ENTRY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*[DEd.]{1,3}\s+([A-Za-z0-9_]\S*)").expect("valid regex"));

fn is_separator(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.len() >= 2 && trimmed.chars().all(|c| c == '-')
}

/// Extracts the format token from one table row.
///
/// Returns `None` for malformed rows and rows listing several names.
pub fn parse_entry(line: &str) -> Option<FormatId> {
    let caps = ENTRY_RE.captures(line)?;
    let token = caps.get(1)?.as_str();

    if token.contains(MULTI_VALUE_SEPARATOR) {
        return None;
    }

    Some(FormatId::new(token))
}

/// Parses a full `-formats` listing into a catalog.
pub fn parse_formats_listing(listing: &str) -> FormatCatalog {
    let lines: Vec<&str> = listing.lines().collect();

    let body_start = lines
        .iter()
        .position(|line| is_separator(line))
        .map(|idx| idx + 1)
        .unwrap_or(HEADER_LINES);

    lines
        .iter()
        .skip(body_start)
        .filter_map(|line| parse_entry(line))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const CLASSIC_LISTING: &str = "File formats:
 D. = Demuxing supported
 .E = Muxing supported
 --
 D  3dostr          3DO STR
  E 3g2             3GP2 (3GP2 format)
 DE avi             AVI (Audio Video Interleaved)
 DE matroska,webm   Matroska / WebM
  E mkv             Matroska
 D  mov,mp4,m4a,3gp,3g2,mj2 QuickTime / MOV
  E mp4             MP4 (MPEG-4 Part 14)
";

    const DEVICE_LISTING: &str = "Formats:
 D.. = Demuxing supported
 .E. = Muxing supported
 ..d = Is a device
 ---
 D   aac             raw ADTS AAC (Advanced Audio Coding)
 DEd alsa            ALSA audio output
 DE  flac            raw FLAC
 DE  ogg             Ogg
";

    #[test]
    fn test_parse_classic_listing() {
        let catalog = parse_formats_listing(CLASSIC_LISTING);
        let names: Vec<&str> = catalog.iter().map(|f| f.as_str()).collect();
        assert_eq!(names, vec!["3dostr", "3g2", "avi", "mkv", "mp4"]);
    }

    #[test]
    fn test_parse_excludes_header_noise() {
        let catalog = parse_formats_listing(CLASSIC_LISTING);
        assert!(!catalog.contains("File"));
        assert!(!catalog.contains("="));
        assert!(!catalog.contains("--"));
    }

    #[test]
    fn test_parse_excludes_multi_value_rows() {
        let catalog = parse_formats_listing(CLASSIC_LISTING);
        assert!(!catalog.contains("matroska,webm"));
        assert!(!catalog.contains("matroska"));
        assert!(!catalog.contains("mov"));
    }

    #[test]
    fn test_parse_three_column_listing() {
        let catalog = parse_formats_listing(DEVICE_LISTING);
        assert_eq!(catalog.len(), 4);
        assert!(catalog.contains("aac"));
        assert!(catalog.contains("alsa"));
        assert!(catalog.contains("flac"));
        assert!(catalog.contains("ogg"));
    }

    #[test]
    fn test_parse_windows_line_endings() {
        let listing = CLASSIC_LISTING.replace('\n', "\r\n");
        let catalog = parse_formats_listing(&listing);
        assert_eq!(catalog.len(), 5);
        assert!(catalog.contains("avi"));
    }

    #[test]
    fn test_parse_without_separator_skips_fixed_header() {
        let listing = "one\ntwo\nthree\nfour\n DE wav   WAV / WAVE\n";
        let catalog = parse_formats_listing(listing);
        assert_eq!(catalog.len(), 1);
        assert!(catalog.contains("wav"));
    }

    #[test]
    fn test_parse_empty_and_garbage() {
        assert!(parse_formats_listing("").is_empty());
        assert!(parse_formats_listing("ffmpeg: command not found\n").is_empty());
    }

    #[test]
    fn test_parse_entry() {
        assert_eq!(parse_entry(" DE avi   AVI").unwrap().as_str(), "avi");
        assert_eq!(parse_entry("  E mp4   MP4").unwrap().as_str(), "mp4");
        assert!(parse_entry(" DE matroska,webm Matroska").is_none());
        assert!(parse_entry(" D. = Demuxing supported").is_none());
        assert!(parse_entry("").is_none());
    }
}
