//! Format catalog - the container formats the transcoder can produce.
//!
//! The catalog is built once at startup from the transcoder's `-formats`
//! table and then only read: it filters enumerated input files and gates the
//! target format a batch may select.

mod parser;
mod types;

pub use parser::{parse_entry, parse_formats_listing, HEADER_LINES};
pub use types::{FormatCatalog, FormatId};

use tracing::{info, warn};

use crate::transcoder::Transcoder;

/// Queries the transcoder for its supported formats.
///
/// Never fails: a missing executable or unparseable output yields an empty
/// catalog, which callers treat as "no formats available".
pub async fn load_supported_formats<T>(transcoder: &T) -> FormatCatalog
where
    T: Transcoder + ?Sized,
{
    let listing = match transcoder.list_formats().await {
        Ok(listing) => listing,
        Err(e) => {
            warn!(
                executable = %transcoder.executable().display(),
                "Failed to list transcoder formats: {}",
                e
            );
            return FormatCatalog::default();
        }
    };

    let catalog = parse_formats_listing(&listing);
    if catalog.is_empty() {
        warn!(
            executable = %transcoder.executable().display(),
            "Transcoder reported no usable formats"
        );
    } else {
        info!("Loaded {} formats from {}", catalog.len(), transcoder.name());
    }

    catalog
}
