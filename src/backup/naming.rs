//! Bundle file naming
//!
//! Bundles are named `<prefix>_<YYYYMMDD_HHMMSS>.<ext>`. Every field is zero
//! padded so names sort lexically in creation order.

use chrono::{DateTime, Local, NaiveDateTime};

const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";
const TIMESTAMP_LEN: usize = 15;

/// Build the file name for a bundle created at `timestamp`
pub fn bundle_file_name(prefix: &str, timestamp: &DateTime<Local>, extension: &str) -> String {
    format!(
        "{}_{}.{}",
        prefix,
        timestamp.format(TIMESTAMP_FORMAT),
        extension
    )
}

/// Parse the timestamp out of a bundle file name
///
/// Returns `None` if `filename` was not produced by [`bundle_file_name`] for
/// this prefix and extension.
pub fn parse_bundle_timestamp(
    prefix: &str,
    extension: &str,
    filename: &str,
) -> Option<NaiveDateTime> {
    let stamp = filename
        .strip_prefix(prefix)?
        .strip_prefix('_')?
        .strip_suffix(extension)?
        .strip_suffix('.')?;

    if stamp.len() != TIMESTAMP_LEN {
        return None;
    }

    NaiveDateTime::parse_from_str(stamp, TIMESTAMP_FORMAT).ok()
}
