//! Selection of the feed file to process.
//!
//! Feed files are named `<prefix>_<YYMMDD>_<suffix>.sw0`, e.g.
//! `I_171021_T057.sw0`. The latest file is the one with the greatest date
//! segment.

use crate::error::{FeedError, Result};
use log::{debug, info};
use std::fs;
use std::path::{Path, PathBuf};

/// Extension every feed file carries.
pub const FEED_FILE_EXTENSION: &str = ".sw0";

/// Returns the date segment of a valid feed file name.
///
/// A name is valid when it ends with [`FEED_FILE_EXTENSION`], contains
/// exactly two underscores and the segment between them is all digits.
pub fn feed_date(file_name: &str) -> Option<u64> {
    if !file_name.ends_with(FEED_FILE_EXTENSION) {
        return None;
    }

    let mut parts = file_name.split('_');
    let (_, date, _) = (parts.next()?, parts.next()?, parts.next()?);
    if parts.next().is_some() {
        return None;
    }

    if date.is_empty() || !date.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    date.parse().ok()
}

/// Picks the latest feed file name from `candidates`.
///
/// Invalid names are ignored. When several names share the latest date the
/// first one wins.
pub fn select_latest<'a, I>(candidates: I) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut latest: Option<(u64, &'a str)> = None;

    for name in candidates {
        let Some(date) = feed_date(name) else {
            debug!("Ignoring non-feed file {}", name);
            continue;
        };

        match latest {
            Some((best, _)) if date <= best => {}
            _ => latest = Some((date, name)),
        }
    }

    latest.map(|(_, name)| name)
}

/// Finds the latest feed file in `dir`.
///
/// Entries are considered in sorted name order so the result does not
/// depend on directory iteration order.
pub fn latest_in_dir(dir: &Path) -> Result<PathBuf> {
    let mut names = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        if let Ok(name) = entry.file_name().into_string() {
            names.push(name);
        }
    }
    names.sort();

    let latest = select_latest(names.iter().map(String::as_str)).ok_or_else(|| {
        FeedError::NoInputFile {
            path: dir.to_path_buf(),
        }
    })?;

    info!("Exchange rates file name: {}", latest);
    Ok(dir.join(latest))
}
