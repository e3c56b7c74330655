//! Destination layout: `root/YYYY/MM/YYYYMMDD.<ext>`.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{Datelike, NaiveDate};

use crate::error::FetchError;

/// Path for `date` under `root`, without touching the filesystem.
pub fn destination_path(date: NaiveDate, root: &Path, extension: &str) -> PathBuf {
    month_dir(date, root).join(format!("{}.{}", date.format("%Y%m%d"), extension))
}

fn month_dir(date: NaiveDate, root: &Path) -> PathBuf {
    root.join(format!("{:04}", date.year()))
        .join(format!("{:02}", date.month()))
}

/// Returns the destination path for `date` and makes sure its month
/// directory exists. Safe to call concurrently for dates in the same month.
pub fn resolve_destination(
    date: NaiveDate,
    root: &Path,
    extension: &str,
) -> Result<PathBuf, FetchError> {
    let dir = month_dir(date, root);
    ensure_dir(&dir)?;
    Ok(destination_path(date, root, extension))
}

/// `create_dir_all`, treating a concurrent "already exists" as success.
pub(crate) fn ensure_dir(dir: &Path) -> Result<(), FetchError> {
    match fs::create_dir_all(dir) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists && dir.is_dir() => Ok(()),
        Err(e) => Err(FetchError::fs(dir, e)),
    }
}
