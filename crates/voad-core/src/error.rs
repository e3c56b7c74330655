//! Error types shared across the fetch engine.
//!
//! Per-candidate misses never leave the fetcher; what escapes as `FetchError`
//! is structural and ends the batch.

use std::io;
use std::path::PathBuf;

use chrono::NaiveDate;
use thiserror::Error;

/// Structural failure during a single-date fetch.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Directory creation (other than "already exists") or part-file I/O failed.
    #[error("filesystem error at {}: {source}", .path.display())]
    Filesystem {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// The curl handle could not be configured at all.
    #[error("transport setup failed: {0}")]
    Transport(#[from] curl::Error),
}

impl FetchError {
    pub(crate) fn fs(path: impl Into<PathBuf>, source: io::Error) -> Self {
        FetchError::Filesystem {
            path: path.into(),
            source,
        }
    }
}

/// Rejected date range (caller-side validation, before any batch starts).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DateRangeError {
    #[error("end date {end} is earlier than start date {start}")]
    EndBeforeStart { start: NaiveDate, end: NaiveDate },
}

/// Invalid configuration values.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("mirror list is empty")]
    NoMirrors,
    #[error("time-code list is empty")]
    NoTimeCodes,
    #[error("suffix list is empty")]
    NoSuffixes,
    #[error("mirror host {0:?} is not an absolute http(s) URL")]
    BadMirror(String),
    #[error("{0} must be greater than zero")]
    Zero(&'static str),
}
