//! Per-candidate attempt errors and their classification.

use std::fmt;
use std::io;

/// Why a single candidate did not produce a file.
#[derive(Debug)]
pub enum AttemptError {
    /// Could not configure the curl handle for this URL.
    Setup(curl::Error),
    /// Transfer failed (timeout, connection, DNS, reset mid-stream).
    Curl(curl::Error),
    /// Final response status was not 200.
    Http(u32),
    /// Writing the part file failed. Not a miss: ends the date (and the batch).
    Storage(io::Error),
    /// The stop signal was observed.
    Cancelled,
}

/// Coarse kind used for logging and for deciding whether to advance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptKind {
    /// Candidate does not exist (4xx/5xx or other non-200).
    Missing,
    Timeout,
    Connection,
    Cancelled,
    Storage,
    Other,
}

impl AttemptKind {
    /// True when the fetcher should move on to the next candidate.
    pub fn is_miss(self) -> bool {
        matches!(
            self,
            AttemptKind::Missing | AttemptKind::Timeout | AttemptKind::Connection | AttemptKind::Other
        )
    }
}

impl AttemptError {
    pub fn kind(&self) -> AttemptKind {
        match self {
            AttemptError::Setup(_) => AttemptKind::Other,
            AttemptError::Curl(e) => classify_curl_error(e),
            AttemptError::Http(_) => AttemptKind::Missing,
            AttemptError::Storage(_) => AttemptKind::Storage,
            AttemptError::Cancelled => AttemptKind::Cancelled,
        }
    }
}

impl fmt::Display for AttemptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttemptError::Setup(e) => write!(f, "curl setup: {}", e),
            AttemptError::Curl(e) => write!(f, "{}", e),
            AttemptError::Http(code) => write!(f, "HTTP {}", code),
            AttemptError::Storage(e) => write!(f, "storage: {}", e),
            AttemptError::Cancelled => write!(f, "cancelled"),
        }
    }
}

impl std::error::Error for AttemptError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AttemptError::Setup(e) | AttemptError::Curl(e) => Some(e),
            AttemptError::Storage(e) => Some(e),
            AttemptError::Http(_) | AttemptError::Cancelled => None,
        }
    }
}

/// Classify a curl error.
pub fn classify_curl_error(e: &curl::Error) -> AttemptKind {
    if e.is_operation_timedout() {
        return AttemptKind::Timeout;
    }
    if e.is_aborted_by_callback() {
        return AttemptKind::Cancelled;
    }
    if e.is_couldnt_connect()
        || e.is_couldnt_resolve_host()
        || e.is_couldnt_resolve_proxy()
        || e.is_read_error()
        || e.is_recv_error()
        || e.is_send_error()
        || e.is_got_nothing()
        || e.is_partial_file()
    {
        return AttemptKind::Connection;
    }
    AttemptKind::Other
}
