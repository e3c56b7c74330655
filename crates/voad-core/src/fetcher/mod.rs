//! Single-date fetcher.
//!
//! Resolves the destination, honors skip-existing, then walks the candidate
//! list strictly in order, one HTTP attempt at a time, until one candidate
//! streams a complete 200 body. Misses (non-200, timeouts, connection errors)
//! advance to the next candidate; only filesystem failures escape as errors.

mod attempt;
mod classify;

pub use classify::{classify_curl_error, AttemptError, AttemptKind};

use std::path::Path;
use std::time::Duration;

use chrono::NaiveDate;

use crate::candidates::MirrorPlan;
use crate::control::StopSignal;
use crate::error::FetchError;
use crate::layout;
use crate::storage;

/// Default per-attempt timeout (connect, and longest tolerated read stall).
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);
/// Default receive chunk size in bytes.
pub const DEFAULT_CHUNK_SIZE: usize = 8192;
/// Default file extension for saved programs.
pub const DEFAULT_EXTENSION: &str = "mp3";

/// Everything the fetcher needs besides the date, root and stop signal.
#[derive(Debug, Clone)]
pub struct FetchPolicy {
    pub plan: MirrorPlan,
    pub timeout: Duration,
    pub chunk_size: usize,
    /// Treat an existing destination file as done without any network access.
    pub skip_existing: bool,
    pub extension: String,
}

impl Default for FetchPolicy {
    fn default() -> Self {
        Self {
            plan: MirrorPlan::default(),
            timeout: DEFAULT_TIMEOUT,
            chunk_size: DEFAULT_CHUNK_SIZE,
            skip_existing: true,
            extension: DEFAULT_EXTENSION.to_string(),
        }
    }
}

/// Per-date result. Exactly one per date per batch run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FetchOutcome {
    AlreadyPresent,
    Saved,
    Failed,
    Cancelled,
}

impl FetchOutcome {
    /// True when the destination file exists afterwards.
    pub fn is_success(self) -> bool {
        matches!(self, FetchOutcome::Saved | FetchOutcome::AlreadyPresent)
    }
}

/// Fetch the program for `date` into `root/YYYY/MM/YYYYMMDD.<ext>`.
///
/// `Failed` and `Cancelled` are ordinary outcomes; neither leaves a file at
/// the destination. `Err` means the filesystem (or curl itself) is unusable.
pub fn fetch_date(
    date: NaiveDate,
    root: &Path,
    policy: &FetchPolicy,
    stop: &dyn StopSignal,
) -> Result<FetchOutcome, FetchError> {
    let dest = layout::resolve_destination(date, root, &policy.extension)?;

    if policy.skip_existing && dest.is_file() {
        tracing::debug!(%date, path = %dest.display(), "already present, skipping");
        return Ok(FetchOutcome::AlreadyPresent);
    }

    let temp = storage::part_path(&dest);
    for (index, url) in policy.plan.candidate_urls(date).enumerate() {
        if stop.should_stop() {
            return Ok(FetchOutcome::Cancelled);
        }
        match attempt::try_candidate(&url, &dest, &temp, policy, stop) {
            Ok(bytes) => {
                tracing::info!(%date, candidate = index, bytes, "saved {}", dest.display());
                return Ok(FetchOutcome::Saved);
            }
            Err(AttemptError::Cancelled) => {
                tracing::debug!(%date, "cancelled during {}", url);
                return Ok(FetchOutcome::Cancelled);
            }
            Err(AttemptError::Storage(e)) => return Err(FetchError::fs(&temp, e)),
            Err(AttemptError::Setup(e)) => return Err(FetchError::Transport(e)),
            Err(e) => {
                tracing::debug!(%date, candidate = index, kind = ?e.kind(), "miss {}: {}", url, e);
            }
        }
    }

    tracing::warn!(%date, candidates = policy.plan.len(), "no candidate succeeded");
    Ok(FetchOutcome::Failed)
}
