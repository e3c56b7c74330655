//! Cancellation for batch runs: a shared one-way stop signal.
//!
//! The orchestrator owns (or is handed) a `CancelToken`; every fetch in the run
//! gets a reference and polls it before each date, before each candidate, and
//! before each streamed chunk.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared stop signal. Cloning yields a handle to the same flag.
/// Once set it stays set for the lifetime of the run.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. Idempotent.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Acquire)
    }
}

/// Two tokens observed as one: set if either is set. Used by the batch pool
/// to stop in-flight fetches on a structural error without touching the
/// caller's token.
#[derive(Debug, Clone)]
pub(crate) struct LinkedToken {
    user: CancelToken,
    internal: CancelToken,
}

impl LinkedToken {
    pub(crate) fn new(user: CancelToken, internal: CancelToken) -> Self {
        Self { user, internal }
    }

    pub(crate) fn is_set(&self) -> bool {
        self.user.is_cancelled() || self.internal.is_cancelled()
    }
}

/// Anything a fetch can poll for "stop now".
pub trait StopSignal: Send + Sync {
    fn should_stop(&self) -> bool;
}

impl StopSignal for CancelToken {
    fn should_stop(&self) -> bool {
        self.is_cancelled()
    }
}

impl StopSignal for LinkedToken {
    fn should_stop(&self) -> bool {
        self.is_set()
    }
}
