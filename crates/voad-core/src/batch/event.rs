//! Events and tallies reported to the batch caller.

use std::fmt;

use crate::fetcher::FetchOutcome;

/// What the caller sees. Any number of `Progress` events, then exactly one
/// terminal event, then nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchEvent {
    /// `completed` dates out of `total` have reached a final outcome.
    Progress { completed: usize, total: usize },
    Done(String),
    Error(String),
    Stopped(String),
}

impl BatchEvent {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, BatchEvent::Progress { .. })
    }
}

/// Terminal state of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchState {
    Done,
    Stopped,
    Errored,
}

/// Per-outcome counts for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchSummary {
    pub total: usize,
    pub saved: usize,
    pub already_present: usize,
    pub failed: usize,
    /// Dates that were cancelled mid-fetch or never started.
    pub cancelled: usize,
    pub state: BatchState,
}

impl BatchSummary {
    pub(crate) fn new(total: usize) -> Self {
        Self {
            total,
            saved: 0,
            already_present: 0,
            failed: 0,
            cancelled: 0,
            state: BatchState::Done,
        }
    }

    pub(crate) fn record(&mut self, outcome: FetchOutcome) {
        match outcome {
            FetchOutcome::Saved => self.saved += 1,
            FetchOutcome::AlreadyPresent => self.already_present += 1,
            FetchOutcome::Failed => self.failed += 1,
            FetchOutcome::Cancelled => self.cancelled += 1,
        }
    }

    /// Dates that reached Saved, AlreadyPresent or Failed.
    pub fn completed(&self) -> usize {
        self.saved + self.already_present + self.failed
    }

    /// Counts everything that never reached a final outcome as cancelled.
    pub(crate) fn close(&mut self, state: BatchState) {
        self.cancelled = self.total - self.completed();
        self.state = state;
    }
}

impl fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{} complete: {} saved, {} already present, {} failed",
            self.completed(),
            self.total,
            self.saved,
            self.already_present,
            self.failed
        )?;
        if self.cancelled > 0 {
            write!(f, ", {} not finished", self.cancelled)?;
        }
        Ok(())
    }
}
