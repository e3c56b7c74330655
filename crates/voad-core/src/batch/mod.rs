//! Batch orchestrator: runs the single-date fetcher over many dates with a
//! bounded worker pool and reports progress plus one terminal event.
//!
//! `Running → {Done, Stopped, Errored}`. Per-date `Failed` never fails the
//! batch; only structural errors (root or month directory unusable, part
//! file I/O, worker failure) end it with `Error`.

mod event;
mod pool;

pub use event::{BatchEvent, BatchState, BatchSummary};

use std::path::PathBuf;
use std::thread;

use chrono::NaiveDate;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};

use crate::control::CancelToken;
use crate::fetcher::{FetchOutcome, FetchPolicy};
use crate::layout;

/// Upper bound on concurrent fetches.
pub const MAX_CONCURRENCY: usize = 16;
/// Concurrency used when the caller has no preference.
pub const DEFAULT_CONCURRENCY: usize = 4;

/// Clamp a requested worker count to `[1, max]` (`max` itself at least 1).
pub fn clamp_concurrency(requested: usize, max: usize) -> usize {
    requested.clamp(1, max.max(1))
}

/// One batch invocation.
#[derive(Debug, Clone)]
pub struct BatchRequest {
    pub dates: Vec<NaiveDate>,
    pub root: PathBuf,
    /// Requested worker count; clamped to `[1, MAX_CONCURRENCY]`.
    pub concurrency: usize,
    pub policy: FetchPolicy,
}

/// Runs the batch on the calling thread (workers are spawned internally) and
/// sends events to `events`. A dropped receiver is not an error; the run
/// still completes. Returns the tally.
pub fn run_batch(
    request: BatchRequest,
    cancel: &CancelToken,
    events: &UnboundedSender<BatchEvent>,
) -> BatchSummary {
    let BatchRequest {
        dates,
        root,
        concurrency,
        policy,
    } = request;
    let total = dates.len();
    let workers = clamp_concurrency(concurrency, MAX_CONCURRENCY);
    let mut summary = BatchSummary::new(total);
    let emit = |event: BatchEvent| {
        let _ = events.send(event);
    };

    if let Err(e) = layout::ensure_dir(&root) {
        tracing::error!("cannot prepare download root: {}", e);
        summary.close(BatchState::Errored);
        emit(BatchEvent::Error(e.to_string()));
        return summary;
    }

    tracing::info!(total, workers, root = %root.display(), "batch started");

    let abort = CancelToken::new();
    let mut structural: Option<String> = None;
    let mut completed = 0usize;

    let pool_result = pool::run_pool(
        dates,
        root,
        policy,
        workers,
        cancel.clone(),
        abort.clone(),
        |(date, res)| match res {
            Ok(outcome) => {
                summary.record(outcome);
                if outcome == FetchOutcome::Cancelled {
                    return;
                }
                completed += 1;
                if structural.is_none() {
                    emit(BatchEvent::Progress { completed, total });
                }
            }
            Err(e) => {
                tracing::error!(%date, "structural failure: {}", e);
                abort.cancel();
                if structural.is_none() {
                    structural = Some(format!("{}: {}", date, e));
                }
            }
        },
    );
    if let Err(msg) = pool_result {
        tracing::error!("worker pool failed: {}", msg);
        structural.get_or_insert(msg);
    }

    if let Some(msg) = structural {
        summary.close(BatchState::Errored);
        emit(BatchEvent::Error(msg));
    } else if cancel.is_cancelled() && summary.completed() < total {
        summary.close(BatchState::Stopped);
        tracing::info!("batch stopped: {}", summary);
        emit(BatchEvent::Stopped(format!("stopped by user ({})", summary)));
    } else {
        summary.close(BatchState::Done);
        tracing::info!("batch done: {}", summary);
        emit(BatchEvent::Done(format!("all downloads finished ({})", summary)));
    }
    summary
}

/// A batch running on its own thread.
#[derive(Debug)]
pub struct BatchHandle {
    cancel: CancelToken,
    thread: thread::JoinHandle<BatchSummary>,
}

impl BatchHandle {
    /// Request cancellation; the event stream ends with `Stopped`.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    pub fn is_finished(&self) -> bool {
        self.thread.is_finished()
    }

    /// Wait for the run to end and return its tally.
    pub fn join(self) -> anyhow::Result<BatchSummary> {
        self.thread
            .join()
            .map_err(|_| anyhow::anyhow!("batch thread panicked"))
    }
}

/// Starts `run_batch` on a dedicated thread so UI or async callers never
/// block; they drain the returned receiver on their own schedule.
pub fn spawn_batch(
    request: BatchRequest,
    cancel: CancelToken,
) -> std::io::Result<(BatchHandle, UnboundedReceiver<BatchEvent>)> {
    let (tx, rx) = unbounded_channel();
    let token = cancel.clone();
    let thread = thread::Builder::new()
        .name("voad-batch".to_string())
        .spawn(move || run_batch(request, &token, &tx))?;
    Ok((BatchHandle { cancel, thread }, rx))
}
