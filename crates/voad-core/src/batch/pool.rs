//! Fixed-size worker pool over a shared date queue.
//!
//! Each worker pops one date, runs the fetcher to completion, reports the
//! result and takes the next date. Workers stop taking dates as soon as the
//! stop signal is set; in-flight fetches see the same signal and exit on
//! their own.

use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::{mpsc, Arc, Mutex};
use std::thread;

use chrono::NaiveDate;

use crate::control::{CancelToken, LinkedToken, StopSignal};
use crate::error::FetchError;
use crate::fetcher::{self, FetchOutcome, FetchPolicy};

pub(super) type DateResult = (NaiveDate, Result<FetchOutcome, FetchError>);

/// Runs `dates` on `workers` threads, calling `on_result` on the calling
/// thread as each date finishes (completion order, not input order).
/// Workers stop when either `cancel` (the caller's) or `abort` (set on a
/// structural failure) is set. Returns once every worker has exited; `Err`
/// carries a message when a worker could not be spawned or panicked.
pub(super) fn run_pool<F>(
    dates: Vec<NaiveDate>,
    root: PathBuf,
    policy: FetchPolicy,
    workers: usize,
    cancel: CancelToken,
    abort: CancelToken,
    mut on_result: F,
) -> Result<(), String>
where
    F: FnMut(DateResult),
{
    let stop = LinkedToken::new(cancel, abort.clone());
    let count = dates.len();
    if count == 0 {
        return Ok(());
    }
    let work: Arc<Mutex<VecDeque<NaiveDate>>> = Arc::new(Mutex::new(dates.into_iter().collect()));
    let root = Arc::new(root);
    let policy = Arc::new(policy);
    let (tx, rx) = mpsc::channel::<DateResult>();
    let num_workers = workers.clamp(1, count);
    let mut handles = Vec::with_capacity(num_workers);
    let mut failure: Option<String> = None;

    for i in 0..num_workers {
        let work = Arc::clone(&work);
        let tx = tx.clone();
        let root = Arc::clone(&root);
        let policy = Arc::clone(&policy);
        let stop = stop.clone();
        let spawned = thread::Builder::new()
            .name(format!("voad-worker-{}", i))
            .spawn(move || loop {
                if stop.should_stop() {
                    break;
                }
                let next = match work.lock() {
                    Ok(mut queue) => queue.pop_front(),
                    Err(_) => None,
                };
                let Some(date) = next else {
                    break;
                };
                let res = fetcher::fetch_date(date, &root, &policy, &stop);
                if tx.send((date, res)).is_err() {
                    break;
                }
            });
        match spawned {
            Ok(h) => handles.push(h),
            Err(e) => {
                failure = Some(format!("could not start worker thread: {}", e));
                abort.cancel();
                break;
            }
        }
    }
    drop(tx);

    if handles.is_empty() {
        return Err(failure.unwrap_or_else(|| "no worker threads started".to_string()));
    }

    for result in rx {
        on_result(result);
    }

    for h in handles {
        if h.join().is_err() && failure.is_none() {
            abort.cancel();
            failure = Some("worker thread panicked".to_string());
        }
    }

    match failure {
        Some(msg) => Err(msg),
        None => Ok(()),
    }
}
