//! One streamed GET against one candidate URL.

use std::cell::{Cell, RefCell};
use std::path::Path;
use std::str;

use super::classify::AttemptError;
use super::FetchPolicy;
use crate::control::StopSignal;
use crate::storage::PartFile;

const USER_AGENT: &str = concat!("voad/", env!("CARGO_PKG_VERSION"));

/// Streams `url` into `temp_path` and renames it onto `final_path` when the
/// response is a complete 200. Returns bytes written.
///
/// The part file is only created once a 200 body starts arriving; every
/// failure path removes it. The stop signal is checked before each chunk and
/// from curl's progress callback, so a stalled connect also notices it.
pub(super) fn try_candidate(
    url: &str,
    final_path: &Path,
    temp_path: &Path,
    policy: &FetchPolicy,
    stop: &dyn StopSignal,
) -> Result<u64, AttemptError> {
    let mut easy = curl::easy::Easy::new();
    configure(&mut easy, url, policy).map_err(AttemptError::Setup)?;

    let status: Cell<Option<u32>> = Cell::new(None);
    let part: RefCell<Option<PartFile>> = RefCell::new(None);
    let storage_error: RefCell<Option<std::io::Error>> = RefCell::new(None);
    let cancelled = Cell::new(false);

    let perform_result = {
        let mut transfer = easy.transfer();
        transfer
            .header_function(|line| {
                // With redirects there is one status line per hop; the last one wins.
                if let Some(code) = str::from_utf8(line).ok().and_then(parse_status_line) {
                    status.set(Some(code));
                }
                true
            })
            .map_err(AttemptError::Setup)?;
        transfer
            .progress_function(|_, _, _, _| {
                if stop.should_stop() {
                    cancelled.set(true);
                    return false;
                }
                true
            })
            .map_err(AttemptError::Setup)?;
        transfer
            .write_function(|data| {
                if stop.should_stop() {
                    cancelled.set(true);
                    return Ok(0);
                }
                if status.get() != Some(200) {
                    // Error page body; abort and report the status instead.
                    return Ok(0);
                }
                let mut slot = part.borrow_mut();
                if slot.is_none() {
                    match PartFile::create(temp_path) {
                        Ok(file) => *slot = Some(file),
                        Err(e) => {
                            storage_error.replace(Some(e));
                            return Ok(0);
                        }
                    }
                }
                let Some(file) = slot.as_mut() else {
                    return Ok(0);
                };
                match file.write_chunk(data) {
                    Ok(()) => Ok(data.len()),
                    Err(e) => {
                        storage_error.replace(Some(e));
                        Ok(0)
                    }
                }
            })
            .map_err(AttemptError::Setup)?;
        transfer.perform()
    };

    let part = part.into_inner();
    let discard = |part: Option<PartFile>| {
        if let Some(file) = part {
            file.discard();
        }
    };

    if cancelled.get() {
        discard(part);
        return Err(AttemptError::Cancelled);
    }
    if let Some(e) = storage_error.into_inner() {
        discard(part);
        return Err(AttemptError::Storage(e));
    }
    if let Err(e) = perform_result {
        discard(part);
        return match status.get() {
            Some(code) if code != 200 && e.is_write_error() => Err(AttemptError::Http(code)),
            _ => Err(AttemptError::Curl(e)),
        };
    }

    let code = easy.response_code().map_err(AttemptError::Curl)?;
    if code != 200 {
        discard(part);
        return Err(AttemptError::Http(code));
    }

    // A 200 with an empty body never reached the write callback.
    let file = match part {
        Some(file) => file,
        None => PartFile::create(temp_path).map_err(AttemptError::Storage)?,
    };
    let temp = file.temp_path().to_path_buf();
    file.finalize(final_path).map_err(|e| {
        let _ = std::fs::remove_file(&temp);
        AttemptError::Storage(e)
    })
}

fn configure(
    easy: &mut curl::easy::Easy,
    url: &str,
    policy: &FetchPolicy,
) -> Result<(), curl::Error> {
    easy.url(url)?;
    easy.get(true)?;
    easy.useragent(USER_AGENT)?;
    easy.follow_location(true)?;
    easy.max_redirections(10)?;
    easy.connect_timeout(policy.timeout)?;
    // Abort when the body stalls: under 1 byte/s for the whole timeout window.
    easy.low_speed_limit(1)?;
    easy.low_speed_time(policy.timeout)?;
    easy.buffer_size(policy.chunk_size)?;
    easy.progress(true)?;
    Ok(())
}

/// `HTTP/1.1 404 Not Found` → `Some(404)`.
fn parse_status_line(line: &str) -> Option<u32> {
    let line = line.trim();
    if !line.starts_with("HTTP/") {
        return None;
    }
    line.split_whitespace().nth(1)?.parse().ok()
}
