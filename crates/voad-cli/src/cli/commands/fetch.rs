//! `voad fetch` – run a batch over a date range and render its events.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::io::Write;
use std::path::PathBuf;
use voad_core::batch::{spawn_batch, BatchEvent, BatchRequest};
use voad_core::config::VoadConfig;
use voad_core::control::CancelToken;
use voad_core::dates::date_range;

#[derive(Debug, Clone)]
pub struct FetchArgs {
    pub from: NaiveDate,
    pub to: Option<NaiveDate>,
    pub dir: Option<PathBuf>,
    pub jobs: Option<usize>,
    pub skip_existing: bool,
}

pub async fn run_fetch(cfg: &VoadConfig, args: FetchArgs) -> Result<()> {
    let end = args.to.unwrap_or(args.from);
    let dates = date_range(args.from, end)?;
    let root = match args.dir {
        Some(d) => d,
        None => cfg.resolve_save_dir()?,
    };
    let concurrency = cfg.clamp_concurrency(args.jobs.unwrap_or(cfg.default_concurrency));
    let mut policy = cfg.fetch_policy();
    policy.skip_existing &= args.skip_existing;

    println!(
        "Fetching {} date(s) into {} (concurrency {})",
        dates.len(),
        root.display(),
        concurrency
    );

    let cancel = CancelToken::new();
    let (handle, mut events) = spawn_batch(
        BatchRequest {
            dates,
            root,
            concurrency,
            policy,
        },
        cancel.clone(),
    )
    .context("could not start batch")?;

    let ctrl_c = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            eprintln!("\nstopping, waiting for in-flight downloads to exit");
            cancel.cancel();
        }
    });

    let mut terminal = None;
    while let Some(event) = events.recv().await {
        match &event {
            BatchEvent::Progress { completed, total } => {
                print!("\r  {}  ", format_progress(*completed, *total));
                let _ = std::io::stdout().flush();
            }
            BatchEvent::Done(msg) => println!("\n{}", msg),
            BatchEvent::Stopped(msg) => println!("\n{}", msg),
            BatchEvent::Error(msg) => eprintln!("\nerror: {}", msg),
        }
        if event.is_terminal() {
            terminal = Some(event);
        }
    }
    ctrl_c.abort();

    let summary = tokio::task::spawn_blocking(move || handle.join())
        .await
        .context("batch task join")??;
    tracing::info!("fetch finished: {:?} ({})", summary.state, summary);

    match terminal {
        Some(BatchEvent::Error(msg)) => anyhow::bail!("batch failed: {}", msg),
        Some(_) => Ok(()),
        None => anyhow::bail!("batch ended without a final status"),
    }
}

/// `3/10 complete (30%)`
pub(crate) fn format_progress(completed: usize, total: usize) -> String {
    let pct = if total == 0 {
        100
    } else {
        completed * 100 / total
    };
    format!("{}/{} complete ({}%)", completed, total, pct)
}
