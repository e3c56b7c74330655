//! CLI for the voad daily program downloader.

mod commands;

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use voad_core::config;

use commands::{run_completions, run_config, run_fetch, run_urls, FetchArgs};

/// Top-level CLI for voad.
#[derive(Debug, Parser)]
#[command(name = "voad")]
#[command(about = "voad: fetch daily VOA programs into a YYYY/MM folder tree", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Fetch the programs for a range of dates.
    Fetch {
        /// First date (YYYY-MM-DD).
        #[arg(long)]
        from: NaiveDate,
        /// Last date, inclusive (YYYY-MM-DD). Defaults to --from.
        #[arg(long)]
        to: Option<NaiveDate>,
        /// Root of the YYYY/MM tree (default: save_dir from config, else ./VOA).
        #[arg(long, value_name = "PATH")]
        dir: Option<PathBuf>,
        /// Fetch up to N dates at once (clamped to max_concurrency).
        #[arg(long, short = 'j', value_name = "N")]
        jobs: Option<usize>,
        /// Download again even if the file is already there.
        #[arg(long)]
        no_skip_existing: bool,
    },

    /// Print the candidate URLs (in try order) and the destination for a date.
    Urls {
        /// Date (YYYY-MM-DD).
        date: NaiveDate,
        /// Root of the YYYY/MM tree used for the destination.
        #[arg(long, value_name = "PATH")]
        dir: Option<PathBuf>,
    },

    /// Show the config file path and the effective configuration.
    Config,

    /// Print a shell completion script.
    Completions {
        /// Target shell.
        shell: clap_complete::Shell,
    },
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        if let CliCommand::Completions { shell } = cli.command {
            run_completions(shell);
            return Ok(());
        }

        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Fetch {
                from,
                to,
                dir,
                jobs,
                no_skip_existing,
            } => {
                let args = FetchArgs {
                    from,
                    to,
                    dir,
                    jobs,
                    skip_existing: !no_skip_existing,
                };
                run_fetch(&cfg, args).await?;
            }
            CliCommand::Urls { date, dir } => run_urls(&cfg, date, dir)?,
            CliCommand::Config => run_config(&cfg)?,
            CliCommand::Completions { .. } => {}
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
