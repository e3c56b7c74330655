//! `voad urls` – show what would be tried for one date, and where it would land.

use anyhow::Result;
use chrono::NaiveDate;
use std::path::PathBuf;
use voad_core::config::VoadConfig;
use voad_core::layout;

pub fn run_urls(cfg: &VoadConfig, date: NaiveDate, dir: Option<PathBuf>) -> Result<()> {
    let root = match dir {
        Some(d) => d,
        None => cfg.resolve_save_dir()?,
    };
    for (i, url) in cfg.mirrors.candidate_urls(date).enumerate() {
        println!("{:>2}  {}", i + 1, url);
    }
    println!(
        "->  {}",
        layout::destination_path(date, &root, &cfg.extension).display()
    );
    Ok(())
}
