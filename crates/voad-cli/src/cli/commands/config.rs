//! `voad config` – show where the config lives and what is in effect.

use anyhow::Result;
use voad_core::config::{self, VoadConfig};

pub fn run_config(cfg: &VoadConfig) -> Result<()> {
    println!("# {}", config::config_path()?.display());
    println!("# save dir in effect: {}", cfg.resolve_save_dir()?.display());
    print!("{}", toml::to_string_pretty(cfg)?);
    Ok(())
}
