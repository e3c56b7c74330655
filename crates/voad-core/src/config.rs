use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::batch::{clamp_concurrency, DEFAULT_CONCURRENCY, MAX_CONCURRENCY};
use crate::candidates::MirrorPlan;
use crate::error::ConfigError;
use crate::fetcher::{FetchPolicy, DEFAULT_CHUNK_SIZE, DEFAULT_EXTENSION, DEFAULT_TIMEOUT};

/// Global configuration loaded from `~/.config/voad/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VoadConfig {
    /// Root of the `YYYY/MM/YYYYMMDD.mp3` tree (None = `./VOA`).
    pub save_dir: Option<PathBuf>,
    /// Receive chunk size in bytes.
    pub chunk_size: usize,
    /// Per-attempt timeout in seconds (connect, and longest read stall).
    pub timeout_secs: u64,
    /// Skip dates whose file already exists.
    pub skip_existing: bool,
    /// Worker count when none is given on the command line.
    pub default_concurrency: usize,
    /// Upper bound for the worker count.
    pub max_concurrency: usize,
    /// File extension for saved programs.
    pub extension: String,
    /// Mirror hosts, time-code variants and quality suffixes, in try order.
    pub mirrors: MirrorPlan,
}

impl Default for VoadConfig {
    fn default() -> Self {
        Self {
            save_dir: None,
            chunk_size: DEFAULT_CHUNK_SIZE,
            timeout_secs: DEFAULT_TIMEOUT.as_secs(),
            skip_existing: true,
            default_concurrency: DEFAULT_CONCURRENCY,
            max_concurrency: MAX_CONCURRENCY,
            extension: DEFAULT_EXTENSION.to_string(),
            mirrors: MirrorPlan::default(),
        }
    }
}

impl VoadConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.chunk_size == 0 {
            return Err(ConfigError::Zero("chunk_size"));
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::Zero("timeout_secs"));
        }
        if self.max_concurrency == 0 {
            return Err(ConfigError::Zero("max_concurrency"));
        }
        self.mirrors.validate()
    }

    /// Clamp a requested worker count to `[1, max_concurrency]`
    /// (and never above the engine's hard limit).
    pub fn clamp_concurrency(&self, requested: usize) -> usize {
        clamp_concurrency(requested, self.max_concurrency.min(MAX_CONCURRENCY))
    }

    /// Root directory, falling back to `VOA` under the current directory.
    pub fn resolve_save_dir(&self) -> Result<PathBuf> {
        match &self.save_dir {
            Some(dir) => Ok(dir.clone()),
            None => Ok(std::env::current_dir()?.join("VOA")),
        }
    }

    pub fn fetch_policy(&self) -> FetchPolicy {
        FetchPolicy {
            plan: self.mirrors.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
            chunk_size: self.chunk_size,
            skip_existing: self.skip_existing,
            extension: self.extension.clone(),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("voad")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<VoadConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = VoadConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: VoadConfig = toml::from_str(&data)?;
    cfg.validate()?;
    Ok(cfg)
}
