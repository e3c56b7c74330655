//! CLI command handlers, one file per command.

mod completions;
mod config;
mod fetch;
mod urls;

pub use completions::run_completions;
pub use config::run_config;
pub use fetch::{run_fetch, FetchArgs};
pub use urls::run_urls;
