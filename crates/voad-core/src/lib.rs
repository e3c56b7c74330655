pub mod config;
pub mod logging;

pub mod batch;
pub mod candidates;
pub mod control;
pub mod dates;
pub mod error;
pub mod fetcher;
pub mod layout;
pub mod storage;
