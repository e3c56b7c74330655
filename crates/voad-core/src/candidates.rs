//! Candidate URL generation.
//!
//! Every date maps to a fixed, ordered list of guesses: mirrors in listed
//! order, then time-code variants, then quality suffixes (high quality first).
//! The order is policy, never derived from the date.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Mirror hosts, in priority order.
pub const DEFAULT_HOSTS: &[&str] = &[
    "https://voa-audio-ns.akamaized.net",
    "https://voa-audio.voanews.eu",
];

/// Publish-time naming variants seen for the same day's program.
pub const DEFAULT_TIME_CODES: &[&str] = &["003003", "003000"];

/// Quality suffixes; HQ before standard.
pub const DEFAULT_SUFFIXES: &[&str] = &["_hq.mp3", ".mp3"];

/// The three axes the candidate list is the product of.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MirrorPlan {
    /// Base URLs including scheme, e.g. `https://voa-audio.voanews.eu`.
    pub hosts: Vec<String>,
    pub time_codes: Vec<String>,
    pub suffixes: Vec<String>,
}

impl Default for MirrorPlan {
    fn default() -> Self {
        Self {
            hosts: DEFAULT_HOSTS.iter().map(|s| s.to_string()).collect(),
            time_codes: DEFAULT_TIME_CODES.iter().map(|s| s.to_string()).collect(),
            suffixes: DEFAULT_SUFFIXES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl MirrorPlan {
    /// Plan with a single host and the default time codes and suffixes.
    pub fn with_hosts<I, S>(hosts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            hosts: hosts.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Number of candidates produced for any date.
    pub fn len(&self) -> usize {
        self.hosts.len() * self.time_codes.len() * self.suffixes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Rejects empty axes and hosts that are not absolute http(s) URLs.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.hosts.is_empty() {
            return Err(ConfigError::NoMirrors);
        }
        if self.time_codes.is_empty() {
            return Err(ConfigError::NoTimeCodes);
        }
        if self.suffixes.is_empty() {
            return Err(ConfigError::NoSuffixes);
        }
        for host in &self.hosts {
            let ok = url::Url::parse(host)
                .map(|u| matches!(u.scheme(), "http" | "https") && u.has_host())
                .unwrap_or(false);
            if !ok {
                return Err(ConfigError::BadMirror(host.clone()));
            }
        }
        Ok(())
    }

    /// Candidate URLs for `date`, in try order. Lazy and restartable: calling
    /// again yields the same sequence.
    pub fn candidate_urls(&self, date: NaiveDate) -> impl Iterator<Item = String> + '_ {
        self.hosts.iter().flat_map(move |host| {
            self.time_codes.iter().flat_map(move |time_code| {
                self.suffixes
                    .iter()
                    .map(move |suffix| candidate_url(host, time_code, suffix, date))
            })
        })
    }
}

/// `<host>/vle/YYYY/MM/DD/YYYYMMDD-<time-code>-vle122-program<suffix>`
pub fn candidate_url(host: &str, time_code: &str, suffix: &str, date: NaiveDate) -> String {
    format!(
        "{}/vle/{:04}/{:02}/{:02}/{}-{}-vle122-program{}",
        host.trim_end_matches('/'),
        date.year(),
        date.month(),
        date.day(),
        date.format("%Y%m%d"),
        time_code,
        suffix
    )
}
