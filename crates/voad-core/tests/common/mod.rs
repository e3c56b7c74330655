#![allow(dead_code)]

pub mod mirror_server;

use std::path::{Path, PathBuf};

use chrono::NaiveDate;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// URL path of a candidate on a test mirror, e.g. `/vle/2024/01/01/20240101-003003-vle122-program.mp3`.
pub fn candidate_path(date: NaiveDate, time_code: &str, suffix: &str) -> String {
    format!(
        "/vle/{}/{}-{}-vle122-program{}",
        date.format("%Y/%m/%d"),
        date.format("%Y%m%d"),
        time_code,
        suffix
    )
}

/// Every file under `root`, recursively.
pub fn files_under(root: &Path) -> Vec<PathBuf> {
    let mut out = Vec::new();
    let mut stack = vec![root.to_path_buf()];
    while let Some(dir) = stack.pop() {
        let Ok(entries) = std::fs::read_dir(&dir) else {
            continue;
        };
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                stack.push(path);
            } else {
                out.push(path);
            }
        }
    }
    out.sort();
    out
}

pub fn has_part_files(root: &Path) -> bool {
    files_under(root)
        .iter()
        .any(|p| p.to_string_lossy().ends_with(".part"))
}
