//! Part-file lifecycle for the winning candidate.
//!
//! Bytes stream into `<dest>.part`; a finished transfer is synced and renamed
//! onto the destination, anything else removes the part file. The destination
//! path itself never holds a partial download.

mod part;

pub use part::PartFile;

/// Suffix for in-progress downloads.
pub const PART_SUFFIX: &str = ".part";

/// Path for the part file: appends `.part` (e.g. `20240101.mp3` → `20240101.mp3.part`).
pub fn part_path(final_path: &std::path::Path) -> std::path::PathBuf {
    let mut o = final_path.as_os_str().to_owned();
    o.push(PART_SUFFIX);
    std::path::PathBuf::from(o)
}
