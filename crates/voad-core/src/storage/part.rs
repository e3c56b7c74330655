//! Sequential writer for a `.part` download file.

use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// An open part file. Dropping it without `finalize` or `discard` leaves the
/// file on disk; callers always end with one of the two.
#[derive(Debug)]
pub struct PartFile {
    file: File,
    temp_path: PathBuf,
    written: u64,
}

impl PartFile {
    /// Create (or truncate) the part file at `temp_path`.
    pub fn create(temp_path: &Path) -> io::Result<Self> {
        let file = File::options()
            .write(true)
            .create(true)
            .truncate(true)
            .open(temp_path)?;
        Ok(Self {
            file,
            temp_path: temp_path.to_path_buf(),
            written: 0,
        })
    }

    pub fn write_chunk(&mut self, data: &[u8]) -> io::Result<()> {
        self.file.write_all(data)?;
        self.written += data.len() as u64;
        Ok(())
    }

    pub fn bytes_written(&self) -> u64 {
        self.written
    }

    pub fn temp_path(&self) -> &Path {
        &self.temp_path
    }

    /// Sync and rename onto `final_path`. Returns the byte count.
    pub fn finalize(self, final_path: &Path) -> io::Result<u64> {
        self.file.sync_all()?;
        let Self {
            file,
            temp_path,
            written,
        } = self;
        drop(file);
        std::fs::rename(&temp_path, final_path)?;
        Ok(written)
    }

    /// Close and remove the part file. A missing file is not an error.
    pub fn discard(self) {
        let Self { file, temp_path, .. } = self;
        drop(file);
        if let Err(e) = std::fs::remove_file(&temp_path) {
            if e.kind() != io::ErrorKind::NotFound {
                tracing::warn!(path = %temp_path.display(), "could not remove part file: {}", e);
            }
        }
    }
}
