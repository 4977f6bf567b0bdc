//! Writing output records to disk.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{DateTime, Local};
use tracing::info;

use crate::error::Result;
use crate::models::record::{ExtractionResult, OutputRecord};

/// Writes one timestamped JSON record per run into a directory.
///
/// Records are plain writes: two runs on the same image within the same
/// second target the same file name, and a crash mid-write can leave a
/// partial file.
#[derive(Debug, Clone)]
pub struct OutputWriter {
    dir: PathBuf,
}

impl OutputWriter {
    /// Create a writer for `dir`. Nothing is touched until the first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Output directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File name for a record: `<image-stem>_<YYYYMMDD_HHMMSS>.json`.
    pub fn file_name(source_path: &Path, now: DateTime<Local>) -> String {
        let stem = source_path
            .file_stem()
            .map(|s| s.to_string_lossy())
            .unwrap_or_else(|| "image".into());
        format!("{}_{}.json", stem, now.format("%Y%m%d_%H%M%S"))
    }

    /// Write the record for a run stamped with the current local time.
    pub fn write(
        &self,
        result: &ExtractionResult,
        source_path: &Path,
        model: &str,
        elapsed: Duration,
    ) -> Result<PathBuf> {
        self.write_at(result, source_path, model, elapsed, Local::now())
    }

    /// Write the record for a run stamped with `now`.
    pub fn write_at(
        &self,
        result: &ExtractionResult,
        source_path: &Path,
        model: &str,
        elapsed: Duration,
        now: DateTime<Local>,
    ) -> Result<PathBuf> {
        fs::create_dir_all(&self.dir)?;

        let path = self.dir.join(Self::file_name(source_path, now));
        let record = OutputRecord::new(result, source_path, model, elapsed, now);
        fs::write(&path, serde_json::to_string_pretty(&record)?)?;

        info!("Wrote output record to {}", path.display());
        Ok(path)
    }
}
