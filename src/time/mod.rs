//! Capture date resolution
//!
//! The year and month a photo belongs to come from:
//! - EXIF metadata (DateTimeOriginal, then DateTime)
//! - File system modification time, when EXIF is missing or unusable

pub mod exif;

use crate::error::Result;
use chrono::{DateTime, Datelike, Local};
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// Source of the resolved date
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateSource {
    /// Extracted from EXIF metadata
    Exif,
    /// From file system modification time
    FileSystem,
}

/// Year and month a file is sorted under
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaptureDate {
    pub year: i32,
    pub month: u32,
    pub source: DateSource,
}

/// Resolve the capture year and month of a file.
///
/// EXIF problems never surface here; they fall through to the modification
/// time. The only error is failing to stat the file itself.
pub fn resolve_date(path: &Path) -> Result<CaptureDate> {
    match exif::extract_exif_date(path) {
        Ok(date) => {
            debug!(?path, %date, "Resolved date from EXIF");
            return Ok(CaptureDate {
                year: date.year(),
                month: date.month(),
                source: DateSource::Exif,
            });
        }
        Err(e) => {
            debug!(?path, error = %e, "No usable EXIF date");
        }
    }

    let modified = fs::metadata(path)?.modified()?;
    let datetime: DateTime<Local> = modified.into();

    warn!(?path, "Using file system modification time as fallback");

    Ok(CaptureDate {
        year: datetime.year(),
        month: datetime.month(),
        source: DateSource::FileSystem,
    })
}
