//! EXIF capture date extraction

use crate::error::{Error, Result};
use chrono::NaiveDate;
use exif::{Exif, In, Reader, Tag, Value};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::trace;

/// EXIF tags to try for date extraction, in priority order
const DATE_TAGS: &[Tag] = &[
    Tag::DateTimeOriginal, // When the original image was taken
    Tag::DateTime,         // File modification date/time
];

/// Open a file and parse its EXIF block
pub fn read_exif(path: &Path) -> Result<Exif> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);

    Reader::new()
        .read_from_container(&mut reader)
        .map_err(|e| Error::ExifRead {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
}

/// Extract the capture date from EXIF metadata
pub fn extract_exif_date(path: &Path) -> Result<NaiveDate> {
    let exif = read_exif(path)?;

    // Only the first populated tag is parsed; a malformed one is not
    // rescued by the next tag.
    let (tag, raw) = DATE_TAGS
        .iter()
        .find_map(|tag| date_text(&exif, *tag).map(|raw| (*tag, raw)))
        .ok_or_else(|| Error::ExifRead {
            path: path.to_path_buf(),
            message: "No date tag found in EXIF data".to_string(),
        })?;

    let date = parse_exif_date(&raw).ok_or_else(|| Error::ExifRead {
        path: path.to_path_buf(),
        message: format!("Unparsable {} value '{}'", tag, raw),
    })?;

    trace!(?path, ?tag, "Found EXIF date");
    Ok(date)
}

/// Text of an ASCII date tag, if present and non-empty
fn date_text(exif: &Exif, tag: Tag) -> Option<String> {
    let field = exif.get_field(tag, In::PRIMARY)?;
    let Value::Ascii(ref values) = field.value else {
        return None;
    };
    let text = String::from_utf8_lossy(values.first()?).trim().to_string();
    (!text.is_empty()).then_some(text)
}

/// Parse the date part of an EXIF datetime: "YYYY:MM:DD HH:MM:SS"
///
/// The time of day is ignored.
fn parse_exif_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim().trim_matches('"');
    let date_part = s.split(' ').next()?;
    NaiveDate::parse_from_str(date_part, "%Y:%m:%d").ok()
}
