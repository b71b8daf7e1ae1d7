//! Geo Gallery Sorter - sorts photos into Year/Month/Location folders
//!
//! This library provides functionality for organizing photos based on
//! when and where they were taken:
//! - EXIF capture date, with file modification time as fallback
//! - GPS coordinates from EXIF converted to decimal degrees
//! - Reverse geocoding through Nominatim with a per-run cache
//! - Single-pass move of each file into the sorted tree

pub mod cli;
pub mod config;
pub mod error;
pub mod gps;
pub mod i18n;
pub mod location;
pub mod process;
pub mod time;

#[cfg(test)]
mod test_support;

pub use cli::Cli;
pub use config::{Config, ConfigError, GeocoderConfig, MonthLanguage};
pub use error::{Error, Result};
pub use gps::{GpsCoordinate, Hemisphere, dms_to_decimal};
pub use location::{
    Address, LocationCache, LocationOutcome, LocationResolver, NominatimGeocoder,
    ReverseGeocoder, sanitize_place_name,
};
pub use process::{FileResult, ProcessingStats, ProcessingStatus, Processor, RunOutcome};
pub use time::{CaptureDate, DateSource, resolve_date};
