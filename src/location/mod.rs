//! Location resolution
//!
//! Turns the GPS block of a photo into a folder-safe place name:
//! - read GPS coordinates from EXIF
//! - answer from the run's [`LocationCache`] when the exact pair was seen
//! - otherwise ask a [`ReverseGeocoder`] and keep the first of city, town, village

pub mod cache;
pub mod nominatim;

pub use cache::LocationCache;
pub use nominatim::NominatimGeocoder;

use crate::error::Result;
use crate::gps::GpsCoordinate;
use crate::time::exif::read_exif;
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, warn};

/// Address fields a geocoder reports; only the locality levels are kept
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Address {
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub town: Option<String>,
    #[serde(default)]
    pub village: Option<String>,
}

impl Address {
    /// First populated of city, town, village
    pub fn place_name(&self) -> Option<&str> {
        [&self.city, &self.town, &self.village]
            .into_iter()
            .flatten()
            .map(String::as_str)
            .find(|name| !name.trim().is_empty())
    }
}

/// Looks up the address for a coordinate
pub trait ReverseGeocoder {
    /// `Ok(None)` means the service answered but knows no address there
    fn reverse(&self, coordinate: GpsCoordinate) -> Result<Option<Address>>;
}

/// What location resolution found for one file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocationOutcome {
    /// A sanitized place name
    Resolved { name: String, from_cache: bool },
    /// No EXIF, or no complete GPS block
    NoGpsData,
    /// The geocoder answered without a usable city, town or village
    NoPlaceName,
    /// The lookup itself failed (network, timeout, bad response)
    LookupFailed(String),
}

impl LocationOutcome {
    /// Folder label for this outcome
    pub fn label<'a>(&'a self, default_label: &'a str) -> &'a str {
        match self {
            LocationOutcome::Resolved { name, .. } => name,
            _ => default_label,
        }
    }
}

/// Keep letters, digits, spaces and hyphens; drop trailing whitespace
pub fn sanitize_place_name(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_alphanumeric() || *c == ' ' || *c == '-')
        .collect::<String>()
        .trim_end()
        .to_string()
}

/// Resolves files to place names through a geocoder
pub struct LocationResolver {
    geocoder: Box<dyn ReverseGeocoder>,
}

impl LocationResolver {
    pub fn new(geocoder: Box<dyn ReverseGeocoder>) -> Self {
        Self { geocoder }
    }

    /// Read the coordinate of a file, if it carries one
    pub fn coordinate_of(path: &Path) -> Option<GpsCoordinate> {
        let exif = read_exif(path).ok()?;
        GpsCoordinate::from_exif(&exif)
    }

    /// Resolve the place name of a file.
    ///
    /// The cache is only written for resolved names, so coordinates without
    /// a locality are looked up again every time they appear.
    pub fn resolve(&self, path: &Path, cache: &mut LocationCache) -> LocationOutcome {
        let Some(coordinate) = Self::coordinate_of(path) else {
            debug!(?path, "No GPS data");
            return LocationOutcome::NoGpsData;
        };

        self.resolve_coordinate(coordinate, cache)
    }

    pub fn resolve_coordinate(
        &self,
        coordinate: GpsCoordinate,
        cache: &mut LocationCache,
    ) -> LocationOutcome {
        if let Some(name) = cache.get(coordinate) {
            debug!(name, "Location cache hit");
            return LocationOutcome::Resolved {
                name: name.to_string(),
                from_cache: true,
            };
        }

        let address = match self.geocoder.reverse(coordinate) {
            Ok(address) => address,
            Err(e) => {
                warn!(
                    latitude = coordinate.latitude,
                    longitude = coordinate.longitude,
                    error = %e,
                    "Reverse geocoding failed"
                );
                return LocationOutcome::LookupFailed(e.to_string());
            }
        };

        let name = address
            .as_ref()
            .and_then(Address::place_name)
            .map(sanitize_place_name)
            .filter(|name| !name.is_empty());

        match name {
            Some(name) => {
                debug!(%name, "Resolved location");
                cache.insert(coordinate, name.clone());
                LocationOutcome::Resolved {
                    name,
                    from_cache: false,
                }
            }
            None => {
                debug!(
                    latitude = coordinate.latitude,
                    longitude = coordinate.longitude,
                    "No city, town or village for coordinate"
                );
                LocationOutcome::NoPlaceName
            }
        }
    }
}
