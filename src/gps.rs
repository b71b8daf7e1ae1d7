//! GPS coordinate conversion
//!
//! EXIF stores latitude and longitude as three rationals (degrees, minutes,
//! seconds) plus a hemisphere reference. This module turns them into signed
//! decimal degrees.

use exif::{Exif, In, Tag, Value};
use tracing::trace;

/// Hemisphere reference attached to a GPS coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hemisphere {
    North,
    South,
    East,
    West,
}

impl Hemisphere {
    /// Parse from an EXIF reference value such as `N` or `"W"`
    pub fn parse(s: &str) -> Option<Self> {
        let c = s.trim().trim_matches('"').chars().next()?;
        match c.to_ascii_uppercase() {
            'N' => Some(Hemisphere::North),
            'S' => Some(Hemisphere::South),
            'E' => Some(Hemisphere::East),
            'W' => Some(Hemisphere::West),
            _ => None,
        }
    }

    /// Southern and western values are negative in decimal degrees
    pub fn is_negative(&self) -> bool {
        matches!(self, Hemisphere::South | Hemisphere::West)
    }
}

/// Convert a degree/minute/second triple to signed decimal degrees
pub fn dms_to_decimal(dms: [f64; 3], hemisphere: Hemisphere) -> f64 {
    let decimal = dms[0] + dms[1] / 60.0 + dms[2] / 3600.0;
    if hemisphere.is_negative() {
        -decimal
    } else {
        decimal
    }
}

/// A latitude/longitude pair in signed decimal degrees
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GpsCoordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl GpsCoordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Read the GPS block of parsed EXIF data.
    ///
    /// Returns `None` unless latitude, longitude and both references are present
    /// and well-formed.
    pub fn from_exif(exif: &Exif) -> Option<Self> {
        let latitude = read_axis(exif, Tag::GPSLatitude, Tag::GPSLatitudeRef)?;
        let longitude = read_axis(exif, Tag::GPSLongitude, Tag::GPSLongitudeRef)?;
        trace!(latitude, longitude, "Decoded GPS coordinate");
        Some(Self::new(latitude, longitude))
    }
}

fn read_axis(exif: &Exif, coord_tag: Tag, ref_tag: Tag) -> Option<f64> {
    let coord = exif.get_field(coord_tag, In::PRIMARY)?;
    let reference = exif.get_field(ref_tag, In::PRIMARY)?;

    let hemisphere = match reference.value {
        Value::Ascii(ref values) => Hemisphere::parse(&String::from_utf8_lossy(values.first()?))?,
        _ => Hemisphere::parse(&reference.display_value().to_string())?,
    };
    let dms = match coord.value {
        Value::Rational(ref parts) if parts.len() == 3 => {
            [parts[0].to_f64(), parts[1].to_f64(), parts[2].to_f64()]
        }
        _ => return None,
    };

    Some(dms_to_decimal(dms, hemisphere))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dms_to_decimal() {
        let north = dms_to_decimal([48.0, 30.0, 0.0], Hemisphere::North);
        assert!((north - 48.5).abs() < 1e-9);

        let south = dms_to_decimal([48.0, 30.0, 0.0], Hemisphere::South);
        assert!((south + 48.5).abs() < 1e-9);

        let seconds = dms_to_decimal([13.0, 24.0, 36.0], Hemisphere::West);
        assert!((seconds + 13.41).abs() < 1e-9);
    }

    #[test]
    fn test_zero_is_zero_in_every_hemisphere() {
        for hemisphere in [
            Hemisphere::North,
            Hemisphere::South,
            Hemisphere::East,
            Hemisphere::West,
        ] {
            assert_eq!(dms_to_decimal([0.0, 0.0, 0.0], hemisphere).abs(), 0.0);
        }
    }

    #[test]
    fn test_hemisphere_parse() {
        assert_eq!(Hemisphere::parse("N"), Some(Hemisphere::North));
        assert_eq!(Hemisphere::parse("\"s\""), Some(Hemisphere::South));
        assert_eq!(Hemisphere::parse("East"), Some(Hemisphere::East));
        assert_eq!(Hemisphere::parse("W"), Some(Hemisphere::West));
        assert_eq!(Hemisphere::parse("X"), None);
        assert_eq!(Hemisphere::parse(""), None);
    }
}
