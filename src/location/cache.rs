//! In-memory place name cache for one sorting run

use crate::gps::GpsCoordinate;
use std::collections::HashMap;

/// Place names keyed by the exact coordinate pair they were looked up for.
///
/// Keys are the bit patterns of both values, so only equal coordinates share
/// an entry (`-0.0` is folded into `0.0`). Entries are never evicted.
#[derive(Debug, Default)]
pub struct LocationCache {
    entries: HashMap<(u64, u64), String>,
}

impl LocationCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn key(coordinate: GpsCoordinate) -> (u64, u64) {
        // Adding 0.0 turns -0.0 into 0.0 and leaves every other value alone
        (
            (coordinate.latitude + 0.0).to_bits(),
            (coordinate.longitude + 0.0).to_bits(),
        )
    }

    pub fn get(&self, coordinate: GpsCoordinate) -> Option<&str> {
        self.entries.get(&Self::key(coordinate)).map(String::as_str)
    }

    pub fn insert(&mut self, coordinate: GpsCoordinate, name: String) {
        self.entries.insert(Self::key(coordinate), name);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_pairs_only() {
        let mut cache = LocationCache::new();
        assert!(cache.is_empty());

        let berlin = GpsCoordinate::new(52.52, 13.405);
        cache.insert(berlin, "Berlin".into());

        assert_eq!(cache.get(berlin), Some("Berlin"));
        assert_eq!(cache.get(GpsCoordinate::new(52.52, 13.405)), Some("Berlin"));
        // A few metres away is a different key
        assert_eq!(cache.get(GpsCoordinate::new(52.520001, 13.405)), None);
        // Swapped axes are a different key
        assert_eq!(cache.get(GpsCoordinate::new(13.405, 52.52)), None);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_negative_zero_shares_entry() {
        let mut cache = LocationCache::new();
        cache.insert(GpsCoordinate::new(0.0, 10.0), "Gulf".into());

        assert_eq!(cache.get(GpsCoordinate::new(-0.0, 10.0)), Some("Gulf"));
        cache.insert(GpsCoordinate::new(-0.0, -0.0), "Null Island".into());
        assert_eq!(cache.get(GpsCoordinate::new(0.0, 0.0)), Some("Null Island"));
        assert_eq!(cache.len(), 2);
    }
}
