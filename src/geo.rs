//! Deterministic geocoding and great-circle distance.
//!
//! The geocoder is a pure placeholder, not a lookup against a real geographic
//! database: it hashes the ZIP string and offsets both coordinates from a
//! fixed origin. The engine only needs determinism and real-degree scale so
//! the conflict radius behaves like miles.

pub const EARTH_RADIUS_MILES: f64 = 3959.0;

/// Fixed geocoding origin (lower Manhattan).
pub const GEOCODE_ORIGIN: (f64, f64) = (40.7128, -74.0060);

/// Map a 5-digit ZIP string to a stable coordinate pair.
///
/// The hash is the sum of the string's byte values; both axes are offset by
/// `(hash % 100) / 100` degrees, so every result lies within
/// `[origin, origin + 0.99)` degrees of [`GEOCODE_ORIGIN`]. Identical ZIPs
/// always map to identical coordinates; no I/O is performed.
pub fn geocode(zip: &str) -> (f64, f64) {
    let hash: u32 = zip.bytes().map(u32::from).sum();
    let offset = f64::from(hash % 100) / 100.0;
    (GEOCODE_ORIGIN.0 + offset, GEOCODE_ORIGIN.1 + offset)
}

/// Great-circle distance in miles between two coordinates (haversine).
pub fn distance_miles(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();
    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_MILES * c
}
