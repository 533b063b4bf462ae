//! Geographic locations and the distance primitives every other module uses.
//!
//! Latitude and longitude are in decimal degrees, depth in kilometres
//! (positive down). Horizontal distances are great-circle distances on a
//! sphere of mean earth radius.

use core::fmt;
use core::hash::{Hash, Hasher};

/// Mean earth radius in kilometres.
pub const EARTH_RADIUS_MEAN: f64 = 6371.0072;

/// A point on or below the earth's surface.
///
/// Equality and hashing are bitwise on the three coordinates, so a
/// `Location` can key a `HashMap` and `-0.0` differs from `0.0`.
///
/// # Example
///
/// ```
/// use gmpe::geo::Location;
///
/// let a = Location::new(34.0, -118.0, 0.0);
/// let b = Location::new(34.0, -117.0, 0.0);
/// let d = a.horizontal_distance(&b);
/// assert!((d - 92.2).abs() < 0.1);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Location {
    latitude: f64,
    longitude: f64,
    depth: f64,
}

impl Location {
    /// Creates a location from latitude, longitude (degrees) and depth (km).
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64, depth: f64) -> Self {
        Self {
            latitude,
            longitude,
            depth,
        }
    }

    /// Creates a surface location (depth 0).
    #[must_use]
    pub const fn surface(latitude: f64, longitude: f64) -> Self {
        Self::new(latitude, longitude, 0.0)
    }

    /// Latitude in decimal degrees.
    #[inline]
    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Longitude in decimal degrees.
    #[inline]
    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Depth in km, positive down.
    #[inline]
    #[must_use]
    pub const fn depth(&self) -> f64 {
        self.depth
    }

    /// The same location moved to `depth`.
    #[must_use]
    pub const fn with_depth(&self, depth: f64) -> Self {
        Self::new(self.latitude, self.longitude, depth)
    }

    /// Great-circle (haversine) distance, ignoring depth.
    #[must_use]
    pub fn horizontal_distance(&self, other: &Location) -> f64 {
        let lat1 = self.latitude.to_radians();
        let lat2 = other.latitude.to_radians();
        let dlat = lat2 - lat1;
        let dlon = (other.longitude - self.longitude).to_radians();
        let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
        2.0 * EARTH_RADIUS_MEAN * h.sqrt().min(1.0).asin()
    }

    /// Straight-line distance combining horizontal and vertical separation.
    #[must_use]
    pub fn linear_distance(&self, other: &Location) -> f64 {
        let h = self.horizontal_distance(other);
        let v = other.depth - self.depth;
        (h * h + v * v).sqrt()
    }

    /// Initial azimuth (radians clockwise from north) from `self` to `other`.
    #[must_use]
    pub fn azimuth_rad(&self, other: &Location) -> f64 {
        let lat1 = self.latitude.to_radians();
        let lat2 = other.latitude.to_radians();
        let dlon = (other.longitude - self.longitude).to_radians();
        let y = dlon.sin() * lat2.cos();
        let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * dlon.cos();
        y.atan2(x).rem_euclid(core::f64::consts::TAU)
    }

    /// Location reached by travelling `horizontal_km` along `azimuth_rad`
    /// and `vertical_km` down.
    #[must_use]
    pub fn destination(&self, azimuth_rad: f64, horizontal_km: f64, vertical_km: f64) -> Location {
        let lat1 = self.latitude.to_radians();
        let lon1 = self.longitude.to_radians();
        let ad = horizontal_km / EARTH_RADIUS_MEAN;
        let lat2 = (lat1.sin() * ad.cos() + lat1.cos() * ad.sin() * azimuth_rad.cos()).asin();
        let lon2 = lon1
            + (azimuth_rad.sin() * ad.sin() * lat1.cos()).atan2(ad.cos() - lat1.sin() * lat2.sin());
        Location::new(
            lat2.to_degrees(),
            lon2.to_degrees(),
            self.depth + vertical_km,
        )
    }
}

impl PartialEq for Location {
    fn eq(&self, other: &Self) -> bool {
        self.latitude.to_bits() == other.latitude.to_bits()
            && self.longitude.to_bits() == other.longitude.to_bits()
            && self.depth.to_bits() == other.depth.to_bits()
    }
}

impl Eq for Location {}

impl Hash for Location {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.latitude.to_bits().hash(state);
        self.longitude.to_bits().hash(state);
        self.depth.to_bits().hash(state);
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.5}, {:.5}, {:.3} km",
            self.latitude, self.longitude, self.depth
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_degree_of_latitude() {
        let a = Location::surface(0.0, 0.0);
        let b = Location::surface(1.0, 0.0);
        let expected = EARTH_RADIUS_MEAN * 1f64.to_radians();
        assert!((a.horizontal_distance(&b) - expected).abs() < 1e-9);
    }

    #[test]
    fn linear_distance_includes_depth() {
        let a = Location::new(10.0, 10.0, 0.0);
        let b = Location::new(10.0, 10.0, 12.5);
        assert!((a.linear_distance(&b) - 12.5).abs() < 1e-12);
    }

    #[test]
    fn destination_round_trips_distance_and_azimuth() {
        let origin = Location::new(35.0, -120.0, 2.0);
        let az = 60f64.to_radians();
        let dest = origin.destination(az, 25.0, 3.0);
        assert!((origin.horizontal_distance(&dest) - 25.0).abs() < 1e-6);
        assert!((origin.azimuth_rad(&dest) - az).abs() < 1e-6);
        assert!((dest.depth() - 5.0).abs() < 1e-12);
    }

    #[test]
    fn equality_is_bitwise() {
        let a = Location::new(1.0, 2.0, 0.0);
        assert_eq!(a, Location::new(1.0, 2.0, 0.0));
        assert_ne!(a, Location::new(1.0, 2.0, -0.0));
        assert_ne!(a, Location::new(1.0, 2.0, 0.1));
    }
}
