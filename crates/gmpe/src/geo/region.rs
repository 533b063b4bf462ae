//! Polygonal regions and their gridded nodes.

use super::Location;
use crate::source::SourceError;

/// A closed polygon in latitude/longitude space.
///
/// The border is implicitly closed (last vertex connects to the first).
/// Containment uses an even-odd ray cast in degree space, which is adequate
/// for the source-zone sizes used in hazard models.
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    border: Vec<Location>,
}

impl Region {
    /// Creates a region from at least three border vertices.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::EmptyRegion`] if fewer than three vertices are given.
    pub fn new(border: Vec<Location>) -> Result<Self, SourceError> {
        if border.len() < 3 {
            return Err(SourceError::EmptyRegion {
                vertices: border.len(),
            });
        }
        Ok(Self { border })
    }

    /// Axis-aligned rectangle between two corners.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::EmptyRegion`] if the corners coincide in
    /// latitude or longitude.
    pub fn rectangle(min_lat: f64, max_lat: f64, min_lon: f64, max_lon: f64) -> Result<Self, SourceError> {
        if min_lat >= max_lat || min_lon >= max_lon {
            return Err(SourceError::EmptyRegion { vertices: 0 });
        }
        Self::new(vec![
            Location::surface(min_lat, min_lon),
            Location::surface(min_lat, max_lon),
            Location::surface(max_lat, max_lon),
            Location::surface(max_lat, min_lon),
        ])
    }

    /// Border vertices in order.
    #[must_use]
    pub fn border(&self) -> &[Location] {
        &self.border
    }

    /// Whether `loc` lies inside the polygon (depth ignored).
    #[must_use]
    pub fn contains(&self, loc: &Location) -> bool {
        polygon_contains(&self.border, loc)
    }

    /// Grid nodes at `spacing_deg` that fall inside the region.
    ///
    /// Nodes sit at cell centres of a grid anchored on the region's
    /// south-west bounding-box corner.
    #[must_use]
    pub fn nodes(&self, spacing_deg: f64) -> Vec<Location> {
        if spacing_deg.is_nan() || spacing_deg <= 0.0 {
            return Vec::new();
        }
        let (mut min_lat, mut max_lat) = (f64::INFINITY, f64::NEG_INFINITY);
        let (mut min_lon, mut max_lon) = (f64::INFINITY, f64::NEG_INFINITY);
        for v in &self.border {
            min_lat = min_lat.min(v.latitude());
            max_lat = max_lat.max(v.latitude());
            min_lon = min_lon.min(v.longitude());
            max_lon = max_lon.max(v.longitude());
        }
        let rows = ((max_lat - min_lat) / spacing_deg).ceil() as usize;
        let cols = ((max_lon - min_lon) / spacing_deg).ceil() as usize;
        let mut out = Vec::with_capacity(rows * cols);
        for r in 0..rows {
            let lat = min_lat + (r as f64 + 0.5) * spacing_deg;
            for c in 0..cols {
                let lon = min_lon + (c as f64 + 0.5) * spacing_deg;
                let node = Location::surface(lat, lon);
                if self.contains(&node) {
                    out.push(node);
                }
            }
        }
        out
    }

    /// Minimum horizontal distance from `loc` to the border; zero inside.
    #[must_use]
    pub fn distance_to(&self, loc: &Location) -> f64 {
        if self.contains(loc) {
            return 0.0;
        }
        self.border
            .iter()
            .map(|v| v.horizontal_distance(loc))
            .fold(f64::INFINITY, f64::min)
    }
}

/// Even-odd ray cast of `loc` against an implicitly closed polygon.
pub(crate) fn polygon_contains(border: &[Location], loc: &Location) -> bool {
    let n = border.len();
    if n < 3 {
        return false;
    }
    let (x, y) = (loc.longitude(), loc.latitude());
    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let (xi, yi) = (border[i].longitude(), border[i].latitude());
        let (xj, yj) = (border[j].longitude(), border[j].latitude());
        if (yi > y) != (yj > y) && x < (xj - xi) * (y - yi) / (yj - yi) + xi {
            inside = !inside;
        }
        j = i;
    }
    inside
}
