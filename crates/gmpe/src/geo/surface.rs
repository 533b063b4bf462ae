//! Rupture surfaces and the site-to-rupture distance metrics.
//!
//! Attenuation relationships never walk the rupture grid themselves; they ask
//! the surface for the one metric they are calibrated against.

use super::region::polygon_contains;
use super::Location;
use crate::imr::DistanceMetric;
use crate::source::SourceError;

/// Minimum depth of seismogenic rupture used by the seismogenic distance.
pub const SEISMOGENIC_DEPTH_FLOOR: f64 = 3.0;

/// The geometric extent of a rupture.
#[derive(Debug, Clone, PartialEq)]
pub enum RuptureSurface {
    /// A point source; all metrics reduce to point distances.
    Point(Location),
    /// A rectangular grid of points on a planar fault.
    Gridded(GriddedSurface),
}

impl RuptureSurface {
    /// Distance from `site` under `metric`.
    ///
    /// Hypocentral distance is not a property of the surface and is
    /// measured from `hypocenter` instead.
    #[must_use]
    pub fn distance(&self, metric: DistanceMetric, site: &Location, hypocenter: &Location) -> f64 {
        match metric {
            DistanceMetric::Rupture => self.distance_rup(site),
            DistanceMetric::JoynerBoore => self.distance_jb(site),
            DistanceMetric::Seismogenic => self.distance_seis(site),
            DistanceMetric::Hypocentral => site.linear_distance(hypocenter),
        }
    }

    /// Shortest 3-D distance to the surface.
    #[must_use]
    pub fn distance_rup(&self, site: &Location) -> f64 {
        match self {
            Self::Point(p) => site.linear_distance(p),
            Self::Gridded(g) => g.distance_rup(site),
        }
    }

    /// Shortest horizontal distance to the surface projection.
    #[must_use]
    pub fn distance_jb(&self, site: &Location) -> f64 {
        match self {
            Self::Point(p) => site.horizontal_distance(p),
            Self::Gridded(g) => g.distance_jb(site),
        }
    }

    /// Shortest distance to the part of the surface below
    /// [`SEISMOGENIC_DEPTH_FLOOR`].
    #[must_use]
    pub fn distance_seis(&self, site: &Location) -> f64 {
        match self {
            Self::Point(p) => site.linear_distance(&p.with_depth(p.depth().max(SEISMOGENIC_DEPTH_FLOOR))),
            Self::Gridded(g) => g.distance_seis(site),
        }
    }

    /// Average dip in degrees; a point is treated as vertical.
    #[must_use]
    pub fn dip(&self) -> f64 {
        match self {
            Self::Point(_) => 90.0,
            Self::Gridded(g) => g.dip(),
        }
    }

    /// Depth to the top of rupture in km.
    #[must_use]
    pub fn top_depth(&self) -> f64 {
        match self {
            Self::Point(p) => p.depth(),
            Self::Gridded(g) => g.top_depth(),
        }
    }

    /// Whether `site` lies on the hanging-wall side of a dipping rupture.
    #[must_use]
    pub fn is_on_hanging_wall(&self, site: &Location) -> bool {
        match self {
            Self::Point(_) => false,
            Self::Gridded(g) => g.is_on_hanging_wall(site),
        }
    }

    /// Representative interior point (used as a default hypocenter).
    #[must_use]
    pub fn centroid(&self) -> Location {
        match self {
            Self::Point(p) => *p,
            Self::Gridded(g) => g.centroid(),
        }
    }
}

/// A rows × cols grid of locations: row 0 is the top edge, column 0 the
/// first trace point. Stored row major.
#[derive(Debug, Clone, PartialEq)]
pub struct GriddedSurface {
    rows: usize,
    cols: usize,
    dip: f64,
    points: Vec<Location>,
}

impl GriddedSurface {
    /// Builds the grid for a planar fault from its surface trace.
    ///
    /// The trace is resampled to evenly spaced points no farther apart than
    /// roughly `spacing` km, and each point is projected down-dip,
    /// perpendicular to the average strike, from `upper` to `lower` depth.
    ///
    /// # Errors
    ///
    /// Returns a [`SourceError`] when the trace has fewer than two points,
    /// the dip is outside (0, 90], the depths are out of order, or the
    /// spacing is not positive.
    pub fn from_simple_fault(
        trace: &[Location],
        dip: f64,
        upper: f64,
        lower: f64,
        spacing: f64,
    ) -> Result<Self, SourceError> {
        if trace.len() < 2 {
            return Err(SourceError::DegenerateTrace { points: trace.len() });
        }
        if dip.is_nan() || dip <= 0.0 || dip > 90.0 {
            return Err(SourceError::InvalidDip { dip });
        }
        if upper.is_nan() || lower.is_nan() || upper < 0.0 || lower <= upper {
            return Err(SourceError::InvalidDepths { upper, lower });
        }
        if spacing.is_nan() || spacing <= 0.0 {
            return Err(SourceError::InvalidSpacing { spacing });
        }

        let resampled = resample_trace(trace, spacing);
        let cols = resampled.len();
        let strike = trace[0].azimuth_rad(&trace[trace.len() - 1]);
        let dip_dir = strike + core::f64::consts::FRAC_PI_2;
        let dip_rad = dip.to_radians();
        let width = (lower - upper) / dip_rad.sin();
        let rows = ((width / spacing).round() as usize).max(1) + 1;
        let dz = (lower - upper) / (rows - 1) as f64;

        let mut points = Vec::with_capacity(rows * cols);
        for r in 0..rows {
            let depth = upper + r as f64 * dz;
            for p in &resampled {
                let vertical = depth - p.depth();
                let horizontal = vertical * dip_rad.cos() / dip_rad.sin();
                points.push(p.destination(dip_dir, horizontal, vertical));
            }
        }
        Ok(Self {
            rows,
            cols,
            dip,
            points,
        })
    }

    /// Number of rows (down dip).
    #[inline]
    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns (along strike).
    #[inline]
    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Location at (`row`, `col`).
    #[inline]
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> &Location {
        &self.points[row * self.cols + col]
    }

    /// All grid points, row major.
    #[must_use]
    pub fn points(&self) -> &[Location] {
        &self.points
    }

    /// Dip in degrees.
    #[must_use]
    pub fn dip(&self) -> f64 {
        self.dip
    }

    /// Depth of the shallowest row.
    #[must_use]
    pub fn top_depth(&self) -> f64 {
        self.get(0, 0).depth()
    }

    /// Along-strike length of the top edge in km.
    #[must_use]
    pub fn length(&self) -> f64 {
        (1..self.cols)
            .map(|c| self.get(0, c - 1).horizontal_distance(self.get(0, c)))
            .sum()
    }

    /// Down-dip width in km.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.get(0, 0).linear_distance(self.get(self.rows - 1, 0))
    }

    /// The grid window starting at (`row`, `col`) with the given size.
    ///
    /// Returns `None` if the window does not fit inside the grid.
    #[must_use]
    pub fn sub_surface(&self, row: usize, col: usize, rows: usize, cols: usize) -> Option<Self> {
        if rows == 0 || cols == 0 || row + rows > self.rows || col + cols > self.cols {
            return None;
        }
        let mut points = Vec::with_capacity(rows * cols);
        for r in row..row + rows {
            points.extend_from_slice(&self.points[r * self.cols + col..r * self.cols + col + cols]);
        }
        Some(Self {
            rows,
            cols,
            dip: self.dip,
            points,
        })
    }

    /// Grid point nearest the middle of the surface.
    #[must_use]
    pub fn centroid(&self) -> Location {
        *self.get(self.rows / 2, self.cols / 2)
    }

    fn distance_rup(&self, site: &Location) -> f64 {
        self.points
            .iter()
            .map(|p| site.linear_distance(p))
            .fold(f64::INFINITY, f64::min)
    }

    fn distance_seis(&self, site: &Location) -> f64 {
        self.points
            .iter()
            .map(|p| site.linear_distance(&p.with_depth(p.depth().max(SEISMOGENIC_DEPTH_FLOOR))))
            .fold(f64::INFINITY, f64::min)
    }

    fn distance_jb(&self, site: &Location) -> f64 {
        if polygon_contains(&self.projection_outline(), site) {
            return 0.0;
        }
        self.points
            .iter()
            .map(|p| site.horizontal_distance(p))
            .fold(f64::INFINITY, f64::min)
    }

    /// Top edge followed by the reversed bottom edge.
    fn projection_outline(&self) -> Vec<Location> {
        let mut outline: Vec<Location> = (0..self.cols).map(|c| *self.get(0, c)).collect();
        outline.extend((0..self.cols).rev().map(|c| *self.get(self.rows - 1, c)));
        outline
    }

    fn is_on_hanging_wall(&self, site: &Location) -> bool {
        if self.dip >= 89.0 {
            return false;
        }
        if polygon_contains(&self.projection_outline(), site) {
            return true;
        }
        let edge_distance = |row: usize| {
            (0..self.cols)
                .map(|c| site.horizontal_distance(self.get(row, c)))
                .fold(f64::INFINITY, f64::min)
        };
        edge_distance(self.rows - 1) < edge_distance(0)
    }
}

/// Evenly resamples a polyline so consecutive points are about `spacing` apart.
fn resample_trace(trace: &[Location], spacing: f64) -> Vec<Location> {
    let seg_lengths: Vec<f64> = trace
        .windows(2)
        .map(|w| w[0].horizontal_distance(&w[1]))
        .collect();
    let total: f64 = seg_lengths.iter().sum();
    let n = ((total / spacing).round() as usize).max(1);
    let step = total / n as f64;

    let mut out = Vec::with_capacity(n + 1);
    out.push(trace[0]);
    let mut seg = 0;
    let mut seg_start = 0.0;
    for i in 1..n {
        let target = i as f64 * step;
        while seg + 1 < seg_lengths.len() && seg_start + seg_lengths[seg] < target {
            seg_start += seg_lengths[seg];
            seg += 1;
        }
        let a = &trace[seg];
        let b = &trace[seg + 1];
        let along = target - seg_start;
        let frac = if seg_lengths[seg] > 0.0 {
            along / seg_lengths[seg]
        } else {
            0.0
        };
        let p = a.destination(a.azimuth_rad(b), along, 0.0);
        out.push(p.with_depth(a.depth() + frac * (b.depth() - a.depth())));
    }
    out.push(trace[trace.len() - 1]);
    out
}
