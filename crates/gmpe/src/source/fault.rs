//! Planar fault sources.

use super::SourceError;
use crate::geo::{GriddedSurface, Location, RuptureSurface};
use crate::mfd::MagFreqDist;
use crate::rupture::{Rupture, TectonicRegion};

/// Rupture area in km² from Wells & Coppersmith (1994), all slip types.
#[inline]
#[must_use]
pub fn wells_coppersmith_area(magnitude: f64) -> f64 {
    10f64.powf(-3.49 + 0.91 * magnitude)
}

/// Everything that identifies a simple fault source.
///
/// Equality compares every field, including the trace point by point and
/// the distribution bin by bin.
#[derive(Debug, Clone, PartialEq)]
pub struct FaultSourceData {
    /// Source identifier.
    pub id: i64,
    /// Source name.
    pub name: String,
    /// Tectonic region of every rupture.
    pub tectonic: TectonicRegion,
    /// Magnitude-frequency distribution.
    pub mfd: MagFreqDist,
    /// Surface trace, in strike order.
    pub trace: Vec<Location>,
    /// Dip in degrees.
    pub dip: f64,
    /// Rake in degrees.
    pub rake: f64,
    /// Upper seismogenic depth in km.
    pub upper_depth: f64,
    /// Lower seismogenic depth in km.
    pub lower_depth: f64,
    /// Whether ruptures float over the surface or always fill it.
    pub floating: bool,
}

/// A fault source with its discretised surface.
#[derive(Debug, Clone, PartialEq)]
pub struct SimpleFaultSource {
    data: FaultSourceData,
    surface: GriddedSurface,
}

impl SimpleFaultSource {
    /// Builds the source, gridding the fault at `spacing` km.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] when the geometry is invalid or the rake is
    /// not finite.
    pub fn new(data: FaultSourceData, spacing: f64) -> Result<Self, SourceError> {
        if !data.rake.is_finite() {
            return Err(SourceError::InvalidValue {
                name: "rake",
                value: data.rake,
            });
        }
        let surface = GriddedSurface::from_simple_fault(
            &data.trace,
            data.dip,
            data.upper_depth,
            data.lower_depth,
            spacing,
        )?;
        Ok(Self { data, surface })
    }

    /// Identity fields.
    #[must_use]
    pub fn data(&self) -> &FaultSourceData {
        &self.data
    }

    /// Full fault surface.
    #[must_use]
    pub fn surface(&self) -> RuptureSurface {
        RuptureSurface::Gridded(self.surface.clone())
    }

    /// Every rupture with its annual rate. Zero-rate bins produce nothing.
    #[must_use]
    pub fn ruptures(&self) -> Vec<(Rupture, f64)> {
        let mut out = Vec::new();
        for (m, rate) in self.data.mfd.points() {
            if rate <= 0.0 {
                continue;
            }
            let windows = if self.data.floating {
                self.floating_windows(m)
            } else {
                vec![self.surface.clone()]
            };
            let share = rate / windows.len() as f64;
            out.extend(windows.into_iter().map(|w| (self.rupture_on(m, w), share)));
        }
        out
    }

    fn rupture_on(&self, magnitude: f64, surface: GriddedSurface) -> Rupture {
        let hypocenter = surface.centroid();
        Rupture::new(
            magnitude,
            self.data.rake,
            hypocenter,
            RuptureSurface::Gridded(surface),
            self.data.tectonic,
        )
    }

    /// All placements of a square-ish rupture of the magnitude's area,
    /// stepping one grid cell at a time.
    fn floating_windows(&self, magnitude: f64) -> Vec<GriddedSurface> {
        let g = &self.surface;
        let fault_width = g.width();
        let fault_length = g.length();
        let area = wells_coppersmith_area(magnitude);
        let width = area.sqrt().min(fault_width);
        let length = area / width;

        let rows = cells(width, fault_width, g.rows());
        let cols = cells(length, fault_length, g.cols());
        let mut windows = Vec::new();
        for r in 0..=g.rows() - rows {
            for c in 0..=g.cols() - cols {
                if let Some(w) = g.sub_surface(r, c, rows, cols) {
                    windows.push(w);
                }
            }
        }
        windows
    }
}

/// Grid points needed to span `extent` on an axis of `total` km with `n`
/// points, clamped to `[1, n]`.
fn cells(extent: f64, total: f64, n: usize) -> usize {
    if n <= 1 || total <= 0.0 {
        return n.max(1);
    }
    let step = total / (n - 1) as f64;
    ((extent / step).round() as usize + 1).clamp(1, n)
}
