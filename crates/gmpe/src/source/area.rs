//! Gridded area sources.

use super::SourceError;
use crate::geo::{Location, Region};
use crate::mfd::MagFreqDist;
use crate::rupture::{Rupture, TectonicRegion};

/// A polygonal zone of distributed seismicity.
///
/// Every grid node hosts a point rupture per magnitude bin and the bin rate
/// is shared equally across nodes.
#[derive(Debug, Clone, PartialEq)]
pub struct AreaSource {
    name: String,
    region: Region,
    mfd: MagFreqDist,
    depth: f64,
    rake: f64,
    tectonic: TectonicRegion,
    nodes: Vec<Location>,
}

impl AreaSource {
    /// Builds the source, gridding `region` at `spacing_deg`.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] for a bad spacing, a negative depth, a
    /// non-finite rake, or a grid with no node inside the region.
    pub fn new(
        name: impl Into<String>,
        region: Region,
        mfd: MagFreqDist,
        depth: f64,
        rake: f64,
        tectonic: TectonicRegion,
        spacing_deg: f64,
    ) -> Result<Self, SourceError> {
        let name = name.into();
        if !spacing_deg.is_finite() || spacing_deg <= 0.0 {
            return Err(SourceError::InvalidSpacing { spacing: spacing_deg });
        }
        if !depth.is_finite() || depth < 0.0 {
            return Err(SourceError::InvalidValue { name: "depth", value: depth });
        }
        if !rake.is_finite() {
            return Err(SourceError::InvalidValue { name: "rake", value: rake });
        }
        let nodes: Vec<Location> = region
            .nodes(spacing_deg)
            .into_iter()
            .map(|n| n.with_depth(depth))
            .collect();
        if nodes.is_empty() {
            return Err(SourceError::NoGridNodes {
                name,
                spacing: spacing_deg,
            });
        }
        Ok(Self {
            name,
            region,
            mfd,
            depth,
            rake,
            tectonic,
            nodes,
        })
    }

    /// Source name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Zone outline.
    #[must_use]
    pub fn region(&self) -> &Region {
        &self.region
    }

    /// Magnitude-frequency distribution of the whole zone.
    #[must_use]
    pub fn mfd(&self) -> &MagFreqDist {
        &self.mfd
    }

    /// Hypocentral depth of every rupture in km.
    #[must_use]
    pub fn depth(&self) -> f64 {
        self.depth
    }

    /// Tectonic region.
    #[must_use]
    pub fn tectonic(&self) -> TectonicRegion {
        self.tectonic
    }

    /// Grid nodes at rupture depth.
    #[must_use]
    pub fn nodes(&self) -> &[Location] {
        &self.nodes
    }

    /// Every point rupture with its annual rate.
    #[must_use]
    pub fn ruptures(&self) -> Vec<(Rupture, f64)> {
        let n = self.nodes.len() as f64;
        let mut out = Vec::new();
        for (m, rate) in self.mfd.points() {
            if rate <= 0.0 {
                continue;
            }
            out.extend(
                self.nodes
                    .iter()
                    .map(|&node| (Rupture::point(m, self.rake, node, self.tectonic), rate / n)),
            );
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mfd::GutenbergRichterMfd;

    fn zone(spacing: f64) -> Result<AreaSource, SourceError> {
        let region = Region::rectangle(34.0, 34.5, -118.0, -117.5)?;
        let mfd = GutenbergRichterMfd::new(1.0, 0.05, 5.0, 6.5, 4)?.into();
        AreaSource::new("zone", region, mfd, 8.0, 0.0, TectonicRegion::ActiveShallow, spacing)
    }

    #[test]
    fn nodes_times_bins() {
        let src = zone(0.1).unwrap();
        assert_eq!(src.nodes().len(), 25);
        let ruptures = src.ruptures();
        assert_eq!(ruptures.len(), 100);
        assert!(ruptures.iter().all(|(r, _)| r.hypocenter().depth() == 8.0));
        let total: f64 = ruptures.iter().map(|(_, r)| r).sum();
        assert!((total - 0.05).abs() < 1e-12, "rate not conserved: {total}");
    }

    #[test]
    fn bad_inputs() {
        assert!(matches!(zone(0.0), Err(SourceError::InvalidSpacing { .. })));
        let region = Region::rectangle(34.0, 34.5, -118.0, -117.5).unwrap();
        let mfd: MagFreqDist = GutenbergRichterMfd::new(1.0, 0.05, 5.0, 6.5, 4).unwrap().into();
        assert!(AreaSource::new("z", region, mfd, -1.0, 0.0, TectonicRegion::ActiveShallow, 0.1).is_err());
    }
}
