//! Geometry collaborators: locations, regions and rupture surfaces.

mod location;
pub mod region;
pub mod surface;

pub use location::{Location, EARTH_RADIUS_MEAN};
pub use region::Region;
pub use surface::{GriddedSurface, RuptureSurface};
