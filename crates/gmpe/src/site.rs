//! Sites: a location, an optional name, and named site parameters.
//!
//! Identity is `(location, name)` only. Two sites that share a location and
//! name are the same key in a `HashMap` no matter what parameters they carry,
//! and changing a site's parameters never changes its hash.
//!
//! # Example
//!
//! ```
//! use gmpe::geo::Location;
//! use gmpe::site::{Site, SiteValue, VS30};
//!
//! let mut a = Site::new(Location::surface(34.0, -118.0));
//! let b = Site::new(Location::surface(34.0, -118.0));
//! a.set_param(VS30, SiteValue::Double(400.0));
//! assert_eq!(a, b);
//! assert_eq!(a.double(VS30), Some(400.0));
//! assert_eq!(b.double(VS30), None);
//! ```

use std::collections::BTreeMap;
use std::hash::{Hash, Hasher};

use crate::geo::Location;

/// Parameter name for the average shear-wave velocity in the top 30 m (m/s).
pub const VS30: &str = "Vs30";

/// Parameter name for a family-specific categorical site type.
pub const SITE_TYPE: &str = "Site Type";

/// Default Vs30 used when a site carries none (NEHRP B/C boundary).
pub const DEFAULT_VS30: f64 = 760.0;

/// A site-parameter value.
#[derive(Debug, Clone, PartialEq)]
pub enum SiteValue {
    /// A numeric value (e.g. Vs30).
    Double(f64),
    /// A categorical value (e.g. `"Rock"`).
    Text(String),
}

/// A location where ground motion is evaluated.
#[derive(Debug, Clone)]
pub struct Site {
    location: Location,
    name: Option<String>,
    params: BTreeMap<String, SiteValue>,
}

impl Site {
    /// Creates an unnamed site with no parameters.
    #[must_use]
    pub fn new(location: Location) -> Self {
        Self {
            location,
            name: None,
            params: BTreeMap::new(),
        }
    }

    /// Creates a named site with no parameters.
    #[must_use]
    pub fn named(location: Location, name: impl Into<String>) -> Self {
        Self {
            location,
            name: Some(name.into()),
            params: BTreeMap::new(),
        }
    }

    /// Builder form of [`Site::set_param`].
    #[must_use]
    pub fn with_param(mut self, name: impl Into<String>, value: SiteValue) -> Self {
        self.set_param(name, value);
        self
    }

    /// The site location.
    #[must_use]
    pub fn location(&self) -> &Location {
        &self.location
    }

    /// The site name, if any.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Inserts or replaces a parameter. Identity is unaffected.
    pub fn set_param(&mut self, name: impl Into<String>, value: SiteValue) {
        self.params.insert(name.into(), value);
    }

    /// Looks up a parameter by name.
    #[must_use]
    pub fn param(&self, name: &str) -> Option<&SiteValue> {
        self.params.get(name)
    }

    /// Numeric parameter by name; `None` if absent or categorical.
    #[must_use]
    pub fn double(&self, name: &str) -> Option<f64> {
        match self.params.get(name) {
            Some(SiteValue::Double(v)) => Some(*v),
            _ => None,
        }
    }

    /// Categorical parameter by name; `None` if absent or numeric.
    #[must_use]
    pub fn text(&self, name: &str) -> Option<&str> {
        match self.params.get(name) {
            Some(SiteValue::Text(v)) => Some(v.as_str()),
            _ => None,
        }
    }

    /// Vs30, falling back to [`DEFAULT_VS30`].
    #[must_use]
    pub fn vs30_or_default(&self) -> f64 {
        self.double(VS30).unwrap_or(DEFAULT_VS30)
    }

    /// All parameters in name order.
    pub fn params(&self) -> impl Iterator<Item = (&str, &SiteValue)> {
        self.params.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl PartialEq for Site {
    fn eq(&self, other: &Self) -> bool {
        self.location == other.location && self.name == other.name
    }
}

impl Eq for Site {}

impl Hash for Site {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.location.hash(state);
        self.name.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::hash_map::DefaultHasher;

    fn hash_of(site: &Site) -> u64 {
        let mut h = DefaultHasher::new();
        site.hash(&mut h);
        h.finish()
    }

    #[test]
    fn names_participate_in_identity() {
        let loc = Location::surface(10.0, 20.0);
        assert_eq!(Site::new(loc), Site::new(loc));
        assert_eq!(Site::named(loc, "A"), Site::named(loc, "A"));
        assert_ne!(Site::named(loc, "A"), Site::named(loc, "B"));
        assert_ne!(Site::named(loc, "A"), Site::new(loc));
    }

    #[test]
    fn params_do_not_change_hash() {
        let mut s = Site::named(Location::surface(1.0, 2.0), "x");
        let before = hash_of(&s);
        s.set_param(VS30, SiteValue::Double(300.0));
        s.set_param(SITE_TYPE, SiteValue::Text("Rock".into()));
        assert_eq!(before, hash_of(&s));
    }

    #[test]
    fn typed_lookups() {
        let s = Site::new(Location::default())
            .with_param(VS30, SiteValue::Double(550.0))
            .with_param(SITE_TYPE, SiteValue::Text("Deep-Soil".into()));
        assert_eq!(s.double(VS30), Some(550.0));
        assert_eq!(s.text(VS30), None);
        assert_eq!(s.text(SITE_TYPE), Some("Deep-Soil"));
        assert_eq!(Site::new(Location::default()).vs30_or_default(), DEFAULT_VS30);
    }
}
