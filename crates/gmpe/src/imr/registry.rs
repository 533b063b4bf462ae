//! Lookup of every implemented family by short name.

use super::abrahamson_silva_1997::AbrahamsonSilva1997;
use super::boore_atkinson_2008::BooreAtkinson2008;
use super::boore_joyner_fumal_1997::BooreJoynerFumal1997;
use super::campbell_1997::Campbell1997;
use super::cornell_1979::Cornell1979;
use super::sadigh_1997::Sadigh1997;
use super::spudich_1999::Spudich1999;
use super::travasarou_2003::Travasarou2003;
use super::youngs_1997::Youngs1997;
use super::{GroundMotionModel, ImrError};

/// Short names of every registered family, in registry order.
pub const SHORT_NAMES: [&str; 9] = [
    "BJF_1997",
    "Sadigh_1997",
    "Campbell_1997",
    "AS_1997",
    "BA_2008",
    "Youngs_1997",
    "TBA_2003",
    "SEA_1999",
    "Cornell_1979",
];

/// One instance of every family.
#[must_use]
pub fn all_models() -> Vec<Box<dyn GroundMotionModel>> {
    vec![
        Box::new(BooreJoynerFumal1997),
        Box::new(Sadigh1997),
        Box::new(Campbell1997),
        Box::new(AbrahamsonSilva1997),
        Box::new(BooreAtkinson2008),
        Box::new(Youngs1997),
        Box::new(Travasarou2003),
        Box::new(Spudich1999),
        Box::new(Cornell1979),
    ]
}

/// The family registered under `short_name`.
///
/// # Errors
///
/// Returns [`ImrError::UnsupportedSelection`] for an unknown name.
pub fn model_by_short_name(short_name: &str) -> Result<Box<dyn GroundMotionModel>, ImrError> {
    all_models()
        .into_iter()
        .find(|m| m.info().short_name == short_name)
        .ok_or_else(|| ImrError::unsupported("registry", "model", short_name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_match_models() {
        let names: Vec<_> = all_models().iter().map(|m| m.info().short_name).collect();
        assert_eq!(names, SHORT_NAMES);
    }

    #[test]
    fn lookup() {
        assert_eq!(model_by_short_name("BA_2008").unwrap().info().short_name, "BA_2008");
        assert!(model_by_short_name("CY_2008").is_err());
    }
}
