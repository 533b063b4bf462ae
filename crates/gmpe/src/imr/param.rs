//! Parameter constraints and the warning-listener capability.
//!
//! Each numeric parameter has a hard *allowed* range and a narrower
//! *recommended* range. Values outside the allowed range are rejected; values
//! inside it but outside the recommended range are accepted and reported to
//! the listener.

use std::sync::{Mutex, PoisonError};

use super::ImrError;

/// Allowed and recommended bounds for a numeric parameter, both inclusive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamRange {
    /// Hard lower bound.
    pub min: f64,
    /// Hard upper bound.
    pub max: f64,
    /// Recommended lower bound.
    pub warn_min: f64,
    /// Recommended upper bound.
    pub warn_max: f64,
    /// Value applied by `set_param_defaults`.
    pub default: f64,
}

impl ParamRange {
    /// Creates a range.
    #[must_use]
    pub const fn new(min: f64, max: f64, warn_min: f64, warn_max: f64, default: f64) -> Self {
        Self {
            min,
            max,
            warn_min,
            warn_max,
            default,
        }
    }

    /// Whether `value` satisfies the hard constraint. NaN never does.
    #[must_use]
    pub fn is_allowed(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Whether `value` lies in the recommended range.
    #[must_use]
    pub fn is_recommended(&self, value: f64) -> bool {
        value >= self.warn_min && value <= self.warn_max
    }

    /// Rejects a value outside the hard constraint.
    ///
    /// # Errors
    ///
    /// Returns [`ImrError::InvalidParameterValue`].
    pub fn check(&self, name: &'static str, value: f64) -> Result<(), ImrError> {
        if self.is_allowed(value) {
            return Ok(());
        }
        Err(ImrError::InvalidParameterValue {
            name,
            value,
            reason: format!("outside the allowed range [{}, {}]", self.min, self.max),
        })
    }
}

/// A value accepted outside its recommended range.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterWarning {
    /// Parameter name.
    pub name: &'static str,
    /// Value before the set.
    pub old_value: f64,
    /// Value after the set.
    pub new_value: f64,
    /// Recommended lower bound.
    pub warn_min: f64,
    /// Recommended upper bound.
    pub warn_max: f64,
}

/// Receives [`ParameterWarning`]s synchronously from the setter that caused
/// them.
pub trait ParameterWarningListener: Send + Sync {
    /// Called once per out-of-recommended-range set.
    fn on_parameter_warning(&self, warning: &ParameterWarning);
}

/// Default listener: logs each warning with `tracing::warn!`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingWarningListener;

impl ParameterWarningListener for TracingWarningListener {
    fn on_parameter_warning(&self, w: &ParameterWarning) {
        tracing::warn!(
            param = w.name,
            old = w.old_value,
            new = w.new_value,
            warn_min = w.warn_min,
            warn_max = w.warn_max,
            "parameter outside recommended range"
        );
    }
}

/// Listener that stores every warning, for inspection in tests and tools.
#[derive(Debug, Default)]
pub struct RecordingListener {
    seen: Mutex<Vec<ParameterWarning>>,
}

impl RecordingListener {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the warnings received so far.
    #[must_use]
    pub fn warnings(&self) -> Vec<ParameterWarning> {
        self.seen
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl ParameterWarningListener for RecordingListener {
    fn on_parameter_warning(&self, warning: &ParameterWarning) {
        self.seen
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(warning.clone());
    }
}

/// A constrained numeric parameter with its current value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct WarnedValue {
    name: &'static str,
    range: ParamRange,
    value: f64,
}

impl WarnedValue {
    pub(crate) const fn new(name: &'static str, range: ParamRange) -> Self {
        Self {
            name,
            range,
            value: range.default,
        }
    }

    pub(crate) fn get(&self) -> f64 {
        self.value
    }

    pub(crate) fn check(&self, value: f64) -> Result<(), ImrError> {
        self.range.check(self.name, value)
    }

    /// Sets a value already accepted by [`WarnedValue::check`], notifying
    /// the listener if it is outside the recommended range.
    pub(crate) fn commit(&mut self, value: f64, listener: &dyn ParameterWarningListener) {
        if !self.range.is_recommended(value) {
            listener.on_parameter_warning(&ParameterWarning {
                name: self.name,
                old_value: self.value,
                new_value: value,
                warn_min: self.range.warn_min,
                warn_max: self.range.warn_max,
            });
        }
        self.value = value;
    }

    pub(crate) fn set(
        &mut self,
        value: f64,
        listener: &dyn ParameterWarningListener,
    ) -> Result<(), ImrError> {
        self.check(value)?;
        self.commit(value, listener);
        Ok(())
    }

    pub(crate) fn reset(&mut self) {
        self.value = self.range.default;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RANGE: ParamRange = ParamRange::new(4.0, 9.0, 5.0, 8.0, 6.0);

    #[test]
    fn allowed_and_recommended() {
        assert!(RANGE.is_allowed(4.0));
        assert!(RANGE.is_allowed(9.0));
        assert!(!RANGE.is_allowed(9.01));
        assert!(!RANGE.is_allowed(f64::NAN));
        assert!(RANGE.is_recommended(5.0));
        assert!(!RANGE.is_recommended(4.5));
    }

    #[test]
    fn out_of_recommended_warns_and_sets() {
        let listener = RecordingListener::new();
        let mut v = WarnedValue::new("Magnitude", RANGE);
        v.set(4.5, &listener).unwrap();
        assert_eq!(v.get(), 4.5);
        let seen = listener.warnings();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].name, "Magnitude");
        assert_eq!(seen[0].old_value, 6.0);
        assert_eq!(seen[0].new_value, 4.5);
    }

    #[test]
    fn out_of_allowed_rejects_without_mutation() {
        let listener = RecordingListener::new();
        let mut v = WarnedValue::new("Magnitude", RANGE);
        let err = v.set(10.0, &listener).unwrap_err();
        assert!(matches!(err, ImrError::InvalidParameterValue { name: "Magnitude", .. }));
        assert_eq!(v.get(), 6.0);
        assert!(listener.warnings().is_empty());
    }

    #[test]
    fn recommended_is_silent() {
        let listener = RecordingListener::new();
        let mut v = WarnedValue::new("Magnitude", RANGE);
        v.set(7.0, &listener).unwrap();
        v.reset();
        assert_eq!(v.get(), 6.0);
        assert!(listener.warnings().is_empty());
    }
}
