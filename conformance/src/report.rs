//! Check results and their aggregation into a report.

use std::fmt;

/// Outcome class of one check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The check passed.
    Pass,
    /// Something worth a look that does not block conformance, such as a
    /// table for an unregistered family.
    Warning,
    /// The check failed.
    Failure,
}

impl Severity {
    /// Bracketed tag used in console output.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pass => "[PASS]",
            Self::Warning => "[WARN]",
            Self::Failure => "[FAIL]",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One check result.
#[derive(Debug, Clone)]
pub struct TestResult {
    /// Validator that produced the result, e.g. `imr/sigma`.
    pub validator: String,
    /// One-line outcome.
    pub message: String,
    /// Outcome class.
    pub severity: Severity,
    /// Extra lines, typically one per offending family or table row.
    pub details: Vec<String>,
}

impl TestResult {
    fn with(validator: impl Into<String>, message: impl Into<String>, severity: Severity, details: Vec<String>) -> Self {
        Self {
            validator: validator.into(),
            message: message.into(),
            severity,
            details,
        }
    }

    /// A passing result.
    pub fn pass(validator: impl Into<String>, message: impl Into<String>) -> Self {
        Self::with(validator, message, Severity::Pass, Vec::new())
    }

    /// A failing result.
    pub fn fail(validator: impl Into<String>, message: impl Into<String>) -> Self {
        Self::with(validator, message, Severity::Failure, Vec::new())
    }

    /// A failing result with detail lines.
    pub fn fail_with_details(validator: impl Into<String>, message: impl Into<String>, details: Vec<String>) -> Self {
        Self::with(validator, message, Severity::Failure, details)
    }

    /// A warning.
    pub fn warn(validator: impl Into<String>, message: impl Into<String>) -> Self {
        Self::with(validator, message, Severity::Warning, Vec::new())
    }

    /// Passes when `failures` is empty, otherwise fails listing them.
    pub fn from_failures(
        validator: impl Into<String>,
        passed: impl Into<String>,
        failed: impl Into<String>,
        failures: Vec<String>,
    ) -> Self {
        if failures.is_empty() {
            Self::pass(validator, passed)
        } else {
            Self::fail_with_details(validator, failed, failures)
        }
    }

    /// Whether this result is a failure.
    #[must_use]
    pub fn is_failure(&self) -> bool {
        self.severity == Severity::Failure
    }
}

/// Results of every validator that ran.
#[derive(Debug, Default)]
pub struct ConformanceReport {
    /// Results in the order the validators produced them.
    pub results: Vec<TestResult>,
}

impl ConformanceReport {
    /// An empty report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a result.
    pub fn push(&mut self, result: TestResult) {
        self.results.push(result);
    }

    /// Appends all results of `other`.
    pub fn extend(&mut self, other: ConformanceReport) {
        self.results.extend(other.results);
    }

    /// Number of results with the given severity.
    #[must_use]
    pub fn count(&self, severity: Severity) -> usize {
        self.results.iter().filter(|r| r.severity == severity).count()
    }

    /// Number of failed checks.
    #[must_use]
    pub fn failure_count(&self) -> usize {
        self.count(Severity::Failure)
    }

    /// Whether no check failed. Warnings do not count.
    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.failure_count() == 0
    }
}
