use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

/// An advisory finding from post-generation validation. Never an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationFinding {
    pub path: PathBuf,
    pub message: String,
}

impl ValidationFinding {
    pub fn new(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationFinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path.display(), self.message)
    }
}

/// Outcome of one environment-readiness check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckResult {
    pub name: String,
    pub passed: bool,
    /// A failed fatal check blocks generation.
    pub fatal: bool,
    pub message: String,
}

impl CheckResult {
    pub fn pass(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            passed: true,
            fatal: false,
            message: message.into(),
        }
    }

    pub fn warn(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            passed: false,
            fatal: false,
            message: message.into(),
        }
    }

    pub fn fail(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            passed: false,
            fatal: true,
            message: message.into(),
        }
    }
}

/// Aggregate of every preflight check for one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreflightReport {
    pub checks: Vec<CheckResult>,
    pub all_passed: bool,
    pub fatal_error: bool,
}

impl PreflightReport {
    pub fn from_checks(checks: Vec<CheckResult>) -> Self {
        let all_passed = checks.iter().all(|c| c.passed);
        let fatal_error = checks.iter().any(|c| !c.passed && c.fatal);
        Self {
            checks,
            all_passed,
            fatal_error,
        }
    }

    /// Failed fatal checks.
    pub fn blocking(&self) -> impl Iterator<Item = &CheckResult> {
        self.checks.iter().filter(|c| !c.passed && c.fatal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn warnings_do_not_make_report_fatal() {
        let report = PreflightReport::from_checks(vec![
            CheckResult::pass("node", "v20.11.0"),
            CheckResult::warn("git", "not found"),
        ]);
        assert!(!report.all_passed);
        assert!(!report.fatal_error);
        assert_eq!(report.blocking().count(), 0);
    }

    #[test]
    fn failed_fatal_check_marks_report() {
        let report = PreflightReport::from_checks(vec![CheckResult::fail("pnpm", "not on PATH")]);
        assert!(report.fatal_error);
        assert_eq!(report.blocking().next().unwrap().name, "pnpm");
    }
}
