//! Environment readiness checks run before real generation.

use std::sync::Arc;

use semver::Version;
use tracing::{debug, instrument};

use kiln_core::{
    application::{CommandSpec, Preflight, ProcessRunner},
    domain::{CheckResult, PreflightReport, ProjectConfig},
};

/// Oldest supported Node.js major version.
pub const MIN_NODE_MAJOR: u64 = 18;

/// Probes the host for Node.js, the selected package manager and git.
pub struct SystemPreflight {
    runner: Arc<dyn ProcessRunner>,
}

impl SystemPreflight {
    pub fn new(runner: Arc<dyn ProcessRunner>) -> Self {
        Self { runner }
    }

    fn version_of(&self, program: &str) -> Option<String> {
        self.runner
            .probe(&CommandSpec::new(program, ".").arg("--version"))
    }

    fn check_node(&self) -> CheckResult {
        let Some(raw) = self.version_of("node") else {
            return CheckResult::fail("node", "Node.js was not found on PATH");
        };
        match parse_version(&raw) {
            Some(v) if v.major >= MIN_NODE_MAJOR => CheckResult::pass("node", format!("v{v}")),
            Some(v) => CheckResult::fail(
                "node",
                format!("Node.js v{v} is too old; v{MIN_NODE_MAJOR} or newer is required"),
            ),
            None => CheckResult::fail("node", format!("unrecognised version output: {raw}")),
        }
    }

    fn check_package_manager(&self, config: &ProjectConfig) -> CheckResult {
        let pm = config.package_manager();
        match self.version_of(pm.binary()) {
            Some(v) => CheckResult::pass(pm.as_str(), v),
            None => CheckResult::fail(pm.as_str(), format!("{pm} was not found on PATH")),
        }
    }

    fn check_git(&self) -> CheckResult {
        match self.version_of("git") {
            Some(v) => CheckResult::pass("git", v),
            None => CheckResult::warn("git", "git was not found; the project will not be versioned"),
        }
    }
}

impl Preflight for SystemPreflight {
    #[instrument(skip_all)]
    fn run_all_checks(&self, config: &ProjectConfig) -> PreflightReport {
        let report = PreflightReport::from_checks(vec![
            self.check_node(),
            self.check_package_manager(config),
            self.check_git(),
        ]);
        debug!(all_passed = report.all_passed, fatal = report.fatal_error, "Preflight done");
        report
    }
}

/// Accepts `v20.11.0`, `20.11.0` and a bare `20`.
fn parse_version(raw: &str) -> Option<Version> {
    let trimmed = raw.trim().trim_start_matches('v');
    Version::parse(trimmed).ok().or_else(|| {
        let mut parts = trimmed.split('.').map(str::parse::<u64>);
        let major = parts.next()?.ok()?;
        let minor = parts.next().and_then(Result::ok).unwrap_or(0);
        let patch = parts.next().and_then(Result::ok).unwrap_or(0);
        Some(Version::new(major, minor, patch))
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use kiln_core::application::ScaffoldError;
    use kiln_core::domain::{Framework, PackageManager};

    struct Answers(HashMap<&'static str, &'static str>);

    impl ProcessRunner for Answers {
        fn run(&self, _: &CommandSpec, _: bool, _: &str) -> Result<(), ScaffoldError> {
            Ok(())
        }

        fn probe(&self, command: &CommandSpec) -> Option<String> {
            self.0.get(command.program.as_str()).map(|s| s.to_string())
        }
    }

    fn report(answers: &[(&'static str, &'static str)], pm: PackageManager) -> PreflightReport {
        let preflight = SystemPreflight::new(Arc::new(Answers(answers.iter().copied().collect())));
        let config = ProjectConfig::builder("app")
            .package_manager(pm)
            .framework(Framework::Vue)
            .build()
            .unwrap();
        preflight.run_all_checks(&config)
    }

    #[test]
    fn ready_host_passes() {
        let r = report(
            &[("node", "v20.11.0"), ("npm", "10.2.4"), ("git", "git version 2.43.0")],
            PackageManager::Npm,
        );
        assert!(r.all_passed);
        assert!(!r.fatal_error);
    }

    #[test]
    fn old_node_is_fatal() {
        let r = report(&[("node", "v16.20.2"), ("npm", "8.0.0")], PackageManager::Npm);
        assert!(r.fatal_error);
        let blocking: Vec<_> = r.blocking().map(|c| c.name.as_str()).collect();
        assert_eq!(blocking, ["node"]);
    }

    #[test]
    fn missing_package_manager_is_fatal_but_git_is_not() {
        let r = report(&[("node", "v22.1.0")], PackageManager::Pnpm);
        let blocking: Vec<_> = r.blocking().map(|c| c.name.as_str()).collect();
        assert_eq!(blocking, ["pnpm"]);
        let git = r.checks.iter().find(|c| c.name == "git").unwrap();
        assert!(!git.passed && !git.fatal);
    }

    #[test]
    fn loose_versions_parse() {
        assert_eq!(parse_version("v18.19.0"), Some(Version::new(18, 19, 0)));
        assert_eq!(parse_version("20\n"), Some(Version::new(20, 0, 0)));
        assert_eq!(parse_version("nope"), None);
    }
}
