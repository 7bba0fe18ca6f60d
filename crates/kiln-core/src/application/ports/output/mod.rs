//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `kiln-adapters` crate provides implementations.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::application::ScaffoldError;
use crate::domain::{
    Artifact, Framework, OptionMatrix, PreflightReport, ProjectConfig, Stage, ValidationFinding,
};
use crate::error::KilnResult;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `kiln_adapters::filesystem::LocalFilesystem` (production)
/// - `kiln_adapters::filesystem::MemoryFilesystem` (testing)
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> KilnResult<()>;

    /// Write content to a file, replacing it if present.
    fn write_file(&self, path: &Path, content: &str) -> KilnResult<()>;

    fn read_to_string(&self, path: &Path) -> KilnResult<String>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    fn is_dir(&self, path: &Path) -> bool;

    fn remove_file(&self, path: &Path) -> KilnResult<()>;

    /// Remove a directory and all contents.
    fn remove_dir_all(&self, path: &Path) -> KilnResult<()>;
}

/// Port for template rendering.
///
/// Implemented by:
/// - `kiln_adapters::renderer::BuiltinRenderer` (Vite-based frameworks)
#[cfg_attr(test, mockall::automock)]
pub trait TemplateRenderer: Send + Sync {
    /// Artifacts of one write stage, with paths relative to the project root.
    ///
    /// Returning an empty list means the stage has nothing to write for
    /// this configuration.
    fn render(&self, config: &ProjectConfig, stage: Stage) -> KilnResult<Vec<Artifact>>;
}

/// A command line to execute in a working directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: PathBuf,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>, cwd: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: cwd.into(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Port for running external tools (upstream scaffolders, package managers).
#[cfg_attr(test, mockall::automock)]
pub trait ProcessRunner: Send + Sync {
    /// Run `command` to completion.
    ///
    /// In dry-run mode nothing is spawned; the command is only reported.
    /// Failures carry `framework` for display.
    fn run(&self, command: &CommandSpec, dry_run: bool, framework: &str)
    -> Result<(), ScaffoldError>;

    /// Run a short query and return its trimmed stdout, or `None` on any
    /// failure.
    fn probe(&self, command: &CommandSpec) -> Option<String>;

    /// Command lines reported by dry runs so far, in order.
    fn recorded_commands(&self) -> Vec<String> {
        Vec::new()
    }
}

/// Port for post-generation checks. Findings are advisory.
#[cfg_attr(test, mockall::automock)]
pub trait ProjectValidator: Send + Sync {
    fn validate(&self, root: &Path, config: &ProjectConfig) -> Vec<ValidationFinding>;
}

/// Port for environment readiness checks run before generation.
#[cfg_attr(test, mockall::automock)]
pub trait Preflight: Send + Sync {
    fn run_all_checks(&self, config: &ProjectConfig) -> PreflightReport;
}

/// A meta-framework plugin: generates a project by delegating to the
/// framework's own scaffolding CLI.
#[cfg_attr(test, mockall::automock)]
pub trait MetaGenerator: Send + Sync {
    fn framework(&self) -> Framework;

    /// Invoke the upstream scaffolder. Creates the project directory.
    fn scaffold(&self, config: &ProjectConfig) -> Result<(), ScaffoldError>;

    /// Merge extra dependencies and scripts, then install.
    fn post_scaffold(&self, config: &ProjectConfig) -> Result<(), ScaffoldError>;

    fn supported_options(&self) -> OptionMatrix;

    /// Latest published version of the upstream scaffolder, if reachable.
    fn probe_version(&self) -> Option<String>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_spec_displays_joined() {
        let cmd = CommandSpec::new("npx", "/tmp")
            .arg("create-next-app@latest")
            .args(["app", "--ts"]);
        assert_eq!(cmd.to_string(), "npx create-next-app@latest app --ts");
    }
}
