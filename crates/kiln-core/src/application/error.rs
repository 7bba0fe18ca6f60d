//! Application layer errors.
//!
//! These errors represent failures in orchestration, not business logic.
//! Business logic errors are `DomainError` from `crate::domain`.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::domain::Stage;
use crate::error::{ErrorCategory, KilnError};

/// Lines of child stderr retained in a [`ScaffoldError`].
pub const STDERR_TAIL_LINES: usize = 50;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// A write stage failed. Triggers rollback of everything created so far.
    #[error("Generation failed at stage {stage}: {message}")]
    Generation {
        stage: Stage,
        message: String,
        cause: Option<Box<KilnError>>,
        /// Whether the run's own directory was removed afterwards. False
        /// when generating into a directory that already existed.
        rolled_back: bool,
    },

    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    Filesystem { path: PathBuf, reason: String },

    /// `package.json` could not be merged.
    #[error("Cannot merge package manifest {path}: {reason}")]
    ManifestMerge { path: PathBuf, reason: String },

    /// Template rendering failed.
    #[error("Template rendering failed: {reason}")]
    Rendering { reason: String },

    /// An upstream scaffolder or package manager failed.
    #[error(transparent)]
    Scaffold(#[from] ScaffoldError),
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Generation {
                cause, rolled_back, ..
            } => {
                let mut out = vec![if *rolled_back {
                    "Nothing was left behind; the partial project was removed".into()
                } else {
                    "The target directory already existed; files written before the failure \
                     were left in place"
                        .into()
                }];
                if let Some(cause) = cause {
                    out.extend(cause.suggestions());
                }
                out
            }
            Self::Filesystem { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
                "Ensure the parent directory exists".into(),
            ],
            Self::ManifestMerge { path, .. } => vec![
                format!("Check that {} is a valid JSON object", path.display()),
            ],
            Self::Scaffold(e) => e.suggestions(),
            Self::Rendering { .. } => vec!["Check the error details above".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Generation { cause: Some(cause), .. } => cause.category(),
            Self::Generation { cause: None, .. } => ErrorCategory::Internal,
            Self::Filesystem { .. } | Self::Rendering { .. } => ErrorCategory::Internal,
            Self::ManifestMerge { .. } => ErrorCategory::External,
            Self::Scaffold(e) if e.is_registry_miss() => ErrorCategory::NotFound,
            Self::Scaffold(_) => ErrorCategory::External,
        }
    }
}

/// Failure of an upstream scaffolder, of the package manager, or a lookup
/// miss in the meta-generator registry.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub struct ScaffoldError {
    pub framework: String,
    /// Joined command line; empty when no command was run.
    pub command: String,
    /// Process exit code; `-1` when the process never started or was killed.
    pub exit_code: i32,
    /// At most the last [`STDERR_TAIL_LINES`] lines of the child's stderr.
    pub stderr: String,
}

impl ScaffoldError {
    /// No plugin is registered for `framework`.
    pub fn registry_miss(framework: impl Into<String>) -> Self {
        Self {
            framework: framework.into(),
            command: String::new(),
            exit_code: -1,
            stderr: "no generator registered for framework".into(),
        }
    }

    /// A command failed. `stderr` is truncated to its last lines.
    pub fn process_failure(
        framework: impl Into<String>,
        command: impl Into<String>,
        exit_code: i32,
        stderr: &str,
    ) -> Self {
        Self {
            framework: framework.into(),
            command: command.into(),
            exit_code,
            stderr: tail_lines(stderr, STDERR_TAIL_LINES),
        }
    }

    pub fn is_registry_miss(&self) -> bool {
        self.command.is_empty() && self.exit_code == -1
    }

    pub fn suggestions(&self) -> Vec<String> {
        if self.is_registry_miss() {
            return vec!["Run `kiln frameworks` to list supported frameworks".into()];
        }
        let mut out = vec![format!("Re-run the command by hand to inspect it: {}", self.command)];
        if self.exit_code == -1 {
            out.push("The command could not start or timed out; check your network and PATH".into());
        }
        out
    }
}

impl fmt::Display for ScaffoldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_registry_miss() {
            return write!(f, "{}: {}", self.framework, self.stderr);
        }
        write!(
            f,
            "{} scaffolding failed (exit {}): {}",
            self.framework, self.exit_code, self.command
        )?;
        if !self.stderr.is_empty() {
            write!(f, "\n{}", self.stderr)?;
        }
        Ok(())
    }
}

fn tail_lines(text: &str, max: usize) -> String {
    let lines: Vec<&str> = text.lines().collect();
    let start = lines.len().saturating_sub(max);
    lines[start..].join("\n")
}
