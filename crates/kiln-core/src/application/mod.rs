//! Application layer for Kiln.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (`Generator`, `Registry`)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! business rules itself. Those live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

pub use services::{
    CreatedPaths, GenerationMode, GenerationReport, Generator, Registry, resolve_project_dir,
};

// Re-export port traits (for adapter implementation)
pub use ports::{
    CommandSpec, Filesystem, MetaGenerator, Preflight, ProcessRunner, ProjectValidator,
    TemplateRenderer,
};

pub use error::{ApplicationError, STDERR_TAIL_LINES, ScaffoldError};
