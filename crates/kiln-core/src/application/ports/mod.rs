//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `kiln-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `Filesystem`: File operations
//!   - `TemplateRenderer`: Per-stage artifact rendering
//!   - `ProcessRunner`: External tool execution
//!   - `ProjectValidator`, `Preflight`: Diagnostics
//!   - `MetaGenerator`: Meta-framework plugins

pub mod output;

pub use output::{
    CommandSpec, Filesystem, MetaGenerator, Preflight, ProcessRunner, ProjectValidator,
    TemplateRenderer,
};

#[cfg(test)]
pub use output::{
    MockFilesystem, MockMetaGenerator, MockPreflight, MockProcessRunner, MockProjectValidator,
    MockTemplateRenderer,
};
