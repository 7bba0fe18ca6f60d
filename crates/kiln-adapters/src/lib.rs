//! Infrastructure adapters for kiln.
//!
//! This crate implements the ports defined in `kiln_core::application::ports`.
//! It owns every external dependency: the filesystem, child processes, the
//! built-in templates and the meta-framework plugins.

pub mod filesystem;
pub mod meta;
pub mod package_manifest;
pub mod preflight;
pub mod process;
pub mod renderer;
pub mod validator;

// Re-export commonly used adapters
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use meta::default_registry;
pub use package_manifest::merge_package_manifest;
pub use preflight::SystemPreflight;
pub use process::SystemProcessRunner;
pub use renderer::BuiltinRenderer;
pub use validator::BasicValidator;
