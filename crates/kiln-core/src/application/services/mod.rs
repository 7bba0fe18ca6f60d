//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "generate a project".

pub mod generator;
pub mod registry;
mod sink;

pub use generator::{GenerationMode, GenerationReport, Generator, resolve_project_dir};
pub use registry::Registry;
pub use sink::CreatedPaths;
