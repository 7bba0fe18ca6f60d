//! Template rendering for the built-in (Vite-based) frameworks.

mod builtin;
pub mod packages;
mod sources;
pub mod versions;

pub use builtin::BuiltinRenderer;

pub(crate) use builtin::to_pretty_json;
