pub mod common;
pub mod diagnostics;
pub mod dry_run;
pub mod generation_plan;
pub mod option_matrix;
pub mod project_config;

pub use crate::domain::DomainError;
pub use dry_run::DryRunManifest;
pub use generation_plan::GenerationPlan;
pub use project_config::ProjectConfig;
