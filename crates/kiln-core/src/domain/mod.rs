//! Core domain layer for Kiln.
//!
//! This module contains pure business logic with no I/O. Filesystem access,
//! template rendering and process execution are handled via ports (traits)
//! defined in the application layer.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No async**: Domain logic is synchronous
//! - **No I/O**: No filesystem, network, or external calls
//! - **No logging**: `tracing` stays in the application layer
//! - **Immutable values**: `ProjectConfig` is built once and never mutated
//!
// Public API - what the world sees
pub mod capabilities;
pub mod entities;
pub mod error;
pub mod value_objects;

mod validation;

// Re-exports for convenience
pub use entities::{
    common::RelativePath,
    diagnostics::{CheckResult, PreflightReport, ValidationFinding},
    dry_run::{DryRunEntry, DryRunManifest},
    generation_plan::{Artifact, GenerationPlan, Stage},
    option_matrix::OptionMatrix,
    project_config::{
        HasFramework, NoFramework, ProjectConfig, ProjectConfigBuilder, validate_project_name,
    },
};

pub use error::{DomainError, ErrorCategory};

pub use value_objects::{
    DataFetching, Framework, Language, Linting, PackageManager, Routing, StateManagement,
    Structure, Styling, Testing,
};

pub use validation::DomainValidator;

#[cfg(test)]
mod tests {
    use super::*;

    // ========================================================================
    // Cross-module Tests
    // ========================================================================

    #[test]
    fn every_non_meta_framework_builds_with_defaults() {
        for fw in Framework::ALL.iter().filter(|f| !f.is_meta()) {
            let config = ProjectConfig::builder("app").framework(*fw).build();
            assert!(config.is_ok(), "defaults rejected for {fw}");
        }
    }

    #[test]
    fn validator_delegates_to_config_invariants() {
        let config = ProjectConfig::builder("app")
            .framework(Framework::Vue)
            .build()
            .unwrap();
        assert!(DomainValidator::validate_config(&config).is_ok());
    }

    #[test]
    fn validator_rejects_plan_with_repeated_path() {
        let mut plan = GenerationPlan::new();
        plan.push(Stage::Manifest, vec![Artifact::file("package.json", "{}")]);
        plan.push(Stage::Linting, vec![Artifact::file("package.json", "{}")]);
        assert!(matches!(
            DomainValidator::validate_plan(&plan),
            Err(DomainError::DuplicatePath { .. })
        ));
    }

    #[test]
    fn validator_checks_option_matrix() {
        let config = ProjectConfig::builder("site")
            .framework(Framework::Astro)
            .testing(Testing::Jest)
            .build()
            .unwrap();
        let matrix = OptionMatrix {
            testing: Some(&[Testing::None, Testing::Vitest]),
            ..OptionMatrix::hidden()
        };
        assert!(DomainValidator::validate_options(&matrix, &config).is_err());
    }
}
