use crate::domain::{
    entities::{GenerationPlan, ProjectConfig, option_matrix::OptionMatrix},
    error::DomainError,
};

/// Centralized domain validation.
///
/// All validation logic lives here, not scattered across entities.
pub struct DomainValidator;

impl DomainValidator {
    pub fn validate_config(config: &ProjectConfig) -> Result<(), DomainError> {
        config.validate()
    }

    pub fn validate_plan(plan: &GenerationPlan) -> Result<(), DomainError> {
        plan.validate()
    }

    pub fn validate_options(
        matrix: &OptionMatrix,
        config: &ProjectConfig,
    ) -> Result<(), DomainError> {
        matrix.check(config)
    }
}
