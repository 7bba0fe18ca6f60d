// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (carried inside `KilnError`, which is `Clone`)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors
    // ========================================================================
    #[error("invalid project name '{name}': {reason}")]
    InvalidProjectName { name: String, reason: String },

    #[error("project path must be absolute: {path}")]
    RelativeProjectPath { path: String },

    #[error("Absolute paths not allowed in a generation plan: {path}")]
    AbsolutePathNotAllowed { path: String },

    #[error("Duplicate path in generation plan: {path}")]
    DuplicatePath { path: String },

    #[error("unknown {axis}: '{value}'")]
    UnknownValue { axis: &'static str, value: String },

    // ========================================================================
    // Compatibility Errors
    // ========================================================================
    #[error("{axis} '{value}' cannot be used with {framework}: {reason}")]
    IncompatibleOption {
        axis: &'static str,
        value: String,
        framework: String,
        reason: String,
    },

    #[error("{framework} does not support {axis} '{value}'")]
    UnsupportedOption {
        axis: &'static str,
        value: String,
        framework: String,
        /// Labels the framework does accept; empty when the axis is hidden.
        available: Vec<&'static str>,
    },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidProjectName { .. } => vec![
                "Use letters, digits, hyphens and underscores only".into(),
                "Examples: my-app, my_app, app2".into(),
            ],
            Self::RelativeProjectPath { path } => vec![
                format!("Resolve '{path}' against the working directory first"),
            ],
            Self::UnknownValue { axis, .. } => vec![
                format!("Run `kiln new --help` to see the accepted {axis} values"),
            ],
            Self::IncompatibleOption { axis, framework, .. } => vec![
                format!("Pick a {axis} that targets {framework}"),
                "Or choose `none` for this option".into(),
            ],
            Self::UnsupportedOption {
                axis,
                framework,
                available,
                ..
            } => {
                if available.is_empty() {
                    vec![format!(
                        "{framework} does not expose a {axis} choice; leave it at its default"
                    )]
                } else {
                    vec![format!(
                        "{framework} supports {axis}: {}",
                        available.join(", ")
                    )]
                }
            }
            Self::AbsolutePathNotAllowed { .. } | Self::DuplicatePath { .. } => vec![
                "The template set produced an invalid plan".into(),
                "Please report this issue".into(),
            ],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidProjectName { .. }
            | Self::RelativeProjectPath { .. }
            | Self::UnknownValue { .. } => ErrorCategory::Validation,
            Self::IncompatibleOption { .. } | Self::UnsupportedOption { .. } => {
                ErrorCategory::Compatibility
            }
            Self::AbsolutePathNotAllowed { .. } | Self::DuplicatePath { .. } => {
                ErrorCategory::Internal
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Compatibility,
    Internal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hidden_axis_suggestion_mentions_default() {
        let err = DomainError::UnsupportedOption {
            axis: "state management",
            value: "zustand".into(),
            framework: "astro".into(),
            available: vec![],
        };
        assert!(err.suggestions()[0].contains("default"));
        assert_eq!(err.category(), ErrorCategory::Compatibility);
    }

    #[test]
    fn supported_list_is_rendered() {
        let err = DomainError::UnsupportedOption {
            axis: "styling",
            value: "sass".into(),
            framework: "nextjs".into(),
            available: vec!["css", "tailwind"],
        };
        assert!(err.suggestions()[0].contains("css, tailwind"));
    }
}
