//! The `ProjectConfig` value object and its typestate builder.
//!
//! A `ProjectConfig` is the fully-validated description of the project the
//! user wants generated. It is built once per run by the caller and never
//! mutated afterwards; every component receives it by shared reference.
//!
//! # Typestate builder
//!
//! The builder uses two phantom marker types (`NoFramework` / `HasFramework`)
//! so that a framework must be chosen before the framework-dependent options
//! can be set. Cross-field invariants are still checked in `build()`.
//!
//! # Domain purity
//!
//! This module must not import `tracing`.

use std::fmt;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use crate::domain::{
    capabilities,
    error::DomainError,
    value_objects::{
        DataFetching, Framework, Language, Linting, PackageManager, Routing, StateManagement,
        Structure, Styling, Testing,
    },
};

// ── Value object ──────────────────────────────────────────────────────────────

/// A validated, immutable generation request.
///
/// Guarantees on construction:
/// - `project_name` matches `[A-Za-z0-9_-]+`
/// - `project_path`, when present, is absolute
/// - routing, state management and data fetching pair with the framework
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectConfig {
    project_name: String,
    project_path: Option<PathBuf>,
    language: Language,
    framework: Framework,
    package_manager: PackageManager,
    styling: Styling,
    routing: Routing,
    testing: Testing,
    state_management: StateManagement,
    data_fetching: DataFetching,
    structure: Structure,
    linting: Linting,
    dry_run: bool,
    no_scaffold: bool,
}

impl ProjectConfig {
    /// Start building a config for `project_name`.
    pub fn builder(project_name: impl Into<String>) -> ProjectConfigBuilder<NoFramework> {
        ProjectConfigBuilder::new(project_name.into())
    }

    pub fn project_name(&self) -> &str {
        &self.project_name
    }
    /// Explicit project directory, if the caller supplied one.
    pub fn project_path(&self) -> Option<&Path> {
        self.project_path.as_deref()
    }
    pub const fn language(&self) -> Language {
        self.language
    }
    pub const fn framework(&self) -> Framework {
        self.framework
    }
    pub const fn package_manager(&self) -> PackageManager {
        self.package_manager
    }
    pub const fn styling(&self) -> Styling {
        self.styling
    }
    pub const fn routing(&self) -> Routing {
        self.routing
    }
    pub const fn testing(&self) -> Testing {
        self.testing
    }
    pub const fn state_management(&self) -> StateManagement {
        self.state_management
    }
    pub const fn data_fetching(&self) -> DataFetching {
        self.data_fetching
    }
    pub const fn structure(&self) -> Structure {
        self.structure
    }
    pub const fn linting(&self) -> Linting {
        self.linting
    }
    pub const fn dry_run(&self) -> bool {
        self.dry_run
    }
    pub const fn no_scaffold(&self) -> bool {
        self.no_scaffold
    }

    /// Re-check every invariant.
    pub fn validate(&self) -> Result<(), DomainError> {
        validate_project_name(&self.project_name)?;

        if let Some(path) = &self.project_path {
            if !path.is_absolute() {
                return Err(DomainError::RelativeProjectPath {
                    path: path.display().to_string(),
                });
            }
        }

        if let Err(reason) = capabilities::validate_routing(self.framework, self.routing) {
            return Err(DomainError::IncompatibleOption {
                axis: Routing::AXIS,
                value: self.routing.to_string(),
                framework: self.framework.to_string(),
                reason,
            });
        }

        if let Err(reason) = capabilities::validate_state(self.framework, self.state_management) {
            return Err(DomainError::IncompatibleOption {
                axis: StateManagement::AXIS,
                value: self.state_management.to_string(),
                framework: self.framework.to_string(),
                reason,
            });
        }

        if let Err(reason) = capabilities::validate_data_fetching(self.framework, self.data_fetching)
        {
            return Err(DomainError::IncompatibleOption {
                axis: DataFetching::AXIS,
                value: self.data_fetching.to_string(),
                framework: self.framework.to_string(),
                reason,
            });
        }

        Ok(())
    }
}

impl fmt::Display for ProjectConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} + {}, {})",
            self.project_name, self.framework, self.language, self.package_manager
        )
    }
}

/// Check a project name against `[A-Za-z0-9_-]+`.
pub fn validate_project_name(name: &str) -> Result<(), DomainError> {
    if name.is_empty() {
        return Err(DomainError::InvalidProjectName {
            name: name.into(),
            reason: "name cannot be empty".into(),
        });
    }
    if let Some(bad) = name
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || *c == '-' || *c == '_'))
    {
        return Err(DomainError::InvalidProjectName {
            name: name.into(),
            reason: format!("character '{bad}' is not allowed"),
        });
    }
    Ok(())
}

// ── Typestate markers ─────────────────────────────────────────────────────────

/// Marker: framework has not yet been chosen.
pub struct NoFramework;
/// Marker: framework chosen; dependent options may now be set.
pub struct HasFramework;

// ── Builder ───────────────────────────────────────────────────────────────────

/// Typestate builder for [`ProjectConfig`].
pub struct ProjectConfigBuilder<F> {
    project_name: String,
    project_path: Option<PathBuf>,
    language: Language,
    framework: Option<Framework>,
    package_manager: PackageManager,
    styling: Styling,
    routing: Routing,
    testing: Testing,
    state_management: StateManagement,
    data_fetching: DataFetching,
    structure: Structure,
    linting: Linting,
    dry_run: bool,
    no_scaffold: bool,
    _marker: PhantomData<F>,
}

impl<F> ProjectConfigBuilder<F> {
    /// Place the project at an explicit absolute directory.
    pub fn project_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.project_path = Some(path.into());
        self
    }

    pub fn language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    pub fn package_manager(mut self, package_manager: PackageManager) -> Self {
        self.package_manager = package_manager;
        self
    }

    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Skip the upstream scaffold step of a meta framework (diagnostics only).
    pub fn no_scaffold(mut self, no_scaffold: bool) -> Self {
        self.no_scaffold = no_scaffold;
        self
    }
}

impl ProjectConfigBuilder<NoFramework> {
    fn new(project_name: String) -> Self {
        Self {
            project_name,
            project_path: None,
            language: Language::default(),
            framework: None,
            package_manager: PackageManager::default(),
            styling: Styling::default(),
            routing: Routing::default(),
            testing: Testing::default(),
            state_management: StateManagement::default(),
            data_fetching: DataFetching::default(),
            structure: Structure::default(),
            linting: Linting::default(),
            dry_run: false,
            no_scaffold: false,
            _marker: PhantomData,
        }
    }

    /// Choose the framework. This transitions the builder to `HasFramework`.
    pub fn framework(self, framework: Framework) -> ProjectConfigBuilder<HasFramework> {
        ProjectConfigBuilder {
            project_name: self.project_name,
            project_path: self.project_path,
            language: self.language,
            framework: Some(framework),
            package_manager: self.package_manager,
            styling: self.styling,
            routing: self.routing,
            testing: self.testing,
            state_management: self.state_management,
            data_fetching: self.data_fetching,
            structure: self.structure,
            linting: self.linting,
            dry_run: self.dry_run,
            no_scaffold: self.no_scaffold,
            _marker: PhantomData,
        }
    }
}

impl ProjectConfigBuilder<HasFramework> {
    pub fn styling(mut self, styling: Styling) -> Self {
        self.styling = styling;
        self
    }

    pub fn routing(mut self, routing: Routing) -> Self {
        self.routing = routing;
        self
    }

    pub fn testing(mut self, testing: Testing) -> Self {
        self.testing = testing;
        self
    }

    pub fn state_management(mut self, state_management: StateManagement) -> Self {
        self.state_management = state_management;
        self
    }

    pub fn data_fetching(mut self, data_fetching: DataFetching) -> Self {
        self.data_fetching = data_fetching;
        self
    }

    pub fn structure(mut self, structure: Structure) -> Self {
        self.structure = structure;
        self
    }

    pub fn linting(mut self, linting: Linting) -> Self {
        self.linting = linting;
        self
    }

    /// Build and validate the config.
    pub fn build(self) -> Result<ProjectConfig, DomainError> {
        let framework = self
            .framework
            .expect("typestate guarantees framework is set");

        let config = ProjectConfig {
            project_name: self.project_name,
            project_path: self.project_path,
            language: self.language,
            framework,
            package_manager: self.package_manager,
            styling: self.styling,
            routing: self.routing,
            testing: self.testing,
            state_management: self.state_management,
            data_fetching: self.data_fetching,
            structure: self.structure,
            linting: self.linting,
            dry_run: self.dry_run,
            no_scaffold: self.no_scaffold,
        };

        config.validate()?;
        Ok(config)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
