//! Framework capability registry.
//!
//! Each framework is described exactly once by its [`FrameworkDef`]: which
//! client router, state library and data-fetching library pair with it. All compatibility
//! checks are table lookups against [`FRAMEWORK_REGISTRY`].
//!
//! # Adding a New Framework
//!
//! 1. Add a variant to `Framework` in `value_objects.rs`
//! 2. Add one [`FrameworkDef`] entry to [`FRAMEWORK_REGISTRY`]
//! 3. If it is a meta framework, register a plugin in `kiln-adapters`

use crate::domain::value_objects::{DataFetching, Framework, Routing, StateManagement};

/// Everything the domain needs to know about one framework's pairings.
#[derive(Debug, Clone, Copy)]
pub struct FrameworkDef {
    pub framework: Framework,

    /// Client routers that can be wired in. `Routing::None` is always
    /// accepted and is not listed.
    pub routers: &'static [Routing],

    /// State libraries that target this framework. `StateManagement::None`
    /// is always accepted and is not listed.
    pub state_libraries: &'static [StateManagement],

    /// Data-fetching libraries with bindings for this framework.
    /// `DataFetching::None` is always accepted and is not listed.
    pub data_libraries: &'static [DataFetching],
}

const REACT_STATE: &[StateManagement] = &[
    StateManagement::Zustand,
    StateManagement::Redux,
    StateManagement::Jotai,
];

const REACT_DATA: &[DataFetching] = &[DataFetching::TanStackQuery, DataFetching::Swr];
const QUERY_ONLY: &[DataFetching] = &[DataFetching::TanStackQuery];

/// Single source of truth for framework pairings.
pub static FRAMEWORK_REGISTRY: &[FrameworkDef] = &[
    FrameworkDef {
        framework: Framework::React,
        routers: &[Routing::ReactRouter, Routing::TanStackRouter],
        state_libraries: REACT_STATE,
        data_libraries: REACT_DATA,
    },
    FrameworkDef {
        framework: Framework::Preact,
        routers: &[Routing::ReactRouter],
        state_libraries: &[StateManagement::Zustand, StateManagement::Jotai],
        data_libraries: REACT_DATA,
    },
    FrameworkDef {
        framework: Framework::Vue,
        routers: &[Routing::VueRouter],
        state_libraries: &[StateManagement::Pinia],
        data_libraries: QUERY_ONLY,
    },
    FrameworkDef {
        framework: Framework::Svelte,
        routers: &[],
        state_libraries: &[],
        data_libraries: QUERY_ONLY,
    },
    FrameworkDef {
        framework: Framework::Solid,
        routers: &[Routing::TanStackRouter],
        state_libraries: &[],
        data_libraries: QUERY_ONLY,
    },
    FrameworkDef {
        framework: Framework::Vanilla,
        routers: &[],
        state_libraries: &[StateManagement::Zustand],
        data_libraries: QUERY_ONLY,
    },
    // Meta frameworks route by filesystem convention.
    FrameworkDef {
        framework: Framework::NextJs,
        routers: &[],
        state_libraries: REACT_STATE,
        data_libraries: REACT_DATA,
    },
    FrameworkDef {
        framework: Framework::Astro,
        routers: &[],
        state_libraries: &[],
        data_libraries: &[],
    },
    FrameworkDef {
        framework: Framework::SvelteKit,
        routers: &[],
        state_libraries: &[],
        data_libraries: QUERY_ONLY,
    },
];

/// Look up the definition for a framework.
pub fn find_framework(framework: Framework) -> Option<&'static FrameworkDef> {
    FRAMEWORK_REGISTRY.iter().find(|d| d.framework == framework)
}

/// Check that `routing` can be wired into `framework`.
pub fn validate_routing(framework: Framework, routing: Routing) -> Result<(), String> {
    if routing == Routing::None {
        return Ok(());
    }
    if framework.is_meta() {
        return Err(format!(
            "{} uses file-based routing",
            framework.display_name()
        ));
    }
    match find_framework(framework) {
        Some(def) if def.routers.contains(&routing) => Ok(()),
        _ => Err(format!("{routing} does not target {}", framework.display_name())),
    }
}

/// Check that `state` targets `framework`.
pub fn validate_state(framework: Framework, state: StateManagement) -> Result<(), String> {
    if state == StateManagement::None {
        return Ok(());
    }
    match find_framework(framework) {
        Some(def) if def.state_libraries.contains(&state) => Ok(()),
        _ => Err(format!("{state} does not target {}", framework.display_name())),
    }
}

/// Check that `data` has bindings for `framework`.
pub fn validate_data_fetching(framework: Framework, data: DataFetching) -> Result<(), String> {
    if data == DataFetching::None {
        return Ok(());
    }
    match find_framework(framework) {
        Some(def) if def.data_libraries.contains(&data) => Ok(()),
        _ => Err(format!("{data} has no {} bindings", framework.display_name())),
    }
}
