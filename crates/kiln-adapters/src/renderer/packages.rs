//! The npm packages and scripts a configuration implies.

use kiln_core::domain::{
    DataFetching, Framework, Linting, ProjectConfig, Routing, StateManagement, Styling, Testing,
};

use super::versions::version;

/// `dependencies`, `devDependencies` and `scripts` entries, in the order
/// they should appear in a manifest.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Packages {
    pub dependencies: Vec<(String, String)>,
    pub dev_dependencies: Vec<(String, String)>,
    pub scripts: Vec<(String, String)>,
}

impl Packages {
    fn dep(&mut self, name: &str) {
        push_unique(&mut self.dependencies, name, version(name));
    }

    fn dev(&mut self, name: &str) {
        push_unique(&mut self.dev_dependencies, name, version(name));
    }

    fn script(&mut self, name: &str, command: &str) {
        push_unique(&mut self.scripts, name, command);
    }

    fn sorted(mut self) -> Self {
        self.dependencies.sort();
        self.dev_dependencies.sort();
        self
    }

    pub fn is_empty(&self) -> bool {
        self.dependencies.is_empty() && self.dev_dependencies.is_empty() && self.scripts.is_empty()
    }
}

fn push_unique(list: &mut Vec<(String, String)>, name: &str, value: &str) {
    if !list.iter().any(|(n, _)| n == name) {
        list.push((name.to_string(), value.to_string()));
    }
}

/// Everything a built-in Vite project needs.
pub fn builtin_packages(config: &ProjectConfig) -> Packages {
    let mut p = Packages::default();
    let ts = config.language().is_typescript();
    let fw = config.framework();

    p.script("dev", "vite");
    p.script("build", build_script(config));
    p.script("preview", "vite preview");
    if fw == Framework::Svelte && ts {
        p.script("check", "svelte-check --tsconfig ./tsconfig.json");
    }

    p.dev("vite");
    if ts {
        p.dev("typescript");
    }

    match fw {
        Framework::React => {
            p.dep("react");
            p.dep("react-dom");
            p.dev("@vitejs/plugin-react");
            if ts {
                p.dev("@types/react");
                p.dev("@types/react-dom");
            }
        }
        Framework::Vue => {
            p.dep("vue");
            p.dev("@vitejs/plugin-vue");
            if ts {
                p.dev("vue-tsc");
            }
        }
        Framework::Svelte => {
            p.dev("svelte");
            p.dev("@sveltejs/vite-plugin-svelte");
            if ts {
                p.dev("svelte-check");
            }
        }
        Framework::Solid => {
            p.dep("solid-js");
            p.dev("vite-plugin-solid");
        }
        Framework::Preact => {
            p.dep("preact");
            p.dev("@preact/preset-vite");
        }
        Framework::Vanilla | Framework::NextJs | Framework::Astro | Framework::SvelteKit => {}
    }

    match config.routing() {
        Routing::None => {}
        Routing::ReactRouter => p.dep("react-router-dom"),
        Routing::TanStackRouter if fw == Framework::Solid => p.dep("@tanstack/solid-router"),
        Routing::TanStackRouter => p.dep("@tanstack/react-router"),
        Routing::VueRouter => p.dep("vue-router"),
    }

    add_selections(&mut p, config);
    add_linting(&mut p, config);
    p.sorted()
}

/// Extras a meta-framework project needs on top of what its upstream
/// scaffolder produced: state, data fetching, testing and styling.
pub fn selection_packages(config: &ProjectConfig) -> Packages {
    let mut p = Packages::default();
    add_selections(&mut p, config);
    p.sorted()
}

fn build_script(config: &ProjectConfig) -> &'static str {
    if !config.language().is_typescript() {
        return "vite build";
    }
    match config.framework() {
        Framework::Vue => "vue-tsc --noEmit && vite build",
        Framework::Svelte => "vite build",
        _ => "tsc && vite build",
    }
}

fn add_selections(p: &mut Packages, config: &ProjectConfig) {
    let fw = config.framework();
    let ts = config.language().is_typescript();

    match config.state_management() {
        StateManagement::None => {}
        StateManagement::Zustand => p.dep("zustand"),
        StateManagement::Redux => {
            p.dep("@reduxjs/toolkit");
            p.dep("react-redux");
        }
        StateManagement::Jotai => p.dep("jotai"),
        StateManagement::Pinia => p.dep("pinia"),
    }

    match config.data_fetching() {
        DataFetching::None => {}
        DataFetching::TanStackQuery => p.dep(query_package(fw)),
        DataFetching::Swr => p.dep("swr"),
    }

    match config.testing() {
        Testing::None => {}
        Testing::Vitest => {
            p.dev("vitest");
            p.dev("jsdom");
            if let Some(lib) = testing_library(fw) {
                p.dev(lib);
            }
            if fw == Framework::NextJs {
                p.dev("@vitejs/plugin-react");
            }
            p.script("test", "vitest");
        }
        Testing::Jest => {
            p.dev("jest");
            p.dev("jest-environment-jsdom");
            if ts {
                p.dev("ts-jest");
                p.dev("@types/jest");
            }
            if let Some(lib) = testing_library(fw) {
                p.dev(lib);
            }
            p.script("test", "jest");
        }
        Testing::Playwright => {
            p.dev("@playwright/test");
            p.script("test:e2e", "playwright test");
        }
    }

    // Next.js wires its styling through create-next-app flags.
    if fw != Framework::NextJs {
        match config.styling() {
            Styling::Css | Styling::CssModules => {}
            Styling::Tailwind => {
                p.dev("tailwindcss");
                p.dev("@tailwindcss/vite");
            }
            Styling::Sass => p.dev("sass"),
        }
    }
}

fn add_linting(p: &mut Packages, config: &ProjectConfig) {
    match config.linting() {
        Linting::None => {}
        Linting::Eslint => {
            p.dev("eslint");
            p.dev("@eslint/js");
            p.dev("globals");
            if config.language().is_typescript() {
                p.dev("typescript-eslint");
            }
            match config.framework() {
                Framework::React | Framework::Preact => p.dev("eslint-plugin-react-hooks"),
                Framework::Vue => p.dev("eslint-plugin-vue"),
                Framework::Svelte => p.dev("eslint-plugin-svelte"),
                Framework::Solid => p.dev("eslint-plugin-solid"),
                _ => {}
            }
            p.script("lint", "eslint .");
        }
        Linting::Biome => {
            p.dev("@biomejs/biome");
            p.script("lint", "biome lint .");
            p.script("format", "biome format --write .");
        }
    }
}

/// TanStack Query binding for a framework.
pub fn query_package(framework: Framework) -> &'static str {
    match framework {
        Framework::React | Framework::Preact | Framework::NextJs => "@tanstack/react-query",
        Framework::Vue => "@tanstack/vue-query",
        Framework::Svelte | Framework::SvelteKit => "@tanstack/svelte-query",
        Framework::Solid => "@tanstack/solid-query",
        Framework::Vanilla | Framework::Astro => "@tanstack/query-core",
    }
}

fn testing_library(framework: Framework) -> Option<&'static str> {
    match framework {
        Framework::React | Framework::NextJs => Some("@testing-library/react"),
        Framework::Vue => Some("@testing-library/vue"),
        Framework::Svelte | Framework::SvelteKit => Some("@testing-library/svelte"),
        Framework::Solid => Some("@solidjs/testing-library"),
        Framework::Preact => Some("@testing-library/preact"),
        Framework::Vanilla | Framework::Astro => None,
    }
}
