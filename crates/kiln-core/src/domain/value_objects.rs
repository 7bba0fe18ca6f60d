//! Domain value objects: Language, Framework, PackageManager and the
//! per-axis option enums (styling, routing, testing, ...).
//!
//! # Design
//!
//! These are pure `Copy` value types with no identity.
//! They hold NO compatibility logic. Which options pair with which
//! framework lives in `capabilities.rs`. This file's only job is to define
//! the types, their string representations, and their `FromStr` parsers.
//!
//! # Adding New Variants
//!
//! 1. Add the enum variant here (label + aliases)
//! 2. Add a capability entry in `capabilities.rs` if it only pairs with
//!    some frameworks
//! 3. Teach the renderer in `kiln-adapters` what to emit for it

use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ── Language ─────────────────────────────────────────────────────────────────

/// Source language of the generated project.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    TypeScript,
    JavaScript,
}

impl Language {
    pub const ALL: &'static [Self] = &[Self::TypeScript, Self::JavaScript];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::TypeScript => "typescript",
            Self::JavaScript => "javascript",
        }
    }

    /// Extension for plain modules (`ts` / `js`).
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::TypeScript => "ts",
            Self::JavaScript => "js",
        }
    }

    /// Extension for JSX modules (`tsx` / `jsx`).
    pub const fn jsx_extension(&self) -> &'static str {
        match self {
            Self::TypeScript => "tsx",
            Self::JavaScript => "jsx",
        }
    }

    pub const fn is_typescript(&self) -> bool {
        matches!(self, Self::TypeScript)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "typescript" | "ts" => Ok(Self::TypeScript),
            "javascript" | "js" => Ok(Self::JavaScript),
            other => Err(DomainError::UnknownValue {
                axis: "language",
                value: other.to_string(),
            }),
        }
    }
}

// ── Framework ─────────────────────────────────────────────────────────────────

/// A frontend framework.
///
/// Meta frameworks ship their own scaffolding CLI and are generated by
/// delegation to a registered plugin; everything else is rendered from the
/// built-in Vite templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Framework {
    React,
    Vue,
    Svelte,
    Solid,
    Preact,
    Vanilla,
    NextJs,
    Astro,
    SvelteKit,
}

impl Framework {
    pub const ALL: &'static [Self] = &[
        Self::React,
        Self::Vue,
        Self::Svelte,
        Self::Solid,
        Self::Preact,
        Self::Vanilla,
        Self::NextJs,
        Self::Astro,
        Self::SvelteKit,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::React => "react",
            Self::Vue => "vue",
            Self::Svelte => "svelte",
            Self::Solid => "solid",
            Self::Preact => "preact",
            Self::Vanilla => "vanilla",
            Self::NextJs => "nextjs",
            Self::Astro => "astro",
            Self::SvelteKit => "sveltekit",
        }
    }

    /// Human-facing name, as the upstream project spells it.
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::React => "React",
            Self::Vue => "Vue",
            Self::Svelte => "Svelte",
            Self::Solid => "Solid",
            Self::Preact => "Preact",
            Self::Vanilla => "Vanilla",
            Self::NextJs => "Next.js",
            Self::Astro => "Astro",
            Self::SvelteKit => "SvelteKit",
        }
    }

    /// Whether this framework is generated by an upstream CLI.
    pub const fn is_meta(&self) -> bool {
        matches!(self, Self::NextJs | Self::Astro | Self::SvelteKit)
    }
}

impl fmt::Display for Framework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Framework {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "react" => Ok(Self::React),
            "vue" => Ok(Self::Vue),
            "svelte" => Ok(Self::Svelte),
            "solid" | "solidjs" => Ok(Self::Solid),
            "preact" => Ok(Self::Preact),
            "vanilla" => Ok(Self::Vanilla),
            "nextjs" | "next" | "next.js" => Ok(Self::NextJs),
            "astro" => Ok(Self::Astro),
            "sveltekit" | "kit" => Ok(Self::SvelteKit),
            other => Err(DomainError::UnknownValue {
                axis: "framework",
                value: other.to_string(),
            }),
        }
    }
}

// ── PackageManager ────────────────────────────────────────────────────────────

/// The package manager used for installs and one-off package execution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageManager {
    #[default]
    Npm,
    Pnpm,
    Yarn,
    Bun,
}

impl PackageManager {
    pub const ALL: &'static [Self] = &[Self::Npm, Self::Pnpm, Self::Yarn, Self::Bun];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Npm => "npm",
            Self::Pnpm => "pnpm",
            Self::Yarn => "yarn",
            Self::Bun => "bun",
        }
    }

    /// Binary name probed on PATH.
    pub const fn binary(&self) -> &'static str {
        self.as_str()
    }

    /// Program plus leading arguments that execute a package without
    /// installing it (`npx`, `pnpm dlx`, `yarn dlx`, `bunx`).
    pub const fn exec(&self) -> (&'static str, &'static [&'static str]) {
        match self {
            Self::Npm => ("npx", &[]),
            Self::Pnpm => ("pnpm", &["dlx"]),
            Self::Yarn => ("yarn", &["dlx"]),
            Self::Bun => ("bunx", &[]),
        }
    }

    /// Shell form of running a `package.json` script, for next-step hints.
    pub fn run_script(&self, script: &str) -> String {
        match self {
            Self::Npm => format!("npm run {script}"),
            Self::Pnpm => format!("pnpm {script}"),
            Self::Yarn => format!("yarn {script}"),
            Self::Bun => format!("bun run {script}"),
        }
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PackageManager {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "npm" => Ok(Self::Npm),
            "pnpm" => Ok(Self::Pnpm),
            "yarn" => Ok(Self::Yarn),
            "bun" => Ok(Self::Bun),
            other => Err(DomainError::UnknownValue {
                axis: "package manager",
                value: other.to_string(),
            }),
        }
    }
}

// ── Option axes ───────────────────────────────────────────────────────────────

/// Declares a selectable option axis: the enum, its labels and aliases, its
/// default, `ALL`, `Display` and `FromStr`.
macro_rules! option_axis {
    (
        $(#[$meta:meta])*
        $name:ident, axis = $axis:literal, default = $default:ident {
            $( $variant:ident => $label:literal $(| $alias:literal)* ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $( #[serde(rename = $label)] $variant, )+
        }

        impl $name {
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];
            pub const AXIS: &'static str = $axis;

            pub const fn as_str(&self) -> &'static str {
                match self {
                    $( Self::$variant => $label, )+
                }
            }

            pub const fn is_default(&self) -> bool {
                matches!(self, Self::$default)
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::$default
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.to_ascii_lowercase().as_str() {
                    $( $label $(| $alias)* => Ok(Self::$variant), )+
                    other => Err(DomainError::UnknownValue {
                        axis: $axis,
                        value: other.to_string(),
                    }),
                }
            }
        }
    };
}

option_axis! {
    /// How component styles are authored.
    Styling, axis = "styling", default = Css {
        Css => "css" | "plain",
        CssModules => "css-modules" | "modules",
        Tailwind => "tailwind" | "tailwindcss",
        Sass => "sass" | "scss",
    }
}

option_axis! {
    /// Client-side router for single-page frameworks.
    Routing, axis = "routing", default = None {
        None => "none",
        ReactRouter => "react-router",
        TanStackRouter => "tanstack-router",
        VueRouter => "vue-router",
    }
}

option_axis! {
    /// Test runner scaffolding.
    Testing, axis = "testing", default = None {
        None => "none",
        Vitest => "vitest",
        Jest => "jest",
        Playwright => "playwright",
    }
}

option_axis! {
    /// Client state library.
    StateManagement, axis = "state management", default = None {
        None => "none",
        Zustand => "zustand",
        Redux => "redux" | "redux-toolkit",
        Jotai => "jotai",
        Pinia => "pinia",
    }
}

option_axis! {
    /// Server-state / data-fetching library.
    DataFetching, axis = "data fetching", default = None {
        None => "none",
        TanStackQuery => "tanstack-query" | "react-query",
        Swr => "swr",
    }
}

option_axis! {
    /// Source tree layout.
    Structure, axis = "structure", default = Flat {
        Flat => "flat",
        FeatureBased => "feature-based" | "features",
    }
}

option_axis! {
    /// Linter / formatter scaffolding.
    Linting, axis = "linting", default = Eslint {
        None => "none",
        Eslint => "eslint",
        Biome => "biome",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn framework_aliases_parse() {
        assert_eq!("next".parse::<Framework>().unwrap(), Framework::NextJs);
        assert_eq!("Next.js".parse::<Framework>().unwrap(), Framework::NextJs);
        assert_eq!("kit".parse::<Framework>().unwrap(), Framework::SvelteKit);
    }

    #[test]
    fn only_upstream_generated_frameworks_are_meta() {
        let meta: Vec<_> = Framework::ALL.iter().filter(|f| f.is_meta()).collect();
        assert_eq!(
            meta,
            [&Framework::NextJs, &Framework::Astro, &Framework::SvelteKit]
        );
    }

    #[test]
    fn option_labels_round_trip_through_from_str() {
        for styling in Styling::ALL {
            assert_eq!(styling.as_str().parse::<Styling>().unwrap(), *styling);
        }
        assert_eq!("scss".parse::<Styling>().unwrap(), Styling::Sass);
    }

    #[test]
    fn unknown_option_names_its_axis() {
        let err = "mobx".parse::<StateManagement>().unwrap_err();
        assert_eq!(
            err,
            DomainError::UnknownValue {
                axis: "state management",
                value: "mobx".into()
            }
        );
    }

    #[test]
    fn axis_defaults() {
        assert_eq!(Styling::default(), Styling::Css);
        assert_eq!(Linting::default(), Linting::Eslint);
        assert!(Testing::None.is_default());
        assert!(!Testing::Vitest.is_default());
    }

    #[test]
    fn package_manager_exec_forms() {
        assert_eq!(PackageManager::Npm.exec(), ("npx", &[][..]));
        assert_eq!(PackageManager::Pnpm.exec(), ("pnpm", &["dlx"][..]));
        assert_eq!(PackageManager::Bun.run_script("dev"), "bun run dev");
    }
}
