//! Kiln Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the Kiln
//! frontend project generator, following hexagonal (ports and adapters)
//! architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │             kiln-cli (CLI)              │
//! │     (Implements Driving Ports)          │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │        (Generator, Registry)            │
//! │         Orchestrates Use Cases          │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │  (Filesystem, Renderer, ProcessRunner,  │
//! │   MetaGenerator, Validator, Preflight)  │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │     kiln-adapters (Infrastructure)      │
//! │ (LocalFilesystem, BuiltinRenderer, ...) │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │        Domain Layer (Pure Logic)        │
//! │ (ProjectConfig, GenerationPlan, DryRun) │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use kiln_core::prelude::*;
//!
//! // 1. Describe the project
//! let config = ProjectConfig::builder("my-app")
//!     .framework(Framework::React)
//!     .styling(Styling::Tailwind)
//!     .build()?;
//!
//! // 2. Run the generator (with injected adapters)
//! let generator = Generator::new(renderer, filesystem, validator, &registry);
//! let report = generator.generate(&config)?;
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        GenerationMode, GenerationReport, Generator, Registry, ScaffoldError,
        ports::{
            CommandSpec, Filesystem, MetaGenerator, Preflight, ProcessRunner, ProjectValidator,
            TemplateRenderer,
        },
    };
    pub use crate::domain::{
        DataFetching, DryRunManifest, Framework, Language, Linting, OptionMatrix, PackageManager,
        ProjectConfig, Routing, StateManagement, Structure, Styling, Testing,
    };
    pub use crate::error::{KilnError, KilnResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
